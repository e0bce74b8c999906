//! Uniform spatial grid for neighbor queries.
//!
//! The canvas is split into square cells; each cell holds snapshots of the
//! particles whose centers fall inside it. Points outside the canvas clamp
//! to the nearest edge cell, so every particle lives in exactly one cell.

use crate::core::math::Vec2;
use crate::domain::ids::ParticleId;

/// Cell size in pixels
pub const CELL_SIZE: f32 = 32.0;

/// Snapshot of a particle at index time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridEntry {
    pub id: ParticleId,
    pub position: Vec2,
    pub radius: f32,
}

pub struct SpatialGrid {
    cell_size: f32,
    cells_x: u32,
    cells_y: u32,
    cells: Vec<Vec<GridEntry>>,
    len: usize,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_cell_size(width, height, CELL_SIZE)
    }

    pub fn with_cell_size(width: f32, height: f32, cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { CELL_SIZE };
        let (cells_x, cells_y) = Self::cell_dimensions(width, height, cell_size);
        Self {
            cell_size,
            cells_x,
            cells_y,
            cells: vec![Vec::new(); (cells_x * cells_y) as usize],
            len: 0,
        }
    }

    fn cell_dimensions(width: f32, height: f32, cell_size: f32) -> (u32, u32) {
        let count = |extent: f32| {
            if extent.is_finite() && extent > 0.0 {
                ((extent / cell_size).ceil() as u32).max(1)
            } else {
                1
            }
        };
        (count(width), count(height))
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.cells_x, self.cells_y)
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of indexed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn cell_coord(&self, value: f32, cells: u32) -> u32 {
        // NaN maps to 0 through max
        ((value / self.cell_size).floor().max(0.0) as u32).min(cells - 1)
    }

    /// Cell coordinates for a point, clamped to the grid.
    #[inline]
    pub fn cell_coords(&self, point: Vec2) -> (u32, u32) {
        (self.cell_coord(point.x, self.cells_x), self.cell_coord(point.y, self.cells_y))
    }

    #[inline]
    pub fn cell_index(&self, point: Vec2) -> usize {
        let (cx, cy) = self.cell_coords(point);
        (cy * self.cells_x + cx) as usize
    }

    pub fn insert(&mut self, entry: GridEntry) {
        let idx = self.cell_index(entry.position);
        self.cells[idx].push(entry);
        self.len += 1;
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.len = 0;
    }

    /// Clears every cell and reinserts `entries`. Cell allocations are kept.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = GridEntry>,
    {
        self.clear();
        for entry in entries {
            self.insert(entry);
        }
    }

    /// Resizes to a new canvas. Entries are dropped; callers rebuild.
    pub fn resize(&mut self, width: f32, height: f32) {
        let (cells_x, cells_y) = Self::cell_dimensions(width, height, self.cell_size);
        self.cells_x = cells_x;
        self.cells_y = cells_y;
        self.cells = vec![Vec::new(); (cells_x * cells_y) as usize];
        self.len = 0;
    }

    /// Every entry in the cell containing `point`.
    #[inline]
    pub fn query_in_cell(&self, point: Vec2) -> &[GridEntry] {
        &self.cells[self.cell_index(point)]
    }

    /// Entries whose centers lie within `radius` of `point`.
    pub fn query_radius(&self, point: Vec2, radius: f32) -> Vec<GridEntry> {
        let mut found = Vec::new();
        if !(radius >= 0.0) {
            return found;
        }
        let (min_x, min_y) = self.cell_coords(Vec2::new(point.x - radius, point.y - radius));
        let (max_x, max_y) = self.cell_coords(Vec2::new(point.x + radius, point.y + radius));
        let radius_sq = radius * radius;
        for cy in min_y..=max_y {
            for cx in min_x..=max_x {
                let cell = &self.cells[(cy * self.cells_x + cx) as usize];
                found.extend(cell.iter().filter(|e| e.position.distance_squared(point) <= radius_sq));
            }
        }
        found
    }

    /// Entry count per cell, row-major.
    pub fn cell_counts(&self) -> Vec<usize> {
        self.cells.iter().map(Vec::len).collect()
    }

    pub fn max_cell_occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}
