use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::options::PolygonMaskOptions;

/// Rejection-sampling attempts before falling back to a vertex.
const MAX_SAMPLES: usize = 256;

/// Closed polygon used to constrain spawning and movement.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonMask {
    points: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
}

impl PolygonMask {
    /// Needs at least three finite vertices.
    pub fn new(points: Vec<Vec2>) -> Option<Self> {
        if points.len() < 3 || !points.iter().all(Vec2::is_finite) {
            return None;
        }
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
            max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Self { points, min, max })
    }

    pub fn from_options(options: &PolygonMaskOptions, pixel_ratio: f32) -> Option<Self> {
        if !options.is_active() {
            return None;
        }
        let scale = options.scale * pixel_ratio;
        Self::new(options.points.iter().map(|p| *p * scale).collect())
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// Even-odd ray casting.
    pub fn contains(&self, point: Vec2) -> bool {
        if point.x < self.min.x || point.x > self.max.x || point.y < self.min.y || point.y > self.max.y {
            return false;
        }
        let mut inside = false;
        let mut j = self.points.len() - 1;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Uniform point inside the polygon, sampled from its bounding box.
    /// Degenerate polygons fall back to the first vertex.
    pub fn random_point_inside(&self, rng: &mut Rng) -> Vec2 {
        for _ in 0..MAX_SAMPLES {
            let candidate = Vec2::new(rng.range(self.min.x, self.max.x), rng.range(self.min.y, self.max.y));
            if self.contains(candidate) {
                return candidate;
            }
        }
        self.points[0]
    }
}
