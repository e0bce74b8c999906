//! Overlap resolution for particles with collisions enabled.
//!
//! A colliding particle is moved and retried until it fits. Two exits stop
//! the loop from spinning: when the cell scan already looked at as many
//! particles as are alive (the canvas is saturated around the point), and
//! when the retry budget runs out. Both drop the particle.

use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::ids::ParticleId;
use crate::spatial::grid::SpatialGrid;

use super::super::container::CanvasSize;
use super::particle::Particle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapReport {
    pub collision_found: bool,
    /// Candidates examined, the particle itself included when indexed.
    pub iterations: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapOutcome {
    Placed { relocations: u32 },
    Rejected,
}

pub fn is_overlapping(grid: &SpatialGrid, id: ParticleId, position: Vec2, radius: f32) -> OverlapReport {
    let mut iterations = 0;
    for entry in grid.query_in_cell(position) {
        iterations += 1;
        if entry.id == id {
            continue;
        }
        if position.distance(entry.position) <= radius + entry.radius {
            return OverlapReport { collision_found: true, iterations };
        }
    }
    OverlapReport { collision_found: false, iterations }
}

/// Relocates `particle` until it no longer collides. A fixed `position`
/// is reused on every retry; otherwise a random canvas point is drawn.
pub(crate) fn resolve_overlap(
    grid: &SpatialGrid,
    live_count: usize,
    particle: &mut Particle,
    position: Option<Vec2>,
    canvas: CanvasSize,
    rng: &mut Rng,
    max_retries: u32,
) -> OverlapOutcome {
    let mut relocations = 0;
    loop {
        let report = is_overlapping(grid, particle.id, particle.position, particle.size.value);
        if !report.collision_found {
            return OverlapOutcome::Placed { relocations };
        }
        if report.iterations >= live_count || relocations >= max_retries {
            log::debug!(
                "particle {:?} rejected after {} relocations ({} candidates, {} alive)",
                particle.id,
                relocations,
                report.iterations,
                live_count
            );
            return OverlapOutcome::Rejected;
        }
        particle.position = position.unwrap_or_else(|| canvas.random_point(rng));
        relocations += 1;
    }
}
