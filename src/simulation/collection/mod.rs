//! Ordered set of live particles plus the spatial index that tracks them.

mod mutations;
mod update;

use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::ids::ParticleId;
use crate::spatial::grid::SpatialGrid;
use crate::systems::interactions::LinkLine;

use super::container::Container;
use super::particle::{OptionsCache, Particle};

/// Running totals since the last `take_counters`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionCounters {
    pub added: u32,
    pub removed: u32,
    pub rejected: u32,
}

pub struct ParticleCollection {
    array: Vec<Particle>,
    grid: SpatialGrid,
    next_id: u32,
    rng: Rng,
    options_cache: OptionsCache,
    links: Vec<LinkLine>,
    counters: CollectionCounters,
}

impl ParticleCollection {
    pub fn new(container: &Container, seed: u32) -> Self {
        let canvas = container.canvas();
        Self {
            array: Vec::new(),
            grid: SpatialGrid::new(canvas.width, canvas.height),
            next_id: 0,
            rng: Rng::new(seed),
            options_cache: OptionsCache::default(),
            links: Vec::new(),
            counters: CollectionCounters::default(),
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.array.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.array.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.array
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.array.get(index)
    }

    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.array.iter().position(|p| p.id == id)
    }

    pub fn find(&self, id: ParticleId) -> Option<&Particle> {
        self.array.iter().find(|p| p.id == id)
    }

    /// Ids of particles whose centers lie within `radius` of `point`.
    pub fn near(&self, point: Vec2, radius: f32) -> Vec<ParticleId> {
        self.grid.query_radius(point, radius).into_iter().map(|entry| entry.id).collect()
    }

    /// Lines produced by the last update pass.
    pub fn links(&self) -> &[LinkLine] {
        &self.links
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn take_counters(&mut self) -> CollectionCounters {
        std::mem::take(&mut self.counters)
    }

    /// Particle count `init` aims for: the configured number, or the
    /// density-derived count, capped by the limit.
    pub fn target_count(container: &Container) -> usize {
        let number = &container.options().particles.number;
        let mut target = number.value as usize;

        if number.density.enable && number.density.area > 0.0 {
            let canvas = container.canvas();
            let mut area = canvas.width * canvas.height / 1000.0;
            if container.options().detect_retina {
                area /= container.retina().pixel_ratio * 2.0;
            }
            target = (area * number.value as f32 / number.density.area) as usize;
        }

        if number.limit > 0 {
            target = target.min(number.limit as usize);
        }
        target
    }

    /// Re-snapshots every particle into the spatial index.
    fn reindex(&mut self) {
        self.grid.rebuild(self.array.iter().map(Particle::grid_entry));
    }

    pub fn resize(&mut self, container: &Container) {
        let canvas = container.canvas();
        self.grid.resize(canvas.width, canvas.height);
        self.reindex();
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.array
    }

    #[cfg(test)]
    pub(crate) fn cached_options(&self) -> usize {
        self.options_cache.len()
    }
}

impl<'a> IntoIterator for &'a ParticleCollection {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.array.iter()
    }
}
