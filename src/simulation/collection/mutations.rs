use crate::core::math::Vec2;
use crate::domain::ids::ParticleId;

use super::super::container::Container;
use super::super::emitter::Emitter;
use super::super::particle::{resolve_overlap, OverlapOutcome, Particle, SpawnContext};
use super::ParticleCollection;

impl ParticleCollection {
    /// Clears and repopulates to the target count.
    pub fn init(&mut self, container: &Container) {
        self.clear();
        self.options_cache.clear();

        let target = Self::target_count(container);
        for _ in 0..target {
            self.spawn(container, None, None);
        }
        log::info!("particles initialized: {} of {}", self.count(), target);
    }

    /// Adds one particle, evicting the oldest when at the limit. Returns
    /// `None` when overlap resolution drops it.
    pub fn add_particle(&mut self, container: &Container, position: Option<Vec2>) -> Option<&Particle> {
        let index = self.spawn(container, position, None)?;
        self.array.get(index)
    }

    pub(crate) fn add_emitted(&mut self, container: &Container, emitter: &Emitter, position: Vec2) -> Option<ParticleId> {
        let index = self.spawn(container, Some(position), Some(emitter))?;
        Some(self.array[index].id)
    }

    fn spawn(&mut self, container: &Container, position: Option<Vec2>, emitter: Option<&Emitter>) -> Option<usize> {
        let id = ParticleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let mut ctx = SpawnContext { container, rng: &mut self.rng, cache: &mut self.options_cache };
        let mut particle = Particle::new(&mut ctx, id, position, emitter);

        let collisions = &particle.options.collisions;
        if collisions.enable {
            let retries = collisions.overlap.retries;
            let outcome = resolve_overlap(
                &self.grid,
                self.array.len(),
                &mut particle,
                position,
                container.canvas(),
                &mut self.rng,
                retries,
            );
            if outcome == OverlapOutcome::Rejected {
                self.counters.rejected += 1;
                return None;
            }
        }

        let limit = container.options().particles.number.limit as usize;
        if limit > 0 && self.array.len() >= limit {
            self.remove_quantity(self.array.len() + 1 - limit);
        }

        self.grid.insert(particle.grid_entry());
        self.array.push(particle);
        self.counters.added += 1;
        Some(self.array.len() - 1)
    }

    /// Removes `min(quantity, count - index)` particles starting at `index`,
    /// keeping the order of the rest. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize, quantity: usize) -> usize {
        if index >= self.array.len() || quantity == 0 {
            return 0;
        }
        let end = index + quantity.min(self.array.len() - index);
        let removed = self.array.drain(index..end).count();
        self.counters.removed += removed as u32;
        self.reindex();
        removed
    }

    /// Removes the oldest `min(quantity, count)` particles.
    pub fn remove_quantity(&mut self, quantity: usize) -> usize {
        self.remove_at(0, quantity)
    }

    pub fn remove(&mut self, id: ParticleId) -> bool {
        match self.index_of(id) {
            Some(index) => self.remove_at(index, 1) == 1,
            None => false,
        }
    }

    /// Adds `quantity` particles at `position`, first evicting the oldest
    /// when the limit would be exceeded. Returns how many were added.
    pub fn push(&mut self, container: &Container, quantity: usize, position: Option<Vec2>) -> usize {
        let limit = container.options().particles.number.limit as usize;
        let quantity = if limit > 0 { quantity.min(limit) } else { quantity };
        if limit > 0 && self.count() + quantity > limit {
            self.remove_quantity(self.count() + quantity - limit);
        }

        (0..quantity).filter(|_| self.spawn(container, position, None).is_some()).count()
    }

    pub fn clear(&mut self) {
        self.counters.removed += self.array.len() as u32;
        self.array.clear();
        self.links.clear();
        self.grid.clear();
    }

    /// Overlap resolution for a live particle. A rejected particle is
    /// removed. Returns `None` for an out-of-range index.
    pub fn check_overlap(&mut self, container: &Container, index: usize, position: Option<Vec2>) -> Option<OverlapOutcome> {
        let live = self.array.len();
        let particle = self.array.get_mut(index)?;
        let retries = particle.options.collisions.overlap.retries;
        let outcome =
            resolve_overlap(&self.grid, live, particle, position, container.canvas(), &mut self.rng, retries);

        if outcome == OverlapOutcome::Rejected {
            self.array.remove(index);
            self.counters.removed += 1;
            self.counters.rejected += 1;
        }
        self.reindex();
        Some(outcome)
    }

    /// Pushes or evicts to reach the density target.
    pub fn apply_density(&mut self, container: &Container) {
        if !container.options().particles.number.density.enable {
            return;
        }
        let target = Self::target_count(container);
        let count = self.count();
        if count < target {
            self.push(container, target - count, None);
        } else if count > target {
            self.remove_quantity(count - target);
        }
    }
}
