use crate::core::frame::FrameDelta;
use crate::systems::{interactions, updater};

use super::super::container::Container;
use super::ParticleCollection;

impl ParticleCollection {
    /// One frame: advance every particle, run effectors against later
    /// particles, then drop destroyed particles and rebuild the index.
    pub fn update(&mut self, container: &Container, delta: FrameDelta) {
        self.links.clear();

        for index in 0..self.array.len() {
            let (head, later) = self.array.split_at_mut(index + 1);
            let particle = &mut head[index];
            if particle.is_destroyed() {
                continue;
            }

            updater::update(particle, container, &mut self.rng, delta);
            if particle.is_destroyed() {
                continue;
            }

            interactions::apply_pointer_effectors(particle, later, container, &mut self.links);
            interactions::apply_pair_effectors(particle, later, &mut self.links);
        }

        let before = self.array.len();
        self.array.retain(|p| !p.is_destroyed());
        let destroyed = before - self.array.len();
        if destroyed > 0 {
            self.counters.removed += destroyed as u32;
            log::debug!("{} particles destroyed this frame", destroyed);
        }

        self.reindex();
    }
}
