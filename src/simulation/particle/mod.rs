mod options_cache;
mod overlap;
mod particle;

pub(crate) use options_cache::OptionsCache;
pub(crate) use overlap::resolve_overlap;
pub use overlap::{is_overlapping, OverlapOutcome, OverlapReport};
pub(crate) use particle::SpawnContext;
#[cfg(test)]
pub(crate) use particle::{calc_position, calculate_velocity};
pub use particle::{AnimatedValue, AnimationStatus, BubblePhase, BubbleState, Particle, ParticleImage};
