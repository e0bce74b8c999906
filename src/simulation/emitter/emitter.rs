use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{EngineError, Result};
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::ids::EmitterId;
use crate::domain::options::{EmitterOptions, MoveDirection, ParticlesOptions};

use super::container::Container;

/// Where the emitter is in its life cycle. Times are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmitterPhase {
    Emitting { elapsed: f32 },
    Waiting { remaining: f32 },
    Finished,
}

/// Spawns particles over time with its own option overrides.
#[derive(Clone, Debug)]
pub struct Emitter {
    id: EmitterId,
    options: EmitterOptions,
    /// Position in percent of the canvas; re-resolved on resize.
    anchor: Vec2,
    position: Vec2,
    size: Vec2,
    particles_options: Option<Arc<ParticlesOptions>>,
    /// `None` when the emitter never runs out of lives.
    lives: Option<u32>,
    phase: EmitterPhase,
    rate_elapsed: f32,
}

impl Emitter {
    pub fn new(id: EmitterId, options: EmitterOptions, container: &Container, rng: &mut Rng) -> Result<Self> {
        let particles_options = options
            .particles
            .as_ref()
            .map(|patch| container.particles_options().with_overrides(&[patch]).map(Arc::new))
            .transpose()
            .map_err(|source| EngineError::InvalidOverride { context: format!("emitter {}", id.0), source })?;

        let anchor = options
            .position
            .unwrap_or_else(|| Vec2::new(rng.next_f32() * 100.0, rng.next_f32() * 100.0));
        let lives = options.life.count.filter(|count| *count > 0);

        let mut emitter = Self {
            id,
            options,
            anchor,
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            particles_options,
            lives,
            phase: EmitterPhase::Emitting { elapsed: 0.0 },
            rate_elapsed: 0.0,
        };
        emitter.resize(container);
        log::debug!("emitter {} created at {:?}", id.0, emitter.position);
        Ok(emitter)
    }

    pub fn id(&self) -> EmitterId {
        self.id
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn direction(&self) -> MoveDirection {
        self.options.direction
    }

    pub fn phase(&self) -> EmitterPhase {
        self.phase
    }

    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    pub fn is_finished(&self) -> bool {
        self.phase == EmitterPhase::Finished
    }

    /// Base options merged with this emitter's override, when it has one.
    pub fn particles_options(&self) -> Option<&Arc<ParticlesOptions>> {
        self.particles_options.as_ref()
    }

    /// The raw override, for merging after shape-specific overrides.
    pub fn override_patch(&self) -> Option<&Value> {
        self.options.particles.as_ref()
    }

    /// Recomputes pixel position and spawn area from the canvas.
    pub fn resize(&mut self, container: &Container) {
        let canvas = container.canvas();
        let extent = Vec2::new(canvas.width, canvas.height);
        self.position = Vec2::new(self.anchor.x / 100.0 * canvas.width, self.anchor.y / 100.0 * canvas.height);
        self.size = self
            .options
            .size
            .as_ref()
            .map(|size| size.resolve(extent, container.retina().pixel_ratio))
            .unwrap_or(Vec2::ZERO);
    }

    /// Advances timers by `seconds` and returns how many particles to spawn.
    pub fn update(&mut self, seconds: f32) -> u32 {
        match self.phase {
            EmitterPhase::Finished => 0,
            EmitterPhase::Waiting { remaining } => {
                let remaining = remaining - seconds;
                self.phase = if remaining > 0.0 {
                    EmitterPhase::Waiting { remaining }
                } else {
                    EmitterPhase::Emitting { elapsed: 0.0 }
                };
                0
            }
            EmitterPhase::Emitting { elapsed } => {
                self.rate_elapsed += seconds;
                let delay = self.options.rate.delay;
                let batches = if delay > 0.0 {
                    let batches = (self.rate_elapsed / delay).floor();
                    self.rate_elapsed -= batches * delay;
                    batches as u32
                } else {
                    1
                };

                let elapsed = elapsed + seconds;
                match self.options.life.duration {
                    Some(duration) if duration > 0.0 && elapsed >= duration => self.end_cycle(),
                    _ => self.phase = EmitterPhase::Emitting { elapsed },
                }
                batches.saturating_mul(self.options.rate.quantity)
            }
        }
    }

    fn end_cycle(&mut self) {
        self.rate_elapsed = 0.0;
        if let Some(lives) = self.lives.as_mut() {
            *lives = lives.saturating_sub(1);
            if *lives == 0 {
                self.phase = EmitterPhase::Finished;
                log::debug!("emitter {} finished", self.id.0);
                return;
            }
        }
        self.phase = match self.options.life.delay {
            Some(delay) if delay > 0.0 => EmitterPhase::Waiting { remaining: delay },
            _ => EmitterPhase::Emitting { elapsed: 0.0 },
        };
    }

    /// Spawn point: the emitter position jittered across its size.
    pub fn spawn_position(&self, rng: &mut Rng) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x * (rng.next_f32() - 0.5),
            self.position.y + self.size.y * (rng.next_f32() - 0.5),
        )
    }

    pub(crate) fn set_anchor(&mut self, anchor: Vec2, container: &Container) {
        self.anchor = anchor;
        self.resize(container);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::Options;

    fn container() -> Container {
        Container::new(Options::default(), 200.0, 100.0, 1.0).unwrap()
    }

    fn emitter(json: &str) -> Emitter {
        let options: EmitterOptions = serde_json::from_str(json).unwrap();
        Emitter::new(EmitterId(1), options, &container(), &mut Rng::new(1)).unwrap()
    }

    #[test]
    fn position_is_percent_of_canvas() {
        let e = emitter(r#"{"position": {"x": 50, "y": 25}, "size": {"width": 10, "height": 20}}"#);
        assert_eq!(e.position(), Vec2::new(100.0, 25.0));
        assert_eq!(e.size(), Vec2::new(20.0, 20.0));

        let mut rng = Rng::new(4);
        for _ in 0..50 {
            let p = e.spawn_position(&mut rng);
            assert!((90.0..=110.0).contains(&p.x));
            assert!((15.0..=35.0).contains(&p.y));
        }
    }

    #[test]
    fn rate_accumulates_frames() {
        let mut e = emitter(r#"{"rate": {"quantity": 3, "delay": 0.1}}"#);
        assert_eq!(e.update(0.05), 0);
        assert_eq!(e.update(0.06), 3);
        assert_eq!(e.update(0.25), 6);
    }

    #[test]
    fn life_cycles_until_finished() {
        let mut e = emitter(r#"{"rate": {"quantity": 1, "delay": 0.5}, "life": {"count": 2, "duration": 1.0, "delay": 0.5}}"#);
        assert_eq!(e.update(0.6), 1);
        e.update(0.5);
        assert_eq!(e.lives(), Some(1));
        assert!(matches!(e.phase(), EmitterPhase::Waiting { .. }));
        assert_eq!(e.update(0.3), 0);
        e.update(0.3);
        assert!(matches!(e.phase(), EmitterPhase::Emitting { .. }));
        e.update(1.0);
        assert!(e.is_finished());
        assert_eq!(e.update(1.0), 0);
    }

    #[test]
    fn immortal_without_count() {
        let mut e = emitter(r#"{"life": {"duration": 0.2}}"#);
        for _ in 0..10 {
            e.update(0.3);
        }
        assert!(!e.is_finished());
        assert_eq!(e.lives(), None);
    }

    #[test]
    fn bad_override_is_an_error() {
        let options: EmitterOptions = serde_json::from_str(r#"{"particles": {"size": {"value": "x"}}}"#).unwrap();
        let err = Emitter::new(EmitterId(7), options, &container(), &mut Rng::new(1)).unwrap_err();
        assert!(err.to_string().contains("emitter 7"));
    }

    #[test]
    fn override_merges_over_base() {
        let e = emitter(r#"{"particles": {"size": {"value": 9}}}"#);
        assert_eq!(e.particles_options().map(|o| o.size.value), Some(9.0));
    }
}
