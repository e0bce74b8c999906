use super::options::{Options, ParticlesOptions};

/// Pixel-ratio scaled constants for interaction modes.
#[derive(Clone, Debug, PartialEq)]
pub struct Retina {
    pub pixel_ratio: f32,
    pub grab_distance: f32,
    pub bubble_distance: f32,
    pub bubble_size: f32,
    pub repulse_distance: f32,
    pub connect_distance: f32,
    pub connect_radius: f32,
}

/// Per-particle scaled constants, computed from the particle's effective
/// options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleRetina {
    pub move_speed: f32,
    pub size_value: f32,
    pub size_animation_speed: f32,
    pub line_linked_distance: f32,
    pub line_linked_width: f32,
}

impl Retina {
    pub fn new(options: &Options, device_pixel_ratio: f32) -> Self {
        let pixel_ratio = if options.detect_retina && device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let modes = &options.interactivity.modes;
        Self {
            pixel_ratio,
            grab_distance: modes.grab.distance * pixel_ratio,
            bubble_distance: modes.bubble.distance * pixel_ratio,
            bubble_size: modes.bubble.size * pixel_ratio,
            repulse_distance: modes.repulse.distance * pixel_ratio,
            connect_distance: modes.connect.distance * pixel_ratio,
            connect_radius: modes.connect.radius * pixel_ratio,
        }
    }

    pub fn particle(&self, particles: &ParticlesOptions) -> ParticleRetina {
        let ratio = self.pixel_ratio;
        ParticleRetina {
            move_speed: particles.movement.speed * ratio,
            size_value: particles.size.value * ratio,
            size_animation_speed: particles.size.animation.speed * ratio,
            line_linked_distance: particles.line_linked.distance * ratio,
            line_linked_width: particles.line_linked.width * ratio,
        }
    }
}
