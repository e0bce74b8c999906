//! Bubble effector: temporarily grows/shrinks and fades particles near the
//! pointer.
//!
//! Hover bubbles follow the pointer distance. Click bubbles follow the
//! click timer: toward the targets during the first `duration`, back during
//! the second, then reset. Per particle the phase goes Idle, In, Out, Idle.

use crate::core::math::{lerp, Vec2};
use crate::simulation::{BubblePhase, Container, Particle};

use super::Effector;

pub fn bubble(particle: &mut Particle, container: &Container) {
    let active = container.effectors();
    if active.hover(Effector::Bubble) {
        hover_bubble(particle, container);
    } else if active.click(Effector::Bubble) {
        click_bubble(particle, container);
    }
}

fn hover_bubble(particle: &mut Particle, container: &Container) {
    let Some(pointer) = container.interactivity().pointer.hover_position() else {
        particle.bubble.reset();
        return;
    };

    let max_distance = container.retina().bubble_distance;
    let distance = particle.position.distance(pointer);
    if max_distance <= 0.0 || distance > max_distance {
        particle.bubble.reset();
        return;
    }

    let ratio = 1.0 - distance / max_distance;
    let target_size = container.retina().bubble_size;
    let base_size = particle.retina.size_value;
    if target_size > base_size {
        particle.bubble.radius = Some(base_size + (target_size - base_size) * ratio);
    } else if target_size < base_size {
        let size = base_size - (base_size - target_size) * ratio;
        particle.bubble.radius = (size >= 0.0).then_some(size);
    }

    let target_opacity = container.options().interactivity.modes.bubble.opacity;
    let base_opacity = particle.options.opacity.value;
    let current = particle.opacity.value;
    if target_opacity > base_opacity {
        let opacity = target_opacity * ratio;
        if opacity > current && opacity <= target_opacity {
            particle.bubble.opacity = Some(opacity);
        }
    } else if target_opacity < base_opacity {
        let opacity = current - (base_opacity - target_opacity) * ratio;
        if opacity < current && opacity >= target_opacity {
            particle.bubble.opacity = Some(opacity);
        }
    }

    particle.bubble.phase = BubblePhase::In;
}

fn click_bubble(particle: &mut Particle, container: &Container) {
    let state = container.interactivity();
    let click = state.bubble;
    if !click.clicking {
        if particle.bubble.phase != BubblePhase::Idle {
            particle.bubble.reset();
        }
        return;
    }
    let Some(click_position) = state.pointer.click_position else {
        return;
    };

    let modes = &container.options().interactivity.modes;
    let duration = modes.bubble.duration;
    let targets = BubbleTargets {
        size: container.retina().bubble_size,
        opacity: modes.bubble.opacity,
    };

    if !click.duration_end {
        if within(particle.position, click_position, container.retina().bubble_distance) {
            let t = if duration > 0.0 { (click.elapsed / duration).clamp(0.0, 1.0) } else { 1.0 };
            targets.apply(particle, t);
            particle.bubble.phase = BubblePhase::In;
        } else if particle.bubble.phase != BubblePhase::Idle {
            particle.bubble.reset();
        }
    } else if particle.bubble.phase != BubblePhase::Idle {
        let back = if duration > 0.0 { ((click.elapsed - duration) / duration).clamp(0.0, 1.0) } else { 1.0 };
        targets.apply(particle, 1.0 - back);
        particle.bubble.phase = BubblePhase::Out;
    }
}

fn within(position: Vec2, center: Vec2, distance: f32) -> bool {
    distance > 0.0 && position.distance(center) <= distance
}

struct BubbleTargets {
    size: f32,
    opacity: f32,
}

impl BubbleTargets {
    /// Interpolates radius and opacity `t` of the way from the particle's
    /// own values to the targets.
    fn apply(&self, particle: &mut Particle, t: f32) {
        if self.size != particle.retina.size_value {
            particle.bubble.radius = Some(lerp(particle.size.value, self.size, t).max(0.0));
        }
        if self.opacity != particle.options.opacity.value {
            particle.bubble.opacity = Some(lerp(particle.opacity.value, self.opacity, t).clamp(0.0, 1.0));
        }
    }
}
