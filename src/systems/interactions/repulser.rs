use crate::core::math::Vec2;
use crate::simulation::{Container, Particle, PointerStatus, RepulsePhase};

use super::Effector;

/// Peak displacement factor at the pointer.
const REPULSE_VELOCITY: f32 = 100.0;
/// Cap on the per-frame displacement.
const REPULSE_MAX_STEP: f32 = 50.0;

pub fn repulse(particle: &mut Particle, container: &Container) {
    let active = container.effectors();
    let pointer = &container.interactivity().pointer;
    if active.hover(Effector::Repulse) && pointer.status == PointerStatus::Moving {
        hover_repulse(particle, container);
    } else if active.click(Effector::Repulse) {
        click_repulse(particle, container);
    }
}

fn hover_repulse(particle: &mut Particle, container: &Container) {
    let Some(pointer) = container.interactivity().pointer.hover_position() else {
        return;
    };

    let offset = particle.position - pointer;
    let distance = offset.length();
    let radius = container.retina().repulse_distance;
    if distance <= 0.0 || radius <= 0.0 || distance > radius {
        return;
    }

    let normal = offset * (1.0 / distance);
    let step = ((1.0 - (distance / radius).powi(2)) * REPULSE_VELOCITY).clamp(0.0, REPULSE_MAX_STEP);
    let target = particle.position + normal * step;

    let canvas = container.canvas();
    if particle.options.movement.out_mode.is_bounce() {
        let size = particle.size.value;
        if target.x - size > 0.0 && target.x + size < canvas.width {
            particle.position.x = target.x;
        }
        if target.y - size > 0.0 && target.y + size < canvas.height {
            particle.position.y = target.y;
        }
    } else {
        particle.position = canvas.clamp(target);
    }
}

fn click_repulse(particle: &mut Particle, container: &Container) {
    let state = container.interactivity();
    match state.repulse.phase {
        RepulsePhase::Idle => {}
        RepulsePhase::Releasing => particle.reset_velocity(),
        RepulsePhase::Active => {
            let Some(click) = state.pointer.click_position else {
                return;
            };
            let radius = (container.retina().repulse_distance / 6.0).powi(3);
            let delta = click - particle.position;
            let distance_sq = delta.length_squared();
            if distance_sq <= 0.0 || distance_sq > radius {
                return;
            }

            let force = -radius / distance_sq;
            let angle = delta.y.atan2(delta.x);
            particle.velocity = Vec2::new(force * angle.cos(), force * angle.sin());
        }
    }
}
