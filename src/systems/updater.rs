//! Per-particle kinematic and animation advance for one frame.

use crate::core::frame::FrameDelta;
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::options::{OutMode, PolygonMaskType, RotateDirection};
use crate::simulation::{AnimatedValue, AnimationStatus, CanvasSize, Container, Particle};

pub fn update(particle: &mut Particle, container: &Container, rng: &mut Rng, delta: FrameDelta) {
    update_opacity(particle, delta);
    update_size(particle, delta);
    update_angle(particle, delta);

    let moving = particle.options.movement.enable;
    if moving {
        move_particle(particle, delta);
    }
    move_parallax(particle, container);
    constrain_to_polygon(particle, container);
    if moving {
        fix_out_of_canvas(particle, container.canvas(), rng);
        bounce(particle, container.canvas());
    }
}

/// Bounces `value` between `min` and `max`, never below zero.
fn animate(value: &mut AnimatedValue, min: f32, max: f32, factor: f32) {
    let Some(velocity) = value.velocity else {
        return;
    };
    match value.status {
        AnimationStatus::Increasing if value.value >= max => value.status = AnimationStatus::Decreasing,
        AnimationStatus::Decreasing if value.value <= min => value.status = AnimationStatus::Increasing,
        _ => {}
    }
    match value.status {
        AnimationStatus::Increasing => value.value += velocity * factor,
        AnimationStatus::Decreasing => value.value -= velocity * factor,
    }
    if value.value < 0.0 {
        value.value = 0.0;
    }
}

fn update_opacity(particle: &mut Particle, delta: FrameDelta) {
    let opacity = &particle.options.opacity;
    if !opacity.animation.enable {
        return;
    }
    let (min, max) = (opacity.animation.minimum_value, opacity.value);
    animate(&mut particle.opacity, min, max, delta.factor);
}

fn update_size(particle: &mut Particle, delta: FrameDelta) {
    let size = &particle.options.size;
    if !size.animation.enable {
        return;
    }
    let (min, max) = (size.animation.minimum_value, particle.retina.size_value);
    animate(&mut particle.size, min, max, delta.factor);
}

fn update_angle(particle: &mut Particle, delta: FrameDelta) {
    let rotate = &particle.options.rotate.animation;
    if !rotate.enable {
        return;
    }
    let speed = rotate.speed * delta.factor;
    particle.angle = match particle.rotate_direction {
        RotateDirection::Clockwise => particle.angle + speed,
        RotateDirection::CounterClockwise | RotateDirection::Random => particle.angle - speed,
    }
    .rem_euclid(360.0);
}

fn move_particle(particle: &mut Particle, delta: FrameDelta) {
    let speed = particle.retina.move_speed / 2.0 * delta.factor;
    particle.position += particle.velocity * speed;
}

/// Eases the parallax offset toward the pointer-driven target.
fn move_parallax(particle: &mut Particle, container: &Container) {
    let parallax = &container.options().interactivity.events.on_hover.parallax;
    if !parallax.enable || parallax.force == 0.0 {
        return;
    }
    let Some(pointer) = container.interactivity().pointer.hover_position() else {
        return;
    };

    let center = container.canvas().center();
    let scale = particle.size.value / parallax.force;
    let target = Vec2::new((pointer.x - center.x) * scale, (pointer.y - center.y) * scale);
    let smooth = parallax.smooth.max(1.0);
    particle.offset += (target - particle.offset) * (1.0 / smooth);
}

fn constrain_to_polygon(particle: &mut Particle, container: &Container) {
    let polygon = &container.options().polygon;
    if !polygon.enable {
        return;
    }
    let reverse = match polygon.kind {
        PolygonMaskType::None => false,
        PolygonMaskType::Inline => particle
            .initial_position
            .is_some_and(|origin| particle.position.distance(origin) > polygon.movement.radius),
        PolygonMaskType::Inside => container.polygon().is_some_and(|mask| !mask.contains(particle.position)),
        PolygonMaskType::Outside => container.polygon().is_some_and(|mask| mask.contains(particle.position)),
    };
    if reverse {
        particle.velocity = -particle.velocity;
    }
}

/// Handles particles that left the canvas entirely: `out` wraps them to
/// the opposite edge, `destroy` marks them for removal.
fn fix_out_of_canvas(particle: &mut Particle, canvas: CanvasSize, rng: &mut Rng) {
    let size = particle.size.value;
    let pos = particle.position;
    let outside_right = pos.x - size > canvas.width;
    let outside_left = pos.x + size < 0.0;
    let outside_bottom = pos.y - size > canvas.height;
    let outside_top = pos.y + size < 0.0;

    match particle.options.movement.out_mode {
        OutMode::Destroy => {
            if outside_right || outside_left || outside_bottom || outside_top {
                particle.destroy();
            }
        }
        OutMode::Out => {
            if outside_right {
                particle.position = Vec2::new(-size, rng.next_f32() * canvas.height);
            } else if outside_left {
                particle.position = Vec2::new(canvas.width + size, rng.next_f32() * canvas.height);
            }
            if outside_bottom {
                particle.position = Vec2::new(rng.next_f32() * canvas.width, -size);
            } else if outside_top {
                particle.position = Vec2::new(rng.next_f32() * canvas.width, canvas.height + size);
            }
        }
        OutMode::Bounce | OutMode::BounceHorizontal | OutMode::BounceVertical => {}
    }
}

/// Flips velocity on the bounced axes when the particle touches an edge
/// while still heading out.
fn bounce(particle: &mut Particle, canvas: CanvasSize) {
    let mode = particle.options.movement.out_mode;
    let size = particle.size.value;
    let pos = particle.position;

    if mode.bounces_horizontally()
        && ((pos.x + size > canvas.width && particle.velocity.x > 0.0)
            || (pos.x - size < 0.0 && particle.velocity.x < 0.0))
    {
        particle.velocity.x = -particle.velocity.x;
    }
    if mode.bounces_vertically()
        && ((pos.y + size > canvas.height && particle.velocity.y > 0.0)
            || (pos.y - size < 0.0 && particle.velocity.y < 0.0))
    {
        particle.velocity.y = -particle.velocity.y;
    }
}
