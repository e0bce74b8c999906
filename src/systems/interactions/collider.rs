use crate::core::math::Vec2;
use crate::simulation::Particle;

/// Elastic collision along the contact normal, masses taken from radii.
/// Only approaching pairs are resolved, so touching particles that already
/// separate keep their velocities.
pub fn collide(p1: &mut Particle, p2: &mut Particle) {
    let r1 = p1.radius();
    let r2 = p2.radius();
    let delta = p2.position - p1.position;
    if delta.length() > r1 + r2 {
        return;
    }

    let relative = p1.velocity - p2.velocity;
    if relative.dot(delta) <= 0.0 {
        return;
    }

    let total = r1 + r2;
    if total <= 0.0 {
        return;
    }

    let angle = -delta.y.atan2(delta.x);
    let u1 = p1.velocity.rotate(angle);
    let u2 = p2.velocity.rotate(angle);

    let v1x = (u1.x * (r1 - r2) + 2.0 * r2 * u2.x) / total;
    let v2x = (u2.x * (r2 - r1) + 2.0 * r1 * u1.x) / total;

    p1.velocity = Vec2::new(v1x, u1.y).rotate(-angle);
    p2.velocity = Vec2::new(v2x, u2.y).rotate(-angle);
}
