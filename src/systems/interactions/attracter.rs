use crate::simulation::Particle;

/// Pulls two linked-range particles toward each other.
pub fn attract(p1: &mut Particle, p2: &mut Particle) {
    let delta = p1.position - p2.position;
    if delta.length() > p1.retina.line_linked_distance {
        return;
    }

    let attract = &p1.options.movement.attract;
    if attract.rotate_x == 0.0 || attract.rotate_y == 0.0 {
        return;
    }
    let ax = delta.x / (attract.rotate_x * 1000.0);
    let ay = delta.y / (attract.rotate_y * 1000.0);

    p1.velocity.x -= ax;
    p1.velocity.y -= ay;
    p2.velocity.x += ax;
    p2.velocity.y += ay;
}
