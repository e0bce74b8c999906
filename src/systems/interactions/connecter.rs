use crate::simulation::{Container, Particle};

use super::{LinkKind, LinkLine};

/// Connect line between two particles near the pointer. `p1` must sit
/// within the connect radius of the pointer and `p2` within the connect
/// distance of `p1`.
pub fn connect(p1: &Particle, p2: &Particle, container: &Container) -> Option<LinkLine> {
    let pointer = container.interactivity().pointer.hover_position()?;
    let retina = container.retina();
    if p1.position.distance(pointer) > retina.connect_radius {
        return None;
    }

    let max_distance = retina.connect_distance;
    let distance = p1.position.distance(p2.position);
    if max_distance <= 0.0 || distance > max_distance {
        return None;
    }

    let connect = &container.options().interactivity.modes.connect;
    let opacity = connect.line_linked.opacity * (1.0 - distance / max_distance);
    if opacity <= 0.0 {
        return None;
    }

    Some(LinkLine {
        kind: LinkKind::Connect,
        from: p1.position,
        to: p2.position,
        opacity,
        width: p1.retina.line_linked_width,
    })
}
