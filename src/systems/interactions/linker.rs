use crate::simulation::Particle;

use super::{LinkKind, LinkLine};

pub fn link(p1: &Particle, p2: &Particle) -> Option<LinkLine> {
    let max_distance = p1.retina.line_linked_distance;
    let distance = p1.position.distance(p2.position);
    if max_distance <= 0.0 || distance > max_distance {
        return None;
    }

    let opacity = p1.options.line_linked.opacity * (1.0 - distance / max_distance);
    if opacity <= 0.0 {
        return None;
    }

    Some(LinkLine {
        kind: LinkKind::Link,
        from: p1.position,
        to: p2.position,
        opacity,
        width: p1.retina.line_linked_width,
    })
}
