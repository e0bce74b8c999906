use crate::simulation::{Container, Particle};

use super::{LinkKind, LinkLine};

/// Line from the particle to the hovering pointer, fading with distance.
pub fn grab(particle: &Particle, container: &Container) -> Option<LinkLine> {
    let pointer = container.interactivity().pointer.hover_position()?;
    let max_distance = container.retina().grab_distance;
    let distance = particle.position.distance(pointer);
    if max_distance <= 0.0 || distance > max_distance {
        return None;
    }

    let grab = &container.options().interactivity.modes.grab;
    let opacity = grab.line_linked.opacity * (1.0 - distance / max_distance);
    if opacity <= 0.0 {
        return None;
    }

    Some(LinkLine {
        kind: LinkKind::Grab,
        from: particle.position,
        to: pointer,
        opacity,
        width: particle.retina.line_linked_width,
    })
}
