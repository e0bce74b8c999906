//! Interaction effectors.
//!
//! Pointer effectors (grab, connect, bubble, repulse) are switched on by the
//! hover and click modes through a fixed mode table. Pair effectors (link,
//! attract, collide) follow the particle's own options and run for every
//! pair `i < j`.

pub mod attracter;
pub mod bubbler;
pub mod collider;
pub mod connecter;
pub mod grabber;
pub mod linker;
pub mod repulser;

use crate::core::math::Vec2;
use crate::domain::options::{ClickMode, EventsOptions, HoverMode};
use crate::simulation::{Container, Particle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effector {
    Grab,
    Connect,
    Bubble,
    Repulse,
}

/// Which hover and click modes switch each effector on.
const EFFECTOR_TABLE: [(Effector, Option<HoverMode>, Option<ClickMode>); 4] = [
    (Effector::Grab, Some(HoverMode::Grab), None),
    (Effector::Connect, Some(HoverMode::Connect), None),
    (Effector::Bubble, Some(HoverMode::Bubble), Some(ClickMode::Bubble)),
    (Effector::Repulse, Some(HoverMode::Repulse), Some(ClickMode::Repulse)),
];

#[inline]
fn bit(effector: Effector) -> u8 {
    1 << effector as u8
}

/// Effectors enabled by the current event options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveEffectors {
    hover: u8,
    click: u8,
}

impl ActiveEffectors {
    pub fn from_events(events: &EventsOptions) -> Self {
        let mut active = Self::default();
        for (effector, hover, click) in EFFECTOR_TABLE {
            if events.on_hover.enable && hover.is_some_and(|mode| events.on_hover.mode.contains(&mode)) {
                active.hover |= bit(effector);
            }
            if events.on_click.enable && click.is_some_and(|mode| events.on_click.mode.contains(&mode)) {
                active.click |= bit(effector);
            }
        }
        active
    }

    #[inline]
    pub fn hover(&self, effector: Effector) -> bool {
        self.hover & bit(effector) != 0
    }

    #[inline]
    pub fn click(&self, effector: Effector) -> bool {
        self.click & bit(effector) != 0
    }

    #[inline]
    pub fn any(&self, effector: Effector) -> bool {
        self.hover(effector) || self.click(effector)
    }

    pub fn is_empty(&self) -> bool {
        self.hover == 0 && self.click == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Link,
    Connect,
    Grab,
}

impl LinkKind {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// A line the renderer should draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkLine {
    pub kind: LinkKind,
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
    pub width: f32,
}

/// Runs the active pointer effectors for one particle in the order grab,
/// connect (against every later particle), bubble, repulse.
pub fn apply_pointer_effectors(
    particle: &mut Particle,
    later: &[Particle],
    container: &Container,
    links: &mut Vec<LinkLine>,
) {
    let active = container.effectors();
    if active.is_empty() {
        return;
    }

    if active.hover(Effector::Grab) {
        links.extend(grabber::grab(particle, container));
    }
    if active.hover(Effector::Connect) {
        for other in later.iter().filter(|p| !p.is_destroyed()) {
            links.extend(connecter::connect(particle, other, container));
        }
    }
    if active.any(Effector::Bubble) {
        bubbler::bubble(particle, container);
    }
    if active.any(Effector::Repulse) {
        repulser::repulse(particle, container);
    }
}

/// Runs link, attract and collide between `particle` and every later one.
pub fn apply_pair_effectors(particle: &mut Particle, later: &mut [Particle], links: &mut Vec<LinkLine>) {
    let link = particle.options.line_linked.enable;
    let attract = particle.options.movement.attract.enable;
    let collide = particle.options.collisions.enable;
    if !(link || attract || collide) {
        return;
    }

    for other in later.iter_mut().filter(|p| !p.is_destroyed()) {
        if link {
            links.extend(linker::link(particle, other));
        }
        if attract {
            attracter::attract(particle, other);
        }
        if collide {
            collider::collide(particle, other);
        }
    }
}
