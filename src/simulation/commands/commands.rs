use crate::core::math::Vec2;
use crate::domain::ids::ParticleId;
use crate::domain::options::ClickMode;

use super::{OverlapOutcome, SimulationCore};

/// Input that must not interleave with a running frame. Drained at the
/// start of the next `update`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingCommand {
    Click(Vec2),
}

pub(super) fn queue(core: &mut SimulationCore, command: PendingCommand) {
    core.pending.push(command);
}

/// Applies queued commands in arrival order. Returns how many ran.
pub(super) fn apply_pending(core: &mut SimulationCore) -> usize {
    if core.pending.is_empty() {
        return 0;
    }

    let pending = std::mem::take(&mut core.pending);
    let applied = pending.len();
    for command in pending {
        match command {
            PendingCommand::Click(position) => apply_click(core, position),
        }
    }
    applied
}

fn apply_click(core: &mut SimulationCore, position: Vec2) {
    let on_click = &core.container.options().interactivity.events.on_click;
    if !on_click.enable {
        return;
    }
    let click_modes: Vec<ClickMode> = on_click.mode.iter().copied().collect();
    let push_quantity = core.container.options().interactivity.modes.push.quantity;
    let remove_quantity = core.container.options().interactivity.modes.remove.quantity;

    core.container.interactivity_mut().click(position);

    for mode in click_modes {
        match mode {
            ClickMode::Push => {
                let added = core.particles.push(&core.container, push_quantity, Some(position));
                log::debug!("click push: {} of {} added", added, push_quantity);
            }
            ClickMode::Remove => {
                core.particles.remove_quantity(remove_quantity);
            }
            ClickMode::Bubble => core.container.interactivity_mut().start_bubble(),
            ClickMode::Repulse => core.container.interactivity_mut().start_repulse(),
            ClickMode::None => {}
        }
    }
}

pub(super) fn add_particle(core: &mut SimulationCore, position: Option<Vec2>) -> Option<ParticleId> {
    core.particles.add_particle(&core.container, position).map(|p| p.id)
}

pub(super) fn remove_at(core: &mut SimulationCore, index: usize, quantity: usize) -> usize {
    core.particles.remove_at(index, quantity)
}

pub(super) fn remove_quantity(core: &mut SimulationCore, quantity: usize) -> usize {
    core.particles.remove_quantity(quantity)
}

pub(super) fn remove(core: &mut SimulationCore, id: ParticleId) -> bool {
    core.particles.remove(id)
}

pub(super) fn push(core: &mut SimulationCore, quantity: usize, position: Option<Vec2>) -> usize {
    core.particles.push(&core.container, quantity, position)
}

pub(super) fn clear(core: &mut SimulationCore) {
    core.particles.clear();
    core.frame = 0;
}

pub(super) fn check_overlap(
    core: &mut SimulationCore,
    index: usize,
    position: Option<Vec2>,
) -> Option<OverlapOutcome> {
    core.particles.check_overlap(&core.container, index, position)
}
