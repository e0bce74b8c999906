use crate::core::frame::FrameDelta;

use super::{commands, PerfTimer, SimulationCore};

pub(super) fn step(core: &mut SimulationCore, delta_ms: f32) {
    let delta = FrameDelta::from_millis(delta_ms);
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let mut lap = step_start;

    // === COMMANDS ===
    let applied = commands::apply_pending(core);
    core.container.advance_timers(delta.seconds());
    if let Some(timer) = lap.as_mut() {
        core.perf_stats.commands_ms = timer.lap();
        core.perf_stats.commands_applied = applied as u32;
    }

    // === EMITTERS ===
    emit(core, delta);
    if let Some(timer) = lap.as_mut() {
        core.perf_stats.emit_ms = timer.lap();
    }

    // === PARTICLES ===
    core.particles.update(&core.container, delta);
    if let Some(timer) = lap.as_mut() {
        core.perf_stats.update_ms = timer.lap();
    }

    core.frame += 1;

    let counters = core.particles.take_counters();
    if let Some(start) = step_start {
        let grid = core.particles.grid();
        let stats = &mut core.perf_stats;
        stats.particle_count = core.particles.count() as u32;
        stats.particles_added = counters.added;
        stats.particles_removed = counters.removed;
        stats.overlap_rejections = counters.rejected;
        stats.link_count = core.particles.links().len() as u32;
        stats.emitter_count = core.emitters.len() as u32;
        stats.grid_cells = grid.total_cells() as u32;
        stats.occupied_cells = grid.occupied_cells() as u32;
        stats.max_cell_occupancy = grid.max_cell_occupancy() as u32;
        stats.step_ms = start.elapsed_ms();
    }
}

/// Spawns what each emitter owes for this frame, then drops finished ones.
fn emit(core: &mut SimulationCore, delta: FrameDelta) {
    if core.emitters.is_empty() {
        return;
    }

    let seconds = delta.seconds();
    let limit = core.container.options().particles.number.limit;
    for emitter in core.emitters.iter_mut() {
        let mut quantity = emitter.update(seconds);
        // anything past the limit would only evict this frame's spawns
        if limit > 0 {
            quantity = quantity.min(limit);
        }
        for _ in 0..quantity {
            let position = emitter.spawn_position(&mut core.rng);
            core.particles.add_emitted(&core.container, emitter, position);
        }
    }

    let before = core.emitters.len();
    core.emitters.retain(|e| !e.is_finished());
    if core.emitters.len() != before {
        log::debug!("{} emitters finished", before - core.emitters.len());
    }
}
