use crate::core::error::Result;
use crate::core::math::Vec2;
use crate::domain::ids::EmitterId;

use super::perf_stats::PerfStats;
use super::{ImageAsset, SimulationCore};

pub(super) fn enable_perf_metrics(core: &mut SimulationCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &SimulationCore) -> PerfStats {
    core.perf_stats.clone()
}

/// New canvas size: grid, emitter positions and density target follow.
pub(super) fn resize(core: &mut SimulationCore, width: f32, height: f32) -> Result<()> {
    core.container.resize(width, height)?;
    core.particles.resize(&core.container);
    for emitter in core.emitters.iter_mut() {
        emitter.resize(&core.container);
    }
    core.particles.apply_density(&core.container);
    log::debug!("resized to {}x{}", width, height);
    Ok(())
}

pub(super) fn set_polygon_mask(core: &mut SimulationCore, points: Vec<Vec2>) -> bool {
    let usable = core.container.set_polygon_points(points);
    if !usable {
        log::warn!("polygon mask needs at least three finite points");
    }
    usable
}

pub(super) fn register_image(core: &mut SimulationCore, asset: ImageAsset) -> usize {
    core.container.images_mut().register(asset)
}

pub(super) fn move_emitter(core: &mut SimulationCore, id: EmitterId, anchor: Vec2) -> bool {
    match core.emitters.iter_mut().find(|e| e.id() == id) {
        Some(emitter) => {
            emitter.set_anchor(anchor, &core.container);
            true
        }
        None => false,
    }
}
