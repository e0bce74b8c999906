use crate::core::error::Result;
use crate::core::random::Rng;
use crate::domain::ids::EmitterId;
use crate::domain::options::{EmitterOptions, Options};

use super::{Container, Emitter, ParticleCollection, PerfStats, SimulationCore};

// Emitters draw from their own stream so that adding one does not shift
// particle spawns.
const EMITTER_SEED_SALT: u32 = 0x85EB_CA6B;

pub(super) fn create_core(
    options: Options,
    width: f32,
    height: f32,
    device_pixel_ratio: f32,
    seed: u32,
) -> Result<SimulationCore> {
    let container = Container::new(options, width, height, device_pixel_ratio)?;
    let particles = ParticleCollection::new(&container, seed);

    log::info!(
        "simulation created: {}x{} at ratio {}",
        width,
        height,
        container.retina().pixel_ratio
    );

    Ok(SimulationCore {
        container,
        particles,
        emitters: Vec::new(),
        next_emitter_id: 0,
        pending: Vec::new(),
        rng: Rng::new(seed ^ EMITTER_SEED_SALT),
        frame: 0,
        draw_buffer: Vec::new(),
        link_buffer: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

pub(super) fn init(core: &mut SimulationCore) {
    core.pending.clear();
    core.emitters.clear();
    core.frame = 0;
    core.particles.init(&core.container);

    let configured = core.container.options().emitters.clone();
    for options in configured {
        if let Err(err) = add_emitter(core, options) {
            log::warn!("skipping emitter: {}", err);
        }
    }
}

pub(super) fn add_emitter(core: &mut SimulationCore, options: EmitterOptions) -> Result<EmitterId> {
    let id = EmitterId(core.next_emitter_id);
    let emitter = Emitter::new(id, options, &core.container, &mut core.rng)?;
    core.next_emitter_id = core.next_emitter_id.wrapping_add(1);
    core.emitters.push(emitter);
    Ok(id)
}

pub(super) fn remove_emitter(core: &mut SimulationCore, id: EmitterId) -> bool {
    let before = core.emitters.len();
    core.emitters.retain(|e| e.id() != id);
    core.emitters.len() != before
}
