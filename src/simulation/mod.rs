//! Simulation core: owns the container, the particle collection and the
//! emitters, and drives one frame at a time.
//!
//! Frame order: queued pointer commands, click timers, emitters, particle
//! update (updater, pointer effectors, pair effectors), compaction and
//! index rebuild. Render extraction is a separate call.

use crate::core::error::Result;
use crate::core::math::Vec2;
use crate::core::random::Rng;
use crate::domain::ids::{EmitterId, ParticleId};
use crate::domain::options::{EmitterOptions, Options};

#[path = "container/container.rs"]
mod container;
#[path = "container/pointer.rs"]
mod pointer;
mod particle;
mod collection;
#[path = "emitter/emitter.rs"]
mod emitter;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
mod facade;

pub use collection::{CollectionCounters, ParticleCollection};
pub use commands::PendingCommand;
pub use container::{CanvasSize, Container, ImageAsset, ImageRegistry};
pub use emitter::{Emitter, EmitterPhase};
pub use facade::{AbiLayout, Engine};
pub use particle::{
    is_overlapping, AnimatedValue, AnimationStatus, BubblePhase, BubbleState, OverlapOutcome,
    OverlapReport, Particle, ParticleImage,
};
pub use perf_stats::PerfStats;
pub use pointer::{ClickBubble, ClickRepulse, InteractivityState, PointerState, PointerStatus, RepulsePhase};
pub use render_extract::{ShapeDrawData, Surface, DRAW_STRIDE, LINK_STRIDE};

use perf_timer::PerfTimer;

/// Seed used when the host does not pick one.
pub const DEFAULT_SEED: u32 = 0x9E37_79B9;

pub(crate) struct AbiLayoutData {
    pub(crate) draw_ptr: *const f32,
    pub(crate) draw_len_elements: usize,
    pub(crate) draw_len_bytes: usize,
    pub(crate) link_ptr: *const f32,
    pub(crate) link_len_elements: usize,
    pub(crate) link_len_bytes: usize,
}

/// The simulation
pub struct SimulationCore {
    container: Container,
    particles: ParticleCollection,
    emitters: Vec<Emitter>,
    next_emitter_id: u32,
    pending: Vec<PendingCommand>,
    rng: Rng,

    frame: u64,

    // Render transfer buffers
    draw_buffer: Vec<f32>,
    link_buffer: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    pub fn new(options: Options, width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self> {
        init::create_core(options, width, height, device_pixel_ratio, DEFAULT_SEED)
    }

    pub fn with_seed(options: Options, width: f32, height: f32, device_pixel_ratio: f32, seed: u32) -> Result<Self> {
        init::create_core(options, width, height, device_pixel_ratio, seed)
    }

    pub fn from_json(json: &str, width: f32, height: f32, device_pixel_ratio: f32) -> Result<Self> {
        Self::new(Options::from_json(json)?, width, height, device_pixel_ratio)
    }

    /// Populates particles and configured emitters, dropping any previous state.
    pub fn init(&mut self) {
        init::init(self);
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn particles(&self) -> &ParticleCollection {
        &self.particles
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn count(&self) -> usize {
        self.particles.count()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn width(&self) -> f32 {
        self.container.canvas().width
    }

    pub fn height(&self) -> f32 {
        self.container.canvas().height
    }

    /// Advance the simulation by `delta_ms` milliseconds
    pub fn update(&mut self, delta_ms: f32) {
        step::step(self, delta_ms);
    }

    // === PARTICLES ===

    pub fn add_particle(&mut self, position: Option<Vec2>) -> Option<ParticleId> {
        commands::add_particle(self, position)
    }

    pub fn remove_at(&mut self, index: usize, quantity: usize) -> usize {
        commands::remove_at(self, index, quantity)
    }

    pub fn remove_quantity(&mut self, quantity: usize) -> usize {
        commands::remove_quantity(self, quantity)
    }

    pub fn remove(&mut self, id: ParticleId) -> bool {
        commands::remove(self, id)
    }

    pub fn push(&mut self, quantity: usize, position: Option<Vec2>) -> usize {
        commands::push(self, quantity, position)
    }

    pub fn clear(&mut self) {
        commands::clear(self)
    }

    pub fn check_overlap(&mut self, index: usize, position: Option<Vec2>) -> Option<OverlapOutcome> {
        commands::check_overlap(self, index, position)
    }

    /// Hit test against the spatial index.
    pub fn particles_near(&self, x: f32, y: f32, radius: f32) -> Vec<ParticleId> {
        self.particles.near(Vec2::new(x, y), radius)
    }

    // === POINTER ===

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.container.pointer_move(Vec2::new(x, y));
    }

    pub fn pointer_leave(&mut self) {
        self.container.pointer_leave();
    }

    /// Queues a click; it takes effect at the start of the next frame.
    pub fn click(&mut self, x: f32, y: f32) {
        commands::queue(self, PendingCommand::Click(Vec2::new(x, y)));
    }

    pub fn pending_commands(&self) -> &[PendingCommand] {
        &self.pending
    }

    // === ENVIRONMENT ===

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        settings::resize(self, width, height)
    }

    pub fn set_polygon_mask(&mut self, points: Vec<Vec2>) -> bool {
        settings::set_polygon_mask(self, points)
    }

    pub fn register_image(&mut self, asset: ImageAsset) -> usize {
        settings::register_image(self, asset)
    }

    // === EMITTERS ===

    pub fn add_emitter(&mut self, options: EmitterOptions) -> Result<EmitterId> {
        init::add_emitter(self, options)
    }

    pub fn add_emitter_json(&mut self, json: &str) -> Result<EmitterId> {
        let options: EmitterOptions = serde_json::from_str(json)?;
        init::add_emitter(self, options)
    }

    pub fn remove_emitter(&mut self, id: EmitterId) -> bool {
        init::remove_emitter(self, id)
    }

    /// Moves an emitter; `x`/`y` are percent of the canvas.
    pub fn move_emitter(&mut self, id: EmitterId, x: f32, y: f32) -> bool {
        settings::move_emitter(self, id, Vec2::new(x, y))
    }

    // === PERF ===

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === RENDER ===

    /// Refills the draw and link buffers; returns the particle count.
    pub fn extract_draw_data(&mut self) -> usize {
        render_extract::extract_draw_data(self)
    }

    pub fn draw_buffer(&self) -> &[f32] {
        &self.draw_buffer
    }

    pub fn link_buffer(&self) -> &[f32] {
        &self.link_buffer
    }

    /// Hands every particle and line of the last frame to `surface`.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        render_extract::draw(self, surface);
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        AbiLayoutData {
            draw_ptr: self.draw_buffer.as_ptr(),
            draw_len_elements: self.draw_buffer.len(),
            draw_len_bytes: self.draw_buffer.len() * std::mem::size_of::<f32>(),
            link_ptr: self.link_buffer.as_ptr(),
            link_len_elements: self.link_buffer.len(),
            link_len_bytes: self.link_buffer.len() * std::mem::size_of::<f32>(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
