use wasm_bindgen::prelude::*;

/// Snapshot of the last `update`. All zeros while metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) commands_ms: f64,
    pub(super) emit_ms: f64,
    pub(super) update_ms: f64,
    pub(super) extract_ms: f64,
    pub(super) commands_applied: u32,
    pub(super) particle_count: u32,
    pub(super) particles_added: u32,
    pub(super) particles_removed: u32,
    pub(super) overlap_rejections: u32,
    pub(super) link_count: u32,
    pub(super) emitter_count: u32,
    pub(super) grid_cells: u32,
    pub(super) occupied_cells: u32,
    pub(super) max_cell_occupancy: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        PerfStats {
            step_ms: 0.0,
            commands_ms: 0.0,
            emit_ms: 0.0,
            update_ms: 0.0,
            extract_ms: 0.0,
            commands_applied: 0,
            particle_count: 0,
            particles_added: 0,
            particles_removed: 0,
            overlap_rejections: 0,
            link_count: 0,
            emitter_count: 0,
            grid_cells: 0,
            occupied_cells: 0,
            max_cell_occupancy: 0,
        }
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn commands_ms(&self) -> f64 { self.commands_ms }
    #[wasm_bindgen(getter)]
    pub fn emit_ms(&self) -> f64 { self.emit_ms }
    #[wasm_bindgen(getter)]
    pub fn update_ms(&self) -> f64 { self.update_ms }
    /// Time of the last `extract_draw_data` call.
    #[wasm_bindgen(getter)]
    pub fn extract_ms(&self) -> f64 { self.extract_ms }
    #[wasm_bindgen(getter)]
    pub fn commands_applied(&self) -> u32 { self.commands_applied }
    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.particle_count }
    #[wasm_bindgen(getter)]
    pub fn particles_added(&self) -> u32 { self.particles_added }
    #[wasm_bindgen(getter)]
    pub fn particles_removed(&self) -> u32 { self.particles_removed }
    #[wasm_bindgen(getter)]
    pub fn overlap_rejections(&self) -> u32 { self.overlap_rejections }
    #[wasm_bindgen(getter)]
    pub fn link_count(&self) -> u32 { self.link_count }
    #[wasm_bindgen(getter)]
    pub fn emitter_count(&self) -> u32 { self.emitter_count }
    #[wasm_bindgen(getter)]
    pub fn grid_cells(&self) -> u32 { self.grid_cells }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn max_cell_occupancy(&self) -> u32 { self.max_cell_occupancy }
}
