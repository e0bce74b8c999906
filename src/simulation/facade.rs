use wasm_bindgen::prelude::*;

use crate::core::math::Vec2;
use crate::domain::ids::{EmitterId, ParticleId};

use super::perf_stats::PerfStats;
use super::{ImageAsset, SimulationCore, DRAW_STRIDE, LINK_STRIDE};

/// Where the render buffers live in wasm memory. Valid until the next
/// `extract_draw_data`.
#[wasm_bindgen]
pub struct AbiLayout {
    draw_ptr: u32,
    draw_len_elements: u32,
    draw_len_bytes: u32,
    draw_stride: u32,
    link_ptr: u32,
    link_len_elements: u32,
    link_len_bytes: u32,
    link_stride: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn draw_ptr(&self) -> u32 { self.draw_ptr }
    #[wasm_bindgen(getter)]
    pub fn draw_len_elements(&self) -> u32 { self.draw_len_elements }
    #[wasm_bindgen(getter)]
    pub fn draw_len_bytes(&self) -> u32 { self.draw_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn draw_stride(&self) -> u32 { self.draw_stride }

    #[wasm_bindgen(getter)]
    pub fn link_ptr(&self) -> u32 { self.link_ptr }
    #[wasm_bindgen(getter)]
    pub fn link_len_elements(&self) -> u32 { self.link_len_elements }
    #[wasm_bindgen(getter)]
    pub fn link_len_bytes(&self) -> u32 { self.link_len_bytes }
    #[wasm_bindgen(getter)]
    pub fn link_stride(&self) -> u32 { self.link_stride }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Engine {
    core: SimulationCore,
}

#[wasm_bindgen]
impl Engine {
    /// Parse options and build an engine for a `width` x `height` canvas.
    /// Particles are created by `init`.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str, width: f32, height: f32, pixel_ratio: f32) -> Result<Engine, JsValue> {
        let core = SimulationCore::from_json(options_json, width, height, pixel_ratio).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(options_json: &str, width: f32, height: f32, pixel_ratio: f32, seed: u32) -> Result<Engine, JsValue> {
        let options = crate::domain::options::Options::from_json(options_json).map_err(to_js)?;
        let core = SimulationCore::with_seed(options, width, height, pixel_ratio, seed).map_err(to_js)?;
        Ok(Self { core })
    }

    pub fn init(&mut self) {
        self.core.init();
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn emitter_count(&self) -> u32 { self.core.emitters().len() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Advance one frame; `delta_ms` is the time since the previous one.
    pub fn update(&mut self, delta_ms: f32) {
        self.core.update(delta_ms);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    /// Add a particle; NaN coordinates pick a random position. Returns the
    /// new id, or -1 when overlap resolution dropped it.
    pub fn add_particle(&mut self, x: f32, y: f32) -> i64 {
        let position = if x.is_nan() || y.is_nan() { None } else { Some(Vec2::new(x, y)) };
        self.core.add_particle(position).map_or(-1, |id| id.0 as i64)
    }

    pub fn push(&mut self, quantity: usize, x: f32, y: f32) -> usize {
        let position = if x.is_nan() || y.is_nan() { None } else { Some(Vec2::new(x, y)) };
        self.core.push(quantity, position)
    }

    pub fn remove_at(&mut self, index: usize, quantity: usize) -> usize {
        self.core.remove_at(index, quantity)
    }

    pub fn remove_quantity(&mut self, quantity: usize) -> usize {
        self.core.remove_quantity(quantity)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        self.core.remove(ParticleId(id))
    }

    /// Clear all particles
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Ids of particles centered within `radius` of `(x, y)`.
    pub fn particles_near(&self, x: f32, y: f32, radius: f32) -> Vec<u32> {
        self.core.particles_near(x, y, radius).into_iter().map(|id| id.0).collect()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    pub fn click(&mut self, x: f32, y: f32) {
        self.core.click(x, y);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(to_js)
    }

    /// Flat `[x0, y0, x1, y1, ...]` vertex list in canvas pixels.
    pub fn set_polygon_mask(&mut self, coords: &[f32]) -> bool {
        let points = coords.chunks_exact(2).map(|xy| Vec2::new(xy[0], xy[1])).collect();
        self.core.set_polygon_mask(points)
    }

    pub fn register_image(&mut self, src: String, width: f32, height: f32) -> usize {
        self.core.register_image(ImageAsset { src, width, height })
    }

    pub fn add_emitter(&mut self, emitter_json: &str) -> Result<u32, JsValue> {
        self.core.add_emitter_json(emitter_json).map(|id| id.0).map_err(to_js)
    }

    pub fn remove_emitter(&mut self, id: u32) -> bool {
        self.core.remove_emitter(EmitterId(id))
    }

    pub fn move_emitter(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.core.move_emitter(EmitterId(id), x, y)
    }

    /// Refill render buffers; returns the particle count.
    pub fn extract_draw_data(&mut self) -> usize {
        self.core.extract_draw_data()
    }

    pub fn draw_buffer_ptr(&self) -> *const f32 {
        self.core.draw_buffer().as_ptr()
    }

    pub fn link_buffer_ptr(&self) -> *const f32 {
        self.core.link_buffer().as_ptr()
    }

    pub fn link_count(&self) -> usize {
        self.core.link_buffer().len() / LINK_STRIDE
    }

    pub fn get_abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            draw_ptr: data.draw_ptr as u32,
            draw_len_elements: data.draw_len_elements as u32,
            draw_len_bytes: data.draw_len_bytes as u32,
            draw_stride: DRAW_STRIDE as u32,
            link_ptr: data.link_ptr as u32,
            link_len_elements: data.link_len_elements as u32,
            link_len_bytes: data.link_len_bytes as u32,
            link_stride: LINK_STRIDE as u32,
        }
    }
}

impl Engine {
    /// Native access to the simulation behind the bindings.
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut SimulationCore {
        &mut self.core
    }
}
