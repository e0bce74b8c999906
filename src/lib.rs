//! Particula Swarm - interactive 2D particle engine in WASM
//!
//! Architecture:
//! - core/        - math, color, randomness, errors, logging
//! - domain/      - options tree, ids, retina scaling
//! - spatial/     - spatial grid and polygon mask
//! - systems/     - per-particle updater and interaction effectors
//! - simulation/  - container, particles, emitters, frame loop, bindings

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_logging(log::LevelFilter::Info);
    log::info!("particula-swarm {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Lower or raise the console log level at runtime ("error" .. "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::error::EngineError;
pub use domain::options::Options;
pub use simulation::{Engine, PerfStats, SimulationCore, Surface};

// Shape codes used in the draw buffer
#[wasm_bindgen]
pub fn shape_circle() -> u32 { domain::options::ShapeType::Circle.code() }
#[wasm_bindgen]
pub fn shape_edge() -> u32 { domain::options::ShapeType::Edge.code() }
#[wasm_bindgen]
pub fn shape_triangle() -> u32 { domain::options::ShapeType::Triangle.code() }
#[wasm_bindgen]
pub fn shape_polygon() -> u32 { domain::options::ShapeType::Polygon.code() }
#[wasm_bindgen]
pub fn shape_star() -> u32 { domain::options::ShapeType::Star.code() }
#[wasm_bindgen]
pub fn shape_char() -> u32 { domain::options::ShapeType::Char.code() }
#[wasm_bindgen]
pub fn shape_image() -> u32 { domain::options::ShapeType::Image.code() }
#[wasm_bindgen]
pub fn shape_line() -> u32 { domain::options::ShapeType::Line.code() }

// Line kinds used in the link buffer
#[wasm_bindgen]
pub fn link_kind_link() -> u32 { systems::interactions::LinkKind::Link.code() }
#[wasm_bindgen]
pub fn link_kind_connect() -> u32 { systems::interactions::LinkKind::Connect.code() }
#[wasm_bindgen]
pub fn link_kind_grab() -> u32 { systems::interactions::LinkKind::Grab.code() }
