use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::math::Vec2;

use super::particles::MoveDirection;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterOptions {
    pub direction: MoveDirection,
    pub life: EmitterLife,
    /// Partial particle options applied on top of the base options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<Value>,
    /// Percent of the canvas; random when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    pub rate: EmitterRate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<EmitterSize>,
}

/// Times are in seconds. A missing or zero `count` means the emitter never
/// runs out of lives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterLife {
    pub count: Option<u32>,
    pub delay: Option<f32>,
    pub duration: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterRate {
    pub quantity: u32,
    pub delay: f32,
}

impl Default for EmitterRate {
    fn default() -> Self {
        Self { quantity: 1, delay: 0.1 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmitterSizeMode {
    #[default]
    Percent,
    Precise,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterSize {
    pub mode: EmitterSizeMode,
    pub width: f32,
    pub height: f32,
}

impl EmitterSize {
    /// Spawn area in pixels for the given canvas.
    pub fn resolve(&self, canvas: Vec2, pixel_ratio: f32) -> Vec2 {
        match self.mode {
            EmitterSizeMode::Percent => {
                Vec2::new(self.width / 100.0 * canvas.x, self.height / 100.0 * canvas.y)
            }
            EmitterSizeMode::Precise => Vec2::new(self.width * pixel_ratio, self.height * pixel_ratio),
        }
    }
}
