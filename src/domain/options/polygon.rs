use serde::{Deserialize, Serialize};

use crate::core::math::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolygonMaskType {
    #[default]
    None,
    /// Particles spawn on the polygon and stay within `move.radius` of it.
    Inline,
    Inside,
    Outside,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonMoveOptions {
    pub radius: f32,
}

impl Default for PolygonMoveOptions {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolygonMaskOptions {
    pub enable: bool,
    #[serde(rename = "type")]
    pub kind: PolygonMaskType,
    pub scale: f32,
    #[serde(rename = "move")]
    pub movement: PolygonMoveOptions,
    /// Vertices in canvas pixels before `scale` is applied.
    pub points: Vec<Vec2>,
}

impl Default for PolygonMaskOptions {
    fn default() -> Self {
        Self {
            enable: false,
            kind: PolygonMaskType::None,
            scale: 1.0,
            movement: PolygonMoveOptions::default(),
            points: Vec::new(),
        }
    }
}

impl PolygonMaskOptions {
    pub fn is_active(&self) -> bool {
        self.enable && self.kind != PolygonMaskType::None
    }
}
