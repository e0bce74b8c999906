//! Engine options, loaded from a camelCase JSON document.
//!
//! Every field has a default, so `{}` is a valid configuration. Partial
//! particle overrides (per shape and per emitter) stay as raw JSON and are
//! deep-merged over the base particle options when a particle is created.

mod emitters;
mod interactivity;
mod particles;
mod polygon;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{EngineError, Result};

pub use emitters::{EmitterLife, EmitterOptions, EmitterRate, EmitterSize, EmitterSizeMode};
pub use interactivity::{
    BubbleMode, ClickEvent, ClickMode, ConnectMode, EventsOptions, GrabMode, HoverEvent,
    HoverMode, InteractivityOptions, LinkOpacity, ModesOptions, ParallaxOptions, PushMode,
    RemoveMode, RepulseMode,
};
pub use particles::{
    AnimationOptions, AttractOptions, CollisionsOptions, ColorOptions, DensityOptions,
    ImageShapeOptions, LineLinkedOptions, MoveDirection, MoveOptions, NumberOptions,
    OpacityOptions, OutMode, OverlapOptions, ParticlesOptions, RandomValue, RotateAnimation,
    RotateDirection, RotateOptions, ShadowOptions, ShapeData, ShapeOptions, ShapeType,
    SizeOptions, StrokeOptions,
};
pub use polygon::{PolygonMaskOptions, PolygonMaskType, PolygonMoveOptions};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub detect_retina: bool,
    pub particles: ParticlesOptions,
    pub interactivity: InteractivityOptions,
    pub polygon: PolygonMaskOptions,
    pub emitters: Vec<EmitterOptions>,
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that every shape and emitter override merges into a valid
    /// particle option set.
    pub fn validate(&self) -> Result<()> {
        for (name, data) in &self.particles.shape.options {
            for (index, entry) in data.iter().enumerate() {
                if let Some(patch) = &entry.particles {
                    self.particles.with_overrides(&[patch]).map_err(|source| {
                        EngineError::InvalidOverride { context: format!("shape {}[{}]", name, index), source }
                    })?;
                }
            }
        }
        for (index, emitter) in self.emitters.iter().enumerate() {
            validate_emitter(&self.particles, emitter)
                .map_err(|source| EngineError::InvalidOverride { context: format!("emitter {}", index), source })?;
        }
        Ok(())
    }
}

pub(crate) fn validate_emitter(
    base: &ParticlesOptions,
    emitter: &EmitterOptions,
) -> std::result::Result<(), serde_json::Error> {
    match &emitter.particles {
        Some(patch) => base.with_overrides(&[patch]).map(|_| ()),
        None => Ok(()),
    }
}

/// Deep-merges `patch` into `target`. Objects merge key by key; arrays and
/// scalars replace.
pub fn merge_json(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge_json(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}
