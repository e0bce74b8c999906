use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::ids::EmitterId;
use crate::domain::options::{ParticlesOptions, ShapeData, ShapeType};

use super::super::container::Container;
use super::super::emitter::Emitter;

type CacheKey = (Option<EmitterId>, ShapeType, usize);

/// Merged option sets keyed by emitter, shape and shape-data index, so the
/// JSON merge runs once per combination instead of once per particle.
#[derive(Default)]
pub(crate) struct OptionsCache {
    merged: HashMap<CacheKey, Arc<ParticlesOptions>>,
}

impl OptionsCache {
    pub(crate) fn resolve(
        &mut self,
        container: &Container,
        emitter: Option<&Emitter>,
        shape: ShapeType,
        index: usize,
        data: &ShapeData,
        fallback: &Arc<ParticlesOptions>,
    ) -> Arc<ParticlesOptions> {
        let key = (emitter.map(Emitter::id), shape, index);
        if let Some(hit) = self.merged.get(&key) {
            return hit.clone();
        }

        let mut patches: Vec<&Value> = Vec::with_capacity(2);
        patches.extend(data.particles.as_ref());
        patches.extend(emitter.and_then(Emitter::override_patch));

        let merged = match container.particles_options().with_overrides(&patches) {
            Ok(options) => Arc::new(options),
            Err(err) => {
                log::warn!("ignoring {} override #{}: {}", shape.name(), index, err);
                fallback.clone()
            }
        };
        self.merged.insert(key, merged.clone());
        merged
    }

    pub(crate) fn clear(&mut self) {
        self.merged.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.merged.len()
    }
}
