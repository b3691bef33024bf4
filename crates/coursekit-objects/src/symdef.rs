//! Symbol-definition cache.
//!
//! Emitting a course to a map must register each reusable glyph exactly once
//! per (color, shape key) pair. The key defaults to the object's variant
//! tag; text objects use a compound font key so distinct font configurations
//! get distinct definitions even though the variant is the same.
//!
//! The cache lives for one emission pass into one destination map; it never
//! evicts and needs no teardown beyond being dropped.

use std::collections::HashMap;

use coursekit_core::{ColorId, FontDesc, Glyph, Map, SymDefId};
use tracing::debug;

use crate::object::ObjectKindTag;

/// Cache key: the explicit variant tag, or the compound font key used by
/// text variants. Em height is keyed by its bit pattern so the key is
/// `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymDefKey {
    Kind(ObjectKindTag),
    Text {
        font: FontDesc,
        em_height_bits: u64,
    },
}

impl SymDefKey {
    pub fn text(font: &FontDesc, em_height: f64) -> Self {
        SymDefKey::Text {
            font: font.clone(),
            em_height_bits: em_height.to_bits(),
        }
    }
}

/// Per-map memoization of created symbol definitions.
#[derive(Debug, Default)]
pub struct SymDefCache {
    defs: HashMap<(ColorId, SymDefKey), SymDefId>,
}

impl SymDefCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the definition for (color, key), creating it in `map` from
    /// `build_glyph` on first use.
    pub fn get_or_create(
        &mut self,
        map: &mut Map,
        color: ColorId,
        key: SymDefKey,
        build_glyph: impl FnOnce() -> Glyph,
    ) -> SymDefId {
        if let Some(&id) = self.defs.get(&(color, key.clone())) {
            return id;
        }
        let id = map.add_symdef(color, build_glyph());
        debug!(?key, color = color.0, id = id.0, "created symbol definition");
        self.defs.insert((color, key), id);
        id
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
