//! Map and symbol-definition data model.
//!
//! The emission target for course objects: a map owns symbol *definitions*
//! (reusable, color-specific glyph styles) and symbol *instances* (a
//! definition reference plus a placement). Definitions are deduplicated by
//! the caller through the symbol-definition cache; this model just stores
//! what it is given.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::geom::SymPath;
use crate::surface::FontDesc;

/// Identifier of a map color (color table index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorId(pub u16);

/// Identifier of a symbol definition within one map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymDefId(pub u32);

/// The glyph geometry carried by a symbol definition. Dimensions are in map
/// units (millimeters), already scaled for the emission pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Glyph {
    /// A circle, optionally interrupted by angular gaps carried per instance.
    Circle { radius: f64, thickness: f64 },
    /// Two concentric circles sharing one gap pattern.
    DoubleCircle {
        inner_radius: f64,
        outer_radius: f64,
        thickness: f64,
    },
    /// An equilateral triangle outline.
    Triangle { side: f64, thickness: f64 },
    /// A plus or X mark; `diagonal` selects the X.
    Cross {
        size: f64,
        thickness: f64,
        diagonal: bool,
    },
    /// An open cup mark (water point).
    Cup { radius: f64, thickness: f64 },
    /// Paired slanted strokes marking a crossing point.
    CrossingMark { size: f64, thickness: f64 },
    /// A stroked line symbol.
    Line { thickness: f64, dashed: bool },
    /// A hatched area fill.
    AreaHatch {
        angle_deg: f64,
        cross_hatch: bool,
        spacing: f64,
        thickness: f64,
    },
    /// A text style.
    Text { font: FontDesc, em_height: f64 },
    /// The outline frame of a description-sheet block.
    Frame { thickness: f64 },
}

/// Where and how one symbol instance is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// A point symbol at a location, rotated, with optional per-instance
    /// angular gaps (degree pairs) interrupting circular glyphs.
    At {
        location: Point,
        orientation_deg: f64,
        gaps: Option<Vec<(f64, f64)>>,
    },
    /// A line symbol along a path.
    Path(SymPath),
    /// An area symbol bounded by a closed path.
    Area(SymPath),
    /// A text symbol anchored at its top-left corner.
    TextAt { location: Point, text: String },
}

/// A reusable, color-specific glyph registered once per map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymDef {
    pub id: SymDefId,
    pub color: ColorId,
    pub glyph: Glyph,
}

/// One placed instance of a symbol definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub def: SymDefId,
    pub placement: Placement,
}

/// A destination map: symbol definitions plus placed instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Map {
    symdefs: Vec<SymDef>,
    symbols: Vec<Symbol>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new symbol definition, returning its id.
    pub fn add_symdef(&mut self, color: ColorId, glyph: Glyph) -> SymDefId {
        let id = SymDefId(self.symdefs.len() as u32);
        self.symdefs.push(SymDef { id, color, glyph });
        id
    }

    /// Append a symbol instance.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn symdefs(&self) -> &[SymDef] {
        &self.symdefs
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symdef(&self, id: SymDefId) -> Option<&SymDef> {
        self.symdefs.get(id.0 as usize)
    }

    /// Instances referencing the given definition.
    pub fn symbols_of(&self, id: SymDefId) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(move |s| s.def == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symdef_ids_are_dense() {
        let mut map = Map::new();
        let a = map.add_symdef(
            ColorId(1),
            Glyph::Circle {
                radius: 3.0,
                thickness: 0.35,
            },
        );
        let b = map.add_symdef(
            ColorId(1),
            Glyph::Line {
                thickness: 0.35,
                dashed: false,
            },
        );
        assert_eq!(a, SymDefId(0));
        assert_eq!(b, SymDefId(1));
        assert_eq!(map.symdef(b).unwrap().color, ColorId(1));
    }

    #[test]
    fn symbols_of_filters_by_definition() {
        let mut map = Map::new();
        let def = map.add_symdef(
            ColorId(0),
            Glyph::Circle {
                radius: 3.0,
                thickness: 0.35,
            },
        );
        map.add_symbol(Symbol {
            def,
            placement: Placement::At {
                location: Point::new(1.0, 2.0),
                orientation_deg: 0.0,
                gaps: None,
            },
        });
        assert_eq!(map.symbols_of(def).count(), 1);
    }

    #[test]
    fn map_serializes_round_trip() {
        let mut map = Map::new();
        let def = map.add_symdef(
            ColorId(2),
            Glyph::DoubleCircle {
                inner_radius: 2.5,
                outer_radius: 3.5,
                thickness: 0.35,
            },
        );
        map.add_symbol(Symbol {
            def,
            placement: Placement::At {
                location: Point::new(10.0, 20.0),
                orientation_deg: 0.0,
                gaps: Some(vec![(45.0, 90.0)]),
            },
        });
        let json = serde_json::to_string(&map).unwrap();
        let back: Map = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
