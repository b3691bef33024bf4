//! Area-symbol course objects: out-of-bounds and dangerous areas.
//!
//! Both are hatched fills distinguished only by the hatch parameters passed
//! to the symbol definition. The boundary path is auto-closed at
//! construction; holes are unsupported at this layer.

use std::fmt;

use coursekit_core::{
    Affine, Brush, ColorId, DrawSurface, Glyph, Map, Pen, Placement, Point, SymPath, Symbol, Vec2,
};
use serde::{Deserialize, Serialize};

use crate::object::{CourseObj, Handles, ObjectCommon, ObjectKindTag, HANDLE_EPS};
use crate::symdef::{SymDefCache, SymDefKey};

/// Hatch-line spacing shared by both area kinds, map units.
pub const HATCH_SPACING: f64 = 0.6;

/// Concrete area-symbol variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaKindTag {
    OutOfBounds,
    Dangerous,
}

impl AreaKindTag {
    fn name(self) -> &'static str {
        match self {
            AreaKindTag::OutOfBounds => "OutOfBounds",
            AreaKindTag::Dangerous => "Dangerous",
        }
    }
}

/// An area-symbol course object with a closed outer boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaObject {
    pub common: ObjectCommon,
    pub kind: AreaKindTag,
    pub path: SymPath,
}

impl AreaObject {
    /// Build an area object; an open input path is closed by synthesizing a
    /// final point equal to the first.
    pub fn new(kind: AreaKindTag, common: ObjectCommon, path: SymPath) -> Self {
        Self {
            common,
            kind,
            path: path.ensure_closed(),
        }
    }

    pub fn kind_tag(&self) -> ObjectKindTag {
        match self.kind {
            AreaKindTag::OutOfBounds => ObjectKindTag::OutOfBounds,
            AreaKindTag::Dangerous => ObjectKindTag::Dangerous,
        }
    }

    fn glyph(&self) -> Glyph {
        let (angle_deg, cross_hatch) = match self.kind {
            AreaKindTag::OutOfBounds => (45.0, false),
            AreaKindTag::Dangerous => (45.0, true),
        };
        Glyph::AreaHatch {
            angle_deg,
            cross_hatch,
            spacing: HATCH_SPACING * self.common.scale_ratio,
            thickness: self.common.appearance.line_thickness() * self.common.scale_ratio,
        }
    }
}

impl CourseObj for AreaObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        let def = cache.get_or_create(map, color, SymDefKey::Kind(self.kind_tag()), || self.glyph());
        map.add_symbol(Symbol {
            def,
            placement: Placement::Area(self.path.clone()),
        });
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        // containment first, boundary distance as the fallback
        if coursekit_core::geom::point_in_polygon(&self.path.flatten(), pt) {
            return 0.0;
        }
        self.path.distance_from_point(pt).0
    }

    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        _erasing: bool,
    ) {
        let c = world_to_pixel.as_coeffs();
        let scale = (c[0] * c[0] + c[1] * c[1]).sqrt();
        let pen = Pen::new(self.common.appearance.line_thickness() * self.common.scale_ratio * scale, *brush);
        let outline = self.path.transformed(world_to_pixel).flatten();
        surface.draw_polygon(&outline, &pen);
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.path.offset(Vec2::new(dx, dy));
    }

    fn handles(&self) -> Option<Handles> {
        // the synthesized closing point duplicates the first vertex
        let pts = self.path.points();
        let vertices: Handles = pts[..pts.len() - 1]
            .iter()
            .filter(|p| p.kind == coursekit_core::PointKind::Normal)
            .map(|p| p.loc)
            .collect();
        Some(vertices)
    }

    fn move_handle(&mut self, old: Point, new: Point) {
        self.path.move_matching_point(old, new, HANDLE_EPS);
    }
}

impl fmt::Display for AreaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}  path:{} points",
            self.kind.name(),
            self.common,
            self.path.points().len()
        )
    }
}
