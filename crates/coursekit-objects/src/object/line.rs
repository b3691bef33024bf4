//! Line-symbol course objects: legs, flagged legs and boundaries.
//!
//! The path may be split into disjoint drawn segments by an ordered list of
//! along-path gap intervals; each resulting sub-path is emitted as its own
//! line symbol, while every sub-path participates in one combined
//! highlight. End handles are suppressed for legs (the endpoints are owned
//! by the control circles), but boundaries expose every vertex.

use std::fmt;

use coursekit_core::{
    Affine, Brush, ColorId, DrawSurface, GapInterval, Glyph, Map, Pen, Placement, Point, SymPath,
    Symbol, Vec2,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::object::{CourseObj, Handles, ObjectCommon, ObjectKindTag, HANDLE_EPS};
use crate::symdef::{SymDefCache, SymDefKey};

/// Concrete line-symbol variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKindTag {
    Leg,
    FlaggedLeg,
    Boundary,
}

impl LineKindTag {
    fn name(self) -> &'static str {
        match self {
            LineKindTag::Leg => "Leg",
            LineKindTag::FlaggedLeg => "FlaggedLeg",
            LineKindTag::Boundary => "Boundary",
        }
    }

    /// Legs' endpoints belong to the controls, not to the leg itself.
    fn endpoints_owned_elsewhere(self) -> bool {
        matches!(self, LineKindTag::Leg | LineKindTag::FlaggedLeg)
    }
}

/// A line-symbol course object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineObject {
    pub common: ObjectCommon,
    pub kind: LineKindTag,
    pub path: SymPath,
    /// Along-path intervals left undrawn; absent means one continuous
    /// segment.
    pub gaps: Option<Vec<GapInterval>>,
    /// Unscaled stroke thickness.
    pub thickness: f64,
}

impl LineObject {
    pub fn new(kind: LineKindTag, common: ObjectCommon, path: SymPath) -> Self {
        let thickness = match kind {
            LineKindTag::Boundary => common.appearance.boundary_thickness(),
            _ => common.appearance.line_thickness(),
        };
        Self {
            common,
            kind,
            path,
            gaps: None,
            thickness,
        }
    }

    pub fn kind_tag(&self) -> ObjectKindTag {
        match self.kind {
            LineKindTag::Leg => ObjectKindTag::Leg,
            LineKindTag::FlaggedLeg => ObjectKindTag::FlaggedLeg,
            LineKindTag::Boundary => ObjectKindTag::Boundary,
        }
    }

    pub fn set_gaps(&mut self, gaps: Option<Vec<GapInterval>>) {
        self.gaps = gaps;
    }

    /// Stroke thickness at the scale in effect.
    pub fn true_thickness(&self) -> f64 {
        self.thickness * self.common.scale_ratio
    }

    /// The drawn sub-paths after gap splitting.
    pub fn drawn_paths(&self) -> Vec<SymPath> {
        match &self.gaps {
            None => vec![self.path.clone()],
            Some(gaps) => self.path.split_by_gaps(gaps),
        }
    }
}

impl CourseObj for LineObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        let def = cache.get_or_create(map, color, SymDefKey::Kind(self.kind_tag()), || Glyph::Line {
            thickness: self.true_thickness(),
            dashed: self.kind == LineKindTag::FlaggedLeg,
        });
        for sub in self.drawn_paths() {
            map.add_symbol(Symbol {
                def,
                placement: Placement::Path(sub),
            });
        }
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        let (d, _) = self.path.distance_from_point(pt);
        (d - self.true_thickness() / 2.0).max(0.0)
    }

    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        _erasing: bool,
    ) {
        let scale = transform_scale(world_to_pixel);
        let pen = Pen::new(self.true_thickness() * scale, *brush);
        for sub in self.drawn_paths() {
            surface.draw_path(&sub.transformed(world_to_pixel), &pen);
        }
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        // along-path gap distances are translation invariant
        self.path.offset(Vec2::new(dx, dy));
    }

    fn handles(&self) -> Option<Handles> {
        let vertices: Vec<Point> = self
            .path
            .points()
            .iter()
            .filter(|p| p.kind == coursekit_core::PointKind::Normal)
            .map(|p| p.loc)
            .collect();
        let picked: Handles = if self.kind.endpoints_owned_elsewhere() {
            if vertices.len() <= 2 {
                return None;
            }
            SmallVec::from_iter(vertices[1..vertices.len() - 1].iter().copied())
        } else {
            SmallVec::from_iter(vertices)
        };
        if picked.is_empty() {
            None
        } else {
            Some(picked)
        }
    }

    fn move_handle(&mut self, old: Point, new: Point) {
        let movable = match self.handles() {
            Some(hs) => hs.iter().any(|h| h.distance(old) <= HANDLE_EPS),
            None => false,
        };
        if movable {
            self.path.move_matching_point(old, new, HANDLE_EPS);
        }
    }
}

fn transform_scale(t: Affine) -> f64 {
    let c = t.as_coeffs();
    (c[0] * c[0] + c[1] * c[1]).sqrt()
}

impl fmt::Display for LineObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}  thickness:{:.2}  path:{} points",
            self.kind.name(),
            self.common,
            self.thickness,
            self.path.points().len()
        )?;
        if let Some(gaps) = &self.gaps {
            write!(f, "  gaps:{}", gaps.len())?;
        }
        Ok(())
    }
}
