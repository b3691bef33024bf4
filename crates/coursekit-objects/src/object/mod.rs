//! The course-object model.
//!
//! A course object is one drawable course-symbol entity: a typed geometric
//! value that can register its symbol definition in a map, report its
//! distance from a point for hit-testing, draw and erase an interactive
//! highlight, expose and move drag handles, and be offset as a whole.
//!
//! The model is a closed sum over five shape families, each family a struct
//! with a `kind` tag for its concrete variants. The shared behaviors are
//! the [`CourseObj`] trait, implemented by one match arm per family.

mod area;
mod line;
mod point;
mod rect;
mod text;

pub use area::{AreaKindTag, AreaObject};
pub use line::{LineKindTag, LineObject};
pub use point::{PointKindTag, PointObject};
pub use rect::RectObject;
pub use text::{TextKindTag, TextObject};

use std::fmt;

use coursekit_core::{Affine, Brush, ColorId, DrawSurface, Map, Point};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::appearance::CourseAppearance;
use crate::symdef::SymDefCache;

/// Identifier of a control (shared across courses).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlId(pub u32);

/// Identifier of a control's use within one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseControlId(pub u32);

/// Identifier of a special (non-control) course item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialId(pub u32);

/// Draw layer, assigned by the container when objects are inserted into a
/// course layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Layer(pub i32);

/// The association block every object carries. Exactly one of
/// {`control`, `special`} is meaningful per variant; the text/number/code
/// variants use `control`, the special-item variants use `special`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectIds {
    pub control: Option<ControlId>,
    pub course_control: Option<CourseControlId>,
    /// Second endpoint association for two-endpoint legs.
    pub extra_course_control: Option<CourseControlId>,
    pub special: Option<SpecialId>,
}

impl ObjectIds {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_control(control: ControlId, course_control: CourseControlId) -> Self {
        Self {
            control: Some(control),
            course_control: Some(course_control),
            ..Self::default()
        }
    }

    pub fn for_special(special: SpecialId) -> Self {
        Self {
            special: Some(special),
            ..Self::default()
        }
    }
}

impl fmt::Display for ObjectIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ControlId(id)) = self.control {
            write!(f, " control:{id}")?;
        }
        if let Some(CourseControlId(id)) = self.course_control {
            write!(f, " course-control:{id}")?;
        }
        if let Some(CourseControlId(id)) = self.extra_course_control {
            write!(f, " course-control2:{id}")?;
        }
        if let Some(SpecialId(id)) = self.special {
            write!(f, " special:{id}")?;
        }
        Ok(())
    }
}

/// Fields shared by every course object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCommon {
    pub layer: Layer,
    pub ids: ObjectIds,
    /// Positive multiplier converting native map-unit geometry to the scale
    /// in effect; 1.0 = native.
    pub scale_ratio: f64,
    pub appearance: CourseAppearance,
}

impl ObjectCommon {
    pub fn new(layer: Layer, ids: ObjectIds, scale_ratio: f64, appearance: CourseAppearance) -> coursekit_core::Result<Self> {
        if scale_ratio <= 0.0 {
            return Err(coursekit_core::Error::InvalidScaleRatio { value: scale_ratio });
        }
        Ok(Self {
            layer,
            ids,
            scale_ratio,
            appearance,
        })
    }
}

impl fmt::Display for ObjectCommon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}{}  scale:{}", self.layer.0, self.ids, self.scale_ratio)
    }
}

/// Explicit per-variant tag; the default symbol-definition cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKindTag {
    Control,
    Finish,
    Start,
    Crossing,
    FirstAid,
    Water,
    Registration,
    Forbidden,
    Leg,
    FlaggedLeg,
    Boundary,
    OutOfBounds,
    Dangerous,
    ControlNumber,
    Code,
    FreeText,
    Description,
}

/// Directional resize hint for a drag handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleCursor {
    /// Generic move hint; the default for non-directional handles.
    Move,
    SizeNESW,
    SizeNS,
    SizeNWSE,
    SizeEW,
}

/// Drag-handle positions in world coordinates. `None` means the object has
/// no handles at all, which callers must distinguish from an empty list.
pub type Handles = SmallVec<[Point; 8]>;

/// Tolerance when matching a caller-supplied handle against the object's
/// current handle positions (map units).
pub(crate) const HANDLE_EPS: f64 = 0.01;

/// The shared behavior contract of every course object.
pub trait CourseObj {
    /// Resolve or create this shape's symbol definition via the cache, then
    /// emit one or more symbol instances into the map at the current
    /// geometry.
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache);

    /// Distance from `pt` to the rendered shape; 0 iff the point is covered
    /// by it. Never negative.
    fn distance_from_point(&self, pt: Point) -> f64;

    /// Draw (or erase) the interactive highlight in pixel space. Draw and
    /// erase derive the identical geometry from object state so overlapping
    /// highlights cancel exactly.
    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        erasing: bool,
    );

    /// Translate the defining geometry in place.
    fn offset(&mut self, dx: f64, dy: f64);

    /// Drag-handle positions, or `None` for objects without handles.
    fn handles(&self) -> Option<Handles>;

    /// Relocate the geometry feature at `old`. A silent no-op when `old`
    /// matches neither a handle nor a gap boundary point; interactive
    /// editors probe speculatively.
    fn move_handle(&mut self, old: Point, new: Point);

    /// Directional resize hint for the given handle.
    fn handle_cursor(&self, _handle: Point) -> HandleCursor {
        HandleCursor::Move
    }
}

/// One drawable course-symbol entity.
///
/// Structural equality (`PartialEq`) is the "nothing changed, skip redraw"
/// test. There is deliberately no `Hash` implementation: course objects do
/// not belong in hash-based containers, and the missing impl surfaces such
/// misuse at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CourseObject {
    Point(PointObject),
    Line(LineObject),
    Area(AreaObject),
    Rect(RectObject),
    Text(TextObject),
}

impl CourseObject {
    /// The explicit variant tag of this object.
    pub fn kind_tag(&self) -> ObjectKindTag {
        match self {
            CourseObject::Point(o) => o.kind_tag(),
            CourseObject::Line(o) => o.kind_tag(),
            CourseObject::Area(o) => o.kind_tag(),
            CourseObject::Rect(_) => ObjectKindTag::Description,
            CourseObject::Text(o) => o.kind_tag(),
        }
    }

    pub fn common(&self) -> &ObjectCommon {
        match self {
            CourseObject::Point(o) => &o.common,
            CourseObject::Line(o) => &o.common,
            CourseObject::Area(o) => &o.common,
            CourseObject::Rect(o) => &o.common,
            CourseObject::Text(o) => &o.common,
        }
    }

    pub fn layer(&self) -> Layer {
        self.common().layer
    }
}

impl CourseObj for CourseObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        match self {
            CourseObject::Point(o) => o.add_to_map(map, color, cache),
            CourseObject::Line(o) => o.add_to_map(map, color, cache),
            CourseObject::Area(o) => o.add_to_map(map, color, cache),
            CourseObject::Rect(o) => o.add_to_map(map, color, cache),
            CourseObject::Text(o) => o.add_to_map(map, color, cache),
        }
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        match self {
            CourseObject::Point(o) => o.distance_from_point(pt),
            CourseObject::Line(o) => o.distance_from_point(pt),
            CourseObject::Area(o) => o.distance_from_point(pt),
            CourseObject::Rect(o) => o.distance_from_point(pt),
            CourseObject::Text(o) => o.distance_from_point(pt),
        }
    }

    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        erasing: bool,
    ) {
        match self {
            CourseObject::Point(o) => o.highlight(surface, world_to_pixel, brush, erasing),
            CourseObject::Line(o) => o.highlight(surface, world_to_pixel, brush, erasing),
            CourseObject::Area(o) => o.highlight(surface, world_to_pixel, brush, erasing),
            CourseObject::Rect(o) => o.highlight(surface, world_to_pixel, brush, erasing),
            CourseObject::Text(o) => o.highlight(surface, world_to_pixel, brush, erasing),
        }
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        match self {
            CourseObject::Point(o) => o.offset(dx, dy),
            CourseObject::Line(o) => o.offset(dx, dy),
            CourseObject::Area(o) => o.offset(dx, dy),
            CourseObject::Rect(o) => o.offset(dx, dy),
            CourseObject::Text(o) => o.offset(dx, dy),
        }
    }

    fn handles(&self) -> Option<Handles> {
        match self {
            CourseObject::Point(o) => o.handles(),
            CourseObject::Line(o) => o.handles(),
            CourseObject::Area(o) => o.handles(),
            CourseObject::Rect(o) => o.handles(),
            CourseObject::Text(o) => o.handles(),
        }
    }

    fn move_handle(&mut self, old: Point, new: Point) {
        match self {
            CourseObject::Point(o) => o.move_handle(old, new),
            CourseObject::Line(o) => o.move_handle(old, new),
            CourseObject::Area(o) => o.move_handle(old, new),
            CourseObject::Rect(o) => o.move_handle(old, new),
            CourseObject::Text(o) => o.move_handle(old, new),
        }
    }

    fn handle_cursor(&self, handle: Point) -> HandleCursor {
        match self {
            CourseObject::Point(o) => o.handle_cursor(handle),
            CourseObject::Line(o) => o.handle_cursor(handle),
            CourseObject::Area(o) => o.handle_cursor(handle),
            CourseObject::Rect(o) => o.handle_cursor(handle),
            CourseObject::Text(o) => o.handle_cursor(handle),
        }
    }
}

impl fmt::Display for CourseObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseObject::Point(o) => o.fmt(f),
            CourseObject::Line(o) => o.fmt(f),
            CourseObject::Area(o) => o.fmt(f),
            CourseObject::Rect(o) => o.fmt(f),
            CourseObject::Text(o) => o.fmt(f),
        }
    }
}
