//! # CourseKit Core
//!
//! Shared foundation for the CourseKit workspace: the geometry primitives
//! consumed by the course-object model, the drawing-surface abstraction, and
//! the map/symbol-definition data model that receives finished symbols.
//!
//! ## Core Components
//!
//! - **Geometry**: [`geom::SymPath`] — ordered point sequences with
//!   per-point kind flags, distance-to-point, bounding box, affine
//!   transform, and splitting by along-path gap intervals
//! - **Surface**: [`surface::DrawSurface`] — immediate-mode primitive
//!   drawing seam with a transform/clip stack, plus a recording backend
//! - **Map model**: [`map::Map`] — symbol definitions keyed by id and
//!   symbol instances referencing a definition plus placement
//! - **Errors**: [`error::Error`] — construction-time validation failures

pub mod error;
pub mod geom;
pub mod map;
pub mod surface;

pub use error::{Error, Result};
pub use geom::{GapInterval, PathPoint, PointKind, SymPath};
pub use map::{ColorId, Glyph, Map, Placement, SymDef, SymDefId, Symbol};
pub use surface::{Brush, DrawOp, DrawSurface, FontDesc, Pen, RecordingSurface, StdTextMetrics, TextMetrics};

// The geometry types are kurbo's; re-export the ones on the public surface.
pub use kurbo::{Affine, Point, Rect, Vec2};
