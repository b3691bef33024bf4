//! # CourseKit Objects
//!
//! The course-object geometry and editing model: the typed drawable
//! entities that depict an orienteering course on top of a base map.
//!
//! ## Core Components
//!
//! - **Object model**: [`object::CourseObject`] — a closed sum over five
//!   shape families (point, line, area, rectangle, text) covering control
//!   circles, start triangles, finish circles, legs, boundaries,
//!   out-of-bounds and dangerous areas, point marks, description blocks
//!   and text
//! - **Editing protocol**: [`object::CourseObj`] — hit-test distance,
//!   highlight draw/erase, offset, drag handles with cursor hints and
//!   handle-move semantics
//! - **Gap codec**: [`gaps`] — 32-bit circular mask ↔ angular gap
//!   intervals for interrupted circles
//! - **Symbol definitions**: [`symdef::SymDefCache`] — per-map
//!   deduplication of reusable glyph definitions keyed by color and shape
//! - **Appearance**: [`appearance::CourseAppearance`] — the immutable
//!   presentation bundle shared by a layout pass
//!
//! ## Usage
//!
//! ```rust
//! use coursekit_core::{ColorId, Map, Point};
//! use coursekit_objects::appearance::CourseAppearance;
//! use coursekit_objects::object::{
//!     CourseObj, CourseObject, Layer, ObjectCommon, ObjectIds, PointKindTag, PointObject,
//! };
//! use coursekit_objects::symdef::SymDefCache;
//!
//! let common = ObjectCommon::new(
//!     Layer(0),
//!     ObjectIds::none(),
//!     1.0,
//!     CourseAppearance::default(),
//! )
//! .unwrap();
//! let control = CourseObject::Point(PointObject::new(
//!     PointKindTag::Control,
//!     common,
//!     Point::new(30.0, 40.0),
//!     0.0,
//! ));
//!
//! let mut map = Map::new();
//! let mut cache = SymDefCache::new();
//! control.add_to_map(&mut map, ColorId(1), &mut cache);
//! assert_eq!(map.symbols().len(), 1);
//! ```

pub mod appearance;
pub mod gaps;
pub mod object;
pub mod symdef;

pub use appearance::CourseAppearance;
pub use object::{
    AreaKindTag, AreaObject, ControlId, CourseControlId, CourseObj, CourseObject, HandleCursor,
    Handles, Layer, LineKindTag, LineObject, ObjectCommon, ObjectIds, ObjectKindTag, PointKindTag,
    PointObject, RectObject, SpecialId, TextKindTag, TextObject,
};
pub use symdef::{SymDefCache, SymDefKey};
