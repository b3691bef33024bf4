//! # CourseKit Print
//!
//! The multi-page print-tiling algorithm: splits an oversized map area
//! across physical pages with bounded, evenly distributed overlap, and
//! selects the page orientation that needs the fewest pages.
//!
//! The algorithm is pure and stateless given its inputs. Page layout is
//! computed once up front; the printing host then draws each page
//! sequentially by index. Cancellation is a host-level concern: there are
//! no partial results, the host simply stops asking for pages.

pub mod tiling;

pub use tiling::{
    choose_orientation, layout_pages, DimensionPlacement, DimensionSplitter, Orientation, Page,
    MM_PER_HUNDREDTH_INCH,
};
