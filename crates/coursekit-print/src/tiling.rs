//! Page tiling: splitting one map-space rectangle across physical pages.
//!
//! Each axis is split independently by [`DimensionSplitter`]; the 2-D page
//! set is the cross product of the two axis splits. Map coordinates are in
//! millimeters; printable-area coordinates are in 1/100-inch units, so the
//! conversion factor between the two spaces is 0.254 mm per hundredth-inch
//! times the print scale ratio.
//!
//! Oversized dimensions are split with bounded overlap: at least 1 inch or
//! one sixth of the printable length (whichever is smaller) between
//! adjacent pages, redistributed so every adjacent pair overlaps equally
//! and the union exactly covers the needed length.

use coursekit_core::{Error, Rect, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Millimeters per hundredth of an inch.
pub const MM_PER_HUNDREDTH_INCH: f64 = 0.254;

/// Maximum minimum-overlap, in hundredth-inch units (1 inch).
const MAX_MIN_OVERLAP: f64 = 100.0;

/// One page's placement along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionPlacement {
    /// Start of the covered map span, map units.
    pub map_start: f64,
    /// Length of the covered map span, map units.
    pub map_length: f64,
    /// Start of the destination span within the printable area.
    pub printable_start: f64,
    /// Length of the destination span.
    pub printable_length: f64,
}

/// Splits one map-space dimension across one or more pages.
///
/// The placement sequence is lazy, finite and restartable: it is computed
/// per element as the caller iterates, and fully deterministic given the
/// inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionSplitter {
    map_start: f64,
    map_length: f64,
    printable_start: f64,
    printable_length: f64,
    scale_ratio: f64,
}

impl DimensionSplitter {
    pub fn new(
        map_start: f64,
        map_length: f64,
        printable_start: f64,
        printable_length: f64,
        scale_ratio: f64,
    ) -> Self {
        Self {
            map_start,
            map_length,
            printable_start,
            printable_length,
            scale_ratio,
        }
    }

    /// Map units per hundredth-inch of output.
    fn map_per_output(&self) -> f64 {
        MM_PER_HUNDREDTH_INCH * self.scale_ratio
    }

    /// The map length expressed in output units.
    fn needed_length(&self) -> f64 {
        self.map_length / self.map_per_output()
    }

    /// Minimum overlap between adjacent pages, output units.
    fn min_overlap(&self) -> f64 {
        MAX_MIN_OVERLAP.min(self.printable_length / 6.0)
    }

    /// Number of pages along this axis; ≥ 2 in the multi-page case.
    pub fn page_count(&self) -> usize {
        let needed = self.needed_length();
        if needed <= self.printable_length {
            return 1;
        }
        let min_overlap = self.min_overlap();
        let count = ((needed - min_overlap) / (self.printable_length - min_overlap)).ceil() as usize;
        count.max(2)
    }

    /// The actual overlap: the minimum overlap grown so every adjacent pair
    /// overlaps equally and the union exactly covers the needed length.
    fn overlap(&self, page_count: usize) -> f64 {
        (page_count as f64 * self.printable_length - self.needed_length()) / (page_count - 1) as f64
    }

    /// Lazy sequence of per-page placements along this axis.
    pub fn placements(&self) -> impl Iterator<Item = DimensionPlacement> + '_ {
        let count = self.page_count();
        let single = count == 1;
        let overlap = if single { 0.0 } else { self.overlap(count) };
        (0..count).map(move |i| {
            if single {
                let needed = self.needed_length();
                let border = (self.printable_length - needed) / 2.0;
                DimensionPlacement {
                    map_start: self.map_start,
                    map_length: self.map_length,
                    printable_start: self.printable_start + border,
                    printable_length: needed,
                }
            } else {
                let advance = (self.printable_length - overlap) * self.map_per_output();
                DimensionPlacement {
                    map_start: self.map_start + i as f64 * advance,
                    map_length: self.printable_length * self.map_per_output(),
                    printable_start: self.printable_start,
                    printable_length: self.printable_length,
                }
            }
        })
    }
}

/// One physical page: the map-space rectangle it shows and the destination
/// rectangle within the printable area it maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub map_rect: Rect,
    pub dest_rect: Rect,
}

/// Page orientation of a print layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Lay out `map_area` (map units) across pages of the given printable area
/// (hundredth-inch units). The page set is the cross product of the
/// vertical and horizontal axis splits.
pub fn layout_pages(map_area: Rect, printable: Rect, scale_ratio: f64) -> Result<Vec<Page>> {
    if map_area.width() <= 0.0 || map_area.height() <= 0.0 {
        return Err(Error::EmptyLayout);
    }
    let horizontal = DimensionSplitter::new(
        map_area.x0,
        map_area.width(),
        printable.x0,
        printable.width(),
        scale_ratio,
    );
    let vertical = DimensionSplitter::new(
        map_area.y0,
        map_area.height(),
        printable.y0,
        printable.height(),
        scale_ratio,
    );
    let mut pages = Vec::with_capacity(horizontal.page_count() * vertical.page_count());
    for v in vertical.placements() {
        for h in horizontal.placements() {
            pages.push(Page {
                map_rect: Rect::new(
                    h.map_start,
                    v.map_start,
                    h.map_start + h.map_length,
                    v.map_start + v.map_length,
                ),
                dest_rect: Rect::new(
                    h.printable_start,
                    v.printable_start,
                    h.printable_start + h.printable_length,
                    v.printable_start + v.printable_length,
                ),
            });
        }
    }
    debug!(
        pages = pages.len(),
        across = horizontal.page_count(),
        down = vertical.page_count(),
        "laid out print pages"
    );
    Ok(pages)
}

/// Lay out the same course in portrait and landscape and pick one:
/// landscape only when it strictly needs fewer pages, or — on a page-count
/// tie — when its first page's destination rectangle is wider than tall.
pub fn choose_orientation(
    map_area: Rect,
    portrait_printable: Rect,
    landscape_printable: Rect,
    scale_ratio: f64,
) -> Result<(Vec<Page>, Orientation)> {
    let portrait = layout_pages(map_area, portrait_printable, scale_ratio)?;
    let landscape = layout_pages(map_area, landscape_printable, scale_ratio)?;
    let pick_landscape = landscape.len() < portrait.len()
        || (landscape.len() == portrait.len()
            && landscape[0].dest_rect.width() > landscape[0].dest_rect.height());
    debug!(
        portrait = portrait.len(),
        landscape = landscape.len(),
        pick_landscape,
        "orientation selected"
    );
    if pick_landscape {
        Ok((landscape, Orientation::Landscape))
    } else {
        Ok((portrait, Orientation::Portrait))
    }
}
