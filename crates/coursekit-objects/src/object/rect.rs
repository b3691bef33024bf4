//! The rectangle course object: the description-sheet block.
//!
//! Eight handles sit at the corners and edge midpoints, indexed 0..7 left
//! to right within the top, middle and bottom rows. Moving a handle updates
//! only the coordinates that handle controls, then the aspect hook
//! recomputes the non-dragged dimension so the width/height ratio captured
//! at construction is preserved.

use std::fmt;

use coursekit_core::{
    Affine, Brush, ColorId, DrawSurface, Glyph, Map, Pen, Placement, Point, Rect, SymPath, Symbol,
    Vec2,
};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use crate::object::{CourseObj, HandleCursor, Handles, ObjectCommon, ObjectKindTag, HANDLE_EPS};
use crate::symdef::{SymDefCache, SymDefKey};

/// Frame stroke width, map units.
const FRAME_THICKNESS: f64 = 0.18;

/// Which edges a handle drag touched.
#[derive(Debug, Clone, Copy, Default)]
struct DraggedEdges {
    left: bool,
    top: bool,
    right: bool,
    bottom: bool,
}

/// The description-sheet block: an axis-aligned rectangle that keeps the
/// aspect ratio captured at construction through every resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectObject {
    pub common: ObjectCommon,
    pub rect: Rect,
    /// width/height ratio captured at construction.
    pub aspect: f64,
}

impl RectObject {
    pub fn new(common: ObjectCommon, rect: Rect) -> Self {
        let rect = rect.abs();
        let aspect = if rect.height() > 0.0 {
            rect.width() / rect.height()
        } else {
            1.0
        };
        Self {
            common,
            rect,
            aspect,
        }
    }

    pub fn kind_tag(&self) -> ObjectKindTag {
        ObjectKindTag::Description
    }

    /// Handle positions in row-major order: top row left to right, then the
    /// two middle edge handles, then the bottom row.
    fn handle_points(&self) -> [Point; 8] {
        let r = self.rect;
        let xm = (r.x0 + r.x1) / 2.0;
        let ym = (r.y0 + r.y1) / 2.0;
        [
            Point::new(r.x0, r.y0),
            Point::new(xm, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x0, ym),
            Point::new(r.x1, ym),
            Point::new(r.x0, r.y1),
            Point::new(xm, r.y1),
            Point::new(r.x1, r.y1),
        ]
    }

    fn handle_index(&self, handle: Point) -> Option<usize> {
        self.handle_points()
            .iter()
            .position(|p| p.distance(handle) <= HANDLE_EPS)
    }

    /// The aspect hook: recompute the non-dragged dimension to restore the
    /// captured ratio. Edge drags adjust the perpendicular dimension; corner
    /// drags keep whichever dimension the drag changed more.
    fn rectangle_updating(&self, rect: &mut Rect, old: Rect, dragged: DraggedEdges) {
        let horizontal = dragged.left || dragged.right;
        let vertical = dragged.top || dragged.bottom;
        let w = rect.width();
        let h = rect.height();
        if vertical && !horizontal {
            let new_w = h * self.aspect;
            rect.x1 = rect.x0 + new_w;
        } else if horizontal && !vertical {
            let new_h = w / self.aspect;
            rect.y1 = rect.y0 + new_h;
        } else if horizontal && vertical {
            let dw = (w - old.width()).abs();
            let dh = (h - old.height()).abs();
            if dw >= dh {
                let new_h = w / self.aspect;
                if dragged.top {
                    rect.y0 = rect.y1 - new_h;
                } else {
                    rect.y1 = rect.y0 + new_h;
                }
            } else {
                let new_w = h * self.aspect;
                if dragged.left {
                    rect.x0 = rect.x1 - new_w;
                } else {
                    rect.x1 = rect.x0 + new_w;
                }
            }
        }
    }

    fn outline(&self) -> SymPath {
        let r = self.rect;
        // construction from four distinct corners cannot fail
        SymPath::from_points(&[
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
            Point::new(r.x0, r.y0),
        ])
        .expect("rectangle outline is a valid path")
    }
}

impl CourseObj for RectObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        let def = cache.get_or_create(map, color, SymDefKey::Kind(self.kind_tag()), || Glyph::Frame {
            thickness: FRAME_THICKNESS,
        });
        map.add_symbol(Symbol {
            def,
            placement: Placement::Path(self.outline()),
        });
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        distance_to_rect(self.rect, pt)
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
        let pen = Pen::new(FRAME_THICKNESS * scale, *brush);
        let p0 = world_to_pixel * Point::new(self.rect.x0, self.rect.y0);
        let p1 = world_to_pixel * Point::new(self.rect.x1, self.rect.y1);
        surface.draw_rect(Rect::from_points(p0, p1), &pen);
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.rect = self.rect + Vec2::new(dx, dy);
    }

    fn handles(&self) -> Option<Handles> {
        let pts = self.handle_points();
        Some(smallvec![
            pts[0], pts[1], pts[2], pts[3], pts[4], pts[5], pts[6], pts[7],
        ])
    }

    fn move_handle(&mut self, old: Point, new: Point) {
        let Some(index) = self.handle_index(old) else {
            return;
        };
        let before = self.rect;
        let mut r = self.rect;
        let mut dragged = DraggedEdges::default();
        match index {
            0 => {
                r.x0 = new.x;
                r.y0 = new.y;
                dragged.left = true;
                dragged.top = true;
            }
            1 => {
                r.y0 = new.y;
                dragged.top = true;
            }
            2 => {
                r.x1 = new.x;
                r.y0 = new.y;
                dragged.right = true;
                dragged.top = true;
            }
            3 => {
                r.x0 = new.x;
                dragged.left = true;
            }
            4 => {
                r.x1 = new.x;
                dragged.right = true;
            }
            5 => {
                r.x0 = new.x;
                r.y1 = new.y;
                dragged.left = true;
                dragged.bottom = true;
            }
            6 => {
                r.y1 = new.y;
                dragged.bottom = true;
            }
            7 => {
                r.x1 = new.x;
                r.y1 = new.y;
                dragged.right = true;
                dragged.bottom = true;
            }
            _ => unreachable!(),
        }
        r = r.abs();
        self.rectangle_updating(&mut r, before, dragged);
        self.rect = r.abs();
    }

    fn handle_cursor(&self, handle: Point) -> HandleCursor {
        match self.handle_index(handle) {
            Some(0) | Some(7) => HandleCursor::SizeNESW,
            Some(1) | Some(6) => HandleCursor::SizeNS,
            Some(2) | Some(5) => HandleCursor::SizeNWSE,
            Some(3) | Some(4) => HandleCursor::SizeEW,
            _ => HandleCursor::Move,
        }
    }
}

/// Distance from a point to an axis-aligned rectangle; 0 inside.
pub(crate) fn distance_to_rect(r: Rect, pt: Point) -> f64 {
    let dx = (r.x0 - pt.x).max(pt.x - r.x1).max(0.0);
    let dy = (r.y0 - pt.y).max(pt.y - r.y1).max(0.0);
    (dx * dx + dy * dy).sqrt()
}

impl fmt::Display for RectObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Description: {}  rect:({:.2},{:.2})-({:.2},{:.2})  aspect:{:.3}",
            self.common, self.rect.x0, self.rect.y0, self.rect.x1, self.rect.y1, self.aspect
        )
    }
}
