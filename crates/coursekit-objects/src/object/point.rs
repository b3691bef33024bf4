//! Point-symbol course objects: control, finish, start, crossing point,
//! first aid, water, registration mark and forbidden-route marks.
//!
//! Glyph geometry is defined in a small local unscaled space centered at the
//! origin, scaled by the object's scale ratio, rotated by its orientation
//! where the kind is directional, and finally translated to its location.
//! Control and finish circles are additionally split into drawn arcs by the
//! circular gap mask.

use std::fmt;

use coursekit_core::{
    Affine, Brush, ColorId, DrawSurface, Glyph, Map, Pen, Placement, Point, Rect, Symbol, Vec2,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::gaps::{arcs_from_gaps, decode_gaps, gap_boundary_points, move_gap_boundary};
use crate::object::{CourseObj, Handles, ObjectCommon, ObjectKindTag, HANDLE_EPS};
use crate::symdef::{SymDefCache, SymDefKey};

/// Control-circle radius, map units, before scaling and thickness correction.
pub const CONTROL_RADIUS: f64 = 6.0;
/// Finish-circle radii before thickness correction.
pub const FINISH_INNER_RADIUS: f64 = 5.0;
pub const FINISH_OUTER_RADIUS: f64 = 7.0;
/// Start-triangle side length.
pub const START_SIDE: f64 = 6.0;
/// Arm half-length of the crossing, first-aid and forbidden marks.
pub const MARK_SIZE: f64 = 3.0;
/// Water-cup radius.
pub const WATER_RADIUS: f64 = 2.0;
/// Registration-mark arm half-length and its thin stroke width.
pub const REGISTRATION_SIZE: f64 = 2.0;
pub const REGISTRATION_THICKNESS: f64 = 0.1;

/// Concrete point-symbol variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKindTag {
    Control,
    Finish,
    Start,
    Crossing,
    FirstAid,
    Water,
    Registration,
    Forbidden,
}

impl PointKindTag {
    fn name(self) -> &'static str {
        match self {
            PointKindTag::Control => "Control",
            PointKindTag::Finish => "Finish",
            PointKindTag::Start => "Start",
            PointKindTag::Crossing => "Crossing",
            PointKindTag::FirstAid => "FirstAid",
            PointKindTag::Water => "Water",
            PointKindTag::Registration => "Registration",
            PointKindTag::Forbidden => "Forbidden",
        }
    }

    /// Kinds whose circle is interrupted by the gap mask.
    fn has_gaps(self) -> bool {
        matches!(self, PointKindTag::Control | PointKindTag::Finish)
    }

    /// Kinds whose glyph rotates with the orientation field.
    fn is_directional(self) -> bool {
        matches!(self, PointKindTag::Start | PointKindTag::Crossing)
    }

    /// Unscaled hit-test radius for the kind's glyph.
    fn hit_radius(self) -> f64 {
        match self {
            PointKindTag::Control => CONTROL_RADIUS,
            PointKindTag::Finish => FINISH_OUTER_RADIUS,
            // circumradius of the equilateral triangle
            PointKindTag::Start => START_SIDE / 3f64.sqrt(),
            PointKindTag::Crossing | PointKindTag::FirstAid | PointKindTag::Forbidden => {
                MARK_SIZE / 2.0
            }
            PointKindTag::Water => WATER_RADIUS,
            PointKindTag::Registration => REGISTRATION_SIZE / 2.0,
        }
    }
}

/// A point-symbol course object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointObject {
    pub common: ObjectCommon,
    pub kind: PointKindTag,
    pub location: Point,
    /// Orientation in degrees; meaningful for directional kinds only.
    pub orientation_deg: f64,
    /// Circular gap mask; all bits set means no gaps.
    pub gaps: u32,
    /// Unscaled radius used only for hit-testing.
    pub radius: f64,
}

impl PointObject {
    pub fn new(kind: PointKindTag, common: ObjectCommon, location: Point, orientation_deg: f64) -> Self {
        Self {
            common,
            kind,
            location,
            orientation_deg,
            gaps: u32::MAX,
            radius: kind.hit_radius(),
        }
    }

    pub fn kind_tag(&self) -> ObjectKindTag {
        match self.kind {
            PointKindTag::Control => ObjectKindTag::Control,
            PointKindTag::Finish => ObjectKindTag::Finish,
            PointKindTag::Start => ObjectKindTag::Start,
            PointKindTag::Crossing => ObjectKindTag::Crossing,
            PointKindTag::FirstAid => ObjectKindTag::FirstAid,
            PointKindTag::Water => ObjectKindTag::Water,
            PointKindTag::Registration => ObjectKindTag::Registration,
            PointKindTag::Forbidden => ObjectKindTag::Forbidden,
        }
    }

    /// Hit-test radius at the scale in effect.
    pub fn true_radius(&self) -> f64 {
        self.radius * self.common.scale_ratio
    }

    /// Set the gap mask (no-op glyph-wise for kinds without circles).
    pub fn set_gaps(&mut self, mask: u32) {
        self.gaps = mask;
    }

    /// Rotate a directional glyph; ignored for non-directional kinds.
    pub fn set_orientation(&mut self, degrees: f64) {
        if self.kind.is_directional() {
            self.orientation_deg = degrees;
        }
    }

    fn scale(&self) -> f64 {
        self.common.scale_ratio
    }

    /// Stroke thickness at the scale in effect.
    fn thickness(&self) -> f64 {
        let base = match self.kind {
            PointKindTag::Registration => REGISTRATION_THICKNESS * self.common.appearance.line_width_mul,
            _ => self.common.appearance.line_thickness(),
        };
        base * self.scale()
    }

    /// Drawn circle radius: glyph radius scaled, minus half the stroke so
    /// the stroke's outside edge lands on the nominal radius.
    fn drawn_radius(&self, nominal: f64) -> f64 {
        let mul = self.common.appearance.control_circle_size_mul;
        nominal * mul * self.scale() - self.thickness() / 2.0
    }

    fn glyph(&self) -> Glyph {
        let thickness = self.thickness();
        match self.kind {
            PointKindTag::Control => Glyph::Circle {
                radius: self.drawn_radius(CONTROL_RADIUS),
                thickness,
            },
            PointKindTag::Finish => Glyph::DoubleCircle {
                inner_radius: self.drawn_radius(FINISH_INNER_RADIUS),
                outer_radius: self.drawn_radius(FINISH_OUTER_RADIUS),
                thickness,
            },
            PointKindTag::Start => Glyph::Triangle {
                side: START_SIDE * self.scale(),
                thickness,
            },
            PointKindTag::Crossing => Glyph::CrossingMark {
                size: MARK_SIZE * self.scale(),
                thickness,
            },
            PointKindTag::FirstAid => Glyph::Cross {
                size: MARK_SIZE * self.scale(),
                thickness,
                diagonal: false,
            },
            PointKindTag::Water => Glyph::Cup {
                radius: WATER_RADIUS * self.scale(),
                thickness,
            },
            PointKindTag::Registration => Glyph::Cross {
                size: REGISTRATION_SIZE * self.scale(),
                thickness,
                diagonal: false,
            },
            PointKindTag::Forbidden => Glyph::Cross {
                size: MARK_SIZE * self.scale(),
                thickness,
                diagonal: true,
            },
        }
    }

    /// Local→world placement transform of the glyph.
    fn placement_transform(&self) -> Affine {
        let rotate = if self.kind.is_directional() {
            Affine::rotate(self.orientation_deg.to_radians())
        } else {
            Affine::IDENTITY
        };
        Affine::translate(self.location.to_vec2()) * rotate * Affine::scale(self.scale())
    }

    /// Pixel-space square bounds of a circle of world radius `r`.
    fn pixel_circle_bounds(&self, world_to_pixel: Affine, r: f64) -> Rect {
        let center = world_to_pixel * self.location;
        let pr = r * transform_scale(world_to_pixel);
        Rect::new(center.x - pr, center.y - pr, center.x + pr, center.y + pr)
    }

    /// Local-space stroke endpoints for the mark kinds.
    fn mark_strokes(&self) -> Vec<(Point, Point)> {
        match self.kind {
            PointKindTag::Crossing => {
                // paired slanted strokes either side of the crossing
                let h = MARK_SIZE / 2.0;
                let s = MARK_SIZE / 4.0;
                vec![
                    (Point::new(-h, -s), Point::new(-s, -h)),
                    (Point::new(s, h), Point::new(h, s)),
                ]
            }
            PointKindTag::FirstAid => {
                let h = MARK_SIZE / 2.0;
                vec![
                    (Point::new(-h, 0.0), Point::new(h, 0.0)),
                    (Point::new(0.0, -h), Point::new(0.0, h)),
                ]
            }
            PointKindTag::Registration => {
                let h = REGISTRATION_SIZE / 2.0;
                vec![
                    (Point::new(-h, 0.0), Point::new(h, 0.0)),
                    (Point::new(0.0, -h), Point::new(0.0, h)),
                ]
            }
            PointKindTag::Forbidden => {
                let h = MARK_SIZE / 2.0;
                vec![
                    (Point::new(-h, -h), Point::new(h, h)),
                    (Point::new(-h, h), Point::new(h, -h)),
                ]
            }
            _ => Vec::new(),
        }
    }
}

/// Uniform scale factor of an affine (length of its x basis vector).
fn transform_scale(t: Affine) -> f64 {
    let c = t.as_coeffs();
    (c[0] * c[0] + c[1] * c[1]).sqrt()
}

impl CourseObj for PointObject {
    fn add_to_map(&self, map: &mut Map, color: ColorId, cache: &mut SymDefCache) {
        let def = cache.get_or_create(map, color, SymDefKey::Kind(self.kind_tag()), || self.glyph());
        let gaps = if self.kind.has_gaps() {
            decode_gaps(self.gaps)
        } else {
            None
        };
        map.add_symbol(Symbol {
            def,
            placement: Placement::At {
                location: self.location,
                orientation_deg: self.orientation_deg,
                gaps,
            },
        });
    }

    fn distance_from_point(&self, pt: Point) -> f64 {
        // Gaps interrupt the drawn stroke, never the hit region.
        (pt.distance(self.location) - self.true_radius()).max(0.0)
    }

    fn highlight(
        &self,
        surface: &mut dyn DrawSurface,
        world_to_pixel: Affine,
        brush: &Brush,
        _erasing: bool,
    ) {
        let pen = Pen::new(self.thickness() * transform_scale(world_to_pixel), *brush);
        match self.kind {
            PointKindTag::Control => {
                let bounds = self.pixel_circle_bounds(world_to_pixel, self.drawn_radius(CONTROL_RADIUS));
                for (start, sweep) in arcs_from_gaps(&decode_gaps(self.gaps)) {
                    surface.draw_arc(bounds, start, sweep, &pen);
                }
            }
            PointKindTag::Finish => {
                let arcs = arcs_from_gaps(&decode_gaps(self.gaps));
                for nominal in [FINISH_INNER_RADIUS, FINISH_OUTER_RADIUS] {
                    let bounds = self.pixel_circle_bounds(world_to_pixel, self.drawn_radius(nominal));
                    for &(start, sweep) in &arcs {
                        surface.draw_arc(bounds, start, sweep, &pen);
                    }
                }
            }
            PointKindTag::Start => {
                let place = world_to_pixel * self.placement_transform();
                let circum = START_SIDE / 3f64.sqrt();
                let pts: Vec<Point> = (0..3)
                    .map(|i| {
                        // apex points along +x (the orientation direction)
                        let angle = (i as f64) * 120f64.to_radians();
                        place * Point::new(circum * angle.cos(), circum * angle.sin())
                    })
                    .collect();
                surface.draw_polygon(&pts, &pen);
            }
            PointKindTag::Water => {
                let bounds = self.pixel_circle_bounds(world_to_pixel, WATER_RADIUS * self.scale());
                // open cup: lower half plus the rim stubs
                surface.draw_arc(bounds, 180.0, 180.0, &pen);
                let place = world_to_pixel * self.placement_transform();
                surface.draw_line(
                    place * Point::new(-WATER_RADIUS, 0.0),
                    place * Point::new(-WATER_RADIUS, WATER_RADIUS / 2.0),
                    &pen,
                );
                surface.draw_line(
                    place * Point::new(WATER_RADIUS, 0.0),
                    place * Point::new(WATER_RADIUS, WATER_RADIUS / 2.0),
                    &pen,
                );
            }
            _ => {
                let place = world_to_pixel * self.placement_transform();
                for (a, b) in self.mark_strokes() {
                    surface.draw_line(place * a, place * b, &pen);
                }
            }
        }
    }

    fn offset(&mut self, dx: f64, dy: f64) {
        self.location += Vec2::new(dx, dy);
    }

    fn handles(&self) -> Option<Handles> {
        if !self.kind.has_gaps() || self.gaps == u32::MAX {
            return None;
        }
        let pts = gap_boundary_points(self.location, self.true_radius(), self.gaps);
        if pts.is_empty() {
            None
        } else {
            Some(SmallVec::from_vec(pts))
        }
    }

    fn move_handle(&mut self, old: Point, new: Point) {
        if !self.kind.has_gaps() {
            return;
        }
        let boundary = gap_boundary_points(self.location, self.true_radius(), self.gaps);
        if !boundary.iter().any(|p| p.distance(old) <= HANDLE_EPS) {
            return;
        }
        let old_angle = (old.y - self.location.y)
            .atan2(old.x - self.location.x)
            .to_degrees();
        let new_angle = (new.y - self.location.y)
            .atan2(new.x - self.location.x)
            .to_degrees();
        self.gaps = move_gap_boundary(self.gaps, old_angle, new_angle);
    }
}

impl fmt::Display for PointObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}  location:({:.2},{:.2})",
            self.kind.name(),
            self.common,
            self.location.x,
            self.location.y
        )?;
        if self.kind.is_directional() {
            write!(f, "  orientation:{:.1}", self.orientation_deg)?;
        }
        if self.kind.has_gaps() && self.gaps != u32::MAX {
            write!(f, "  gaps:{:08X}", self.gaps)?;
        }
        Ok(())
    }
}
