//! Symbol-path geometry for course symbology.
//!
//! A [`SymPath`] is an ordered sequence of points with per-point kind flags.
//! A run of `Normal, BezierControl, BezierControl, Normal` forms one cubic
//! Bézier segment; any other adjacency is a straight segment. Paths offer
//! distance-to-point with closest-point output, bounding box, affine
//! transform, arclength addressing and splitting by gap intervals, which is
//! everything the course-object model needs from its geometry collaborator.

use kurbo::{
    Affine, CubicBez, ParamCurve, ParamCurveArclen, ParamCurveExtrema, ParamCurveNearest, Point,
    Rect, Vec2,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Arclength accuracy used for cubic evaluation throughout.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// Coincidence tolerance when joining sub-path sections.
const JOIN_EPS: f64 = 1e-9;

/// Kind flag carried by every path point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointKind {
    /// An on-curve point.
    Normal,
    /// An off-curve Bézier control point.
    BezierControl,
}

/// One point of a symbol path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub loc: Point,
    pub kind: PointKind,
}

impl PathPoint {
    pub fn normal(x: f64, y: f64) -> Self {
        Self {
            loc: Point::new(x, y),
            kind: PointKind::Normal,
        }
    }

    pub fn control(x: f64, y: f64) -> Self {
        Self {
            loc: Point::new(x, y),
            kind: PointKind::BezierControl,
        }
    }
}

/// An along-path interval removed from a drawn line (distance from the path
/// start, and length of the interval, both in map units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapInterval {
    pub start: f64,
    pub length: f64,
}

impl GapInterval {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> f64 {
        self.start + self.length
    }
}

/// One segment of a path, in evaluated form.
#[derive(Debug, Clone, Copy)]
enum Seg {
    Line(Point, Point),
    Cubic(CubicBez),
}

impl Seg {
    fn len(&self) -> f64 {
        match self {
            Seg::Line(a, b) => a.distance(*b),
            Seg::Cubic(c) => c.arclen(ARCLEN_ACCURACY),
        }
    }
}

/// An ordered point sequence with per-point kind flags.
///
/// Invariants, validated at construction: at least two points, the first and
/// last points are `Normal`, and Bézier control points appear only as pairs
/// bracketed by `Normal` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymPath {
    points: Vec<PathPoint>,
}

impl SymPath {
    /// Validate and build a path.
    pub fn new(points: Vec<PathPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::invalid_path("a path needs at least 2 points"));
        }
        if points[0].kind != PointKind::Normal {
            return Err(Error::invalid_path("path must start with a normal point"));
        }
        if points[points.len() - 1].kind != PointKind::Normal {
            return Err(Error::invalid_path("path must end with a normal point"));
        }
        let mut i = 0;
        while i + 1 < points.len() {
            if points[i + 1].kind == PointKind::BezierControl {
                let ok = i + 3 < points.len()
                    && points[i + 2].kind == PointKind::BezierControl
                    && points[i + 3].kind == PointKind::Normal;
                if !ok {
                    return Err(Error::invalid_path(
                        "bezier control points must come in pairs between normal points",
                    ));
                }
                i += 3;
            } else {
                i += 1;
            }
        }
        Ok(Self { points })
    }

    /// Build a polyline path from on-curve points only.
    pub fn from_points(locs: &[Point]) -> Result<Self> {
        Self::new(
            locs.iter()
                .map(|&loc| PathPoint {
                    loc,
                    kind: PointKind::Normal,
                })
                .collect(),
        )
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn first_point(&self) -> Point {
        self.points[0].loc
    }

    pub fn last_point(&self) -> Point {
        self.points[self.points.len() - 1].loc
    }

    pub fn is_closed(&self) -> bool {
        self.first_point() == self.last_point()
    }

    fn segments(&self) -> Vec<Seg> {
        let pts = &self.points;
        let mut segs = Vec::new();
        let mut i = 0;
        while i + 1 < pts.len() {
            if pts[i + 1].kind == PointKind::BezierControl {
                segs.push(Seg::Cubic(CubicBez::new(
                    pts[i].loc,
                    pts[i + 1].loc,
                    pts[i + 2].loc,
                    pts[i + 3].loc,
                )));
                i += 3;
            } else {
                segs.push(Seg::Line(pts[i].loc, pts[i + 1].loc));
                i += 1;
            }
        }
        segs
    }

    /// Total arclength of the path.
    pub fn length(&self) -> f64 {
        self.segments().iter().map(Seg::len).sum()
    }

    /// Bounding box of the path geometry.
    pub fn bounding_box(&self) -> Rect {
        let mut bbox: Option<Rect> = None;
        for seg in self.segments() {
            let r = match seg {
                Seg::Line(a, b) => Rect::from_points(a, b),
                Seg::Cubic(c) => ParamCurveExtrema::bounding_box(&c),
            };
            bbox = Some(match bbox {
                Some(acc) => acc.union(r),
                None => r,
            });
        }
        // new() guarantees at least one segment
        bbox.unwrap_or(Rect::ZERO)
    }

    /// Distance (always ≥ 0) from `pt` to the nearest point of the path,
    /// together with that nearest point.
    pub fn distance_from_point(&self, pt: Point) -> (f64, Point) {
        let mut best = (f64::INFINITY, self.first_point());
        for seg in self.segments() {
            let (d, closest) = match seg {
                Seg::Line(a, b) => {
                    let closest = closest_on_segment(pt, a, b);
                    (pt.distance(closest), closest)
                }
                Seg::Cubic(c) => {
                    let n = c.nearest(pt, ARCLEN_ACCURACY);
                    (n.distance_sq.sqrt(), c.eval(n.t))
                }
            };
            if d < best.0 {
                best = (d, closest);
            }
        }
        best
    }

    /// The point at arclength `dist` from the start, clamped to the ends.
    pub fn point_at_distance(&self, dist: f64) -> Point {
        let mut remaining = dist.max(0.0);
        let segs = self.segments();
        for seg in &segs {
            let len = seg.len();
            if remaining <= len {
                return match seg {
                    Seg::Line(a, b) => {
                        if len == 0.0 {
                            *a
                        } else {
                            a.lerp(*b, remaining / len)
                        }
                    }
                    Seg::Cubic(c) => c.eval(c.inv_arclen(remaining, ARCLEN_ACCURACY)),
                };
            }
            remaining -= len;
        }
        self.last_point()
    }

    /// Apply an affine transform, producing a new path.
    pub fn transformed(&self, t: Affine) -> SymPath {
        SymPath {
            points: self
                .points
                .iter()
                .map(|p| PathPoint {
                    loc: t * p.loc,
                    kind: p.kind,
                })
                .collect(),
        }
    }

    /// Translate the path in place.
    pub fn offset(&mut self, delta: Vec2) {
        for p in &mut self.points {
            p.loc += delta;
        }
    }

    /// Close the path by synthesizing a final point equal to the first if
    /// it is open.
    pub fn ensure_closed(mut self) -> SymPath {
        if !self.is_closed() {
            let first = self.points[0];
            self.points.push(PathPoint {
                loc: first.loc,
                kind: PointKind::Normal,
            });
        }
        self
    }

    /// Relocate the first on-curve point within `eps` of `old` to `new`,
    /// returning whether anything moved. On a closed path the shared
    /// first/last point moves as one.
    pub fn move_matching_point(&mut self, old: Point, new: Point, eps: f64) -> bool {
        let closed = self.is_closed();
        let last = self.points.len() - 1;
        let found = self
            .points
            .iter()
            .position(|p| p.kind == PointKind::Normal && p.loc.distance(old) <= eps);
        let Some(i) = found else {
            return false;
        };
        self.points[i].loc = new;
        if closed && (i == 0 || i == last) {
            self.points[0].loc = new;
            self.points[last].loc = new;
        }
        true
    }

    /// Flatten the path into a polyline, sampling cubics.
    pub fn flatten(&self) -> Vec<Point> {
        const CUBIC_STEPS: usize = 16;
        let mut out: Vec<Point> = Vec::new();
        for seg in self.segments() {
            match seg {
                Seg::Line(a, b) => {
                    push_unique(&mut out, a);
                    push_unique(&mut out, b);
                }
                Seg::Cubic(c) => {
                    for i in 0..=CUBIC_STEPS {
                        push_unique(&mut out, c.eval(i as f64 / CUBIC_STEPS as f64));
                    }
                }
            }
        }
        out
    }

    /// Remove the given along-path intervals, returning the remaining
    /// sub-paths in order. Intervals must be sorted by start and
    /// non-overlapping; degenerate leftovers are dropped.
    pub fn split_by_gaps(&self, gaps: &[GapInterval]) -> Vec<SymPath> {
        let total = self.length();
        let mut keep: Vec<(f64, f64)> = Vec::new();
        let mut cursor = 0.0;
        for gap in gaps {
            let start = gap.start.clamp(0.0, total);
            let end = gap.end().clamp(0.0, total);
            if start > cursor {
                keep.push((cursor, start));
            }
            cursor = cursor.max(end);
        }
        if cursor < total {
            keep.push((cursor, total));
        }
        keep.iter()
            .filter(|(a, b)| b - a > JOIN_EPS)
            .filter_map(|&(a, b)| self.section(a, b))
            .collect()
    }

    /// Extract the sub-path between arclengths `a` and `b`.
    fn section(&self, a: f64, b: f64) -> Option<SymPath> {
        let mut out: Vec<PathPoint> = Vec::new();
        let mut acc = 0.0;
        for seg in self.segments() {
            let len = seg.len();
            let lo = (a - acc).max(0.0);
            let hi = (b - acc).min(len);
            if hi - lo > JOIN_EPS {
                match seg {
                    Seg::Line(p0, p1) => {
                        let start = p0.lerp(p1, lo / len);
                        let end = p0.lerp(p1, hi / len);
                        push_path_point(&mut out, PathPoint {
                            loc: start,
                            kind: PointKind::Normal,
                        });
                        push_path_point(&mut out, PathPoint {
                            loc: end,
                            kind: PointKind::Normal,
                        });
                    }
                    Seg::Cubic(c) => {
                        let t0 = c.inv_arclen(lo, ARCLEN_ACCURACY);
                        let t1 = c.inv_arclen(hi, ARCLEN_ACCURACY);
                        let sub = c.subsegment(t0..t1);
                        push_path_point(&mut out, PathPoint {
                            loc: sub.p0,
                            kind: PointKind::Normal,
                        });
                        out.push(PathPoint {
                            loc: sub.p1,
                            kind: PointKind::BezierControl,
                        });
                        out.push(PathPoint {
                            loc: sub.p2,
                            kind: PointKind::BezierControl,
                        });
                        out.push(PathPoint {
                            loc: sub.p3,
                            kind: PointKind::Normal,
                        });
                    }
                }
            }
            acc += len;
            if acc >= b {
                break;
            }
        }
        SymPath::new(out).ok()
    }
}

fn push_unique(out: &mut Vec<Point>, p: Point) {
    if out.last().map_or(true, |last| last.distance(p) > JOIN_EPS) {
        out.push(p);
    }
}

fn push_path_point(out: &mut Vec<PathPoint>, p: PathPoint) {
    if out
        .last()
        .map_or(true, |last| last.loc.distance(p.loc) > JOIN_EPS)
    {
        out.push(p);
    }
}

/// Closest point to `pt` on segment `a`-`b`.
pub fn closest_on_segment(pt: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return a;
    }
    let t = ((pt - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `pt` to segment `a`-`b`.
pub fn distance_to_segment(pt: Point, a: Point, b: Point) -> f64 {
    pt.distance(closest_on_segment(pt, a, b))
}

/// Even-odd point-in-polygon test over a closed polyline.
pub fn point_in_polygon(polygon: &[Point], pt: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > pt.y) != (pj.y > pt.y) {
            let x_cross = pj.x + (pt.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
