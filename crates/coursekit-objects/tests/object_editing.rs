//! Integration tests for the course-object editing protocol: hit-testing,
//! offsets, drag handles and aspect-preserving resize.

use coursekit_core::{Point, Rect, StdTextMetrics, SymPath};
use coursekit_objects::{
    AreaKindTag, AreaObject, CourseAppearance, CourseObj, CourseObject, HandleCursor, Layer,
    LineKindTag, LineObject, ObjectCommon, ObjectIds, PointKindTag, PointObject, RectObject,
    TextKindTag, TextObject,
};

fn common() -> ObjectCommon {
    ObjectCommon::new(Layer(0), ObjectIds::none(), 1.0, CourseAppearance::default()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn scale_ratio_must_be_positive() {
    assert!(ObjectCommon::new(Layer(0), ObjectIds::none(), 0.0, CourseAppearance::default()).is_err());
    assert!(ObjectCommon::new(Layer(0), ObjectIds::none(), -1.5, CourseAppearance::default()).is_err());
}

#[test]
fn control_distance_is_radial_and_clamped() {
    let control = PointObject::new(PointKindTag::Control, common(), Point::new(10.0, 10.0), 0.0);
    // inside the circle: covered
    assert_eq!(control.distance_from_point(Point::new(10.0, 12.0)), 0.0);
    assert_eq!(control.distance_from_point(Point::new(10.0, 10.0)), 0.0);
    // outside: radial distance past the true radius
    assert!(close(control.distance_from_point(Point::new(20.0, 10.0)), 4.0));
}

#[test]
fn gaps_do_not_narrow_the_hit_region() {
    let mut control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    let covered = Point::new(4.0, 4.0); // at 45°, within the gap below
    assert_eq!(control.distance_from_point(covered), 0.0);
    control.set_gaps(u32::MAX & !(0b1111 << 4)); // gap 45°..90°
    assert_eq!(control.distance_from_point(covered), 0.0);
}

#[test]
fn scale_ratio_scales_the_hit_radius() {
    let mut c = common();
    c.scale_ratio = 2.0;
    let control = PointObject::new(PointKindTag::Control, c, Point::new(0.0, 0.0), 0.0);
    assert!(close(control.true_radius(), 12.0));
    assert_eq!(control.distance_from_point(Point::new(11.0, 0.0)), 0.0);
    assert!(close(control.distance_from_point(Point::new(15.0, 0.0)), 3.0));
}

#[test]
fn control_without_gaps_has_no_handles() {
    let control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    assert!(control.handles().is_none());
}

#[test]
fn gap_boundaries_are_handles_and_can_move() {
    let mut control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    control.set_gaps(u32::MAX & !(0b1111 << 4)); // gap 45°..90°
    let handles = control.handles().expect("gapped control exposes handles");
    assert_eq!(handles.len(), 2);

    // drag the 90° boundary to 112.5°
    let old = Point::new(0.0, 6.0);
    let rad = 112.5f64.to_radians();
    let new = Point::new(6.0 * rad.cos(), 6.0 * rad.sin());
    control.move_handle(old, new);
    let widened = control.handles().unwrap();
    assert!(widened
        .iter()
        .any(|p| close(p.x, new.x) && close(p.y, new.y)));
}

#[test]
fn move_handle_misses_are_silent_noops() {
    let mut control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    control.set_gaps(u32::MAX & !(0b1111 << 4));
    let before = control.clone();
    control.move_handle(Point::new(50.0, 50.0), Point::new(60.0, 60.0));
    assert_eq!(control, before);

    let mut boundary = LineObject::new(
        LineKindTag::Boundary,
        common(),
        SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).unwrap(),
    );
    let before = boundary.clone();
    boundary.move_handle(Point::new(5.0, 5.0), Point::new(6.0, 6.0));
    assert_eq!(boundary, before);
}

#[test]
fn leg_distance_accounts_for_half_thickness() {
    let leg = LineObject::new(
        LineKindTag::Leg,
        common(),
        SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).unwrap(),
    );
    // within half of the 0.35 stroke
    assert_eq!(leg.distance_from_point(Point::new(5.0, 0.1)), 0.0);
    assert!(close(leg.distance_from_point(Point::new(5.0, 2.0)), 2.0 - 0.175));
}

#[test]
fn leg_endpoints_are_not_handles_but_boundary_vertices_are() {
    let path = SymPath::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(10.0, 0.0),
    ])
    .unwrap();
    let leg = LineObject::new(LineKindTag::Leg, common(), path.clone());
    let handles = leg.handles().expect("corner vertex is draggable");
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0], Point::new(5.0, 5.0));

    // a straight two-point leg has no handles at all
    let straight = LineObject::new(
        LineKindTag::Leg,
        common(),
        SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]).unwrap(),
    );
    assert!(straight.handles().is_none());

    let boundary = LineObject::new(LineKindTag::Boundary, common(), path);
    assert_eq!(boundary.handles().unwrap().len(), 3);
}

#[test]
fn boundary_vertex_moves() {
    let mut boundary = LineObject::new(
        LineKindTag::Boundary,
        common(),
        SymPath::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ])
        .unwrap(),
    );
    boundary.move_handle(Point::new(5.0, 5.0), Point::new(5.0, 8.0));
    assert!(boundary
        .handles()
        .unwrap()
        .iter()
        .any(|p| *p == Point::new(5.0, 8.0)));
}

#[test]
fn area_containment_then_boundary_distance() {
    let area = AreaObject::new(
        AreaKindTag::OutOfBounds,
        common(),
        SymPath::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap(),
    );
    // input was open; the object closes it
    assert!(area.path.is_closed());
    assert_eq!(area.distance_from_point(Point::new(5.0, 5.0)), 0.0);
    assert!(close(area.distance_from_point(Point::new(15.0, 5.0)), 5.0));
}

#[test]
fn moving_the_shared_area_vertex_keeps_the_path_closed() {
    let mut area = AreaObject::new(
        AreaKindTag::Dangerous,
        common(),
        SymPath::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])
        .unwrap(),
    );
    area.move_handle(Point::new(0.0, 0.0), Point::new(-2.0, -2.0));
    assert!(area.path.is_closed());
    assert_eq!(area.path.first_point(), Point::new(-2.0, -2.0));
}

#[test]
fn rect_handles_and_cursor_table() {
    let rect = RectObject::new(common(), Rect::new(0.0, 0.0, 40.0, 20.0));
    let handles = rect.handles().unwrap();
    assert_eq!(handles.len(), 8);
    assert_eq!(handles[0], Point::new(0.0, 0.0));
    assert_eq!(handles[1], Point::new(20.0, 0.0));
    assert_eq!(handles[7], Point::new(40.0, 20.0));

    assert_eq!(rect.handle_cursor(handles[0]), HandleCursor::SizeNESW);
    assert_eq!(rect.handle_cursor(handles[7]), HandleCursor::SizeNESW);
    assert_eq!(rect.handle_cursor(handles[1]), HandleCursor::SizeNS);
    assert_eq!(rect.handle_cursor(handles[6]), HandleCursor::SizeNS);
    assert_eq!(rect.handle_cursor(handles[2]), HandleCursor::SizeNWSE);
    assert_eq!(rect.handle_cursor(handles[5]), HandleCursor::SizeNWSE);
    assert_eq!(rect.handle_cursor(handles[3]), HandleCursor::SizeEW);
    assert_eq!(rect.handle_cursor(handles[4]), HandleCursor::SizeEW);
    // off-handle probes get the generic move hint
    assert_eq!(rect.handle_cursor(Point::new(7.0, 7.0)), HandleCursor::Move);
}

#[test]
fn edge_drag_preserves_the_captured_aspect() {
    let mut rect = RectObject::new(common(), Rect::new(0.0, 0.0, 40.0, 20.0));
    assert!(close(rect.aspect, 2.0));

    // drag the bottom edge midpoint down: height 20 → 30
    rect.move_handle(Point::new(20.0, 20.0), Point::new(20.0, 30.0));
    assert!(close(rect.rect.height(), 30.0));
    assert!(close(rect.rect.width() / rect.rect.height(), 2.0));

    // drag the right edge midpoint out: width grows, height follows
    let mid_right = Point::new(rect.rect.x1, (rect.rect.y0 + rect.rect.y1) / 2.0);
    rect.move_handle(mid_right, Point::new(80.0, mid_right.y));
    assert!(close(rect.rect.width(), 80.0));
    assert!(close(rect.rect.width() / rect.rect.height(), 2.0));
}

#[test]
fn corner_drag_preserves_the_captured_aspect() {
    let mut rect = RectObject::new(common(), Rect::new(0.0, 0.0, 40.0, 20.0));
    // drag the bottom-right corner mostly downward
    rect.move_handle(Point::new(40.0, 20.0), Point::new(50.0, 40.0));
    assert!(close(rect.rect.width() / rect.rect.height(), 2.0));
    // the drag changed height more, so height is kept
    assert!(close(rect.rect.height(), 40.0));
    assert!(close(rect.rect.width(), 80.0));
}

#[test]
fn text_sizing_follows_metrics_and_em_changes() {
    let metrics = StdTextMetrics;
    let mut number = TextObject::control_number(common(), "31", Point::new(0.0, 0.0), &metrics);
    let (w, h) = number.size;
    assert!(w > 0.0 && h > 0.0);
    number.set_em_height(10.0, &metrics);
    assert!(close(number.size.0, w * 2.0));
    assert!(close(number.size.1, h * 2.0));
}

#[test]
fn text_fit_chooses_the_binding_dimension() {
    let metrics = StdTextMetrics;
    let mut text = TextObject::new(
        TextKindTag::FreeText,
        common(),
        "LONG BANNER TEXT",
        Point::new(0.0, 0.0),
        Default::default(),
        5.0,
        &metrics,
    );
    // wide text in a squarish box: width binds
    text.fit_to_rect(50.0, 40.0, &metrics);
    assert!(close(text.size.0, 50.0));
    assert!(text.size.1 <= 40.0);

    // tall narrow target: height binds
    let mut short = TextObject::new(
        TextKindTag::FreeText,
        common(),
        "A",
        Point::new(0.0, 0.0),
        Default::default(),
        5.0,
        &metrics,
    );
    short.fit_to_rect(100.0, 10.0, &metrics);
    assert!(close(short.size.1, 10.0));
    assert!(short.size.0 <= 100.0);
}

#[test]
fn degenerate_text_fit_is_zero_not_an_error() {
    let metrics = StdTextMetrics;
    let mut empty = TextObject::new(
        TextKindTag::FreeText,
        common(),
        "",
        Point::new(0.0, 0.0),
        Default::default(),
        5.0,
        &metrics,
    );
    empty.fit_to_rect(50.0, 40.0, &metrics);
    assert_eq!(empty.size, (0.0, 0.0));
    assert_eq!(empty.em_height, 0.0);

    let mut text = TextObject::new(
        TextKindTag::FreeText,
        common(),
        "X",
        Point::new(0.0, 0.0),
        Default::default(),
        5.0,
        &metrics,
    );
    text.fit_to_rect(0.0, 40.0, &metrics);
    assert_eq!(text.size, (0.0, 0.0));
}

#[test]
fn text_objects_have_no_handles() {
    let metrics = StdTextMetrics;
    let number = TextObject::control_number(common(), "31", Point::new(0.0, 0.0), &metrics);
    assert!(number.handles().is_none());
}

#[test]
fn offset_round_trips_for_every_family() {
    let metrics = StdTextMetrics;
    let path = SymPath::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ])
    .unwrap();
    let mut objects = vec![
        CourseObject::Point(PointObject::new(
            PointKindTag::Start,
            common(),
            Point::new(5.0, 7.0),
            45.0,
        )),
        CourseObject::Line(LineObject::new(LineKindTag::FlaggedLeg, common(), path.clone())),
        CourseObject::Area(AreaObject::new(AreaKindTag::OutOfBounds, common(), path)),
        CourseObject::Rect(RectObject::new(common(), Rect::new(0.0, 0.0, 40.0, 20.0))),
        CourseObject::Text(TextObject::control_number(
            common(),
            "31",
            Point::new(3.0, 4.0),
            &metrics,
        )),
    ];
    for obj in &mut objects {
        let before = obj.clone();
        obj.offset(3.5, -2.25);
        assert_ne!(*obj, before, "offset must change the geometry");
        obj.offset(-3.5, 2.25);
        assert_eq!(*obj, before, "negated offset must restore the geometry");
    }
}

#[test]
fn equality_detects_unchanged_objects() {
    let a = CourseObject::Point(PointObject::new(
        PointKindTag::Control,
        common(),
        Point::new(1.0, 2.0),
        0.0,
    ));
    let b = a.clone();
    assert_eq!(a, b); // "nothing changed, skip redraw"
    let mut c = b.clone();
    c.offset(0.5, 0.0);
    assert_ne!(a, c);
}

#[test]
fn diagnostic_dump_is_stable_and_readable() {
    let control = CourseObject::Point(PointObject::new(
        PointKindTag::Control,
        common(),
        Point::new(12.5, 7.25),
        0.0,
    ));
    let dump = control.to_string();
    assert!(dump.starts_with("Control:"));
    assert!(dump.contains("location:(12.50,7.25)"));
    assert_eq!(dump, control.to_string());
}
