//! Integration tests for map emission: symbol-definition deduplication,
//! gap splitting into symbol instances, and highlight draw/erase parity.

use coursekit_core::{
    Affine, Brush, ColorId, GapInterval, Map, Placement, Point, RecordingSurface, StdTextMetrics,
    SymPath,
};
use coursekit_objects::{
    CourseAppearance, CourseObj, CourseObject, Layer, LineKindTag, LineObject, ObjectCommon,
    ObjectIds, PointKindTag, PointObject, SymDefCache, TextObject,
};

fn common() -> ObjectCommon {
    ObjectCommon::new(Layer(0), ObjectIds::none(), 1.0, CourseAppearance::default()).unwrap()
}

#[test]
fn same_variant_same_color_shares_one_definition() {
    let mut map = Map::new();
    let mut cache = SymDefCache::new();
    let c1 = PointObject::new(PointKindTag::Control, common(), Point::new(10.0, 10.0), 0.0);
    let c2 = PointObject::new(PointKindTag::Control, common(), Point::new(40.0, 25.0), 0.0);

    c1.add_to_map(&mut map, ColorId(1), &mut cache);
    c2.add_to_map(&mut map, ColorId(1), &mut cache);

    assert_eq!(map.symdefs().len(), 1);
    assert_eq!(map.symbols().len(), 2);
    assert_eq!(map.symbols()[0].def, map.symbols()[1].def);
}

#[test]
fn different_variants_and_colors_get_distinct_definitions() {
    let mut map = Map::new();
    let mut cache = SymDefCache::new();
    let control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    let finish = PointObject::new(PointKindTag::Finish, common(), Point::new(5.0, 0.0), 0.0);

    control.add_to_map(&mut map, ColorId(1), &mut cache);
    finish.add_to_map(&mut map, ColorId(1), &mut cache);
    control.add_to_map(&mut map, ColorId(2), &mut cache);

    assert_eq!(map.symdefs().len(), 3);
}

#[test]
fn text_definitions_key_on_font_configuration() {
    let metrics = StdTextMetrics;
    let mut map = Map::new();
    let mut cache = SymDefCache::new();

    let a = TextObject::control_number(common(), "31", Point::new(0.0, 0.0), &metrics);
    let b = TextObject::control_number(common(), "32", Point::new(10.0, 0.0), &metrics);
    a.add_to_map(&mut map, ColorId(1), &mut cache);
    b.add_to_map(&mut map, ColorId(1), &mut cache);
    // same font and em height: one shared definition
    assert_eq!(map.symdefs().len(), 1);

    // same variant, different em height: a second definition
    let mut c = TextObject::control_number(common(), "33", Point::new(20.0, 0.0), &metrics);
    c.set_em_height(7.0, &metrics);
    c.add_to_map(&mut map, ColorId(1), &mut cache);
    assert_eq!(map.symdefs().len(), 2);
}

#[test]
fn control_emits_its_gap_pattern_per_instance() {
    let mut map = Map::new();
    let mut cache = SymDefCache::new();
    let mut control = PointObject::new(PointKindTag::Control, common(), Point::new(0.0, 0.0), 0.0);
    control.set_gaps(u32::MAX & !(0b1111 << 4));
    control.add_to_map(&mut map, ColorId(1), &mut cache);

    match &map.symbols()[0].placement {
        Placement::At { gaps, .. } => {
            assert_eq!(gaps.as_deref(), Some(&[(45.0, 90.0)][..]));
        }
        other => panic!("expected point placement, got {other:?}"),
    }
}

#[test]
fn gapped_leg_emits_one_symbol_per_drawn_segment() {
    let mut map = Map::new();
    let mut cache = SymDefCache::new();
    let mut leg = LineObject::new(
        LineKindTag::Leg,
        common(),
        SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(30.0, 0.0)]).unwrap(),
    );
    leg.set_gaps(Some(vec![GapInterval::new(10.0, 5.0)]));
    leg.add_to_map(&mut map, ColorId(1), &mut cache);

    assert_eq!(map.symdefs().len(), 1);
    assert_eq!(map.symbols().len(), 2);
    for symbol in map.symbols() {
        match &symbol.placement {
            Placement::Path(path) => assert!(path.length() > 0.0),
            other => panic!("expected path placement, got {other:?}"),
        }
    }
}

#[test]
fn ungapped_leg_is_one_continuous_symbol() {
    let mut map = Map::new();
    let mut cache = SymDefCache::new();
    let leg = LineObject::new(
        LineKindTag::Leg,
        common(),
        SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(30.0, 0.0)]).unwrap(),
    );
    leg.add_to_map(&mut map, ColorId(1), &mut cache);
    assert_eq!(map.symbols().len(), 1);
}

#[test]
fn highlight_draw_and_erase_produce_identical_geometry() {
    let world_to_pixel = Affine::scale(4.0) * Affine::translate((10.0, 20.0));
    let brush = Brush::new(0xFFFF0000);

    let mut control = PointObject::new(PointKindTag::Control, common(), Point::new(30.0, 40.0), 0.0);
    control.set_gaps(u32::MAX & !(0b11 << 8));
    let objects: Vec<CourseObject> = vec![
        CourseObject::Point(control),
        CourseObject::Line(LineObject::new(
            LineKindTag::Boundary,
            common(),
            SymPath::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]).unwrap(),
        )),
    ];

    for obj in &objects {
        let mut draw = RecordingSurface::new();
        let mut erase = RecordingSurface::new();
        obj.highlight(&mut draw, world_to_pixel, &brush, false);
        obj.highlight(&mut erase, world_to_pixel, &brush, true);
        assert_eq!(
            draw.ops(),
            erase.ops(),
            "draw and erase must replay the same pixel-space geometry"
        );
        assert!(!draw.ops().is_empty());
    }
}

#[test]
fn course_objects_serialize_round_trip() {
    let control = CourseObject::Point(PointObject::new(
        PointKindTag::Control,
        common(),
        Point::new(12.0, 34.0),
        0.0,
    ));
    let json = serde_json::to_string(&control).unwrap();
    let back: CourseObject = serde_json::from_str(&json).unwrap();
    assert_eq!(control, back);
}
