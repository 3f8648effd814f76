use crate::common::{block, cell2, corner, pin, place};
use wiregrid_core::{Bounds, ConnectError, Error, Hit, Point, SceneError};
use wiregrid_designer::{NodeConfig, Scene, SelectionBox, WireState};
use wiregrid_settings::Config;

#[test]
fn test_add_node_snaps_with_span_parity() {
    let mut scene = Scene::default();
    let even = place(&mut scene, cell2(), 113.0, 88.0);
    assert_eq!(scene.node(even).unwrap().position(), Point::new(100.0, 100.0));

    let odd = place(&mut scene, block(), 510.0, 460.0);
    assert_eq!(scene.node(odd).unwrap().position(), Point::new(525.0, 475.0));
}

#[test]
fn test_placement_rejected_on_blocked_cell() {
    let mut scene = Scene::default();
    place(&mut scene, block(), corner(4, 4).x, corner(4, 4).y);

    let err = scene.add_node(cell2(), Point::new(250.0, 250.0)).unwrap_err();
    match err {
        Error::Scene(SceneError::PlacementBlocked { x, y, col, row }) => {
            assert_eq!((x, y), (250.0, 250.0));
            assert_eq!((col, row), (4, 4));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_complete_wire_rejects_bound_pin() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    let b = place(&mut scene, cell2(), 450.0, 100.0);
    let c = place(&mut scene, cell2(), 100.0, 400.0);

    let w1 = scene.begin_wire(a, "out").unwrap();
    scene.complete_wire(w1, b, "in").unwrap();

    let w2 = scene.begin_wire(c, "out").unwrap();
    let err = scene.complete_wire(w2, b, "in").unwrap_err();
    assert!(matches!(err, Error::Connect(ConnectError::PinOccupied { .. })));
    assert_eq!(scene.wire(w2).unwrap().state(), WireState::Drawing);
}

#[test]
fn test_delete_wire_frees_both_pins() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    let b = place(&mut scene, cell2(), 450.0, 100.0);
    let w = scene.begin_wire(a, "out").unwrap();
    scene.complete_wire(w, b, "in").unwrap();
    assert!(scene.grid().stats().wire_cells > 0);

    scene.delete_wire(w).unwrap();
    assert!(scene.node(a).unwrap().is_pin_free("out"));
    assert!(scene.node(b).unwrap().is_pin_free("in"));
    assert_eq!(scene.grid().stats().wire_cells, 0);
    assert!(matches!(
        scene.delete_wire(w),
        Err(Error::Scene(SceneError::WireNotFound(_)))
    ));
}

#[test]
fn test_drawing_operations_require_drawing_wire() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    let b = place(&mut scene, cell2(), 450.0, 100.0);
    let w = scene.begin_wire(a, "out").unwrap();
    scene.move_wire_cursor(w, Point::new(300.0, 300.0)).unwrap();
    scene.add_wire_point(w, Point::new(300.0, 300.0)).unwrap();
    scene.complete_wire(w, b, "in").unwrap();

    assert!(matches!(
        scene.add_wire_point(w, Point::new(0.0, 0.0)),
        Err(Error::Connect(ConnectError::NotDrawing { .. }))
    ));
    assert!(matches!(
        scene.cancel_wire(w),
        Err(Error::Connect(ConnectError::NotDrawing { .. }))
    ));
}

#[test]
fn test_snap_node_reanchors_wire_endpoints() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    let b = place(&mut scene, cell2(), 450.0, 100.0);
    let w = scene.begin_wire(a, "out").unwrap();
    scene.complete_wire(w, b, "in").unwrap();

    scene.translate_node(a, 0.0, 60.0).unwrap();
    scene.snap_node(a).unwrap();
    assert_eq!(scene.node(a).unwrap().position(), Point::new(100.0, 150.0));
    assert_eq!(scene.wire(w).unwrap().start_point(), pin(&scene, a, "out"));

    scene.recalc_wire(w).unwrap();
    let path = scene.wire(w).unwrap().path();
    assert_eq!(path.first().copied(), Some(pin(&scene, a, "out")));
    assert_eq!(path.last().copied(), Some(pin(&scene, b, "in")));
}

fn band(bounds: Bounds) -> SelectionBox {
    let mut sb = SelectionBox::new();
    sb.fit(&bounds);
    sb
}

#[test]
fn test_find_in_box_is_strict_and_topmost_first() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    let b = place(&mut scene, cell2(), 300.0, 100.0);

    let hits = scene.find_in_box(&band(Bounds::new(0.0, 0.0, 400.0, 200.0)));
    assert_eq!(hits, vec![Hit::Node(b), Hit::Node(a)]);

    // Touching the selection bounds edge does not count.
    let hits = scene.find_in_box(&band(Bounds::new(37.5, 0.0, 400.0, 200.0)));
    assert_eq!(hits, vec![Hit::Node(b)]);

    let merged = scene.merge_bounds(&[Hit::Node(a), Hit::Node(b)]).unwrap();
    assert_eq!(merged, Bounds::new(37.5, 37.5, 362.5, 162.5));
}

#[test]
fn test_hit_test_topmost_node_wins() {
    let mut scene = Scene::default();
    let a = place(&mut scene, cell2(), 100.0, 100.0);
    // Selection bounds overlap even though the bodies do not.
    let b = place(&mut scene, cell2(), 200.0, 100.0);
    assert_eq!(scene.hit_test(&Point::new(150.0, 100.0)), Some(Hit::Node(b)));
    assert_eq!(scene.hit_test(&Point::new(60.0, 100.0)), Some(Hit::Node(a)));
}

#[test]
fn test_config_cell_size_flows_into_layout() {
    let config = Config::with_cell_size(20.0);
    let mut scene = Scene::new(&config);
    let id = scene
        .add_node(NodeConfig::and_gate(), Point::new(101.0, 99.0))
        .unwrap();
    assert_eq!(scene.layout().cell_size(), 20.0);
    assert_eq!(scene.node(id).unwrap().position(), Point::new(110.0, 100.0));
    assert_eq!(scene.node(id).unwrap().footprint().cells().len(), 12);
}
