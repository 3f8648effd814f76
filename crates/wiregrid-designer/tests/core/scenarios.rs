//! End-to-end routing and editing scenarios.

use crate::common::{block, cell2, corner, pin, place, turns};
use wiregrid_core::{ConnectError, Direction, Error, MouseButton, Point, PointerEvent};
use wiregrid_designer::{Editor, RouteHints, Scene, ToolKind, ToolSignal, WireState};

#[test]
fn scenario_a_straight_route_between_facing_pins() {
    let mut scene = Scene::default();
    let s = place(&mut scene, cell2(), 100.0, 100.0);
    let d = place(&mut scene, cell2(), 450.0, 100.0);

    let w = scene.begin_wire(s, "out").unwrap();
    let outcome = scene.complete_wire(w, d, "in").unwrap();
    assert_eq!(outcome.fallbacks, 0);

    let path = scene.wire(w).unwrap().path();
    assert_eq!(path, &[pin(&scene, s, "out"), pin(&scene, d, "in")]);
    assert_eq!(turns(path), 0);
}

#[test]
fn scenario_b_detour_around_blocking_node() {
    let mut scene = Scene::default();
    let s = place(&mut scene, cell2(), 100.0, 100.0);
    let d = place(&mut scene, cell2(), 450.0, 100.0);
    let w = scene.begin_wire(s, "out").unwrap();
    scene.complete_wire(w, d, "in").unwrap();

    let blocker = place(&mut scene, cell2(), 300.0, 100.0);
    scene.recalc_wire(w).unwrap();

    let wire = scene.wire(w).unwrap();
    let blocked = scene.node(blocker).unwrap().footprint().cells().to_vec();
    assert_eq!(blocked.len(), 4);
    for cell in wire.footprint().cells() {
        assert!(!blocked.contains(cell), "route crosses blocked cell {}", cell);
        assert!(scene.grid().is_walkable(*cell));
    }
    assert!(turns(wire.path()) >= 1);
    assert_eq!(wire.path().first().copied(), Some(pin(&scene, s, "out")));
    assert_eq!(wire.path().last().copied(), Some(pin(&scene, d, "in")));

    let result = scene.router().route_with_stats(
        scene.grid(),
        pin(&scene, s, "out"),
        pin(&scene, d, "in"),
        RouteHints::new(Some(Direction::Right), Some(Direction::Right)),
        Some(w),
    );
    // Straight would be four plain steps.
    assert!(result.cost >= 40 + 20);
}

#[test]
fn scenario_c_ending_on_start_node_is_rejected() {
    let mut scene = Scene::default();
    let s = place(&mut scene, cell2(), 100.0, 100.0);

    let w = scene.begin_wire(s, "out").unwrap();
    let err = scene.complete_wire(w, s, "in").unwrap_err();
    assert!(matches!(err, Error::Connect(ConnectError::SameNode { .. })));

    let wire = scene.wire(w).unwrap();
    assert_eq!(wire.state(), WireState::Drawing);
    assert!(wire.is_interactive());
    assert!(scene.node(s).unwrap().is_pin_free("in"));
}

#[test]
fn scenario_c_through_wire_tool() {
    let mut editor = Editor::default();
    let s = place(editor.scene_mut(), cell2(), 100.0, 100.0);
    let out = pin(editor.scene(), s, "out");
    let inp = pin(editor.scene(), s, "in");

    let signal = editor.handle(PointerEvent::down(out.x, out.y, MouseButton::LEFT));
    assert_eq!(signal, Some(ToolSignal::Continue));
    assert_eq!(editor.active_tool(), Some(ToolKind::CreateWire));

    let signal = editor.handle(PointerEvent::down(inp.x, inp.y, MouseButton::LEFT));
    assert_eq!(signal, Some(ToolSignal::Continue));
    assert_eq!(editor.active_tool(), Some(ToolKind::CreateWire));

    let wire = editor.scene().wires().next().unwrap();
    assert!(wire.is_drawing());
}

#[test]
fn scenario_d_group_drag_translates_inner_wire_and_stretches_outer() {
    let mut editor = Editor::default();
    let scene = editor.scene_mut();
    let a = place(scene, cell2(), 100.0, 100.0);
    let b = place(scene, cell2(), 450.0, 100.0);
    let c = place(scene, cell2(), 100.0, 400.0);
    let inner = scene.begin_wire(a, "out").unwrap();
    scene.complete_wire(inner, b, "in").unwrap();
    let outer = scene.begin_wire(a, "bottom").unwrap();
    scene.complete_wire(outer, c, "top").unwrap();
    let inner_before = scene.wire(inner).unwrap().path().to_vec();

    // Rubber band around a and b only.
    editor.handle(PointerEvent::down(20.0, 20.0, MouseButton::LEFT));
    editor.handle(PointerEvent::drag(520.0, 200.0, 500.0, 180.0));
    editor.handle(PointerEvent::up(520.0, 200.0));
    assert_eq!(editor.active_tool(), Some(ToolKind::Selection));

    // Grab a and move everything one cell right.
    let signal = editor.handle(PointerEvent::down(100.0, 100.0, MouseButton::LEFT));
    assert_eq!(signal, Some(ToolSignal::Continue));
    editor.handle(PointerEvent::drag(150.0, 100.0, 50.0, 0.0));

    let shifted: Vec<Point> = inner_before.iter().map(|p| p.translated(50.0, 0.0)).collect();
    let scene = editor.scene();
    assert_eq!(scene.wire(inner).unwrap().path(), shifted.as_slice());

    let stretched = scene.wire(outer).unwrap().path();
    assert_eq!(stretched.first().copied(), Some(pin(scene, a, "bottom")));
    assert_eq!(stretched.last().copied(), Some(pin(scene, c, "top")));
    for pair in stretched.windows(2) {
        assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
    }

    editor.handle(PointerEvent::up(150.0, 100.0));
    let scene = editor.scene();
    assert_eq!(scene.node(a).unwrap().position(), Point::new(150.0, 100.0));
    assert_eq!(scene.node(b).unwrap().position(), Point::new(500.0, 100.0));
    assert_eq!(scene.wire(inner).unwrap().path(), shifted.as_slice());

    let rerouted = scene.wire(outer).unwrap().path();
    assert_eq!(rerouted.first().copied(), Some(pin(scene, a, "bottom")));
    assert_eq!(rerouted.last().copied(), Some(pin(scene, c, "top")));
}

#[test]
fn scenario_e_enclosed_target_falls_back_without_error() {
    let mut scene = Scene::default();
    let s = place(&mut scene, cell2(), 100.0, 100.0);
    // Input pin of t lands in cell (10, 11); wall off its other three sides.
    let t = place(&mut scene, cell2(), 600.0, 600.0);
    for (col, row) in [(9, 11), (10, 10), (10, 12)] {
        let at = corner(col, row);
        place(&mut scene, block(), at.x, at.y);
    }

    let from = pin(&scene, s, "out");
    let to = pin(&scene, t, "in");
    assert_eq!(scene.grid().metrics().world_to_grid(&to).col, 10);
    let direct = scene
        .router()
        .route_with_stats(scene.grid(), from, to, RouteHints::default(), None);
    assert!(direct.points.is_empty());
    assert!(direct.expansions > 6000);

    let w = scene.begin_wire(s, "out").unwrap();
    let outcome = scene.complete_wire(w, t, "in").unwrap();
    assert_eq!(outcome.fallbacks, 1);
    assert_eq!(scene.wire(w).unwrap().path(), &[from, to]);
}
