use crate::common::{cell2, pin, place};
use wiregrid_core::{MouseButton, NodeId, Point, PointerEvent, PointerTracker};
use wiregrid_designer::{Editor, Tool, ToolKind, ToolSignal};

fn two_cells() -> (Editor, NodeId, NodeId) {
    let mut editor = Editor::default();
    let a = place(editor.scene_mut(), cell2(), 100.0, 100.0);
    let b = place(editor.scene_mut(), cell2(), 450.0, 100.0);
    (editor, a, b)
}

fn click(editor: &mut Editor, p: Point, buttons: u8) -> Option<ToolSignal> {
    editor.handle(PointerEvent::down(p.x, p.y, buttons))
}

#[test]
fn test_wire_tool_restores_after_completion() {
    let (mut editor, a, b) = two_cells();
    let out = pin(editor.scene(), a, "out");
    let inp = pin(editor.scene(), b, "in");

    assert_eq!(click(&mut editor, out, MouseButton::LEFT), Some(ToolSignal::Continue));
    editor.handle(PointerEvent::moved(300.0, 300.0));
    let drawing = editor.scene().wires().next().unwrap();
    assert_eq!(drawing.end_point(), Point::new(300.0, 300.0));

    // Empty space adds a waypoint.
    assert_eq!(
        click(&mut editor, Point::new(300.0, 300.0), MouseButton::LEFT),
        Some(ToolSignal::Continue)
    );
    assert_eq!(editor.scene().wires().next().unwrap().waypoints().len(), 3);

    assert_eq!(click(&mut editor, inp, MouseButton::LEFT), Some(ToolSignal::Restore));
    assert_eq!(editor.active_tool(), None);
    let wire = editor.scene().wires().next().unwrap();
    assert!(wire.is_completed());
    assert_eq!(wire.path().first().copied(), Some(out));
    assert_eq!(wire.path().last().copied(), Some(inp));
}

#[test]
fn test_right_click_discards_wire() {
    let (mut editor, a, _) = two_cells();
    let out = pin(editor.scene(), a, "out");
    click(&mut editor, out, MouseButton::LEFT);
    assert_eq!(editor.scene().wire_count(), 1);

    assert_eq!(
        click(&mut editor, Point::new(300.0, 300.0), MouseButton::RIGHT),
        Some(ToolSignal::Restore)
    );
    assert_eq!(editor.scene().wire_count(), 0);
    assert!(editor.scene().node(a).unwrap().is_pin_free("out"));
}

#[test]
fn test_bound_pin_does_not_start_wire() {
    let (mut editor, a, b) = two_cells();
    let out = pin(editor.scene(), a, "out");
    let inp = pin(editor.scene(), b, "in");
    click(&mut editor, out, MouseButton::LEFT);
    click(&mut editor, inp, MouseButton::LEFT);

    // Neither tool is valid on an occupied pin.
    assert_eq!(click(&mut editor, out, MouseButton::LEFT), None);
    assert_eq!(editor.active_tool(), None);
}

#[test]
fn test_selection_hands_off_to_wire_tool() {
    let (mut editor, a, b) = two_cells();
    click(&mut editor, Point::new(100.0, 100.0), MouseButton::LEFT);
    editor.handle(PointerEvent::up(100.0, 100.0));
    assert_eq!(editor.active_tool(), Some(ToolKind::Selection));
    match editor.tools().tool(ToolKind::Selection) {
        Some(Tool::Selection(tool)) => assert_eq!(tool.selected_nodes().collect::<Vec<_>>(), vec![a]),
        other => panic!("unexpected tool {:?}", other),
    }

    // A pin outside the selection box: selection clears and the same down
    // starts a wire.
    let inp = pin(editor.scene(), b, "in");
    assert_eq!(click(&mut editor, inp, MouseButton::LEFT), Some(ToolSignal::Continue));
    assert_eq!(editor.active_tool(), Some(ToolKind::CreateWire));
    assert_eq!(editor.scene().selection_box().bounds(), None);
}

#[test]
fn test_pin_of_selected_node_hands_off() {
    let (mut editor, a, _) = two_cells();
    click(&mut editor, Point::new(100.0, 100.0), MouseButton::LEFT);
    editor.handle(PointerEvent::up(100.0, 100.0));

    let out = pin(editor.scene(), a, "out");
    assert!(editor.scene().selection_box().inside(out.x, out.y));
    assert_eq!(click(&mut editor, out, MouseButton::LEFT), Some(ToolSignal::Continue));
    assert_eq!(editor.active_tool(), Some(ToolKind::CreateWire));
}

#[test]
fn test_empty_band_unlocks_selection() {
    let (mut editor, _, _) = two_cells();
    click(&mut editor, Point::new(700.0, 700.0), MouseButton::LEFT);
    editor.handle(PointerEvent::drag(800.0, 800.0, 100.0, 100.0));
    editor.handle(PointerEvent::up(800.0, 800.0));
    assert_eq!(editor.tools().depth(), 1);
    assert!(editor.tools().tool(ToolKind::Selection).is_some_and(|t| t.is_unlocked()));

    // The next down replaces the idle selection tool instead of stacking.
    click(&mut editor, Point::new(100.0, 100.0), MouseButton::LEFT);
    assert_eq!(editor.tools().depth(), 1);
    assert_eq!(editor.active_tool(), Some(ToolKind::Selection));
}

#[test]
fn test_band_updates_selection_box() {
    let (mut editor, _, _) = two_cells();
    click(&mut editor, Point::new(700.0, 700.0), MouseButton::LEFT);
    editor.handle(PointerEvent::drag(800.0, 750.0, 100.0, 50.0));
    let sb = editor.scene().selection_box();
    assert_eq!(sb.min(), Point::new(700.0, 700.0));
    assert_eq!(sb.max(), Point::new(800.0, 750.0));
    assert_eq!(editor.draw_list().len(), 3);
}

#[test]
fn test_tracker_drives_node_drag() {
    let (mut editor, a, _) = two_cells();
    let mut tracker = PointerTracker::new();
    let at = |x: f64, y: f64| Point::new(x, y);

    editor.handle(tracker.pointer_down(at(100.0, 100.0), at(100.0, 100.0), MouseButton::LEFT));
    editor.handle(tracker.pointer_move(at(120.0, 110.0), at(120.0, 110.0)));
    editor.handle(tracker.pointer_move(at(160.0, 150.0), at(160.0, 150.0)));
    assert_eq!(editor.scene().node(a).unwrap().position(), Point::new(160.0, 150.0));

    editor.handle(tracker.pointer_up(at(160.0, 150.0), at(160.0, 150.0), MouseButton::NONE));
    assert_eq!(editor.scene().node(a).unwrap().position(), Point::new(150.0, 150.0));
    assert!(editor.tick(0.016));
}

#[test]
fn test_wire_tool_restores_when_wire_deleted_underneath() {
    let (mut editor, a, _) = two_cells();
    let out = pin(editor.scene(), a, "out");
    click(&mut editor, out, MouseButton::LEFT);
    assert_eq!(editor.active_tool(), Some(ToolKind::CreateWire));

    editor.scene_mut().remove_node(a).unwrap();
    assert_eq!(editor.scene().wire_count(), 0);

    assert_eq!(
        editor.handle(PointerEvent::moved(300.0, 300.0)),
        Some(ToolSignal::Restore)
    );
    assert_eq!(editor.active_tool(), None);
    assert_eq!(editor.handle(PointerEvent::moved(310.0, 300.0)), None);
}
