use std::path::PathBuf;
use tracing::info;
use wiregrid::{
    init_logging, Config, Editor, MouseButton, NodeConfig, NodeId, Point, PointerTracker,
};

/// Replays clicks and drags through the tracker the way a host canvas would.
struct Gestures<'a> {
    editor: &'a mut Editor,
    tracker: PointerTracker,
}

impl Gestures<'_> {
    fn click(&mut self, p: Point, buttons: u8) {
        self.editor.handle(self.tracker.pointer_down(p, p, buttons));
        self.editor.handle(self.tracker.pointer_up(p, p, MouseButton::NONE));
    }

    fn drag(&mut self, from: Point, to: Point, steps: u32) {
        self.editor
            .handle(self.tracker.pointer_down(from, from, MouseButton::LEFT));
        for i in 1..=steps {
            let k = i as f64 / steps as f64;
            let p = Point::new(from.x + (to.x - from.x) * k, from.y + (to.y - from.y) * k);
            self.editor.handle(self.tracker.pointer_move(p, p));
        }
        self.editor
            .handle(self.tracker.pointer_up(to, to, MouseButton::NONE));
    }
}

fn pin(editor: &Editor, node: NodeId, name: &str) -> anyhow::Result<Point> {
    let scene = editor.scene();
    scene
        .node(node)
        .and_then(|n| n.pin_position(name, scene.layout()))
        .ok_or_else(|| anyhow::anyhow!("node {} has no pin {}", node, name))
}

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref());
    init_logging(&config.logging)?;
    info!(
        "wiregrid {} (built {}), cell size {}",
        wiregrid::VERSION,
        wiregrid::BUILD_DATE,
        config.grid.cell_size
    );

    let mut editor = Editor::new(config);
    let scene = editor.scene_mut();
    let a = scene.add_node(NodeConfig::and_gate(), Point::new(175.0, 200.0))?;
    let b = scene.add_node(NodeConfig::and_gate(), Point::new(575.0, 200.0))?;
    let c = scene.add_node(NodeConfig::and_gate(), Point::new(375.0, 550.0))?;

    let a_out = pin(&editor, a, "C")?;
    let b_in = pin(&editor, b, "B")?;
    let a_down = pin(&editor, a, "D")?;
    let c_in = pin(&editor, c, "A")?;

    let mut gestures = Gestures {
        editor: &mut editor,
        tracker: PointerTracker::new(),
    };

    // a.C -> b.B directly, a.D -> c.A through one waypoint.
    gestures.click(a_out, MouseButton::LEFT);
    gestures.click(b_in, MouseButton::LEFT);
    gestures.click(a_down, MouseButton::LEFT);
    gestures.click(Point::new(210.0, 480.0), MouseButton::LEFT);
    gestures.click(c_in, MouseButton::LEFT);

    // Select a and b, then move both two cells down.
    gestures.drag(Point::new(20.0, 20.0), Point::new(720.0, 340.0), 4);
    gestures.drag(Point::new(175.0, 200.0), Point::new(175.0, 300.0), 5);

    if editor.tick(0.0) {
        info!(
            "scene has {} nodes and {} wires",
            editor.scene().node_count(),
            editor.scene().wire_count()
        );
    }
    print!("{}", editor.render_svg());
    Ok(())
}
