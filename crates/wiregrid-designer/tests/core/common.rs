use wiregrid_core::{NodeId, Point};
use wiregrid_designer::{NodeConfig, NodeKind, PinRole, PinSide, Scene};

/// 2x2 cell with one pin per side.
pub fn cell2() -> NodeConfig {
    NodeConfig::new("CELL", NodeKind::Logic, 2, 2)
        .with_pin("in", PinSide::Left, 0, PinRole::Input)
        .with_pin("out", PinSide::Right, 0, PinRole::Output)
        .with_pin("top", PinSide::Top, 0, PinRole::Input)
        .with_pin("bottom", PinSide::Bottom, 0, PinRole::Output)
}

/// 1x1 obstacle with no pins.
pub fn block() -> NodeConfig {
    NodeConfig::new("BLOCK", NodeKind::Logic, 1, 1)
}

/// Top-left grid corner of a cell; a 1x1 node placed here covers exactly
/// that cell.
pub fn corner(col: i32, row: i32) -> Point {
    Point::new(col as f64 * 50.0, row as f64 * 50.0)
}

pub fn place(scene: &mut Scene, config: NodeConfig, x: f64, y: f64) -> NodeId {
    scene
        .add_node(config, Point::new(x, y))
        .expect("placement should succeed")
}

pub fn pin(scene: &Scene, node: NodeId, name: &str) -> Point {
    scene
        .node(node)
        .and_then(|n| n.pin_position(name, scene.layout()))
        .expect("pin should exist")
}

/// Number of direction changes along an orthogonal polyline.
pub fn turns(points: &[Point]) -> usize {
    points
        .windows(3)
        .filter(|w| {
            let first_horizontal = w[0].y == w[1].y;
            let second_horizontal = w[1].y == w[2].y;
            first_horizontal != second_horizontal
        })
        .count()
}
