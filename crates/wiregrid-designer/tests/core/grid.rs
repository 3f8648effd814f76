use proptest::prelude::*;
use wiregrid_core::{GridCell, NodeId, Point, WireId};
use wiregrid_designer::{CellFootprint, Node, NodeConfig, NodeKind, OccupancyGrid};

#[test]
fn test_register_node_marks_span() {
    let mut grid = OccupancyGrid::default();
    let mut node = Node::new(NodeId(1), NodeConfig::and_gate(), Point::new(175.0, 200.0));
    grid.register_node(&mut node);

    assert_eq!(node.footprint().cells().len(), 12);
    assert_eq!(node.footprint().anchor(), Some(GridCell::new(3, 4)));
    assert!(!grid.is_walkable(GridCell::new(2, 2)));
    assert!(!grid.is_walkable(GridCell::new(4, 5)));
    assert!(grid.is_walkable(GridCell::new(5, 3)));
    assert_eq!(grid.nodes_at(GridCell::new(3, 3)), &[NodeId(1)]);
    assert_eq!(grid.stats().blocked_cells, 12);
}

#[test]
fn test_register_node_noop_within_base_cell() {
    let mut grid = OccupancyGrid::default();
    let mut node = Node::new(NodeId(1), NodeConfig::and_gate(), Point::new(175.0, 200.0));
    grid.register_node(&mut node);
    let before = grid.clone();

    node.translate(10.0, 10.0);
    grid.register_node(&mut node);
    assert_eq!(grid, before);

    node.translate(50.0, 0.0);
    grid.register_node(&mut node);
    assert!(grid.is_walkable(GridCell::new(2, 2)));
    assert!(!grid.is_walkable(GridCell::new(5, 2)));
}

#[test]
fn test_adjacency_penalty_next_to_node() {
    let mut grid = OccupancyGrid::default();
    let mut node = Node::new(
        NodeId(1),
        NodeConfig::new("B", NodeKind::Logic, 1, 1),
        Point::new(125.0, 125.0),
    );
    grid.register_node(&mut node);

    assert_eq!(grid.cell_cost(GridCell::new(2, 2), None), None);
    assert_eq!(grid.cell_cost(GridCell::new(3, 2), None), Some(15));
    // Diagonal neighbours do not count.
    assert_eq!(grid.cell_cost(GridCell::new(3, 3), None), Some(10));
}

#[test]
fn test_clear_leaves_empty_index() {
    let mut grid = OccupancyGrid::default();
    let mut node = Node::new(NodeId(1), NodeConfig::and_gate(), Point::new(175.0, 200.0));
    grid.register_node(&mut node);
    let mut fp = CellFootprint::new();
    grid.register_wire_path(WireId(2), &mut fp, &[Point::new(500.0, 500.0)]);

    grid.clear();
    assert_eq!(grid.stats().blocked_cells, 0);
    assert_eq!(grid.stats().wire_cells, 0);
}

fn span() -> impl Strategy<Value = u32> {
    1u32..=5
}

proptest! {
    #[test]
    fn prop_footprint_cells_are_blocked(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        cols in span(),
        rows in span(),
    ) {
        let mut grid = OccupancyGrid::default();
        let config = NodeConfig::new("N", NodeKind::Logic, cols, rows);
        let mut node = Node::new(NodeId(1), config, Point::new(x, y));
        grid.register_node(&mut node);

        prop_assert_eq!(node.footprint().cells().len(), (cols * rows) as usize);
        for cell in node.footprint().cells() {
            prop_assert!(!grid.is_walkable(*cell));
        }
    }

    #[test]
    fn prop_node_register_unregister_round_trip(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        cols in span(),
        rows in span(),
    ) {
        let mut grid = OccupancyGrid::default();
        let mut other = Node::new(
            NodeId(1),
            NodeConfig::new("M", NodeKind::Logic, 2, 2),
            Point::new(5000.0, 5000.0),
        );
        grid.register_node(&mut other);
        let baseline = grid.clone();
        let blocked = grid.stats().blocked_cells;

        let config = NodeConfig::new("N", NodeKind::Logic, cols, rows);
        let mut node = Node::new(NodeId(7), config, Point::new(x, y));

        grid.register_node(&mut node);
        prop_assert_eq!(grid.stats().blocked_cells, blocked + (cols * rows) as usize);
        grid.unregister_node(&mut node);
        prop_assert_eq!(&grid, &baseline);
        prop_assert_eq!(grid.stats().blocked_cells, blocked);
        prop_assert!(node.footprint().is_empty());
        for cell in other.footprint().cells() {
            prop_assert_eq!(grid.nodes_at(*cell), &[NodeId(1)]);
        }
    }

    #[test]
    fn prop_wire_unregister_idempotent(
        points in proptest::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 0..20),
    ) {
        let points: Vec<Point> = points.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        let mut grid = OccupancyGrid::default();
        let shared = [Point::new(-475.0, -475.0), Point::new(25.0, 25.0), Point::new(475.0, 475.0)];
        let mut other_fp = CellFootprint::new();
        grid.register_wire_path(WireId(2), &mut other_fp, &shared);
        let baseline = grid.clone();
        let mut fp = CellFootprint::new();

        grid.register_wire_path(WireId(1), &mut fp, &points);
        for p in &points {
            let cell = grid.metrics().world_to_grid(p);
            prop_assert!(grid.wires_at(cell).contains(&WireId(1)));
        }

        grid.unregister_wire(WireId(1), &mut fp);
        prop_assert_eq!(&grid, &baseline);
        grid.unregister_wire(WireId(1), &mut fp);
        prop_assert_eq!(&grid, &baseline);
        for p in &shared {
            let cell = grid.metrics().world_to_grid(p);
            prop_assert_eq!(grid.wires_at(cell), &[WireId(2)]);
        }
    }
}
