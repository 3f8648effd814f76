use proptest::prelude::*;
use wiregrid_core::{Direction, GridCell, NodeId, Point};
use wiregrid_designer::{Node, NodeConfig, NodeKind, OccupancyGrid, RouteHints, RouterConfig, WireRouter};

fn block_at(grid: &mut OccupancyGrid, id: u64, cell: GridCell) {
    let center = grid.metrics().grid_to_world(cell);
    let mut node = Node::new(NodeId(id), NodeConfig::new("B", NodeKind::Logic, 1, 1), center);
    grid.register_node(&mut node);
}

#[test]
fn test_path_starts_and_ends_on_cell_centres() {
    let grid = OccupancyGrid::default();
    let router = WireRouter::default();
    let path = router.route(
        &grid,
        Point::new(10.0, 10.0),
        Point::new(190.0, 140.0),
        RouteHints::default(),
        None,
    );
    assert_eq!(path.first(), Some(&Point::new(25.0, 25.0)));
    assert_eq!(path.last(), Some(&Point::new(175.0, 125.0)));
    // Manhattan distance 5, so six cells.
    assert_eq!(path.len(), 6);
}

#[test]
fn test_steps_are_orthogonal_unit_moves() {
    let mut grid = OccupancyGrid::default();
    block_at(&mut grid, 1, GridCell::new(2, 0));
    let router = WireRouter::default();
    let path = router.route(
        &grid,
        Point::new(25.0, 25.0),
        Point::new(225.0, 25.0),
        RouteHints::default(),
        None,
    );
    assert!(!path.is_empty());
    for pair in path.windows(2) {
        let d = (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs();
        assert_eq!(d, 50.0);
    }
    assert!(!path.contains(&Point::new(125.0, 25.0)));
}

#[test]
fn test_exit_hint_forbids_reversal() {
    let grid = OccupancyGrid::default();
    let router = WireRouter::default();
    // The goal is behind the start relative to the exit direction, so the
    // first step must leave sideways instead of going straight back.
    let path = router.route(
        &grid,
        Point::new(225.0, 25.0),
        Point::new(25.0, 25.0),
        RouteHints::new(Some(Direction::Right), None),
        None,
    );
    assert!(path.len() > 5);
    assert_ne!(path[1], Point::new(175.0, 25.0));
}

#[test]
fn test_goal_cell_blocked_fails_within_budget() {
    let mut grid = OccupancyGrid::default();
    block_at(&mut grid, 1, GridCell::new(4, 0));
    let router = WireRouter::new(RouterConfig {
        max_iterations: 200,
        ..RouterConfig::default()
    });
    let result = router.route_with_stats(
        &grid,
        Point::new(25.0, 25.0),
        Point::new(225.0, 25.0),
        RouteHints::default(),
        None,
    );
    assert!(!result.is_found());
    assert_eq!(result.expansions, 201);
}

#[test]
fn test_crossing_existing_wire_costs_more() {
    let mut grid = OccupancyGrid::default();
    let mut fp = wiregrid_designer::CellFootprint::new();
    let wall: Vec<Point> = (-5..=5)
        .map(|row| grid.metrics().grid_to_world(GridCell::new(2, row)))
        .collect();
    grid.register_wire_path(wiregrid_core::WireId(9), &mut fp, &wall);

    let router = WireRouter::default();
    let result = router.route_with_stats(
        &grid,
        Point::new(25.0, 25.0),
        Point::new(225.0, 25.0),
        RouteHints::default(),
        None,
    );
    // Crossing once beats walking around an eleven-cell wall.
    assert_eq!(result.cost, 40 + 50);
}

proptest! {
    #[test]
    fn prop_single_cell_boundary(x in 0.0f64..49.99, y in 0.0f64..49.99, dx in 0.0f64..49.99, dy in 0.0f64..49.99) {
        let grid = OccupancyGrid::default();
        let router = WireRouter::default();
        let result = router.route_with_stats(
            &grid,
            Point::new(x, y),
            Point::new(dx, dy),
            RouteHints::default(),
            None,
        );
        prop_assert_eq!(result.points, vec![Point::new(25.0, 25.0)]);
        prop_assert_eq!(result.expansions, 0);
    }

    #[test]
    fn prop_router_deterministic(
        blocks in proptest::collection::vec((-3i32..12, -3i32..12), 0..25),
        goal in (0i32..10, 0i32..10),
    ) {
        let mut grid = OccupancyGrid::default();
        for (i, (c, r)) in blocks.iter().enumerate() {
            let cell = GridCell::new(*c, *r);
            if cell != GridCell::new(0, 0) && cell != GridCell::new(goal.0, goal.1) {
                block_at(&mut grid, i as u64 + 1, cell);
            }
        }
        let router = WireRouter::default();
        let to = grid.metrics().grid_to_world(GridCell::new(goal.0, goal.1));
        let hints = RouteHints::new(Some(Direction::Right), Some(Direction::Down));

        let first = router.route_with_stats(&grid, Point::new(25.0, 25.0), to, hints, None);
        let second = router.route_with_stats(&grid, Point::new(25.0, 25.0), to, hints, None);
        prop_assert_eq!(&first, &second);

        for p in &first.points {
            prop_assert!(grid.is_walkable(grid.metrics().world_to_grid(p)));
        }
    }
}
