//! Orthogonal wire router.
//!
//! Best-first search over the occupancy grid with `f = g + h`, where `h` is
//! the Manhattan distance inflated by a small weight. Steps are evaluated in
//! the fixed order +x, -x, +y, -y, immediate reversals are never taken and
//! every change of direction costs a turn penalty. Ties in `f` resolve in
//! insertion order, so identical inputs always yield identical paths.

use crate::grid::OccupancyGrid;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;
use wiregrid_core::{Direction, GridCell, Point, WireId};
use wiregrid_settings::RoutingSettings;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterConfig {
    pub turn_penalty: u32,
    pub max_iterations: usize,
    pub heuristic_weight: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::from(&RoutingSettings::default())
    }
}

impl From<&RoutingSettings> for RouterConfig {
    fn from(settings: &RoutingSettings) -> Self {
        Self {
            turn_penalty: settings.turn_penalty,
            max_iterations: settings.max_iterations,
            heuristic_weight: settings.heuristic_weight,
        }
    }
}

/// Direction preferences at either end of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteHints {
    /// Treated as the direction that reached the start cell, so the first
    /// step is free when it continues this way and reversing it is forbidden.
    pub exit: Option<Direction>,
    /// Direction the final step into the goal should travel. Any other final
    /// step pays the turn penalty.
    pub entry: Option<Direction>,
}

impl RouteHints {
    pub fn new(exit: Option<Direction>, entry: Option<Direction>) -> Self {
        Self { exit, entry }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteResult {
    /// Cell centres from start to goal inclusive; empty on failure
    pub points: Vec<Point>,
    /// Open-set pops performed
    pub expansions: usize,
    /// Accumulated cost of the returned path
    pub cost: u32,
}

impl RouteResult {
    pub fn is_found(&self) -> bool {
        !self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    cell: GridCell,
    g: u32,
    dir: Option<Direction>,
    parent: Option<usize>,
}

/// Open-set entry; `BinaryHeap` is a max-heap so ordering is reversed.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Grid path finder.
#[derive(Debug, Clone, Default)]
pub struct WireRouter {
    config: RouterConfig,
}

impl WireRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    fn heuristic(&self, a: GridCell, b: GridCell) -> f64 {
        a.manhattan(&b) as f64 * self.config.heuristic_weight
    }

    /// Routes between the cells containing `from` and `to`.
    ///
    /// Returns cell centres, or an empty vector when the goal is unreachable
    /// within the iteration budget.
    pub fn route(
        &self,
        grid: &OccupancyGrid,
        from: Point,
        to: Point,
        hints: RouteHints,
        current: Option<WireId>,
    ) -> Vec<Point> {
        self.route_with_stats(grid, from, to, hints, current).points
    }

    pub fn route_with_stats(
        &self,
        grid: &OccupancyGrid,
        from: Point,
        to: Point,
        hints: RouteHints,
        current: Option<WireId>,
    ) -> RouteResult {
        let metrics = grid.metrics();
        let start = metrics.world_to_grid(&from);
        let goal = metrics.world_to_grid(&to);

        if start == goal {
            return RouteResult {
                points: vec![metrics.grid_to_world(start)],
                expansions: 0,
                cost: 0,
            };
        }

        let mut arena = vec![SearchNode {
            cell: start,
            g: 0,
            dir: hints.exit,
            parent: None,
        }];
        let mut g_score: HashMap<GridCell, u32> = HashMap::new();
        g_score.insert(start, 0);

        let mut open = BinaryHeap::new();
        let mut seq = 0u64;
        open.push(OpenEntry {
            f: self.heuristic(start, goal),
            seq,
            node: 0,
        });

        let mut expansions = 0usize;

        while let Some(entry) = open.pop() {
            expansions += 1;
            if expansions > self.config.max_iterations {
                debug!(
                    "route {} -> {} exhausted {} iterations",
                    start, goal, self.config.max_iterations
                );
                return RouteResult {
                    points: Vec::new(),
                    expansions,
                    cost: 0,
                };
            }

            let cur = arena[entry.node];

            if cur.cell == goal {
                let points = Self::rebuild(&arena, entry.node)
                    .into_iter()
                    .map(|cell| metrics.grid_to_world(cell))
                    .collect();
                return RouteResult {
                    points,
                    expansions,
                    cost: cur.g,
                };
            }

            for dir in Direction::ALL {
                if cur.dir == Some(dir.opposite()) {
                    continue;
                }

                let next = cur.cell.step(dir);
                let Some(cell_cost) = grid.cell_cost(next, current) else {
                    continue;
                };

                let mut step_cost = cell_cost;
                if cur.dir.is_some_and(|d| d != dir) {
                    step_cost += self.config.turn_penalty;
                }
                if next == goal && hints.entry.is_some_and(|d| d != dir) {
                    step_cost += self.config.turn_penalty;
                }

                let tentative = cur.g + step_cost;
                if g_score.get(&next).is_some_and(|&old| tentative >= old) {
                    continue;
                }
                g_score.insert(next, tentative);

                arena.push(SearchNode {
                    cell: next,
                    g: tentative,
                    dir: Some(dir),
                    parent: Some(entry.node),
                });
                seq += 1;
                open.push(OpenEntry {
                    f: tentative as f64 + self.heuristic(next, goal),
                    seq,
                    node: arena.len() - 1,
                });
            }
        }

        debug!("route {} -> {} has no path ({} expansions)", start, goal, expansions);
        RouteResult {
            points: Vec::new(),
            expansions,
            cost: 0,
        }
    }

    fn rebuild(arena: &[SearchNode], mut idx: usize) -> Vec<GridCell> {
        let mut cells = vec![arena[idx].cell];
        while let Some(parent) = arena[idx].parent {
            cells.push(arena[parent].cell);
            idx = parent;
        }
        cells.reverse();
        cells
    }
}
