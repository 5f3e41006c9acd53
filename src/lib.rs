//! # grid_astar
//!
//! Lowest-cost routes across a weighted grid using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search. Every cell of a [CostGrid]
//! holds an integer traversal cost, and moves go to any of the 8 surrounding cells. Entering a
//! cell costs the straight-line length of the move plus the cell's own cost, and the
//! [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance) to the finish serves as
//! admissible heuristic.
//!
//! There is no separate notion of a blocked cell: any route whose accumulated cost reaches
//! [COST_LIMIT] is pruned, so giving a cell a cost of [COST_LIMIT] or more makes it a wall.
//!
//! ```
//! use grid_astar::{compute_path, CostGrid, Location};
//!
//! let mut grid = CostGrid::new(3, 3).unwrap();
//! grid.set_cost_at(&Location::new(1, 1), 1_000_000).unwrap();
//! let last = compute_path(&grid).unwrap();
//! assert_eq!(last.path().len(), 3);
//! ```
pub mod astar;
pub mod cost_grid;
pub mod error;
pub mod frontier;
pub mod location;
pub mod step;

pub use astar::{AstarPathfinder, Search, SearchStatus};
pub use cost_grid::CostGrid;
pub use error::GridError;
pub use frontier::SearchFrontier;
pub use location::{euclidean_distance, Location};
pub use step::Step;

use std::sync::Arc;

/// Accumulated costs at or above this value prune a route.
pub const COST_LIMIT: f64 = 1_000_000.0;

/// Computes a path from the grid's start to its finish with the default [AstarPathfinder].
pub fn compute_path(grid: &CostGrid) -> Option<Arc<Step>> {
    AstarPathfinder::new().compute_path(grid)
}

/// Recomputes the cost of following `path` on `grid`: for every move, its straight-line length
/// plus the cost of the cell entered. The first location contributes nothing. Returns [None] if
/// any location lies outside the grid.
pub fn path_cost(grid: &CostGrid, path: &[Location]) -> Option<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let terrain = grid.cost_at(&pair[1]).ok()?;
        total += euclidean_distance(&pair[0], &pair[1]) + terrain as f64;
    }
    if let Some(first) = path.first() {
        if !grid.contains(first) {
            return None;
        }
    }
    Some(total)
}
