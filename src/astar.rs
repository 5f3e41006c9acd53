use crate::cost_grid::CostGrid;
use crate::frontier::SearchFrontier;
use crate::location::{euclidean_distance, moore_neighbourhood};
use crate::step::Step;
use crate::COST_LIMIT;
use log::{debug, info};
use std::sync::Arc;

/// Where a [Search] currently stands.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStatus {
    Running,
    /// The finish was extracted from the frontier; holds the final step of the path.
    Found(Arc<Step>),
    /// The open set ran dry before the finish was reached.
    NotFound,
}

impl SearchStatus {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchStatus::Running)
    }
}

/// A* pathfinder over a [CostGrid] with 8-connected moves. The cost of entering a neighbour is
/// the straight-line distance to it plus the neighbour's terrain cost, and the heuristic is the
/// straight-line distance to the finish.
#[derive(Clone, Debug)]
pub struct AstarPathfinder {
    /// Candidate steps whose cost so far reaches this limit are discarded, which turns cells with
    /// a very large cost into walls.
    pub cost_limit: f64,
}

impl AstarPathfinder {
    pub fn new() -> AstarPathfinder {
        AstarPathfinder {
            cost_limit: COST_LIMIT,
        }
    }

    /// Sets up a search from the grid's start to its finish without running it.
    pub fn search<'a>(&self, grid: &'a CostGrid) -> Search<'a> {
        Search::new(grid, self.cost_limit)
    }

    /// Computes a lowest-cost path from the grid's start to its finish. Returns the final step,
    /// whose chain of predecessors leads back to the start, or [None] if the finish cannot be
    /// reached.
    pub fn compute_path(&self, grid: &CostGrid) -> Option<Arc<Step>> {
        self.search(grid).run()
    }
}

impl Default for AstarPathfinder {
    fn default() -> AstarPathfinder {
        AstarPathfinder::new()
    }
}

/// A single, resumable A* search. Each call to [advance](Self::advance) extracts the cheapest
/// open step, expands it unless it is the finish, and closes it.
#[derive(Debug)]
pub struct Search<'a> {
    grid: &'a CostGrid,
    cost_limit: f64,
    frontier: SearchFrontier,
    status: SearchStatus,
    expansions: usize,
}

impl<'a> Search<'a> {
    pub fn new(grid: &'a CostGrid, cost_limit: f64) -> Search<'a> {
        let start = grid.start();
        let mut root = Step::new(start, None);
        root.set_costs(0.0, euclidean_distance(&start, &grid.finish()));
        let mut frontier = SearchFrontier::new();
        frontier.admit_open(root);
        debug!("Searching from {} to {}", start, grid.finish());
        Search {
            grid,
            cost_limit,
            frontier,
            status: SearchStatus::Running,
            expansions: 0,
        }
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn frontier(&self) -> &SearchFrontier {
        &self.frontier
    }

    /// Number of steps extracted from the frontier so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Performs one iteration of the search and returns the resulting status. Does nothing once
    /// the search is done.
    pub fn advance(&mut self) -> &SearchStatus {
        if self.status.is_done() {
            return &self.status;
        }
        let Some(best) = self.frontier.extract_min_open() else {
            self.finish_not_found();
            return &self.status;
        };
        self.expansions += 1;
        let loc = best.location();
        if loc == self.grid.finish() {
            self.frontier.close(&loc);
            debug!(
                "Reached {} at cost {} after {} expansions",
                loc,
                best.cost_so_far(),
                self.expansions
            );
            self.status = SearchStatus::Found(best);
            return &self.status;
        }
        self.expand(&best);
        self.frontier.close(&loc);
        if self.frontier.open_count() == 0 {
            self.finish_not_found();
        }
        &self.status
    }

    /// Runs the search to completion and returns the final step if the finish was reached.
    pub fn run(mut self) -> Option<Arc<Step>> {
        while !self.advance().is_done() {}
        match self.status {
            SearchStatus::Found(step) => Some(step),
            _ => None,
        }
    }

    /// Offers a step for every in-bounds, unclosed neighbour of `current` to the frontier.
    fn expand(&mut self, current: &Arc<Step>) {
        let loc = current.location();
        let finish = self.grid.finish();
        for next in moore_neighbourhood(loc) {
            if !self.grid.contains(&next) || self.frontier.is_closed(&next) {
                continue;
            }
            let terrain = match self.grid.cost_at(&next) {
                Ok(cost) => cost as f64,
                Err(_) => continue,
            };
            let cost_so_far = current.cost_so_far() + euclidean_distance(&loc, &next) + terrain;
            if cost_so_far >= self.cost_limit {
                continue;
            }
            let mut step = Step::new(next, Some(current.clone()));
            step.set_costs(cost_so_far, euclidean_distance(&next, &finish));
            self.frontier.admit_open(step);
        }
    }

    fn finish_not_found(&mut self) {
        info!(
            "No path from {} to {} after {} expansions",
            self.grid.start(),
            self.grid.finish(),
            self.expansions
        );
        self.status = SearchStatus::NotFound;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    const WALL: i32 = COST_LIMIT as i32;

    fn grid_3x3() -> CostGrid {
        let mut grid = CostGrid::new(3, 3).unwrap();
        grid.set_start(Location::new(0, 1));
        grid.set_finish(Location::new(2, 1));
        grid
    }

    #[test]
    fn straight_line() {
        let grid = grid_3x3();
        let last = AstarPathfinder::new().compute_path(&grid).unwrap();
        assert_eq!(
            last.path(),
            vec![Location::new(0, 1), Location::new(1, 1), Location::new(2, 1)]
        );
        assert!((last.cost_so_far() - 2.0).abs() < 1e-9);
    }

    /// Asserts that a wall across the middle column forces a detour around it.
    #[test]
    fn routes_around_wall() {
        let mut grid = grid_3x3();
        for y in 0..3 {
            grid.set_cost_at(&Location::new(1, y), WALL).unwrap();
        }
        assert!(AstarPathfinder::new().compute_path(&grid).is_none());

        // Open the top and bottom cells again, leaving only the centre blocked
        grid.set_cost_at(&Location::new(1, 0), 0).unwrap();
        grid.set_cost_at(&Location::new(1, 2), 0).unwrap();
        let last = AstarPathfinder::new().compute_path(&grid).unwrap();
        let path = last.path();
        assert_eq!(path.len(), 3);
        assert!(!path.contains(&Location::new(1, 1)));
        assert!(path[1] == Location::new(1, 0) || path[1] == Location::new(1, 2));
        assert!((last.cost_so_far() - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = CostGrid::new(4, 4).unwrap();
        grid.set_start(Location::new(2, 2));
        grid.set_finish(Location::new(2, 2));
        let mut search = AstarPathfinder::new().search(&grid);
        assert!(matches!(search.advance(), SearchStatus::Found(_)));
        assert_eq!(search.expansions(), 1);
        let last = search.run().unwrap();
        assert!(last.is_root());
        assert_eq!(last.len(), 1);
        assert_eq!(last.cost_so_far(), 0.0);
    }

    #[test]
    fn terrain_cost_is_added_to_movement() {
        let mut grid = CostGrid::new(3, 1).unwrap();
        grid.set_cost_at(&Location::new(1, 0), 4).unwrap();
        grid.set_cost_at(&Location::new(2, 0), 2).unwrap();
        let last = AstarPathfinder::new().compute_path(&grid).unwrap();
        assert!((last.cost_so_far() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn prefers_cheap_detour() {
        //  S 9 F
        //  0 0 0
        let mut grid = CostGrid::new(3, 2).unwrap();
        grid.set_start(Location::new(0, 0));
        grid.set_finish(Location::new(2, 0));
        grid.set_cost_at(&Location::new(1, 0), 9).unwrap();
        let last = AstarPathfinder::new().compute_path(&grid).unwrap();
        assert_eq!(
            last.path(),
            vec![Location::new(0, 0), Location::new(1, 1), Location::new(2, 0)]
        );
        assert!((last.cost_so_far() - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn unreachable_endpoints() {
        let mut grid = CostGrid::new(3, 3).unwrap();
        grid.set_finish(Location::new(5, 5));
        assert!(AstarPathfinder::new().compute_path(&grid).is_none());
        let mut grid = CostGrid::new(3, 3).unwrap();
        grid.set_finish(Location::new(2, 2));
        grid.set_cost_at(&Location::new(2, 2), WALL).unwrap();
        assert!(AstarPathfinder::new().compute_path(&grid).is_none());
    }

    /// A lowered limit prunes routes whose accumulated cost reaches it.
    #[test]
    fn custom_cost_limit() {
        let grid = CostGrid::new(5, 1).unwrap();
        let mut pathfinder = AstarPathfinder::new();
        pathfinder.cost_limit = 4.0;
        assert!(pathfinder.compute_path(&grid).is_none());
        pathfinder.cost_limit = 4.5;
        assert_eq!(pathfinder.compute_path(&grid).unwrap().len(), 5);
    }

    #[test]
    fn frontier_stays_partitioned() {
        let mut grid = CostGrid::new(8, 8).unwrap();
        for y in 1..8 {
            grid.set_cost_at(&Location::new(4, y), WALL).unwrap();
        }
        let mut search = AstarPathfinder::new().search(&grid);
        let mut closed_so_far: Vec<Location> = Vec::new();
        while !search.advance().is_done() {
            let frontier = search.frontier();
            for loc in &closed_so_far {
                assert!(frontier.is_closed(loc));
                assert!(!frontier.is_open(loc));
            }
            for y in 0..8 {
                for x in 0..8 {
                    let p = Location::new(x, y);
                    assert!(!(frontier.is_open(&p) && frontier.is_closed(&p)));
                    if frontier.is_closed(&p) && !closed_so_far.contains(&p) {
                        closed_so_far.push(p);
                    }
                }
            }
        }
        assert!(search.expansions() <= 64);
        assert!(matches!(search.status(), SearchStatus::Found(_)));
    }

    #[test]
    fn chain_reaches_start() {
        let mut grid = CostGrid::new(10, 10).unwrap();
        grid.set_start(Location::new(0, 0));
        grid.set_finish(Location::new(9, 6));
        grid.set_cost_at(&Location::new(5, 5), 3).unwrap();
        let last = AstarPathfinder::new().compute_path(&grid).unwrap();
        let path = last.path();
        let root = last.iter().last().unwrap();
        assert!(root.is_root());
        assert_eq!(root.location(), grid.start());
        assert_eq!(last.iter().count() - 1, path.len() - 1);
        assert_eq!(*path.last().unwrap(), grid.finish());
        // Optimal 8-connected route: 6 diagonal and 3 straight moves
        let expected = 6.0 * std::f64::consts::SQRT_2 + 3.0;
        assert!((last.cost_so_far() - expected).abs() < 1e-9);
    }
}
