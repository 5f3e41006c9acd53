use crate::error::GridError;
use crate::location::{moore_neighbourhood, Location};
use crate::COST_LIMIT;
use core::fmt;
use log::debug;
use petgraph::unionfind::UnionFind;

/// [CostGrid] is the cost surface searched by the pathfinder: a fixed `width × height` array of
/// integer traversal costs together with the start and finish cells of the search.
///
/// Besides the raw costs it maintains the connected components of passable cells (those cheaper
/// than [COST_LIMIT]) in a [UnionFind] structure, so callers can cheaply ask whether two cells are
/// connected at all. Raising a cell to an impassable cost may split a component; in that case the
/// components are flagged dirty and regenerated by [update](Self::update).
#[derive(Clone, Debug)]
pub struct CostGrid {
    width: usize,
    height: usize,
    costs: Vec<i32>,
    start: Location,
    finish: Location,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl CostGrid {
    /// Creates a grid of zero-cost cells. The start is placed at the middle of the left edge and
    /// the finish at the middle of the right edge.
    pub fn new(width: usize, height: usize) -> Result<CostGrid, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mid = (height / 2) as i32;
        let mut grid = CostGrid {
            width,
            height,
            costs: vec![0; width * height],
            start: Location::new(0, mid),
            finish: Location::new(width as i32 - 1, mid),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `loc` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, loc: &Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && (loc.x as usize) < self.width && (loc.y as usize) < self.height
    }

    fn ix(&self, loc: &Location) -> Result<usize, GridError> {
        if self.contains(loc) {
            Ok(loc.y as usize * self.width + loc.x as usize)
        } else {
            Err(GridError::OutOfBounds {
                location: *loc,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn cost_at(&self, loc: &Location) -> Result<i32, GridError> {
        self.ix(loc).map(|ix| self.costs[ix])
    }

    /// Updates the cost of a cell. Joins newly connected components when the cell becomes
    /// passable and flags the components as dirty if it becomes impassable.
    pub fn set_cost_at(&mut self, loc: &Location, value: i32) -> Result<(), GridError> {
        let ix = self.ix(loc)?;
        let was_passable = passable(self.costs[ix]);
        self.costs[ix] = value;
        if passable(value) {
            for n in moore_neighbourhood(*loc) {
                if let Some(n_ix) = self.passable_ix(&n) {
                    self.components.union(ix, n_ix);
                }
            }
        } else if was_passable {
            self.components_dirty = true;
        }
        Ok(())
    }

    pub fn start(&self) -> Location {
        self.start
    }

    /// Moves the start cell. No bounds check is made; a start outside the grid simply never
    /// reaches the finish.
    pub fn set_start(&mut self, loc: Location) {
        self.start = loc;
    }

    pub fn finish(&self) -> Location {
        self.finish
    }

    /// Moves the finish cell. Like [set_start](Self::set_start), this is not bounds checked.
    pub fn set_finish(&mut self, loc: Location) {
        self.finish = loc;
    }

    fn passable_ix(&self, loc: &Location) -> Option<usize> {
        self.ix(loc).ok().filter(|&ix| passable(self.costs[ix]))
    }

    /// Checks if both cells are passable and on the same component.
    pub fn reachable(&self, a: &Location, b: &Location) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if the cells are not on the same component. Out of bounds and impassable cells are
    /// unreachable from everything.
    pub fn unreachable(&self, a: &Location, b: &Location) -> bool {
        match (self.passable_ix(a), self.passable_ix(b)) {
            (Some(a_ix), Some(b_ix)) => !self.components.equiv(a_ix, b_ix),
            _ => true,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable 8-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating components for {}x{} grid", self.width, self.height);
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Location::new(x, y);
                let Some(parent_ix) = self.passable_ix(&point) else {
                    continue;
                };
                // Links to the remaining neighbours are made when those cells are visited
                [
                    Location::new(x + 1, y - 1),
                    Location::new(x + 1, y),
                    Location::new(x + 1, y + 1),
                    Location::new(x, y + 1),
                ]
                .iter()
                .filter_map(|p| self.passable_ix(p))
                .collect::<Vec<_>>()
                .into_iter()
                .for_each(|ix| {
                    self.components.union(parent_ix, ix);
                });
            }
        }
    }
}

fn passable(cost: i32) -> bool {
    (cost as f64) < COST_LIMIT
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| {
                    let p = Location::new(x, y);
                    let cost = self.costs[y as usize * self.width + x as usize];
                    if p == self.start {
                        "S".to_string()
                    } else if p == self.finish {
                        "F".to_string()
                    } else if !passable(cost) {
                        "#".to_string()
                    } else {
                        cost.to_string()
                    }
                })
                .collect::<Vec<String>>();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
