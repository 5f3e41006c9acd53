use itertools::iproduct;

/// Integer cell coordinate. Equality and hashing go by `x` and `y`, so it keys the frontier maps
/// directly.
pub use grid_util::point::Point as Location;

/// Straight-line distance between two cells. Serves both as the A* heuristic and as the movement
/// cost of a single step: 1 for cardinal moves and sqrt(2) for diagonal ones.
pub fn euclidean_distance(from: &Location, to: &Location) -> f64 {
    let dx = (to.x - from.x) as f64;
    let dy = (to.y - from.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// The 8 cells surrounding `loc`, row by row from `y - 1` to `y + 1`. Coordinates may fall
/// outside any particular grid; filtering is up to the caller.
pub fn moore_neighbourhood(loc: Location) -> impl Iterator<Item = Location> {
    iproduct!(-1..=1, -1..=1)
        .filter(|&(dy, dx)| dx != 0 || dy != 0)
        .map(move |(dy, dx)| Location::new(loc.x + dx, loc.y + dy))
}
