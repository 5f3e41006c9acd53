use grid_astar::{compute_path, CostGrid, Location, COST_LIMIT};

// In this example a path is found on a 7x5 grid with shape
//  _______
// |   #   |
// |   #   |
// |S  #  F|
// |   #   |
// |  333  |
//  _______
// where
// - # marks an impassable cell
// - 3 marks a cell with traversal cost 3
// - S marks the start
// - F marks the finish

fn main() {
    let mut grid = CostGrid::new(7, 5).unwrap();
    for y in 0..4 {
        grid.set_cost_at(&Location::new(3, y), COST_LIMIT as i32).unwrap();
    }
    for x in 2..5 {
        grid.set_cost_at(&Location::new(x, 4), 3).unwrap();
    }
    println!("{}", grid);
    match compute_path(&grid) {
        Some(last) => {
            println!("Path with cost {:.3}:", last.cost_so_far());
            for p in last.path() {
                println!("{:?}", p);
            }
        }
        None => println!("No path from {} to {}", grid.start(), grid.finish()),
    }
}
