use grid_bfs::{Coord, PathFinder, PathingGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() -> grid_bfs::Result<()> {
    let mut pathing_grid = PathingGrid::new(3, 3)?;
    pathing_grid.set_obstacle(Coord::new(1, 1), true)?;
    print!("{}", pathing_grid);
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    match PathFinder.find_path(&pathing_grid, start, end)?.into_path() {
        Some(path) => {
            println!("Path:");
            for p in path {
                println!("{}", p);
            }
        }
        None => println!("No path found"),
    }
    Ok(())
}
