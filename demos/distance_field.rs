use grid_bfs::render::{render, Overlay};
use grid_bfs::{Coord, PathFinder, PathingGrid};

// Labels every reachable cell with its distance to the end point, then walks downhill from the
// start. Labels are printed modulo 10.

fn main() -> grid_bfs::Result<()> {
    let pathing_grid: PathingGrid = "\
        .........\n\
        .#######.\n\
        .#.....#.\n\
        .#.###.#.\n\
        ...#.....\n"
        .parse()?;
    let start = Coord::new(4, 4);
    let end = Coord::new(0, 0);
    let field = PathFinder.distance_field(&pathing_grid, end)?;
    let result = PathFinder.descend(&field, start);
    let overlay = Overlay {
        start: Some(start),
        destination: Some(end),
        path: result.path().unwrap_or(&[]),
        distances: Some(&field),
    };
    println!("{}", render(&pathing_grid, &overlay));
    println!("{:?}", result.steps());
    Ok(())
}
