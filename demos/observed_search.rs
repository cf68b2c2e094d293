use grid_bfs::render::{render, Overlay};
use grid_bfs::reveal::{PathReveal, DEFAULT_STEP_DELAY};
use grid_bfs::{Coord, PathFinder, PathingGrid};
use rand::prelude::*;

// Runs a search on a random grid, printing every distance event as the frontier advances and
// then the reveal schedule a front-end would animate.

fn main() -> grid_bfs::Result<()> {
    let mut rng = StdRng::seed_from_u64(5);
    let mut pathing_grid = PathingGrid::new(8, 12)?;
    pathing_grid.randomize(25, &mut rng);
    let start = Coord::new(0, 0);
    let end = Coord::new(7, 11);
    pathing_grid.set_obstacle(start, false)?;
    pathing_grid.set_obstacle(end, false)?;

    let result = PathFinder.find_path_observed(&pathing_grid, start, end, |coord, dist| {
        println!("{} -> {}", coord, dist);
    })?;
    let path = result.path().unwrap_or(&[]);
    for step in PathReveal::new(path, DEFAULT_STEP_DELAY) {
        println!("{:>5?} {}", step.at, step.coord);
    }
    let overlay = Overlay {
        start: Some(start),
        destination: Some(end),
        path,
        distances: None,
    };
    println!("{}", render(&pathing_grid, &overlay));
    Ok(())
}
