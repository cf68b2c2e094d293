use crate::occupancy::OccupancyGrid;
use crate::{Coord, DistanceMap};
use itertools::Itertools;

/// Everything drawn on top of the bare grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overlay<'a> {
    pub start: Option<Coord>,
    pub destination: Option<Coord>,
    /// Path cells revealed so far.
    pub path: &'a [Coord],
    pub distances: Option<&'a DistanceMap>,
}

fn cell_char<G: OccupancyGrid>(grid: &G, overlay: &Overlay, coord: Coord) -> char {
    if overlay.start == Some(coord) {
        'S'
    } else if overlay.destination == Some(coord) {
        'E'
    } else if grid.is_obstacle(coord) {
        '#'
    } else if overlay.path.contains(&coord) {
        '*'
    } else if let Some(d) = overlay.distances.and_then(|m| m.get(&coord)) {
        // Only the last digit fits in a cell.
        char::from_digit(d % 10, 10).unwrap_or('?')
    } else {
        '.'
    }
}

/// Draws the grid one row per line: `S` start, `E` destination, `#` obstacle, `*` path,
/// the last digit of a distance label, `.` otherwise.
pub fn render<G: OccupancyGrid>(grid: &G, overlay: &Overlay) -> String {
    (0..grid.rows())
        .map(|row| {
            (0..grid.cols())
                .map(|col| cell_char(grid, overlay, Coord::new(row, col)))
                .collect::<String>()
        })
        .join("\n")
}
