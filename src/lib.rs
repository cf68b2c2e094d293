//! # grid_bfs
//!
//! Shortest paths on 4-connected occupancy grids using
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search). Every step has
//! unit cost, so the first time the destination leaves the frontier its distance is optimal.
//! The search reports the distance of each cell as it is dequeued, which is what the
//! visualizer uses to draw live distance labels, and reconstructs the path from parent
//! pointers.
//!
//! Besides the core [PathFinder](path_finder::PathFinder) the crate contains the pieces of the
//! interactive tool built around it: an editable [PathingGrid](pathing_grid::PathingGrid) with
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)), a text
//! renderer, a [Session](session::Session) state machine and a
//! [PathReveal](reveal::PathReveal) schedule for animating a found path.
pub mod bfs;
pub mod config;
pub mod coord;
pub mod distance_map;
pub mod occupancy;
pub mod path_finder;
pub mod pathing_grid;
pub mod render;
pub mod reveal;
pub mod session;

pub use coord::{Coord, Direction};
pub use distance_map::DistanceMap;
pub use occupancy::OccupancyGrid;
pub use path_finder::{PathFinder, SearchReport};
pub use pathing_grid::PathingGrid;
pub use session::Endpoint;

/// Order in which neighbours are pushed onto the frontier. It only decides which of several
/// equally short paths is returned, but it is fixed so results are reproducible.
pub const NEIGHBOUR_ORDER: [Direction; 4] = [
    Direction::West,
    Direction::East,
    Direction::North,
    Direction::South,
];

/// Outcome of a single search. Not finding a path is a regular result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Cells from the first step after the start up to and including the destination.
    Found(Vec<Coord>),
    NotFound,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn path(&self) -> Option<&[Coord]> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }

    /// Number of steps taken, which equals the distance of the destination.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(<[Coord]>::len)
    }

    pub fn into_path(self) -> Option<Vec<Coord>> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }
}

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coord: Coord,
        rows: usize,
        cols: usize,
    },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unexpected character {found:?} at line {line}, column {column}")]
    InvalidCell {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("{0} point has not been set")]
    MissingEndpoint(Endpoint),

    #[error("cell {0} is an obstacle")]
    ObstacleSelected(Coord),

    #[error("cannot pick start or end while painting obstacles")]
    ModeConflict,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_result_accessors() {
        let found = PathResult::Found(vec![Coord::new(0, 1), Coord::new(1, 1)]);
        assert!(found.is_found());
        assert_eq!(found.steps(), Some(2));
        assert_eq!(PathResult::Found(vec![]).steps(), Some(0));
        assert_eq!(PathResult::NotFound.steps(), None);
        assert_eq!(PathResult::NotFound.into_path(), None);
    }
}
