use crate::{Coord, Error, Result};
use smallvec::SmallVec;

/// Read-only view of a rectangular grid of free and blocked cells. This is all the search
/// needs to know about a grid.
pub trait OccupancyGrid {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    /// Whether the cell is blocked. Only called for in-bounds coordinates.
    fn is_obstacle(&self, coord: Coord) -> bool;

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows() && coord.col < self.cols()
    }

    fn can_move_to(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !self.is_obstacle(coord)
    }

    /// Free in-bounds neighbours in [NEIGHBOUR_ORDER](crate::NEIGHBOUR_ORDER).
    fn free_neighbours(&self, coord: &Coord) -> SmallVec<[Coord; 4]> {
        coord
            .neumann_neighborhood()
            .into_iter()
            .filter(|&n| self.can_move_to(n))
            .collect()
    }

    /// Fails with [Error::OutOfBounds] unless `coord` lies on the grid.
    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                coord,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    /// Fails with [Error::EmptyGrid] for a grid without cells.
    fn check_shape(&self) -> Result<()> {
        if self.rows() == 0 || self.cols() == 0 {
            Err(Error::EmptyGrid)
        } else {
            Ok(())
        }
    }
}

/// Row-major nested vectors where `true` marks an obstacle.
impl OccupancyGrid for Vec<Vec<bool>> {
    fn rows(&self) -> usize {
        self.len()
    }
    fn cols(&self) -> usize {
        self.first().map_or(0, Vec::len)
    }
    fn is_obstacle(&self, coord: Coord) -> bool {
        self[coord.row][coord.col]
    }
    /// Also rejects rows of differing length.
    fn check_shape(&self) -> Result<()> {
        let expected = self.cols();
        if self.is_empty() || expected == 0 {
            return Err(Error::EmptyGrid);
        }
        match self.iter().position(|r| r.len() != expected) {
            Some(row) => Err(Error::RaggedGrid {
                row,
                expected,
                found: self[row].len(),
            }),
            None => Ok(()),
        }
    }
}
