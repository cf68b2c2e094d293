use core::fmt;
use smallvec::SmallVec;

/// A cell position on the grid, given as (row, col) with the origin in the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The neighbouring coordinate one step in `dir`, or [None] if that would leave the
    /// non-negative quadrant. Upper bounds are checked by the grid.
    pub fn step(&self, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        Some(Coord {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// The 4-neighbourhood in [NEIGHBOUR_ORDER](crate::NEIGHBOUR_ORDER), dropping steps
    /// that underflow.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coord; 4]> {
        crate::NEIGHBOUR_ORDER
            .iter()
            .filter_map(|&dir| self.step(dir))
            .collect()
    }

    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if `other` is exactly one step away along exactly one axis.
    pub fn is_unit_step(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four axis-aligned moves of a 4-connected grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    /// (row, col) offset of a single move.
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
        }
    }

    /// The direction taking `from` to `to` if they are a unit step apart.
    pub fn between(from: &Coord, to: &Coord) -> Option<Direction> {
        crate::NEIGHBOUR_ORDER
            .iter()
            .copied()
            .find(|&dir| from.step(dir) == Some(*to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_follows_west_east_north_south() {
        let c = Coord::new(1, 1);
        let n = c.neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(0, 1),
                Coord::new(2, 1)
            ]
        );
    }

    /// The origin has no west or north neighbour.
    #[test]
    fn neighbourhood_of_origin() {
        let n = Coord::new(0, 0).neumann_neighborhood();
        assert_eq!(n.as_slice(), &[Coord::new(0, 1), Coord::new(1, 0)]);
    }

    #[test]
    fn unit_steps() {
        let c = Coord::new(2, 2);
        assert!(c.is_unit_step(&Coord::new(2, 3)));
        assert!(c.is_unit_step(&Coord::new(1, 2)));
        assert!(!c.is_unit_step(&Coord::new(3, 3)));
        assert!(!c.is_unit_step(&c));
        assert_eq!(
            Direction::between(&c, &Coord::new(3, 2)),
            Some(Direction::South)
        );
        assert_eq!(Direction::between(&c, &Coord::new(3, 3)), None);
    }
}
