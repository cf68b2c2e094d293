use crate::occupancy::OccupancyGrid;
use crate::{Coord, Error, Result};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use std::str::FromStr;

/// Upper bound on `rows * cols`; the component table alone takes a word per cell.
pub const MAX_CELLS: usize = 1 << 24;

/// [PathingGrid] keeps the raw [bool] occupancy in a [BoolGrid], where a cell is blocked
/// ([true]) or free ([false]), and tracks the 4-connected components of the free cells in a
/// [UnionFind] structure so reachability can be answered without searching.
///
/// The underlying [BoolGrid] is indexed by (x, y) = (col, row).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Creates a grid with every cell free. Both dimensions must be at least 1 and the grid
    /// may hold at most [MAX_CELLS] cells.
    pub fn new(rows: usize, cols: usize) -> Result<PathingGrid> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyGrid);
        }
        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells <= MAX_CELLS)
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "grid size {}x{} exceeds {} cells",
                    rows, cols, MAX_CELLS
                ))
            })?;
        let mut pathing_grid = PathingGrid {
            grid: BoolGrid::new(cols, rows, false),
            components: UnionFind::new(cells),
            components_dirty: false,
        };
        pathing_grid.generate_components();
        Ok(pathing_grid)
    }

    /// Builds a grid from row-major nested vectors where `true` marks an obstacle.
    pub fn from_rows(rows: &Vec<Vec<bool>>) -> Result<PathingGrid> {
        rows.check_shape()?;
        let mut pathing_grid = PathingGrid::new(rows.rows(), rows.cols())?;
        for (r, row) in rows.iter().enumerate() {
            for (c, &blocked) in row.iter().enumerate() {
                pathing_grid.grid.set(c, r, blocked);
            }
        }
        pathing_grid.generate_components();
        Ok(pathing_grid)
    }

    fn get_ix(&self, coord: &Coord) -> usize {
        coord.row * self.cols() + coord.col
    }

    /// Marks a cell as blocked or free. Freeing a cell joins it with its free neighbours;
    /// blocking one may split a component, so the components are flagged as dirty instead.
    pub fn set_obstacle(&mut self, coord: Coord, blocked: bool) -> Result<()> {
        self.check_bounds(coord)?;
        let was_blocked = self.is_obstacle(coord);
        self.grid.set(coord.col, coord.row, blocked);
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            let ix = self.get_ix(&coord);
            for n in self.free_neighbours(&coord) {
                let n_ix = self.get_ix(&n);
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }

    /// Flips a cell between free and blocked and returns its new state.
    pub fn toggle(&mut self, coord: Coord) -> Result<bool> {
        self.check_bounds(coord)?;
        let blocked = !self.is_obstacle(coord);
        self.set_obstacle(coord, blocked)?;
        Ok(blocked)
    }

    /// Frees every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.grid = BoolGrid::new(self.cols(), self.rows(), false);
        self.generate_components();
    }

    /// Refills the grid so that each cell is blocked with probability `density` percent.
    /// Densities above 100 are treated as 100.
    pub fn randomize<R: Rng>(&mut self, density: u8, rng: &mut R) {
        let p = f64::from(density.min(100)) / 100.0;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                self.grid.set(col, row, rng.gen_bool(p));
            }
        }
        self.generate_components();
    }

    pub fn obstacle_count(&self) -> usize {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| Coord::new(row, col)))
            .filter(|&c| self.is_obstacle(c))
            .count()
    }

    /// Retrieves the component id a given [Coord] belongs to.
    pub fn get_component(&self, coord: &Coord) -> usize {
        self.components.find(self.get_ix(coord))
    }

    /// Checks if start and goal are on the same component. Out-of-bounds points are never
    /// reachable.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.components_dirty {
            warn!("Reachability queried on dirty components, call update first");
        }
        self.in_bounds(*start)
            && self.in_bounds(*goal)
            && self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Coord, goal: &Coord) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free 4-neighbours. Linking each cell
    /// to its east and south neighbour covers every edge once.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.rows(),
            self.cols()
        );
        self.components = UnionFind::new(self.rows() * self.cols());
        self.components_dirty = false;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let coord = Coord::new(row, col);
                if self.is_obstacle(coord) {
                    continue;
                }
                let ix = self.get_ix(&coord);
                for n in [Coord::new(row, col + 1), Coord::new(row + 1, col)] {
                    if self.can_move_to(n) {
                        let n_ix = self.get_ix(&n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl OccupancyGrid for PathingGrid {
    fn rows(&self) -> usize {
        self.grid.height
    }
    fn cols(&self) -> usize {
        self.grid.width
    }
    fn is_obstacle(&self, coord: Coord) -> bool {
        self.grid.get(coord.col, coord.row)
    }
}

/// One line per row, `#` for obstacles and `.` for free cells.
impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line: String = (0..self.cols())
                .map(|col| {
                    if self.is_obstacle(Coord::new(row, col)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the [Display] format. Blank lines and surrounding whitespace are ignored.
impl FromStr for PathingGrid {
    type Err = Error;

    fn from_str(s: &str) -> Result<PathingGrid> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(line, l)| {
                l.chars()
                    .enumerate()
                    .map(|(column, ch)| match ch {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        found => Err(Error::InvalidCell {
                            line,
                            column,
                            found,
                        }),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<Vec<bool>>>>()?;
        PathingGrid::from_rows(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let grid: PathingGrid = ".#.\n.#.".parse().unwrap();
        let p1 = Coord::new(0, 0);
        let p2 = Coord::new(1, 0);
        let p3 = Coord::new(0, 2);
        assert!(grid.reachable(&p1, &p2));
        assert!(grid.unreachable(&p1, &p3));
        assert_ne!(grid.get_component(&p1), grid.get_component(&p3));
    }

    /// Diagonal neighbours are not connected on a 4-grid.
    #[test]
    fn diagonal_cells_are_not_connected() {
        let grid: PathingGrid = ".#\n#.".parse().unwrap();
        assert!(grid.unreachable(&Coord::new(0, 0), &Coord::new(1, 1)));
    }

    /// Asserts that the two corners are connected around a central obstacle.
    #[test]
    fn reachable_around_obstacle() {
        let mut grid = PathingGrid::new(3, 3).unwrap();
        grid.set_obstacle(Coord::new(1, 1), true).unwrap();
        grid.update();
        assert!(grid.reachable(&Coord::new(0, 0), &Coord::new(2, 2)));
    }

    #[test]
    fn blocking_marks_dirty_and_update_splits() {
        let mut grid = PathingGrid::new(3, 3).unwrap();
        for col in 0..3 {
            grid.set_obstacle(Coord::new(1, col), true).unwrap();
        }
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.unreachable(&Coord::new(0, 0), &Coord::new(2, 0)));
        // Freeing a wall cell joins both halves again without a full regeneration.
        assert!(!grid.toggle(Coord::new(1, 2)).unwrap());
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Coord::new(0, 0), &Coord::new(2, 0)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(PathingGrid::new(0, 3).unwrap_err(), Error::EmptyGrid);
        let mut grid = PathingGrid::new(2, 2).unwrap();
        assert!(matches!(
            grid.set_obstacle(Coord::new(0, 2), true),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(
            "..\n.x".parse::<PathingGrid>().unwrap_err(),
            Error::InvalidCell {
                line: 1,
                column: 1,
                found: 'x'
            }
        );
        assert!(matches!(
            "..\n.".parse::<PathingGrid>(),
            Err(Error::RaggedGrid { row: 1, .. })
        ));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(matches!(
            PathingGrid::new(usize::MAX, 2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            PathingGrid::new(MAX_CELLS + 1, 1),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            PathingGrid::new(usize::MAX / 2, usize::MAX / 2),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        let text = "..#\n#..\n";
        let grid: PathingGrid = text.parse().unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.obstacle_count(), 2);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn randomize_respects_density_extremes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut grid = PathingGrid::new(4, 5).unwrap();
        grid.randomize(100, &mut rng);
        assert_eq!(grid.obstacle_count(), 20);
        grid.randomize(0, &mut rng);
        assert_eq!(grid.obstacle_count(), 0);
        grid.randomize(250, &mut rng);
        assert_eq!(grid.obstacle_count(), 20);
        grid.clear();
        assert_eq!(grid.obstacle_count(), 0);
        assert!(grid.reachable(&Coord::new(0, 0), &Coord::new(3, 4)));
    }
}
