//! Fixed-cadence schedule for animating a found path. The schedule only says when each cell
//! should appear relative to the start of the animation; the caller owns the clock.
use crate::Coord;
use std::time::Duration;

/// Delay between two revealed path cells.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub index: usize,
    pub coord: Coord,
    /// Offset from the start of the animation.
    pub at: Duration,
}

/// Iterates over the cells of a path except the destination, which keeps its own marker.
#[derive(Clone, Debug)]
pub struct PathReveal<'a> {
    cells: &'a [Coord],
    step_delay: Duration,
    next: usize,
}

impl<'a> PathReveal<'a> {
    pub fn new(path: &'a [Coord], step_delay: Duration) -> PathReveal<'a> {
        let cells = match path.split_last() {
            Some((_, rest)) => rest,
            None => path,
        };
        PathReveal {
            cells,
            step_delay,
            next: 0,
        }
    }

    /// Total time until the last cell is shown.
    pub fn duration(&self) -> Duration {
        self.offset(self.cells.len().saturating_sub(1))
    }

    fn offset(&self, index: usize) -> Duration {
        self.step_delay
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl Iterator for PathReveal<'_> {
    type Item = RevealStep;

    fn next(&mut self) -> Option<RevealStep> {
        let coord = *self.cells.get(self.next)?;
        let step = RevealStep {
            index: self.next,
            coord,
            at: self.offset(self.next),
        };
        self.next += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathReveal<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_is_not_revealed() {
        let path = [Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 2)];
        let steps: Vec<RevealStep> = PathReveal::new(&path, DEFAULT_STEP_DELAY).collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].coord, Coord::new(0, 1));
        assert_eq!(steps[0].at, Duration::ZERO);
        assert_eq!(steps[1].at, Duration::from_millis(150));
        assert_eq!(
            PathReveal::new(&path, DEFAULT_STEP_DELAY).duration(),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn empty_and_single_step_paths() {
        assert_eq!(PathReveal::new(&[], DEFAULT_STEP_DELAY).count(), 0);
        let one = [Coord::new(0, 1)];
        let reveal = PathReveal::new(&one, DEFAULT_STEP_DELAY);
        assert_eq!(reveal.len(), 0);
        assert_eq!(reveal.duration(), Duration::ZERO);
    }
}
