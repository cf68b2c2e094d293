//! Application state of the interactive tool: the grid being edited, the chosen endpoints, the
//! current input mode and the outcome of the last simulation. Front-ends translate user input
//! into [Command]s and redraw from the [Event] each command produces.
use crate::config::VisualizerConfig;
use crate::occupancy::OccupancyGrid;
use crate::path_finder::{PathFinder, SearchReport};
use crate::pathing_grid::PathingGrid;
use crate::render::Overlay;
use crate::reveal::PathReveal;
use crate::{Coord, Error, PathResult, Result};
use core::fmt;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// What a click on a cell does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Clicks place or remove endpoints.
    #[default]
    Idle,
    /// Clicks toggle obstacles.
    PaintingObstacles,
    AwaitingStartPick,
    AwaitingEndPick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    NewGrid { rows: usize, cols: usize },
    Randomize { density: u8 },
    ToggleObstacleMode,
    PickStart,
    PickEnd,
    Click(Coord),
    Clear,
    Simulate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The grid was replaced or wiped; endpoints and results are gone.
    GridReset,
    ModeChanged(Mode),
    ObstacleToggled { coord: Coord, blocked: bool },
    EndpointSet(Endpoint, Coord),
    EndpointRemoved(Endpoint),
    /// Both endpoints are set and the click hit neither of them.
    ClickIgnored(Coord),
    Simulated(PathResult),
}

pub struct Session {
    grid: PathingGrid,
    start: Option<Coord>,
    destination: Option<Coord>,
    mode: Mode,
    last: Option<SearchReport>,
    finder: PathFinder,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &VisualizerConfig) -> Result<Session> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Session {
            grid: PathingGrid::new(config.rows, config.cols)?,
            start: None,
            destination: None,
            mode: Mode::Idle,
            last: None,
            finder: PathFinder::new(),
            rng,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn destination(&self) -> Option<Coord> {
        self.destination
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Report of the last simulation, dropped whenever the grid or an endpoint changes.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last.as_ref()
    }

    /// Endpoints plus the full path and distance labels of the last simulation.
    pub fn overlay(&self) -> Overlay<'_> {
        Overlay {
            start: self.start,
            destination: self.destination,
            path: self
                .last
                .as_ref()
                .and_then(|r| r.result.path())
                .unwrap_or(&[]),
            distances: self.last.as_ref().map(|r| &r.distances),
        }
    }

    /// Animation schedule for the last found path.
    pub fn reveal(&self, step_delay: Duration) -> Option<PathReveal<'_>> {
        let path = self.last.as_ref()?.result.path()?;
        Some(PathReveal::new(path, step_delay))
    }

    /// Whether both endpoints are set and lie in the same connected component.
    pub fn endpoints_connected(&mut self) -> bool {
        self.grid.update();
        match (self.start, self.destination) {
            (Some(s), Some(d)) => self.grid.reachable(&s, &d),
            _ => false,
        }
    }

    fn reset_points(&mut self) {
        self.start = None;
        self.destination = None;
        self.last = None;
        self.mode = Mode::Idle;
    }

    pub fn handle(&mut self, command: Command) -> Result<Event> {
        debug!("Handling {:?} in mode {:?}", command, self.mode);
        match command {
            Command::NewGrid { rows, cols } => {
                self.grid = PathingGrid::new(rows, cols)?;
                self.reset_points();
                Ok(Event::GridReset)
            }
            Command::Randomize { density } => {
                if density > 100 {
                    return Err(Error::InvalidConfig(format!(
                        "density {} is not a percentage",
                        density
                    )));
                }
                self.grid.randomize(density, &mut self.rng);
                self.reset_points();
                info!(
                    "Random fill at {}% blocked {} cells",
                    density,
                    self.grid.obstacle_count()
                );
                Ok(Event::GridReset)
            }
            Command::Clear => {
                self.grid.clear();
                self.reset_points();
                Ok(Event::GridReset)
            }
            Command::ToggleObstacleMode => {
                self.mode = match self.mode {
                    Mode::PaintingObstacles => Mode::Idle,
                    _ => Mode::PaintingObstacles,
                };
                Ok(Event::ModeChanged(self.mode))
            }
            Command::PickStart | Command::PickEnd => {
                if self.mode == Mode::PaintingObstacles {
                    return Err(Error::ModeConflict);
                }
                self.mode = if command == Command::PickStart {
                    Mode::AwaitingStartPick
                } else {
                    Mode::AwaitingEndPick
                };
                Ok(Event::ModeChanged(self.mode))
            }
            Command::Click(coord) => self.click(coord),
            Command::Simulate => self.simulate(),
        }
    }

    fn place(&mut self, endpoint: Endpoint, coord: Coord) -> Result<Event> {
        if self.grid.is_obstacle(coord) {
            return Err(Error::ObstacleSelected(coord));
        }
        match endpoint {
            Endpoint::Start => self.start = Some(coord),
            Endpoint::Destination => self.destination = Some(coord),
        }
        self.last = None;
        Ok(Event::EndpointSet(endpoint, coord))
    }

    fn click(&mut self, coord: Coord) -> Result<Event> {
        self.grid.check_bounds(coord)?;
        match self.mode {
            Mode::PaintingObstacles => {
                let blocked = self.grid.toggle(coord)?;
                self.last = None;
                Ok(Event::ObstacleToggled { coord, blocked })
            }
            Mode::AwaitingStartPick => {
                let event = self.place(Endpoint::Start, coord)?;
                self.mode = Mode::Idle;
                Ok(event)
            }
            Mode::AwaitingEndPick => {
                let event = self.place(Endpoint::Destination, coord)?;
                self.mode = Mode::Idle;
                Ok(event)
            }
            Mode::Idle => {
                if self.start == Some(coord) {
                    self.start = None;
                    self.last = None;
                    Ok(Event::EndpointRemoved(Endpoint::Start))
                } else if self.destination == Some(coord) {
                    self.destination = None;
                    self.last = None;
                    Ok(Event::EndpointRemoved(Endpoint::Destination))
                } else if self.start.is_none() {
                    self.place(Endpoint::Start, coord)
                } else if self.destination.is_none() {
                    self.place(Endpoint::Destination, coord)
                } else {
                    Ok(Event::ClickIgnored(coord))
                }
            }
        }
    }

    fn simulate(&mut self) -> Result<Event> {
        let start = self.start.ok_or(Error::MissingEndpoint(Endpoint::Start))?;
        let destination = self
            .destination
            .ok_or(Error::MissingEndpoint(Endpoint::Destination))?;
        let report = self.finder.search(&self.grid, start, destination)?;
        match &report.result {
            PathResult::Found(path) => info!(
                "Found path of length {} from {} to {}",
                path.len(),
                start,
                destination
            ),
            PathResult::NotFound => info!("No path from {} to {}", start, destination),
        }
        let result = report.result.clone();
        self.last = Some(report);
        Ok(Event::Simulated(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&VisualizerConfig {
            rows: 3,
            cols: 3,
            seed: Some(7),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn idle_clicks_fill_start_then_destination() {
        let mut s = session();
        let a = Coord::new(0, 0);
        let b = Coord::new(2, 2);
        assert_eq!(
            s.handle(Command::Click(a)).unwrap(),
            Event::EndpointSet(Endpoint::Start, a)
        );
        assert_eq!(
            s.handle(Command::Click(b)).unwrap(),
            Event::EndpointSet(Endpoint::Destination, b)
        );
        let c = Coord::new(1, 1);
        assert_eq!(s.handle(Command::Click(c)).unwrap(), Event::ClickIgnored(c));
        assert_eq!(
            s.handle(Command::Click(a)).unwrap(),
            Event::EndpointRemoved(Endpoint::Start)
        );
        assert_eq!(s.start(), None);
        assert_eq!(s.destination(), Some(b));
    }

    #[test]
    fn painting_toggles_and_blocks_picks() {
        let mut s = session();
        assert_eq!(
            s.handle(Command::ToggleObstacleMode).unwrap(),
            Event::ModeChanged(Mode::PaintingObstacles)
        );
        let c = Coord::new(1, 1);
        assert_eq!(
            s.handle(Command::Click(c)).unwrap(),
            Event::ObstacleToggled {
                coord: c,
                blocked: true
            }
        );
        assert_eq!(s.handle(Command::PickStart), Err(Error::ModeConflict));
        s.handle(Command::ToggleObstacleMode).unwrap();
        assert_eq!(s.mode(), Mode::Idle);
        assert_eq!(
            s.handle(Command::Click(c)),
            Err(Error::ObstacleSelected(c))
        );
    }

    #[test]
    fn simulate_requires_both_endpoints() {
        let mut s = session();
        assert_eq!(
            s.handle(Command::Simulate),
            Err(Error::MissingEndpoint(Endpoint::Start))
        );
        s.handle(Command::Click(Coord::new(0, 0))).unwrap();
        assert_eq!(
            s.handle(Command::Simulate),
            Err(Error::MissingEndpoint(Endpoint::Destination))
        );
    }

    #[test]
    fn simulate_stores_report_until_an_edit() {
        let mut s = session();
        s.handle(Command::PickEnd).unwrap();
        s.handle(Command::Click(Coord::new(2, 2))).unwrap();
        assert_eq!(s.mode(), Mode::Idle);
        s.handle(Command::PickStart).unwrap();
        s.handle(Command::Click(Coord::new(0, 0))).unwrap();
        let event = s.handle(Command::Simulate).unwrap();
        assert!(matches!(event, Event::Simulated(PathResult::Found(ref p)) if p.len() == 4));
        assert_eq!(s.overlay().path.len(), 4);
        assert_eq!(s.reveal(Duration::from_millis(10)).unwrap().len(), 3);
        assert!(s.endpoints_connected());
        s.handle(Command::ToggleObstacleMode).unwrap();
        s.handle(Command::Click(Coord::new(0, 1))).unwrap();
        assert!(s.last_report().is_none());
        assert!(s.overlay().path.is_empty());
    }

    #[test]
    fn out_of_bounds_click_is_rejected() {
        let mut s = session();
        assert!(matches!(
            s.handle(Command::Click(Coord::new(3, 0))),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn grid_commands_reset_state() {
        let mut s = session();
        s.handle(Command::Click(Coord::new(0, 0))).unwrap();
        assert_eq!(
            s.handle(Command::NewGrid { rows: 4, cols: 5 }).unwrap(),
            Event::GridReset
        );
        assert_eq!(s.grid().rows(), 4);
        assert_eq!(s.start(), None);
        assert!(s.handle(Command::NewGrid { rows: 0, cols: 5 }).is_err());
        assert!(matches!(
            s.handle(Command::NewGrid {
                rows: usize::MAX / 2,
                cols: usize::MAX / 2
            }),
            Err(Error::InvalidConfig(_))
        ));
        assert_eq!(s.grid().rows(), 4);
        s.handle(Command::Randomize { density: 100 }).unwrap();
        assert_eq!(s.grid().obstacle_count(), 20);
        assert!(matches!(
            s.handle(Command::Randomize { density: 150 }),
            Err(Error::InvalidConfig(_))
        ));
        s.handle(Command::Clear).unwrap();
        assert_eq!(s.grid().obstacle_count(), 0);
    }
}
