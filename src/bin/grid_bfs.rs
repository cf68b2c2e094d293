//! Terminal front-end: reads one command per line from stdin, applies it to a [Session] and
//! redraws the grid. Run with `RUST_LOG=info` to see what the search is doing.
use clap::Parser;
use grid_bfs::config::{VisualizerConfig, DEFAULT_COLS, DEFAULT_DENSITY, DEFAULT_ROWS};
use grid_bfs::render::{render, Overlay};
use grid_bfs::session::{Command, Event, Session};
use grid_bfs::{Coord, PathResult};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

const HELP: &str = "\
commands:
  new R C      fresh empty grid with R rows and C columns
  random D     fill with obstacles, D percent of cells on average
  paint        toggle obstacle painting mode
  start        pick the start with the next click
  end          pick the destination with the next click
  click R C    click cell (R, C)
  clear        remove obstacles and endpoints
  simulate     search and animate the path
  show         redraw the grid
  help         this text
  quit         exit";

/// Breadth-first path finding on an editable grid
#[derive(Parser, Debug)]
#[command(name = "grid_bfs")]
#[command(version, about)]
struct Cli {
    /// Number of rows of the initial grid
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,
    /// Number of columns of the initial grid
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Obstacle percentage used by `random` without an argument
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: u8,
    /// Milliseconds between two revealed path cells
    #[arg(long, default_value_t = 150)]
    delay_ms: u64,
    /// Seed for random fills
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final path at once instead of animating it
    #[arg(long)]
    no_animate: bool,
}

impl Cli {
    fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            rows: self.rows,
            cols: self.cols,
            density: self.density,
            step_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
        }
    }
}

enum Input {
    Apply(Command),
    Show,
    Help,
    Quit,
}

fn parse_args<const N: usize>(args: &[&str]) -> Result<[usize; N], String> {
    if args.len() != N {
        return Err(format!("expected {} numbers, got {}", N, args.len()));
    }
    let mut out = [0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| format!("{:?} is not a non-negative number", arg))?;
    }
    Ok(out)
}

fn parse_input(line: &str, default_density: u8) -> Result<Option<Input>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(None);
    };
    let input = match head {
        "new" => {
            let [rows, cols] = parse_args::<2>(args)?;
            Input::Apply(Command::NewGrid { rows, cols })
        }
        "random" => {
            let density = match args {
                [] => default_density,
                _ => {
                    let [d] = parse_args::<1>(args)?;
                    u8::try_from(d).map_err(|_| format!("density {} is too large", d))?
                }
            };
            Input::Apply(Command::Randomize { density })
        }
        "paint" => Input::Apply(Command::ToggleObstacleMode),
        "start" => Input::Apply(Command::PickStart),
        "end" => Input::Apply(Command::PickEnd),
        "click" => {
            let [row, col] = parse_args::<2>(args)?;
            Input::Apply(Command::Click(Coord::new(row, col)))
        }
        "clear" => Input::Apply(Command::Clear),
        "simulate" => Input::Apply(Command::Simulate),
        "show" => Input::Show,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(format!("unknown command {:?}, try `help`", other)),
    };
    Ok(Some(input))
}

/// One-line outcome of a simulation, including what the connected components say about it.
fn summary(result: &PathResult, connected: bool) -> String {
    let reach = if connected {
        "endpoints connected"
    } else {
        "endpoints not connected"
    };
    match result {
        PathResult::Found(path) => format!("path found, {} steps ({})", path.len(), reach),
        PathResult::NotFound => format!("no path found ({})", reach),
    }
}

fn draw(out: &mut impl Write, session: &Session, overlay: &Overlay) -> io::Result<()> {
    writeln!(out, "{}", render(session.grid(), overlay))?;
    writeln!(out, "mode: {:?}", session.mode())?;
    out.flush()
}

/// Reveals the path cell by cell on the configured cadence.
fn animate(out: &mut impl Write, session: &Session, step_delay: Duration) -> io::Result<()> {
    let Some(reveal) = session.reveal(step_delay) else {
        return Ok(());
    };
    let full = session.overlay();
    let began = Instant::now();
    for step in reveal {
        if let Some(wait) = step.at.checked_sub(began.elapsed()) {
            thread::sleep(wait);
        }
        let partial = Overlay {
            path: &full.path[..=step.index],
            ..full
        };
        writeln!(out, "step {}", step.index + 1)?;
        draw(out, session, &partial)?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config();
    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(err) => {
            error!("{}", err);
            std::process::exit(2);
        }
    };
    info!("Starting with a {}x{} grid", config.rows, config.cols);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", HELP)?;
    draw(&mut out, &session, &session.overlay())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match parse_input(&line, config.density) {
            Ok(Some(Input::Apply(command))) => command,
            Ok(Some(Input::Show)) => {
                draw(&mut out, &session, &session.overlay())?;
                continue;
            }
            Ok(Some(Input::Help)) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Ok(Some(Input::Quit)) => break,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "error: {}", msg)?;
                continue;
            }
        };
        match session.handle(command) {
            Ok(Event::Simulated(result)) => {
                if !cli.no_animate {
                    animate(&mut out, &session, config.step_delay)?;
                }
                let connected = session.endpoints_connected();
                writeln!(out, "{}", summary(&result, connected))?;
                draw(&mut out, &session, &session.overlay())?;
            }
            Ok(event) => {
                writeln!(out, "{:?}", event)?;
                draw(&mut out, &session, &session.overlay())?;
            }
            Err(err) => writeln!(out, "error: {}", err)?,
        }
    }
    Ok(())
}
