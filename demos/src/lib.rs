//! Headless driver for mazepath: carve a maze, run one strategy step by
//! step, and render the grid as text.

use std::fmt::Write as _;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use log::info;
use mazepath_core::{Grid, Point};
use mazepath_gen::{DEFAULT_MAX_COST, DEFAULT_MIN_COST, MazeGen};
use mazepath_paths::{Path, Search, SearchError, SearchOptions, Status, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default pause between animation frames, in milliseconds.
pub const FRAME_DELAY_MS: u64 = 50;

/// Environment variable holding the log filter, e.g. `MAZEPATH_LOG=debug`.
pub const LOG_ENV: &str = "MAZEPATH_LOG";

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Grid(#[from] mazepath_core::GridError),
}

/// Carve a maze and solve it with one search strategy.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "mazepath-demo")]
#[command(version, about)]
#[command(long_about = "Carve a maze and solve it with one search strategy.\n\n\
    Strategies: bfs, dfs, ucs, astar-manhattan, astar-euclidean,\n\
    greedy-manhattan, greedy-euclidean.\n\n\
    Set MAZEPATH_LOG (e.g. MAZEPATH_LOG=debug) to see search logs.")]
pub struct DemoArgs {
    /// Search strategy to run
    #[arg(default_value_t = Strategy::Bfs, value_parser = Strategy::from_str)]
    pub strategy: Strategy,

    /// Seed for maze carving and cost assignment
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Grid side length
    #[arg(long, default_value_t = 31, value_parser = clap::value_parser!(i32).range(5..))]
    pub size: i32,

    /// Randomize cell costs after carving
    #[arg(long)]
    pub costs: bool,

    /// Print the grid after every step
    #[arg(long)]
    pub animate: bool,

    /// Pause between animation frames, in milliseconds
    #[arg(long = "delay", value_name = "MS", default_value_t = FRAME_DELAY_MS)]
    pub delay_ms: u64,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            strategy: Strategy::Bfs,
            seed: 42,
            size: 31,
            costs: false,
            animate: false,
            delay_ms: FRAME_DELAY_MS,
        }
    }
}

impl DemoArgs {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Send the `log` records of every mazepath crate to stderr, filtered by
/// [`LOG_ENV`] or by `default_filter` when it is unset.
pub fn init_logging(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init()
}

/// Build the maze, run the search and return the final text report.
/// With `args.animate`, `on_frame` receives the grid after every step.
pub fn run_demo(args: &DemoArgs, mut on_frame: impl FnMut(&str)) -> Result<String, DemoError> {
    let mut grid = Grid::new(args.size, args.size)?;
    let mut mg = MazeGen::new(StdRng::seed_from_u64(args.seed));
    mg.generate_maze(&mut grid)?;
    if args.costs {
        mg.assign_random_costs(&mut grid, DEFAULT_MIN_COST, DEFAULT_MAX_COST)?;
    }

    // Rooms sit on odd coordinates; pick the far corner room.
    let far = (args.size - 2) - (args.size - 2 + 1) % 2;
    grid.set_start(Point::new(1, 1))?;
    grid.set_target(Point::new(far, far))?;
    info!("{} on {}x{} maze, seed {}", args.strategy, args.size, args.size, args.seed);

    let options = SearchOptions {
        use_cell_costs: args.costs,
        ..SearchOptions::default()
    };
    let search = Search::from_roles(&mut grid, args.strategy, options)?;
    let empty = Path::default();
    let result = search.run_with(|g, _| {
        if args.animate {
            on_frame(&render(g, &empty));
        }
    })?;

    let mut report = render(&grid, &result.path);
    let outcome = match result.status {
        Status::Found => "found",
        Status::Exhausted => "exhausted",
        Status::Running => "running",
    };
    let _ = writeln!(
        report,
        "{}: {outcome} in {} steps, {} cells expanded, {} moves, cost {}",
        args.strategy, result.steps, result.expanded, result.moves, result.cost
    );
    Ok(report)
}

/// Render the grid as text: `#` wall, `S` start, `T` target, `*` path,
/// `.` visited, `+` queued.
pub fn render(grid: &Grid, path: &Path) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for y in 0..grid.rows() {
        for x in 0..grid.columns() {
            let p = Point::new(x, y);
            let c = &grid[p];
            let ch = if c.is_start() {
                'S'
            } else if c.is_target() {
                'T'
            } else if c.is_wall() {
                '#'
            } else if path.contains(p) {
                '*'
            } else if c.is_visited() {
                '.'
            } else if c.is_queued() {
                '+'
            } else {
                ' '
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
