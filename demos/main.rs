//! Terminal demo: build a board, optionally carve a maze, replay a search.
//!
//! Usage:
//!   cargo run -- --algorithm astar --maze --speed 90
//!   cargo run -- --algorithm dfs --rows 15 --cols 30 --no-animate
//!
//! Press `q` or `Esc` during the animation to cancel the run.
//! Enable debug logging with `RUST_LOG=debug`. While animating, log lines go
//! to `gridpath-demo.log` instead of stderr so they stay off the board.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{CellKind, Grid, build_grid};
use gridpath_playback::{
    Algorithm, Board, CancelToken, PlaybackConfig, PlaybackState, ThreadScheduler,
};

/// Animated grid pathfinding in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: dijkstra, astar, bfs or dfs
    #[arg(short, long, default_value = "dijkstra")]
    algorithm: Algorithm,

    /// Animation speed, 0 (slowest) to 100 (fastest)
    #[arg(short, long, default_value = "50", value_parser = clap::value_parser!(u8).range(0..=100))]
    speed: u8,

    /// Carve a random maze before searching
    #[arg(short, long)]
    maze: bool,

    /// Seed for the maze generator
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "20")]
    rows: i32,

    #[arg(long, default_value = "40")]
    cols: i32,

    /// Skip the animation and print only the final board
    #[arg(long)]
    no_animate: bool,
}

fn color(kind: CellKind) -> Color {
    match kind {
        CellKind::Empty => Color::DarkGrey,
        CellKind::Wall => Color::White,
        CellKind::Start => Color::Green,
        CellKind::End => Color::Red,
        CellKind::Visited => Color::Blue,
        CellKind::Path => Color::Yellow,
        CellKind::Current => Color::Magenta,
    }
}

/// Alternate screen in raw mode, restored on drop.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }

    fn draw(&self, grid: &Grid, header: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0), ResetColor, Print(header))?;
        for (r, row) in grid.cells().chunks(grid.cols() as usize).enumerate() {
            queue!(stdout, cursor::MoveTo(0, r as u16 + 1))?;
            for cell in row {
                let kind = cell.kind();
                queue!(stdout, SetForegroundColor(color(kind)), Print(kind.glyph()))?;
            }
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Cancel `token` if `q` or `Esc` was pressed since the last frame.
fn poll_quit(token: &CancelToken) -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                token.cancel();
            }
        }
    }
    Ok(())
}

fn animate(board: &mut Board, token: &CancelToken, algorithm: Algorithm) -> io::Result<PlaybackState> {
    let screen = Screen::enter()?;
    let header = format!("{algorithm} (q to cancel)");
    let mut failure = None;
    let state = board.run(ThreadScheduler, |grid: &Grid| {
        if failure.is_some() {
            return;
        }
        if let Err(e) = screen.draw(grid, &header).and_then(|()| poll_quit(token)) {
            token.cancel();
            failure = Some(e);
        }
    });
    drop(screen);
    match failure {
        Some(e) => Err(e),
        None => Ok(state),
    }
}

const LOG_FILE: &str = "gridpath-demo.log";

/// Whether logging must be redirected away from the terminal.
fn logs_to_file(animate: bool, rust_log: Option<&OsStr>) -> bool {
    animate && rust_log.is_some_and(|v| !v.is_empty())
}

fn init_logging(animate: bool) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if logs_to_file(animate, std::env::var_os("RUST_LOG").as_deref()) {
        let file = File::create(LOG_FILE)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(!args.no_animate)?;

    let grid = build_grid(args.rows, args.cols)?;
    let playback = PlaybackConfig::default().with_speed(args.speed);
    let mut board = Board::from_grid(grid, playback, args.seed);
    if args.maze {
        board.generate_maze()?;
    }

    let token = board.start_run(args.algorithm)?;
    let state = if args.no_animate {
        board.run(|_: Duration| {}, |_: &Grid| {})
    } else {
        animate(&mut board, &token, args.algorithm)?
    };

    println!("{}", board.grid());
    println!();
    let stats = board.stats();
    println!("Algorithm: {}", args.algorithm);
    println!("State: {state:?}");
    println!("Visited: {}", stats.visited);
    match stats.path_len {
        Some(len) => println!("Path length: {len}"),
        None => println!("Path length: -"),
    }
    if let Some(result) = board.last_result() {
        log::debug!("outcome: {:?}", result.outcome);
    }
    Ok(())
}
