//! Terminal runner for the digit-bin puzzle.
//!
//! Keyboard input comes from crossterm, drawing goes through the framebuffer
//! renderer in `tui_bins::term`. The game itself only changes on key presses,
//! so the loop blocks on the next event instead of ticking.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tui_bins::core::{GameConfig, GameState, Presenter};
use tui_bins::input::{handle_key_event, should_quit};
use tui_bins::term::{GameView, TerminalPresenter, TerminalRenderer, Viewport};
use tui_bins::types::{DEFAULT_RULESET, GRID_COLS, GRID_ROWS};

/// Largest accepted `--rows` / `--cols`.
const MAX_GRID_SIDE: i64 = 256;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sort rectangles of digits into bins", long_about = None)]
struct Cli {
    /// Seed for the digit generator (defaults to the current time).
    #[arg(long)]
    seed: Option<u32>,

    #[arg(
        long,
        default_value_t = GRID_ROWS as u16,
        value_parser = clap::value_parser!(u16).range(1..=MAX_GRID_SIDE)
    )]
    rows: u16,

    #[arg(
        long,
        default_value_t = GRID_COLS as u16,
        value_parser = clap::value_parser!(u16).range(1..=MAX_GRID_SIDE)
    )]
    cols: u16,

    /// Ruleset to start with.
    #[arg(long, default_value = DEFAULT_RULESET)]
    ruleset: String,

    /// Write logs here. Nothing is logged without it; `RUST_LOG` sets the filter.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            rows: usize::from(self.rows),
            cols: usize::from(self.cols),
            seed: self.seed.unwrap_or_else(time_seed),
            ruleset: self.ruleset.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config();
    // Build the game before touching the terminal so bad flags print normally.
    let game = GameState::new(&config)
        .with_context(|| format!("cannot start a {}x{} game", config.rows, config.cols))?;
    info!(
        seed = config.seed,
        rows = config.rows,
        cols = config.cols,
        ruleset = %config.ruleset,
        "starting game"
    );

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut presenter = TerminalPresenter::new(renderer, GameView::default(), Viewport::new(w, h));

    let result = run(game, &mut presenter);

    // Always try to restore terminal state.
    let _ = presenter.renderer_mut().exit();
    result
}

fn run(mut game: GameState, presenter: &mut TerminalPresenter) -> Result<()> {
    presenter.render(&game.snapshot())?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    info!("quit");
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.dispatch(action, presenter)?;
                }
            }
            Event::Resize(w, h) => {
                presenter.resize(w, h);
                presenter.render(&game.snapshot())?;
            }
            _ => {}
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos() ^ d.as_secs() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_grid() {
        let cli = Cli::try_parse_from(["tui-bins", "--seed", "9"]).unwrap();
        let config = cli.game_config();
        assert_eq!((config.rows, config.cols), (GRID_ROWS, GRID_COLS));
        assert_eq!(config.seed, 9);
        assert_eq!(config.ruleset, DEFAULT_RULESET);
    }

    #[test]
    fn grid_sides_are_bounded() {
        assert!(Cli::try_parse_from(["tui-bins", "--cols", "30000"]).is_err());
        assert!(Cli::try_parse_from(["tui-bins", "--rows", "0"]).is_err());
        let cli = Cli::try_parse_from(["tui-bins", "--rows", "256", "--cols", "1"]).unwrap();
        assert_eq!((cli.rows, cli.cols), (256, 1));
    }
}
