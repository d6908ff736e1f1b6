//! Terminal runner (default binary).
//!
//! Fixed-timestep loop: drain key events into the game's input, advance the
//! game by one tick, render. Configuration comes from `TOMINO_*` environment
//! variables (see [`tomino::config`]).

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tomino::config::Config;
use tomino::core::{BagProvider, Board, Game};
use tomino::input::{KeyCommand, KeyboardInput};
use tomino::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};

type TerminalGame = Game<BagProvider, KeyboardInput>;

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;

    let board = Board::new(config.board_width, config.board_height)
        .context("invalid board dimensions")?;
    let mut game = Game::new(board, BagProvider::new(config.seed), KeyboardInput::new());
    game.start();

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, &mut game, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = game.score(), "exiting");
    result
}

/// Logs go to a file because stdout belongs to the game screen.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut TerminalGame, config: &Config) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick = config.tick();
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(game.board(), &Hud::of(game), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match game.input_mut().press(key) {
                    Some(KeyCommand::Quit) => return Ok(()),
                    Some(KeyCommand::Restart) => {
                        game.input_mut().clear();
                        game.start();
                    }
                    Some(KeyCommand::Play(_)) | None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.update(config.tick_seconds());
        }
    }
}
