mod config;
mod engine;
mod food;
mod game;
mod grid;
mod render;
mod session;
mod snake;
mod sprite;
mod term;

use std::{env, fs::File, process::exit, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use config::Settings;
use game::SnakeGame;
use render::TermPresenter;
use session::Session;

/// Grid position in pixels: the top-left corner of a cell.
pub type Cell = (i32, i32);

/// Log file path. The terminal is busy drawing the game, so logs go to a file or nowhere.
const LOG_FILE_ENV: &str = "SNAKE_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        exit(1);
    }
}

fn run() -> Result<()> {
    init_logging()?;

    let settings = Settings::default();
    let presenter = TermPresenter::new(settings.grid)?;
    let mut game = SnakeGame::new(Session::new(settings), presenter);

    // Dropping the game hands the terminal back before any error gets printed
    game.play()
}

fn init_logging() -> Result<()> {
    let path = match env::var_os(LOG_FILE_ENV) {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(&path).with_context(|| format!("Error creating log file {:?}", path))?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
