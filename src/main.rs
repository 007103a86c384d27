use std::fs::File;
use std::io::{stdout, BufWriter};

use crossterm::terminal;
use rand::thread_rng;

use terminal_invaders::entities::{Outcome, COLS, ROWS};
use terminal_invaders::error::GameError;
use terminal_invaders::session::{Session, Timing};
use terminal_invaders::terminal::CrosstermConsole;

const LOG_FILE: &str = "terminal_invaders.log";

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Logging is opt-in via `RUST_LOG` and goes to a file in the temp dir; the
/// game owns the terminal, so stderr is not an option.
fn init_logging() {
    let Ok(filters) = std::env::var("RUST_LOG") else {
        return;
    };
    let path = std::env::temp_dir().join(LOG_FILE);
    let Ok(file) = File::create(&path) else {
        return;
    };
    env_logger::Builder::new()
        .parse_filters(&filters)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();

    if let Ok((width, height)) = terminal::size() {
        if i32::from(width) < COLS || i32::from(height) < ROWS {
            log::warn!(
                "terminal is {}x{}, the playfield needs {}x{}",
                width,
                height,
                COLS,
                ROWS
            );
        }
    }

    let mut console = CrosstermConsole::new(BufWriter::new(stdout()));
    console.enter()?;

    let mut session = Session::new(console, thread_rng(), Timing::default());
    let result = session.run();
    let score = session.state().score();

    // Always restore the terminal
    let mut console = session.into_console();
    let restored = console.leave();

    let outcome = result?;
    restored?;

    log::info!("session ended: {:?}, score {}", outcome, score);
    match outcome {
        Outcome::Won => println!("You won! Final score: {}", score),
        Outcome::Lost => println!("Game over. Final score: {}", score),
        Outcome::Quit => println!("Final score: {}", score),
    }
    Ok(())
}
