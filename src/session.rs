/// The session driver: start banner, frame loop, end screen.
///
/// Everything runs on the calling thread as sequential phases.  Banners
/// sleep the whole thread on purpose so no key press is consumed while one
/// is showing.

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute::{apply_input, evaluate, init_state, tick, Checkpoint};
use crate::console::Console;
use crate::display;
use crate::entities::{GameState, GameStatus, Outcome};
use crate::error::GameError;

/// Frame cap and banner hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub frame: Duration,
    pub banner: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            frame: Duration::from_millis(50),
            banner: Duration::from_secs(2),
        }
    }
}

impl Timing {
    /// No sleeping at all.
    pub fn instant() -> Self {
        Timing {
            frame: Duration::ZERO,
            banner: Duration::ZERO,
        }
    }
}

fn pause_for(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

pub struct Session<C: Console, R: Rng> {
    console: C,
    rng: R,
    timing: Timing,
    state: GameState,
}

impl<C: Console, R: Rng> Session<C, R> {
    pub fn new(console: C, rng: R, timing: Timing) -> Self {
        Session::with_state(console, rng, timing, init_state(Instant::now()))
    }

    /// Start from an existing state, e.g. one rebuilt from a snapshot.
    pub fn with_state(console: C, rng: R, timing: Timing, state: GameState) -> Self {
        Session {
            console,
            rng,
            timing,
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Block until the session terminates and report how it ended.
    pub fn run(&mut self) -> Result<Outcome, GameError> {
        self.console.hide_cursor()?;
        display::draw_level_banner(&mut self.console, self.state.level)?;
        pause_for(self.timing.banner);

        let outcome = loop {
            match self.state.status {
                GameStatus::Running => self.frame()?,
                GameStatus::Paused => self.paused()?,
                GameStatus::Terminated(outcome) => break outcome,
            }
            pause_for(self.timing.frame);
        };

        match outcome {
            Outcome::Won => {
                display::draw_victory(&mut self.console, &self.state)?;
                self.console.read_key()?;
            }
            Outcome::Lost => {
                display::draw_game_over(&mut self.console, &self.state)?;
                self.console.read_key()?;
            }
            Outcome::Quit => {}
        }
        self.console.show_cursor()?;
        Ok(outcome)
    }

    /// One running frame: at most one input event, then tick, draw and
    /// evaluate.  A pause or quit from that input skips the rest.
    fn frame(&mut self) -> Result<(), GameError> {
        if let Some(input) = self.console.poll_key()?.and_then(|key| key.to_input()) {
            self.state = apply_input(&self.state, input);
            if !self.state.is_running() {
                return Ok(());
            }
        }

        self.state = tick(&self.state, Instant::now(), &mut self.rng);
        display::render(&mut self.console, &self.state)?;

        let (state, checkpoint) = evaluate(&self.state, Instant::now());
        self.state = state;
        if let Checkpoint::LevelUp(level) = checkpoint {
            display::draw_level_banner(&mut self.console, level)?;
            pause_for(self.timing.banner);
        }
        Ok(())
    }

    /// Wait for a key; only resume and quit change anything.
    fn paused(&mut self) -> Result<(), GameError> {
        display::draw_paused(&mut self.console)?;
        let key = self.console.read_key()?;
        if let Some(input) = key.to_input() {
            self.state = apply_input(&self.state, input);
        }
        if self.state.is_running() {
            self.console.clear()?;
        }
        Ok(())
    }
}
