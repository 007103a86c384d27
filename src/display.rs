/// Rendering layer.
///
/// Each function receives the console and an immutable view of the game
/// state.  No game logic happens here; this module only translates state
/// into console draw calls.

use std::io;

use crate::console::Console;
use crate::entities::{ColorTag, Entity, GameState, COLS, ROWS};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STATUS: ColorTag = ColorTag::White;
const C_HINT: ColorTag = ColorTag::LightGrey;
const C_TITLE: ColorTag = ColorTag::Yellow;
const C_GAME_OVER: ColorTag = ColorTag::Red;

const CONTROLS: &str = "A/D: Move | Space: Shoot | P: Pause | ESC: Exit";

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render(console: &mut dyn Console, state: &GameState) -> io::Result<()> {
    console.clear()?;

    state.avatar.render(console)?;
    for attacker in &state.attackers {
        attacker.render(console)?;
    }
    for projectile in &state.projectiles {
        projectile.render(console)?;
    }

    draw_status_bar(console, state)?;
    draw_controls_hint(console)?;

    console.flush()
}

// ── Status row ────────────────────────────────────────────────────────────────

pub fn status_line(state: &GameState) -> String {
    format!(
        "Score: {} | Lives: {} | Level: {}",
        state.score(),
        state.avatar.lives,
        state.level
    )
}

fn draw_status_bar(console: &mut dyn Console, state: &GameState) -> io::Result<()> {
    console.draw_text(2, ROWS - 2, &status_line(state), C_STATUS)
}

fn draw_controls_hint(console: &mut dyn Console) -> io::Result<()> {
    let x = COLS - CONTROLS.chars().count() as i32 - 2;
    console.draw_text(x, ROWS - 2, CONTROLS, C_HINT)
}

// ── Banners and overlays ──────────────────────────────────────────────────────

pub fn level_title(level: u32) -> &'static str {
    match level {
        1 => "Level 1: Basic Invasion",
        2 => "Level 2: Aggressive Attack",
        _ => "Level 3: Final Assault",
    }
}

fn level_subtitle(level: u32) -> &'static str {
    match level {
        1 => "Get ready for the invasion!",
        2 => "Enemies are getting more aggressive!",
        _ => "This is the final battle!",
    }
}

/// Column that centres `text` on the grid.
fn centred(text: &str) -> i32 {
    (COLS - text.chars().count() as i32).max(0) / 2
}

pub fn draw_level_banner(console: &mut dyn Console, level: u32) -> io::Result<()> {
    console.clear()?;
    let title = level_title(level);
    let subtitle = level_subtitle(level);
    console.draw_text(centred(title), ROWS / 2, title, C_TITLE)?;
    console.draw_text(centred(subtitle), ROWS / 2 + 2, subtitle, ColorTag::White)?;
    console.flush()
}

/// Drawn over the last frame; the frame itself is left in place.
pub fn draw_paused(console: &mut dyn Console) -> io::Result<()> {
    let title = "GAME PAUSED";
    let hint = "Press P to resume";
    console.draw_text(centred(title), ROWS / 2, title, C_TITLE)?;
    console.draw_text(centred(hint), ROWS / 2 + 2, hint, ColorTag::White)?;
    console.flush()
}

pub fn draw_game_over(console: &mut dyn Console, state: &GameState) -> io::Result<()> {
    console.clear()?;
    let lines = [
        ("GAME OVER".to_string(), C_GAME_OVER),
        (format!("Final Score: {}", state.score()), ColorTag::White),
        (format!("Level Reached: {}", state.level), ColorTag::White),
        ("Press any key to exit...".to_string(), C_HINT),
    ];
    draw_centred_lines(console, &lines)
}

pub fn draw_victory(console: &mut dyn Console, state: &GameState) -> io::Result<()> {
    console.clear()?;
    let lines = [
        ("CONGRATULATIONS! YOU WON!".to_string(), C_TITLE),
        (format!("Final Score: {}", state.score()), ColorTag::White),
        ("Press any key to exit...".to_string(), C_HINT),
    ];
    draw_centred_lines(console, &lines)
}

/// Stack lines two rows apart around the middle of the grid.
fn draw_centred_lines(console: &mut dyn Console, lines: &[(String, ColorTag)]) -> io::Result<()> {
    let start_row = ROWS / 2 - lines.len() as i32;
    for (i, (text, color)) in lines.iter().enumerate() {
        console.draw_text(centred(text), start_row + i as i32 * 2, text, *color)?;
    }
    console.flush()
}
