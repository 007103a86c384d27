mod common;

use std::time::Instant;

use common::{Call, FakeConsole};
use terminal_invaders::compute::init_state;
use terminal_invaders::display::*;
use terminal_invaders::entities::*;

#[test]
fn frame_starts_with_clear_and_ends_with_flush() {
    let mut console = FakeConsole::default();
    render(&mut console, &init_state(Instant::now())).unwrap();
    assert_eq!(console.calls.first(), Some(&Call::Clear));
    assert_eq!(console.calls.last(), Some(&Call::Flush));
}

#[test]
fn frame_draws_every_entity() {
    let mut state = init_state(Instant::now());
    state.projectiles.push(Projectile::new(40, 19, Heading::Up));
    let mut console = FakeConsole::default();
    render(&mut console, &state).unwrap();

    let chars = console.chars();
    assert_eq!(chars.len(), 1 + 40 + 1);
    assert_eq!(chars[0], (40, 20, 'A'));
    assert!(chars.contains(&(28, 5, '$')));
    assert!(chars.contains(&(28, 13, '&')));
    assert_eq!(chars[41], (40, 19, '^'));
}

#[test]
fn frame_skips_projectiles_off_the_grid() {
    let mut state = init_state(Instant::now());
    state.attackers.clear();
    state.projectiles.push(Projectile::new(40, -1, Heading::Up));
    let mut console = FakeConsole::default();
    render(&mut console, &state).unwrap();
    assert_eq!(console.chars(), vec![(40, 20, 'A')]);
}

#[test]
fn status_bar_and_legend() {
    let mut state = init_state(Instant::now());
    state.avatar.add_score(120);
    state.level = 2;
    let mut console = FakeConsole::default();
    render(&mut console, &state).unwrap();

    assert!(console.calls.contains(&Call::Text(
        2,
        ROWS - 2,
        "Score: 120 | Lives: 3 | Level: 2".to_string(),
        ColorTag::White
    )));
    assert!(console.calls.contains(&Call::Text(
        31,
        ROWS - 2,
        "A/D: Move | Space: Shoot | P: Pause | ESC: Exit".to_string(),
        ColorTag::LightGrey
    )));
}

#[test]
fn level_banners() {
    assert_eq!(level_title(1), "Level 1: Basic Invasion");
    assert_eq!(level_title(2), "Level 2: Aggressive Attack");
    assert_eq!(level_title(3), "Level 3: Final Assault");

    let mut console = FakeConsole::default();
    draw_level_banner(&mut console, 3).unwrap();
    assert_eq!(console.calls[0], Call::Clear);
    assert!(console.has_text("Level 3: Final Assault"));
    assert!(console.has_text("This is the final battle!"));
}

#[test]
fn pause_overlay_keeps_the_frame() {
    let mut console = FakeConsole::default();
    draw_paused(&mut console).unwrap();
    assert!(!console.calls.contains(&Call::Clear));
    assert!(console.has_text("GAME PAUSED"));
    assert!(console.has_text("Press P to resume"));
}

#[test]
fn game_over_screen() {
    let mut state = init_state(Instant::now());
    state.avatar.add_score(450);
    state.level = 2;
    let mut console = FakeConsole::default();
    draw_game_over(&mut console, &state).unwrap();
    assert!(console.has_text("GAME OVER"));
    assert!(console.has_text("Final Score: 450"));
    assert!(console.has_text("Level Reached: 2"));
    assert!(console.has_text("Press any key to exit..."));
}

#[test]
fn victory_screen() {
    let mut state = init_state(Instant::now());
    state.avatar.add_score(3000);
    let mut console = FakeConsole::default();
    draw_victory(&mut console, &state).unwrap();
    assert!(console.has_text("CONGRATULATIONS! YOU WON!"));
    assert!(console.has_text("Final Score: 3000"));
}

#[test]
fn broken_console_propagates() {
    let mut console = FakeConsole::broken();
    assert!(render(&mut console, &init_state(Instant::now())).is_err());
}
