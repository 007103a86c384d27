use std::time::{Duration, Instant};

use serde_json::{json, Value};
use terminal_invaders::compute::{init_state, wave_params};
use terminal_invaders::entities::*;
use terminal_invaders::error::{DeserializationError, GameError};
use terminal_invaders::snapshot::{load, save};

fn mid_game() -> GameState {
    let mut state = init_state(Instant::now());
    state.level = 2;
    state.avatar.add_score(340);
    state.avatar.lives = 2;
    state.bonus_life_awarded = true;
    state.attackers.truncate(3);
    state.attackers[1].drift = Drift::Left;
    state.projectiles = vec![
        Projectile::new(12, 9, Heading::Down),
        Projectile::new(40, 15, Heading::Up),
    ];
    state
}

fn tampered(edit: impl FnOnce(&mut Value)) -> String {
    let mut value: Value = serde_json::from_str(&save(&mid_game()).unwrap()).unwrap();
    edit(&mut value);
    value.to_string()
}

fn out_of_range(result: Result<GameState, GameError>) -> bool {
    matches!(
        result,
        Err(GameError::Deserialization(DeserializationError::OutOfRange(_)))
    )
}

fn malformed(result: Result<GameState, GameError>) -> bool {
    matches!(
        result,
        Err(GameError::Deserialization(DeserializationError::Malformed(_)))
    )
}

#[test]
fn saved_state_loads_back() {
    let original = mid_game();
    let now = Instant::now() + Duration::from_secs(1);
    let loaded = load(&save(&original).unwrap(), now).unwrap();

    assert_eq!(loaded.avatar, original.avatar);
    assert_eq!(loaded.attackers, original.attackers);
    assert_eq!(loaded.projectiles, original.projectiles);
    assert_eq!(loaded.level, 2);
    assert!(loaded.bonus_life_awarded);
    assert_eq!(loaded.wave, wave_params(2));
    assert_eq!(loaded.status, GameStatus::Running);
    assert_eq!(loaded.last_attacker_update, now);
    assert_eq!(loaded.last_attacker_shot, now);
}

#[test]
fn garbage_is_malformed() {
    assert!(malformed(load("not json", Instant::now())));
    assert!(malformed(load("{}", Instant::now())));
}

#[test]
fn truncated_record_is_malformed() {
    let text = save(&mid_game()).unwrap();
    assert!(malformed(load(&text[..text.len() / 2], Instant::now())));
}

#[test]
fn unknown_heading_is_malformed() {
    let text = tampered(|v| v["projectiles"][0]["heading"] = json!("Sideways"));
    assert!(malformed(load(&text, Instant::now())));
}

#[test]
fn missing_field_is_malformed() {
    let text = tampered(|v| {
        v["avatar"].as_object_mut().unwrap().remove("lives");
    });
    assert!(malformed(load(&text, Instant::now())));
}

#[test]
fn level_outside_the_table_is_rejected() {
    let text = tampered(|v| v["level"] = json!(4));
    assert!(out_of_range(load(&text, Instant::now())));
    let text = tampered(|v| v["level"] = json!(0));
    assert!(out_of_range(load(&text, Instant::now())));
}

#[test]
fn off_grid_entities_are_rejected() {
    let text = tampered(|v| v["attackers"][0]["sprite"]["pos"]["x"] = json!(COLS));
    assert!(out_of_range(load(&text, Instant::now())));
    let text = tampered(|v| v["projectiles"][1]["sprite"]["pos"]["y"] = json!(-1));
    assert!(out_of_range(load(&text, Instant::now())));
}

#[test]
fn mismatched_glyphs_are_rejected() {
    let text = tampered(|v| v["attackers"][2]["sprite"]["glyph"] = json!("Z"));
    assert!(out_of_range(load(&text, Instant::now())));
    let text = tampered(|v| v["projectiles"][0]["sprite"]["glyph"] = json!("^"));
    assert!(out_of_range(load(&text, Instant::now())));
}

#[test]
fn defeated_avatar_is_rejected() {
    let text = tampered(|v| v["avatar"]["lives"] = json!(0));
    assert!(out_of_range(load(&text, Instant::now())));
}

#[test]
fn negative_score_is_malformed() {
    let text = tampered(|v| v["avatar"]["score"] = json!(-5));
    assert!(malformed(load(&text, Instant::now())));
}

#[test]
fn mismatched_colours_are_rejected() {
    let text = tampered(|v| v["attackers"][0]["sprite"]["color"] = json!("Green"));
    assert!(out_of_range(load(&text, Instant::now())));
    let text = tampered(|v| v["projectiles"][1]["sprite"]["color"] = json!("Red"));
    assert!(out_of_range(load(&text, Instant::now())));
    let text = tampered(|v| v["avatar"]["sprite"]["color"] = json!("White"));
    assert!(out_of_range(load(&text, Instant::now())));
}

#[test]
fn edge_rule_survives_a_round_trip() {
    let mut state = mid_game();
    state.edge_rule = EdgeRule::WaveAndSelf;
    let loaded = load(&save(&state).unwrap(), Instant::now()).unwrap();
    assert_eq!(loaded.edge_rule, EdgeRule::WaveAndSelf);
}

#[test]
fn missing_edge_rule_falls_back_to_the_default() {
    let text = tampered(|v| {
        v.as_object_mut().unwrap().remove("edge_rule");
    });
    let loaded = load(&text, Instant::now()).unwrap();
    assert_eq!(loaded.edge_rule, EdgeRule::Wave);
}
