/// In-memory JSON snapshots of a running session.
///
/// Timers are not captured; a loaded state arms them at the supplied clock
/// reading.  Loading either yields a complete state or fails; glyphs and
/// colours must match what the entity's kind or heading would draw.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::compute::{wave_params, MAX_LEVEL};
use crate::entities::{
    Attacker, Avatar, EdgeRule, GameState, GameStatus, Heading, Projectile, Sprite,
};
use crate::error::{DeserializationError, GameError};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    level: u32,
    avatar: Avatar,
    attackers: Vec<Attacker>,
    projectiles: Vec<Projectile>,
    bonus_life_awarded: bool,
    #[serde(default)]
    edge_rule: EdgeRule,
}

pub fn save(state: &GameState) -> Result<String, GameError> {
    let snapshot = Snapshot {
        level: state.level,
        avatar: state.avatar.clone(),
        attackers: state.attackers.clone(),
        projectiles: state.projectiles.clone(),
        bonus_life_awarded: state.bonus_life_awarded,
        edge_rule: state.edge_rule,
    };
    serde_json::to_string(&snapshot).map_err(GameError::Serialization)
}

pub fn load(text: &str, now: Instant) -> Result<GameState, GameError> {
    let snapshot: Snapshot = serde_json::from_str(text).map_err(DeserializationError::from)?;
    validate(&snapshot)?;

    Ok(GameState {
        avatar: snapshot.avatar,
        attackers: snapshot.attackers,
        projectiles: snapshot.projectiles,
        level: snapshot.level,
        status: GameStatus::Running,
        wave: wave_params(snapshot.level),
        edge_rule: snapshot.edge_rule,
        last_attacker_update: now,
        last_attacker_shot: now,
        bonus_life_awarded: snapshot.bonus_life_awarded,
    })
}

fn out_of_range(what: impl Into<String>) -> DeserializationError {
    DeserializationError::OutOfRange(what.into())
}

fn check_sprite(
    what: &str,
    sprite: &Sprite,
    expected: &Sprite,
) -> Result<(), DeserializationError> {
    if !sprite.pos.in_grid() {
        return Err(out_of_range(format!(
            "{} at ({}, {}) is off the grid",
            what, sprite.pos.x, sprite.pos.y
        )));
    }
    if sprite.glyph.is_control() || sprite.glyph.is_whitespace() {
        return Err(out_of_range(format!("{} has an unprintable glyph", what)));
    }
    if sprite.glyph != expected.glyph || sprite.color != expected.color {
        return Err(out_of_range(format!(
            "{} drawn as {:?} in {:?}, expected {:?} in {:?}",
            what, sprite.glyph, sprite.color, expected.glyph, expected.color
        )));
    }
    Ok(())
}

fn validate(snapshot: &Snapshot) -> Result<(), DeserializationError> {
    if !(1..=MAX_LEVEL).contains(&snapshot.level) {
        return Err(out_of_range(format!("level {}", snapshot.level)));
    }
    if snapshot.avatar.lives == 0 {
        return Err(out_of_range("avatar has no lives left"));
    }
    let avatar = &snapshot.avatar.sprite;
    check_sprite("avatar", avatar, &Avatar::new(avatar.pos.x, avatar.pos.y).sprite)?;

    for attacker in &snapshot.attackers {
        let pos = attacker.sprite.pos;
        let expected = Attacker::new(attacker.kind, pos.x, pos.y).sprite;
        check_sprite(&format!("{:?}", attacker.kind), &attacker.sprite, &expected)?;
    }

    for projectile in &snapshot.projectiles {
        let pos = projectile.sprite.pos;
        let expected = Projectile::new(pos.x, pos.y, projectile.heading).sprite;
        let what = match projectile.heading {
            Heading::Up => "avatar projectile",
            Heading::Down => "attacker projectile",
        };
        check_sprite(what, &projectile.sprite, &expected)?;
    }
    Ok(())
}
