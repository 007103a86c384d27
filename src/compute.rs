/// Pure game-logic functions.
///
/// Every public function takes an immutable view of the current state (plus
/// a clock reading and, where needed, an RNG handle) and returns brand-new
/// values.  Side effects are limited to the injected RNG.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::entities::{
    Attacker, AttackerKind, Avatar, EdgeRule, Entity, GameState, GameStatus, Heading, Input,
    Outcome, Projectile, WaveParams, COLS, ROWS,
};

pub const MAX_LEVEL: u32 = 3;

/// Score at which the single bonus life is granted.
pub const BONUS_LIFE_SCORE: u32 = 300;

const WAVE_TOP: i32 = 5;
const WAVE_COL_SPACING: i32 = 3;
const WAVE_ROW_SPACING: i32 = 2;

/// What `evaluate` found at the end of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    Continue,
    /// The wave was cleared and the carried level was entered.
    LevelUp(u32),
    Won,
    Lost,
}

// ── Difficulty table ─────────────────────────────────────────────────────────

pub fn wave_params(level: u32) -> WaveParams {
    let (update_ms, shoot_ms, rows, cols) = match level {
        0 | 1 => (500, 1500, 5, 8),
        2 => (350, 1000, 6, 10),
        _ => (200, 750, 7, 12),
    };
    WaveParams {
        update_interval: Duration::from_millis(update_ms),
        shoot_interval: Duration::from_millis(shoot_ms),
        rows,
        cols,
    }
}

/// Lay out a fresh wave, centred horizontally, preset chosen by row.
pub fn spawn_wave(params: &WaveParams) -> Vec<Attacker> {
    let start_x = (COLS - params.cols as i32 * WAVE_COL_SPACING) / 2;
    (0..params.rows)
        .flat_map(|row| {
            (0..params.cols).map(move |col| {
                Attacker::new(
                    AttackerKind::for_row(row),
                    start_x + col as i32 * WAVE_COL_SPACING,
                    WAVE_TOP + row as i32 * WAVE_ROW_SPACING,
                )
            })
        })
        .collect()
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A new session at level 1.  Lives, score and the bonus latch start fresh.
pub fn init_state(now: Instant) -> GameState {
    let wave = wave_params(1);
    GameState {
        avatar: Avatar::new(COLS / 2, ROWS - 5),
        attackers: spawn_wave(&wave),
        projectiles: Vec::new(),
        level: 1,
        status: GameStatus::Running,
        wave,
        edge_rule: EdgeRule::default(),
        last_attacker_update: now,
        last_attacker_shot: now,
        bonus_life_awarded: false,
    }
}

/// Swap in the wave for `level`.  The avatar carries over untouched.
pub fn enter_level(state: &GameState, level: u32, now: Instant) -> GameState {
    let wave = wave_params(level);
    log::info!(
        "entering level {} ({}x{} wave, move every {:?}, fire check every {:?})",
        level,
        wave.rows,
        wave.cols,
        wave.update_interval,
        wave.shoot_interval
    );
    GameState {
        attackers: spawn_wave(&wave),
        projectiles: Vec::new(),
        level,
        wave,
        last_attacker_update: now,
        last_attacker_shot: now,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_avatar_left(state: &GameState) -> GameState {
    let mut avatar = state.avatar.clone();
    avatar.move_left();
    GameState {
        avatar,
        ..state.clone()
    }
}

pub fn move_avatar_right(state: &GameState) -> GameState {
    let mut avatar = state.avatar.clone();
    avatar.move_right();
    GameState {
        avatar,
        ..state.clone()
    }
}

/// Fire one upward projectile from just above the avatar.  No cap.
pub fn avatar_shoot(state: &GameState) -> GameState {
    let mut projectiles = state.projectiles.clone();
    projectiles.push(state.avatar.shoot());
    GameState {
        projectiles,
        ..state.clone()
    }
}

/// Apply one input event.  While paused only resume and quit do anything;
/// once terminated nothing does.
pub fn apply_input(state: &GameState, input: Input) -> GameState {
    let status = match (state.status, input) {
        (GameStatus::Terminated(_), _) => return state.clone(),
        (_, Input::Quit) => GameStatus::Terminated(Outcome::Quit),
        (GameStatus::Running, Input::TogglePause) => GameStatus::Paused,
        (GameStatus::Paused, Input::TogglePause) => GameStatus::Running,
        (GameStatus::Paused, _) => return state.clone(),
        (GameStatus::Running, Input::MoveLeft) => return move_avatar_left(state),
        (GameStatus::Running, Input::MoveRight) => return move_avatar_right(state),
        (GameStatus::Running, Input::Fire) => return avatar_shoot(state),
    };
    log::debug!("status {:?} -> {:?}", state.status, status);
    GameState {
        status,
        ..state.clone()
    }
}

// ── Per-tick pieces ──────────────────────────────────────────────────────────

/// Move the whole wave once.  If any attacker sits on a wall, every attacker
/// turns and descends first.
pub fn advance_wave(attackers: &[Attacker], rule: EdgeRule) -> Vec<Attacker> {
    let turn_all = attackers.iter().any(Attacker::at_edge);
    if turn_all {
        log::debug!("wave hit a wall, descending");
    }
    attackers
        .iter()
        .map(|attacker| {
            let mut attacker = attacker.clone();
            if turn_all {
                attacker.turn();
            }
            match rule {
                EdgeRule::Wave => attacker.step(),
                EdgeRule::WaveAndSelf => attacker.update(),
            }
            attacker
        })
        .collect()
}

/// Roll for attackers in storage order; the first success fires and the rest
/// are not asked.  At most one shot per call.
pub fn attackers_fire(attackers: &[Attacker], rng: &mut impl Rng) -> Option<Projectile> {
    attackers
        .iter()
        .find(|attacker| attacker.should_shoot(rng))
        .map(Attacker::shoot)
}

/// Move every projectile one row and drop those that left the grid.
pub fn advance_projectiles(projectiles: &[Projectile]) -> Vec<Projectile> {
    projectiles
        .iter()
        .cloned()
        .map(|mut projectile| {
            projectile.update();
            projectile
        })
        .filter(|projectile| !projectile.is_out_of_bounds())
        .collect()
}

/// Match each projectile against at most one target.  Hits are marked as
/// tombstones and swept at the end, so a destroyed attacker can't be hit a
/// second time in the same pass.
pub fn resolve_collisions(
    avatar: &Avatar,
    attackers: &[Attacker],
    projectiles: &[Projectile],
) -> (Avatar, Vec<Attacker>, Vec<Projectile>) {
    let mut avatar = avatar.clone();
    let mut destroyed = vec![false; attackers.len()];
    let mut spent = vec![false; projectiles.len()];

    for (pi, projectile) in projectiles.iter().enumerate() {
        match projectile.heading {
            Heading::Up => {
                let hit = (0..attackers.len())
                    .find(|&ai| !destroyed[ai] && projectile.collides_with(&attackers[ai]));
                if let Some(ai) = hit {
                    log::debug!("destroyed attacker at {}", attackers[ai]);
                    avatar.add_score(attackers[ai].points());
                    destroyed[ai] = true;
                    spent[pi] = true;
                }
            }
            Heading::Down => {
                if projectile.collides_with(&avatar) {
                    avatar.lose_life();
                    log::debug!("avatar hit, {} lives left", avatar.lives);
                    spent[pi] = true;
                }
            }
        }
    }

    let attackers = attackers
        .iter()
        .zip(&destroyed)
        .filter(|&(_, &gone)| !gone)
        .map(|(a, _)| a.clone())
        .collect();
    let projectiles = projectiles
        .iter()
        .zip(&spent)
        .filter(|&(_, &gone)| !gone)
        .map(|(p, _)| p.clone())
        .collect();

    (avatar, attackers, projectiles)
}

// ── Per-frame tick (nearly pure — RNG and clock are injected) ───────────────

/// Advance the simulation by one frame.  Does nothing unless running.
///
/// Wave movement and wave fire each run only once their interval has
/// elapsed since they last ran.
pub fn tick(state: &GameState, now: Instant, rng: &mut impl Rng) -> GameState {
    if !state.is_running() {
        return state.clone();
    }
    let mut next = state.clone();

    // ── 1. Avatar ────────────────────────────────────────────────────────────
    next.avatar.update();

    // ── 2. Wave movement ─────────────────────────────────────────────────────
    if now.saturating_duration_since(state.last_attacker_update) >= state.wave.update_interval {
        next.attackers = advance_wave(&next.attackers, state.edge_rule);
        next.last_attacker_update = now;
    }

    // ── 3. Wave fire ─────────────────────────────────────────────────────────
    if now.saturating_duration_since(state.last_attacker_shot) >= state.wave.shoot_interval {
        if let Some(shot) = attackers_fire(&next.attackers, rng) {
            next.projectiles.push(shot);
        }
        next.last_attacker_shot = now;
    }

    // ── 4. Projectiles ───────────────────────────────────────────────────────
    next.projectiles = advance_projectiles(&next.projectiles);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    let (mut avatar, attackers, projectiles) =
        resolve_collisions(&next.avatar, &next.attackers, &next.projectiles);

    // ── 6. A wave that reaches the avatar's row ends the game outright ──────
    let reached_bottom = attackers
        .iter()
        .any(|a| a.sprite.pos.y >= avatar.sprite.pos.y);
    if reached_bottom {
        log::debug!("wave reached row {}", avatar.sprite.pos.y);
        avatar.lives = 0;
    }

    // ── 7. One-time bonus life (not once the wave has landed) ───────────────
    let mut bonus_life_awarded = next.bonus_life_awarded;
    if !bonus_life_awarded && avatar.score >= BONUS_LIFE_SCORE && !reached_bottom {
        avatar.gain_life();
        bonus_life_awarded = true;
        log::debug!("bonus life at {} points", avatar.score);
    }

    GameState {
        avatar,
        attackers,
        projectiles,
        bonus_life_awarded,
        ..next
    }
}

/// End-of-frame check: a cleared wave advances the level (or wins past the
/// last one), then a defeated avatar loses regardless.
pub fn evaluate(state: &GameState, now: Instant) -> (GameState, Checkpoint) {
    if !state.is_running() {
        return (state.clone(), Checkpoint::Continue);
    }

    let mut next = state.clone();
    let mut checkpoint = Checkpoint::Continue;

    if next.attackers.is_empty() {
        if next.level >= MAX_LEVEL {
            log::info!("final wave cleared with {} points", next.score());
            next.status = GameStatus::Terminated(Outcome::Won);
            checkpoint = Checkpoint::Won;
        } else {
            next = enter_level(&next, next.level + 1, now);
            checkpoint = Checkpoint::LevelUp(next.level);
        }
    }

    if next.avatar.is_defeated() {
        log::info!("game over on level {} with {} points", next.level, next.score());
        next.status = GameStatus::Terminated(Outcome::Lost);
        checkpoint = Checkpoint::Lost;
    }

    (next, checkpoint)
}
