/// All game entity types plus the small per-entity behaviours they carry.
///
/// Entities never own one another.  The session state (see `compute`) holds
/// every instance and mutates them once per tick.

use std::fmt;
use std::io;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::console::Console;

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Playfield width in character cells.
pub const COLS: i32 = 80;
/// Playfield height in character cells.
pub const ROWS: i32 = 25;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn in_grid(&self) -> bool {
        (0..COLS).contains(&self.x) && (0..ROWS).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Green,
    Red,
    Purple,
    Cyan,
    Yellow,
    White,
    LightGrey,
}

/// Position and appearance shared by every simulated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: Position,
    pub glyph: char,
    pub color: ColorTag,
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position: ({}, {}), Symbol: {}",
            self.pos.x, self.pos.y, self.glyph
        )
    }
}

// ── Capability contract ───────────────────────────────────────────────────────

pub trait Entity {
    fn sprite(&self) -> &Sprite;

    /// Per-tick state mutation.
    fn update(&mut self);

    fn position(&self) -> Position {
        self.sprite().pos
    }

    /// Draw the glyph at the entity's cell.  Off-grid entities are skipped.
    fn render(&self, console: &mut dyn Console) -> io::Result<()> {
        let s = self.sprite();
        if !s.pos.in_grid() {
            return Ok(());
        }
        console.draw_char(s.pos.x, s.pos.y, s.glyph, s.color)
    }

    /// Exact single-cell overlap; there are no hitboxes.
    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.position() == other.position()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Vertical travel direction.  `Up` is always avatar fire, `Down` always
/// attacker fire; collision resolution relies on nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    pub fn dy(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub sprite: Sprite,
    pub heading: Heading,
}

impl Projectile {
    pub fn new(x: i32, y: i32, heading: Heading) -> Self {
        let (glyph, color) = match heading {
            Heading::Up => ('^', ColorTag::Yellow),
            Heading::Down => ('v', ColorTag::Red),
        };
        Projectile {
            sprite: Sprite {
                pos: Position::new(x, y),
                glyph,
                color,
            },
            heading,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.sprite.pos.y < 0 || self.sprite.pos.y >= ROWS
    }
}

impl Entity for Projectile {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn update(&mut self) {
        self.sprite.pos.y += self.heading.dy();
    }
}

impl fmt::Display for Projectile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Direction: {}", self.sprite, self.heading.dy())
    }
}

// ── Attackers ─────────────────────────────────────────────────────────────────

/// Horizontal patrol direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drift {
    Left,
    Right,
}

impl Drift {
    pub fn dx(self) -> i32 {
        match self {
            Drift::Left => -1,
            Drift::Right => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Drift::Left => Drift::Right,
            Drift::Right => Drift::Left,
        }
    }
}

/// The four attacker presets, weakest first.  They share all movement and
/// firing logic and differ only in the values below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackerKind {
    Drone,
    Raider,
    Gunship,
    Mothership,
}

impl AttackerKind {
    /// Score awarded when destroyed.
    pub fn points(self) -> u32 {
        match self {
            AttackerKind::Drone => 10,
            AttackerKind::Raider => 20,
            AttackerKind::Gunship => 30,
            AttackerKind::Mothership => 40,
        }
    }

    /// Chance of firing per shoot check.
    pub fn shoot_probability(self) -> f64 {
        match self {
            AttackerKind::Drone => 0.005,
            AttackerKind::Raider => 0.01,
            AttackerKind::Gunship => 0.015,
            AttackerKind::Mothership => 0.02,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            AttackerKind::Drone => '&',
            AttackerKind::Raider => '@',
            AttackerKind::Gunship => '#',
            AttackerKind::Mothership => '$',
        }
    }

    pub fn color(self) -> ColorTag {
        match self {
            AttackerKind::Drone => ColorTag::Red,
            AttackerKind::Raider => ColorTag::Purple,
            AttackerKind::Gunship => ColorTag::Cyan,
            AttackerKind::Mothership => ColorTag::Yellow,
        }
    }

    /// Preset for a wave row: the strongest sits on top.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AttackerKind::Mothership,
            1 => AttackerKind::Gunship,
            2 | 3 => AttackerKind::Raider,
            _ => AttackerKind::Drone,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attacker {
    pub sprite: Sprite,
    pub kind: AttackerKind,
    pub drift: Drift,
}

impl Attacker {
    pub fn new(kind: AttackerKind, x: i32, y: i32) -> Self {
        Attacker {
            sprite: Sprite {
                pos: Position::new(x, y),
                glyph: kind.glyph(),
                color: kind.color(),
            },
            kind,
            drift: Drift::Right,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn at_edge(&self) -> bool {
        self.sprite.pos.x <= 0 || self.sprite.pos.x >= COLS - 1
    }

    /// Reverse drift and drop one row.
    pub fn turn(&mut self) {
        self.drift = self.drift.reversed();
        self.sprite.pos.y += 1;
    }

    /// One cell along the current drift, no edge handling.
    pub fn step(&mut self) {
        self.sprite.pos.x += self.drift.dx();
    }

    /// Independent Bernoulli trial against this preset's fire chance.
    pub fn should_shoot(&self, rng: &mut impl Rng) -> bool {
        rng.gen_bool(self.kind.shoot_probability())
    }

    pub fn shoot(&self) -> Projectile {
        Projectile::new(self.sprite.pos.x, self.sprite.pos.y + 1, Heading::Down)
    }
}

impl Entity for Attacker {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Step, then turn around if this attacker itself landed on a wall.
    fn update(&mut self) {
        self.step();
        if self.at_edge() {
            self.turn();
        }
    }
}

impl fmt::Display for Attacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Direction: {}, Points: {}",
            self.sprite,
            self.drift.dx(),
            self.points()
        )
    }
}

// ── Avatar ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub sprite: Sprite,
    pub lives: u32,
    pub score: u32,
}

impl Avatar {
    pub fn new(x: i32, y: i32) -> Self {
        Avatar {
            sprite: Sprite {
                pos: Position::new(x, y),
                glyph: 'A',
                color: ColorTag::Green,
            },
            lives: STARTING_LIVES,
            score: 0,
        }
    }

    pub fn move_left(&mut self) {
        if self.sprite.pos.x > 0 {
            self.sprite.pos.x -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.sprite.pos.x < COLS - 1 {
            self.sprite.pos.x += 1;
        }
    }

    pub fn shoot(&self) -> Projectile {
        Projectile::new(self.sprite.pos.x, self.sprite.pos.y - 1, Heading::Up)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Never drops below zero.
    pub fn deduct_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn gain_life(&mut self) {
        self.lives += 1;
    }

    pub fn is_defeated(&self) -> bool {
        self.lives == 0
    }
}

impl Entity for Avatar {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    // Input handlers and the score/lives mutators do all the work.
    fn update(&mut self) {}
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Lives: {}, Score: {}",
            self.sprite, self.lives, self.score
        )
    }
}

// ── Session-level types ───────────────────────────────────────────────────────

/// One discrete input event, already decoded from a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    MoveLeft,
    MoveRight,
    Fire,
    TogglePause,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Paused,
    Terminated(Outcome),
}

/// How a wave reacts to the side walls.
///
/// `Wave` only runs the wave-wide pre-scan: if any attacker is on a wall the
/// whole wave turns and descends before stepping.  `WaveAndSelf` also lets
/// each attacker turn itself after its own step, so an edge attacker can
/// descend twice in one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeRule {
    #[default]
    Wave,
    WaveAndSelf,
}

/// Difficulty parameters derived once per level entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveParams {
    pub update_interval: Duration,
    pub shoot_interval: Duration,
    pub rows: usize,
    pub cols: usize,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so the pure update functions in
/// `compute` can hand back a new copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub avatar: Avatar,
    pub attackers: Vec<Attacker>,
    pub projectiles: Vec<Projectile>,
    /// 1..=3.
    pub level: u32,
    pub status: GameStatus,
    pub wave: WaveParams,
    pub edge_rule: EdgeRule,
    pub last_attacker_update: Instant,
    pub last_attacker_shot: Instant,
    /// Latched the first time the score reaches the bonus threshold.
    pub bonus_life_awarded: bool,
}

impl GameState {
    pub fn score(&self) -> u32 {
        self.avatar.score
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }
}
