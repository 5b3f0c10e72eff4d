//! All game entity types — pure data, no logic.

use crate::config::{Rules, SpriteSizes};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Drifts on a fixed diagonal, reflecting off the field edges.
    Wander,
    /// Steps straight at the player every tick.
    Chase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Story text + "Continue".
    Intro,
    /// Controls text + "Start".
    Mechanics,
    Running,
    GameOver,
}

// ── Field geometry ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

/// Axis-aligned button area in field pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Half-open on the far edges, so adjacent rects never both claim a point.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner.
    pub x: i32,
    pub y: i32,
    /// Aim angle in degrees.  Never normalised; only ever fed to cos/sin.
    pub angle: i32,
    pub coins: u32,
}

// ── Door / monster ────────────────────────────────────────────────────────────

/// A monster that hasn't arrived yet.
#[derive(Clone, Debug, PartialEq)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub spawned_at_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub behavior: Behavior,
    /// Wander velocity.  Unused while chasing.
    pub dx: i32,
    pub dy: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    /// Launch angle in degrees.
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,
}

// ── Per-tick input ────────────────────────────────────────────────────────────

/// Keys held during one tick, plus the one-shot fire press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Rotate aim counter-clockwise (A).
    pub aim_ccw: bool,
    /// Rotate aim clockwise (D).
    pub aim_cw: bool,
    pub fire: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Pending monster arrivals, oldest first.
    pub doors: Vec<Door>,
    /// Insertion order is the hit tie-break order.
    pub monsters: Vec<Monster>,
    pub coins: Vec<Coin>,
    pub score: u32,
    /// Upper bound on `monsters + doors` checked when a door would open.
    pub monster_limit: usize,
    pub screen: Screen,
    pub field: Field,
    pub sprites: SpriteSizes,
    pub rules: Rules,
    /// Clock value when the current run began.
    pub started_at_ms: u64,
    /// Set when the run ends; freezes the displayed time.
    pub ended_at_ms: Option<u64>,
    pub last_door_spawn_ms: u64,
    pub last_coin_spawn_ms: u64,
    pub frame: u64,
}
