//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, the clock and an RNG handle) and returns a
//! brand-new `GameState`, or works on a single entity and returns a new one.
//! Side effects are limited to the injected RNG.  None of these can fail.

use rand::Rng;

use crate::collision::{first_overlap, overlaps, HIT_TOLERANCE};
use crate::config::{GameConfig, SpriteSize};
use crate::entities::{
    Behavior, Coin, Door, Field, GameState, Monster, Player, Rect, Screen, TickInput,
};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Pixels per tick on each axis.
pub const PLAYER_SPEED: i32 = 3;
/// Degrees of aim rotation per tick.
pub const ROTATION_SPEED: i32 = 3;
pub const STARTING_COINS: u32 = 10;

pub const COIN_SPEED: f32 = 5.0;
/// How far from the player's centre a fired coin appears.
pub const COIN_SPAWN_OFFSET: f32 = 40.0;

pub const DOOR_SPAWN_INTERVAL_MS: u64 = 10_000;
pub const DOOR_LIFETIME_MS: u64 = 5_000;
pub const COIN_SPAWN_INTERVAL_MS: u64 = 10_000;

pub const INITIAL_MONSTER_LIMIT: usize = 3;
/// One extra monster allowed per this much survived time.
pub const MONSTER_LIMIT_STEP_SECS: u64 = 30;
pub const MONSTER_SPEED_MIN: i32 = 2;
pub const MONSTER_SPEED_MAX: i32 = 4;

/// Result of a click or quit that the caller has to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    None,
    Exit,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session.  Starts on the story screen when the rules have
/// intro screens, otherwise straight in a run.
pub fn init_state(config: &GameConfig, now_ms: u64) -> GameState {
    let field = Field {
        width: config.field_width,
        height: config.field_height,
    };
    let screen = if config.rules.intro_screens {
        Screen::Intro
    } else {
        Screen::Running
    };
    GameState {
        player: new_player(field, config.sprites.player),
        doors: Vec::new(),
        monsters: Vec::new(),
        coins: Vec::new(),
        score: 0,
        monster_limit: INITIAL_MONSTER_LIMIT,
        screen,
        field,
        sprites: config.sprites,
        rules: config.rules.clone(),
        started_at_ms: now_ms,
        ended_at_ms: None,
        last_door_spawn_ms: now_ms,
        last_coin_spawn_ms: now_ms,
        frame: 0,
    }
}

/// A fresh player centred on the field.
pub fn new_player(field: Field, sprite: SpriteSize) -> Player {
    Player {
        x: field.width / 2 - sprite.w / 2,
        y: field.height / 2 - sprite.h / 2,
        angle: 0,
        coins: STARTING_COINS,
    }
}

/// Throw everything away and start a new run at `now_ms`.
pub fn reset_session(state: &GameState, now_ms: u64) -> GameState {
    log::info!("New run started");
    GameState {
        player: new_player(state.field, state.sprites.player),
        doors: Vec::new(),
        monsters: Vec::new(),
        coins: Vec::new(),
        score: 0,
        monster_limit: INITIAL_MONSTER_LIMIT,
        screen: Screen::Running,
        started_at_ms: now_ms,
        ended_at_ms: None,
        last_door_spawn_ms: now_ms,
        last_coin_spawn_ms: now_ms,
        frame: 0,
        ..state.clone()
    }
}

/// A coin launched along `angle` degrees at `COIN_SPEED`.
pub fn new_coin(x: f32, y: f32, angle: f32) -> Coin {
    let rad = angle.to_radians();
    Coin {
        x,
        y,
        angle,
        vx: COIN_SPEED * rad.cos(),
        vy: COIN_SPEED * rad.sin(),
    }
}

/// Roll a monster at `(x, y)`: behaviour, speed and wander direction are all
/// independent of earlier spawns.
pub fn spawn_monster(x: i32, y: i32, rng: &mut impl Rng) -> Monster {
    let behavior = if rng.gen_bool(0.5) {
        Behavior::Chase
    } else {
        Behavior::Wander
    };
    let speed = rng.gen_range(MONSTER_SPEED_MIN..=MONSTER_SPEED_MAX);
    let dx = if rng.gen_bool(0.5) { speed } else { -speed };
    let dy = if rng.gen_bool(0.5) { speed } else { -speed };
    Monster {
        x,
        y,
        speed,
        behavior,
        dx,
        dy,
    }
}

// ── Clock & difficulty ───────────────────────────────────────────────────────

/// `INITIAL_MONSTER_LIMIT` plus one per `MONSTER_LIMIT_STEP_SECS` survived.
pub fn monster_limit(elapsed_ms: u64) -> usize {
    INITIAL_MONSTER_LIMIT + (elapsed_ms / 1000 / MONSTER_LIMIT_STEP_SECS) as usize
}

/// Whole seconds survived.  Frozen once the run has ended.
pub fn elapsed_secs(state: &GameState, now_ms: u64) -> u64 {
    let end = state.ended_at_ms.unwrap_or(now_ms);
    end.saturating_sub(state.started_at_ms) / 1000
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

pub fn player_center(player: &Player, sprite: SpriteSize) -> (f32, f32) {
    (
        (player.x + sprite.w / 2) as f32,
        (player.y + sprite.h / 2) as f32,
    )
}

/// A point uniformly on one of the four field edges, chosen uniformly,
/// inset so a sprite of `sprite` size placed there stays on-field.
pub fn random_edge_position(field: Field, sprite: SpriteSize, rng: &mut impl Rng) -> (i32, i32) {
    let max_x = (field.width - sprite.w).max(0);
    let max_y = (field.height - sprite.h).max(0);
    match rng.gen_range(0..4) {
        0 => (rng.gen_range(0..=max_x), 0),
        1 => (rng.gen_range(0..=max_x), max_y),
        2 => (0, rng.gen_range(0..=max_y)),
        _ => (max_x, rng.gen_range(0..=max_y)),
    }
}

fn monster_pos(m: &Monster) -> (f32, f32) {
    (m.x as f32, m.y as f32)
}

fn player_pos(p: &Player) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn coin_on_field(coin: &Coin, field: Field, sprite: SpriteSize) -> bool {
    coin.x > -(sprite.w as f32)
        && coin.x < field.width as f32
        && coin.y > -(sprite.h as f32)
        && coin.y < field.height as f32
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Open a door on a random edge, unless monsters + doors already reach the cap.
pub fn try_spawn_door(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.monsters.len() + state.doors.len() >= state.monster_limit {
        return state.clone();
    }
    let (x, y) = random_edge_position(state.field, state.sprites.door, rng);
    log::debug!("Door opened at ({}, {})", x, y);
    let mut doors = state.doors.clone();
    doors.push(Door {
        x,
        y,
        spawned_at_ms: now_ms,
    });
    GameState {
        doors,
        ..state.clone()
    }
}

/// Replace every door at least `DOOR_LIFETIME_MS` old with a monster at the
/// same spot.
pub fn expire_doors(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let (expired, doors): (Vec<Door>, Vec<Door>) = state
        .doors
        .iter()
        .cloned()
        .partition(|d| now_ms.saturating_sub(d.spawned_at_ms) >= DOOR_LIFETIME_MS);

    if expired.is_empty() {
        return state.clone();
    }

    let mut monsters = state.monsters.clone();
    for door in &expired {
        let monster = spawn_monster(door.x, door.y, rng);
        log::debug!(
            "{:?} monster (speed {}) out of door at ({}, {})",
            monster.behavior,
            monster.speed,
            door.x,
            door.y
        );
        monsters.push(monster);
    }

    GameState {
        doors,
        monsters,
        ..state.clone()
    }
}

/// Drop a pickup coin somewhere on the field.
pub fn try_spawn_free_coin(state: &GameState, rng: &mut impl Rng) -> GameState {
    if !state.rules.free_coins {
        return state.clone();
    }
    let sprite = state.sprites.coin;
    let x = rng.gen_range(0..=(state.field.width - sprite.w).max(0)) as f32;
    let y = rng.gen_range(0..=(state.field.height - sprite.h).max(0)) as f32;
    let coin = if state.rules.free_coins_drift {
        new_coin(x, y, 0.0)
    } else {
        Coin {
            x,
            y,
            angle: 0.0,
            vx: 0.0,
            vy: 0.0,
        }
    };
    log::debug!("Free coin at ({}, {})", x, y);
    let mut coins = state.coins.clone();
    coins.push(coin);
    GameState {
        coins,
        ..state.clone()
    }
}

// ── Input-driven transitions (pure) ──────────────────────────────────────────

/// Move and aim.  Each axis is clamped on its own, so diagonals are faster
/// than straight lines.
pub fn apply_input(player: &Player, input: &TickInput, field: Field, sprite: SpriteSize) -> Player {
    let mut x = player.x;
    let mut y = player.y;
    if input.left {
        x -= PLAYER_SPEED;
    }
    if input.right {
        x += PLAYER_SPEED;
    }
    if input.up {
        y -= PLAYER_SPEED;
    }
    if input.down {
        y += PLAYER_SPEED;
    }

    let mut angle = player.angle;
    if input.aim_ccw {
        angle -= ROTATION_SPEED;
    }
    if input.aim_cw {
        angle += ROTATION_SPEED;
    }

    Player {
        x: x.clamp(0, (field.width - sprite.w).max(0)),
        y: y.clamp(0, (field.height - sprite.h).max(0)),
        angle,
        ..player.clone()
    }
}

/// Throw one coin along the aim line.  No-op with an empty purse.
pub fn fire_coin(state: &GameState) -> GameState {
    if state.player.coins == 0 {
        return state.clone();
    }
    let angle = state.player.angle as f32;
    let rad = angle.to_radians();
    let (cx, cy) = player_center(&state.player, state.sprites.player);
    let coin = new_coin(
        cx + COIN_SPAWN_OFFSET * rad.cos(),
        cy + COIN_SPAWN_OFFSET * rad.sin(),
        angle,
    );

    let mut coins = state.coins.clone();
    coins.push(coin);
    GameState {
        player: Player {
            coins: state.player.coins - 1,
            ..state.player.clone()
        },
        coins,
        ..state.clone()
    }
}

// ── Entity steps ─────────────────────────────────────────────────────────────

/// Advance one monster by one tick.
///
/// Chasers step `speed` toward `target` on each axis independently.  Wanderers
/// flip the velocity of whichever axis sits on or past an edge, then move; the
/// flip isn't corrected for overshoot, so a wanderer can end up to
/// `speed - 1` pixels outside the field for a tick.
pub fn step_monster(monster: &Monster, target: (i32, i32), field: Field, sprite: SpriteSize) -> Monster {
    match monster.behavior {
        Behavior::Chase => Monster {
            x: monster.x + monster.speed * (target.0 - monster.x).signum(),
            y: monster.y + monster.speed * (target.1 - monster.y).signum(),
            ..monster.clone()
        },
        Behavior::Wander => {
            let mut dx = monster.dx;
            let mut dy = monster.dy;
            if monster.x <= 0 || monster.x >= field.width - sprite.w {
                dx = -dx;
            }
            if monster.y <= 0 || monster.y >= field.height - sprite.h {
                dy = -dy;
            }
            Monster {
                x: monster.x + dx,
                y: monster.y + dy,
                dx,
                dy,
                ..monster.clone()
            }
        }
    }
}

/// Advance one coin by one tick, reflecting off the edges when `bounces`.
pub fn step_coin(coin: &Coin, field: Field, sprite: SpriteSize, bounces: bool) -> Coin {
    let x = coin.x + coin.vx;
    let y = coin.y + coin.vy;
    let mut vx = coin.vx;
    let mut vy = coin.vy;
    if bounces {
        if x <= 0.0 || x >= (field.width - sprite.w) as f32 {
            vx = -vx;
        }
        if y <= 0.0 || y >= (field.height - sprite.h) as f32 {
            vy = -vy;
        }
    }
    Coin {
        x,
        y,
        vx,
        vy,
        ..coin.clone()
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Index of the monster this coin hits, first in insertion order.
pub fn resolve_monster_hit(coin: &Coin, monsters: &[Monster]) -> Option<usize> {
    first_overlap((coin.x, coin.y), monsters.iter().map(monster_pos), HIT_TOLERANCE)
}

/// Whether the player catches this coin.
pub fn resolve_player_pickup(coin: &Coin, player: &Player) -> bool {
    overlaps((coin.x, coin.y), player_pos(player), HIT_TOLERANCE)
}

/// Whether any monster has reached the player.
pub fn player_caught(player: &Player, monsters: &[Monster]) -> bool {
    first_overlap(player_pos(player), monsters.iter().map(monster_pos), HIT_TOLERANCE).is_some()
}

// ── Per-tick update (nearly pure — clock and RNG are injected) ──────────────

/// Advance the simulation by one tick.  Does nothing outside `Screen::Running`.
///
/// All randomness comes through `rng` and all timing through `now_ms`, so
/// callers control determinism.
pub fn tick(state: &GameState, input: &TickInput, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.screen != Screen::Running {
        return state.clone();
    }

    // ── 1. Spawn timers ──────────────────────────────────────────────────────
    let mut s = state.clone();
    if now_ms.saturating_sub(s.last_door_spawn_ms) >= DOOR_SPAWN_INTERVAL_MS {
        s = try_spawn_door(&s, now_ms, rng);
        s.last_door_spawn_ms = now_ms;
    }
    if now_ms.saturating_sub(s.last_coin_spawn_ms) >= COIN_SPAWN_INTERVAL_MS {
        s = try_spawn_free_coin(&s, rng);
        s.last_coin_spawn_ms = now_ms;
    }

    // ── 2. Player input ──────────────────────────────────────────────────────
    s.player = apply_input(&s.player, input, s.field, s.sprites.player);
    if input.fire {
        s = fire_coin(&s);
    }

    // ── 3. Move monsters ─────────────────────────────────────────────────────
    let target = (s.player.x, s.player.y);
    s.monsters = s
        .monsters
        .iter()
        .map(|m| step_monster(m, target, s.field, s.sprites.monster))
        .collect();

    // ── 4. Doors become monsters ─────────────────────────────────────────────
    // After the move, so a new monster appears exactly where its door was.
    s = expire_doors(&s, now_ms, rng);
    let mut monsters = s.monsters.clone();
    let caught = s.rules.monsters_catch_player && player_caught(&s.player, &monsters);

    // ── 5. Move coins & resolve hits ─────────────────────────────────────────
    // Coins are drained into a new list; a coin is consumed by at most one
    // monster or one pickup, and killed monsters leave the working list
    // before the next coin is checked.
    let mut player = s.player.clone();
    let mut score = s.score;
    let mut coins: Vec<Coin> = Vec::with_capacity(s.coins.len());
    for coin in s.coins.iter() {
        let coin = step_coin(coin, s.field, s.sprites.coin, s.rules.coin_bounces);

        if let Some(mi) = resolve_monster_hit(&coin, &monsters) {
            let dead = monsters.remove(mi);
            log::debug!("Coin hit monster at ({}, {})", dead.x, dead.y);
            if s.rules.has_scoring {
                score += 1;
            }
            continue;
        }
        if resolve_player_pickup(&coin, &player) {
            player.coins += 1;
            continue;
        }
        if !s.rules.coin_bounces && !coin_on_field(&coin, s.field, s.sprites.coin) {
            continue;
        }
        coins.push(coin);
    }

    // ── 6. Difficulty & status ───────────────────────────────────────────────
    let limit = monster_limit(now_ms.saturating_sub(s.started_at_ms));
    if limit != s.monster_limit {
        log::info!("Monster limit raised to {}", limit);
    }

    let next = GameState {
        player,
        monsters,
        coins,
        score,
        monster_limit: limit,
        frame: s.frame + 1,
        ..s
    };

    if caught {
        end_run(&next, now_ms)
    } else {
        next
    }
}

// ── Screen state machine ─────────────────────────────────────────────────────

/// "Continue" / "Start" / "Restart" all share this spot.
pub fn primary_button(field: Field) -> Rect {
    Rect {
        x: field.width / 2 - 100,
        y: field.height / 2 + 100,
        w: 200,
        h: 50,
    }
}

/// "Exit" on the game-over screen.
pub fn exit_button(field: Field) -> Rect {
    Rect {
        x: field.width / 2 - 100,
        y: field.height / 2 + 200,
        w: 200,
        h: 50,
    }
}

/// Stop the clock and show the game-over screen.
pub fn end_run(state: &GameState, now_ms: u64) -> GameState {
    log::info!(
        "Run over after {}s with score {}",
        now_ms.saturating_sub(state.started_at_ms) / 1000,
        state.score
    );
    GameState {
        screen: Screen::GameOver,
        ended_at_ms: Some(now_ms),
        ..state.clone()
    }
}

/// Hit-test a pointer press at field coordinates `(x, y)`.
pub fn click(state: &GameState, x: i32, y: i32, now_ms: u64) -> (GameState, ClickOutcome) {
    let primary = primary_button(state.field).contains(x, y);
    match state.screen {
        Screen::Intro if primary => {
            log::info!("Intro -> Mechanics");
            (
                GameState {
                    screen: Screen::Mechanics,
                    ..state.clone()
                },
                ClickOutcome::None,
            )
        }
        Screen::Mechanics if primary => (reset_session(state, now_ms), ClickOutcome::None),
        Screen::GameOver if primary => (reset_session(state, now_ms), ClickOutcome::None),
        Screen::GameOver if exit_button(state.field).contains(x, y) => {
            (state.clone(), ClickOutcome::Exit)
        }
        _ => (state.clone(), ClickOutcome::None),
    }
}

/// The quit action.  Mid-run it either ends the run on the game-over screen or
/// exits outright, depending on the rules; anywhere else it exits.
pub fn quit(state: &GameState, now_ms: u64) -> (GameState, ClickOutcome) {
    if state.screen == Screen::Running && state.rules.game_over_to_screen {
        (end_run(state, now_ms), ClickOutcome::None)
    } else {
        (state.clone(), ClickOutcome::Exit)
    }
}
