//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.  The field is measured in pixels, so every
//! position goes through a `Viewport` that squeezes it onto the cell grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use robot_payback::compute::{elapsed_secs, exit_button, player_center, primary_button};
use robot_payback::entities::{Behavior, Coin, Door, Field, GameState, Monster, Rect, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::Cyan;
const C_AIM: Color = Color::White;
const C_DOOR: Color = Color::DarkYellow;
const C_MONSTER_CHASE: Color = Color::Red;
const C_MONSTER_WANDER: Color = Color::Magenta;
const C_COIN: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TEXT: Color = Color::White;
const C_BUTTON_GO: Color = Color::Green;
const C_BUTTON_EXIT: Color = Color::Red;

/// Length of the drawn aim line, in field pixels.
const ARROW_LENGTH: f32 = 60.0;

const TITLE: &str = "Robot Payback";

const STORY: &str = "You are a trans-human who turned into a robot. But that had a cost.\n\
Now, those who lent you money to achieve this goal are coming to get their money back, AS GHOSTS!!!!\n\
It is your duty to repay your debts and enjoy life as a robot. In more \"gamey\" terms, you have to survive as long as possible.";

const MECHANICS: &str = "Use arrow keys to move, A and D to aim, and {fire} to shoot coins.\n\
Coins can be used to hit the ghosts and send them to debt-collector heaven, they will also spawn at random locations every 10 seconds and can be collected by the robot.\n\
Coins will only be collected or eliminate ghosts with headshots, so AIM FOR THE HEAD!!!\n\
Good luck!!";

// ── Field ↔ terminal mapping ──────────────────────────────────────────────────

/// Row 0 is the HUD and the last row the controls hint; the field fills the
/// rows in between.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub field: Field,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: Field) -> Self {
        Self { cols, rows, field }
    }

    fn play_rows(&self) -> i64 {
        (self.rows.saturating_sub(2) as i64).max(1)
    }

    fn play_cols(&self) -> i64 {
        (self.cols as i64).max(1)
    }

    /// Cell under field pixel `(x, y)`, or `None` when off-screen.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 || x >= self.field.width as f32 || y >= self.field.height as f32 {
            return None;
        }
        let col = (x as i64 * self.play_cols()) / self.field.width as i64;
        let row = 1 + (y as i64 * self.play_rows()) / self.field.height as i64;
        Some((col as u16, row as u16))
    }

    /// Field pixel at the centre of cell `(col, row)`.
    pub fn to_field(&self, col: u16, row: u16) -> (i32, i32) {
        let col = col as i64;
        let row = (row as i64 - 1).max(0);
        let x = ((2 * col + 1) * self.field.width as i64) / (2 * self.play_cols());
        let y = ((2 * row + 1) * self.field.height as i64) / (2 * self.play_rows());
        (x as i32, y as i32)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now_ms: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Intro => draw_intro(out, state, view)?,
        Screen::Mechanics => draw_mechanics(out, state, view)?,
        Screen::Running => {
            for door in &state.doors {
                draw_door(out, door, view)?;
            }
            for monster in &state.monsters {
                draw_monster(out, monster, view)?;
            }
            for coin in &state.coins {
                draw_coin(out, coin, view)?;
            }
            draw_player(out, state, view)?;
            draw_hud(out, state, view, now_ms)?;
            draw_controls_hint(out, state, view)?;
        }
        Screen::GameOver => draw_game_over(out, state, view, now_ms)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now_ms: u64,
) -> std::io::Result<()> {
    let left = format!(
        "Coins:{:>3}  Ghosts:{}/{}",
        state.player.coins,
        state.monsters.len() + state.doors.len(),
        state.monster_limit
    );
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&left))?;

    let secs = elapsed_secs(state, now_ms);
    let right = if state.rules.has_scoring {
        format!("Time: {}s  Score: {}", secs, state.score)
    } else {
        format!("Time: {}s", secs)
    };
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Aim line first so the robot draws over its base
    let (cx, cy) = player_center(&state.player, state.sprites.player);
    let rad = (state.player.angle as f32).to_radians();
    out.queue(style::SetForegroundColor(C_AIM))?;
    for step in 1..=4 {
        let t = ARROW_LENGTH * step as f32 / 4.0;
        if let Some((col, row)) = view.to_cell(cx + t * rad.cos(), cy + t * rad.sin()) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(if step == 4 { "•" } else { "·" }))?;
        }
    }

    if let Some((col, row)) = view.to_cell(cx, cy) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(Print("◘"))?;
    }
    Ok(())
}

fn draw_door<W: Write>(out: &mut W, door: &Door, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(door.x as f32, door.y as f32) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_DOOR))?;
        out.queue(Print("▓"))?;
    }
    Ok(())
}

fn draw_monster<W: Write>(out: &mut W, monster: &Monster, view: &Viewport) -> std::io::Result<()> {
    // Wanderers can sit a few pixels outside the field for a tick
    let x = monster.x.clamp(0, view.field.width - 1) as f32;
    let y = monster.y.clamp(0, view.field.height - 1) as f32;
    if let Some((col, row)) = view.to_cell(x, y) {
        let (glyph, color) = match monster.behavior {
            Behavior::Chase => ("☻", C_MONSTER_CHASE),
            Behavior::Wander => ("☺", C_MONSTER_WANDER),
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_coin<W: Write>(out: &mut W, coin: &Coin, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(coin.x, coin.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_COIN))?;
        out.queue(Print("●"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(format!(
        "←↑→↓ : Move   A D : Aim   {} : Shoot   Q : Quit",
        state.rules.fire_key.label()
    )))?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_intro<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let title_row = view.rows / 4;
    draw_centered(out, view, title_row, TITLE, C_TEXT)?;
    let text_row = title_row + 2;
    draw_paragraphs(out, view, text_row, STORY)?;
    draw_button(out, view, primary_button(state.field), "Continue", C_BUTTON_GO)
}

fn draw_mechanics<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let text = MECHANICS.replace("{fire}", state.rules.fire_key.label());
    draw_paragraphs(out, view, view.rows / 5, &text)?;
    draw_button(out, view, primary_button(state.field), "Start", C_BUTTON_GO)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now_ms: u64,
) -> std::io::Result<()> {
    let title_row = view.rows / 4;
    draw_centered(out, view, title_row, "GAME  OVER", Color::Red)?;

    let secs = elapsed_secs(state, now_ms);
    let stats = if state.rules.has_scoring {
        format!("Time: {}s, Score: {}", secs, state.score)
    } else {
        format!("Time: {}s", secs)
    };
    draw_centered(out, view, view.rows / 2, &stats, C_TEXT)?;

    draw_button(out, view, primary_button(state.field), "Restart", C_BUTTON_GO)?;
    draw_button(out, view, exit_button(state.field), "Exit", C_BUTTON_EXIT)
}

// ── Widgets ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Word-wrap each line of `text` to the terminal width, blank line between
/// paragraphs.
fn draw_paragraphs<W: Write>(
    out: &mut W,
    view: &Viewport,
    start_row: u16,
    text: &str,
) -> std::io::Result<()> {
    let width = view.cols.saturating_sub(8).max(20) as usize;
    let mut row = start_row;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    for paragraph in text.lines() {
        for line in wrap(paragraph, width) {
            out.queue(cursor::MoveTo(4, row))?;
            out.queue(Print(line))?;
            row += 1;
        }
        row += 1;
    }
    Ok(())
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Fill every cell whose centre falls inside `rect`, so what you see is
/// exactly what a click hits.
fn draw_button<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: Rect,
    label: &str,
    color: Color,
) -> std::io::Result<()> {
    let mut cells: Vec<(u16, u16)> = Vec::new();
    for row in 1..view.rows.saturating_sub(1) {
        for col in 0..view.cols {
            let (x, y) = view.to_field(col, row);
            if rect.contains(x, y) {
                cells.push((col, row));
            }
        }
    }
    if cells.is_empty() {
        return Ok(());
    }

    out.queue(style::SetBackgroundColor(color))?;
    for &(col, row) in &cells {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(" "))?;
    }

    let min_col = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let max_col = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let min_row = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let max_row = cells.iter().map(|c| c.1).max().unwrap_or(0);
    let mid_col = (min_col + max_col) / 2;
    let label_col = mid_col.saturating_sub(label.chars().count() as u16 / 2).max(min_col);
    out.queue(cursor::MoveTo(label_col, (min_row + max_row) / 2))?;
    out.queue(style::SetForegroundColor(Color::Black))?;
    out.queue(Print(label))?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}
