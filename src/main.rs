mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use robot_payback::compute::{click, init_state, quit, tick, ClickOutcome};
use robot_payback::config::GameConfig;
use robot_payback::entities::{GameState, Screen, TickInput};
use robot_payback::error::GameError;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Snapshot the held keys into this tick's input.
fn poll_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, fire: bool) -> TickInput {
    TickInput {
        left: is_held(key_frame, &KeyCode::Left, frame),
        right: is_held(key_frame, &KeyCode::Right, frame),
        up: is_held(key_frame, &KeyCode::Up, frame),
        down: is_held(key_frame, &KeyCode::Down, frame),
        aim_ccw: any_held(key_frame, &[KeyCode::Char('a'), KeyCode::Char('A')], frame),
        aim_cw: any_held(key_frame, &[KeyCode::Char('d'), KeyCode::Char('D')], frame),
        fire,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player exits.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and build a `TickInput` from them, so
/// moving and aiming can happen together.  Firing is edge-triggered: one
/// coin per key press, not per held frame.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    view: &mut Viewport,
    rx: &mpsc::Receiver<Event>,
    clock: Instant,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let fire_key = KeyCode::Char(state.rules.fire_key.as_char());
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;
        frame += 1;
        let mut fire = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                let (next, outcome) = quit(state, now_ms);
                                *state = next;
                                if outcome == ClickOutcome::Exit {
                                    return Ok(());
                                }
                            }
                            c if c == fire_key => fire = true,
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = view.to_field(column, row);
                    let (next, outcome) = click(state, x, y, now_ms);
                    if state.screen != next.screen {
                        log::info!("{:?} -> {:?}", state.screen, next.screen);
                    }
                    *state = next;
                    if outcome == ClickOutcome::Exit {
                        return Ok(());
                    }
                }
                Event::Resize(cols, rows) => {
                    *view = Viewport::new(cols, rows, state.field);
                }
                _ => {}
            }
        }

        if state.screen == Screen::Running {
            let input = poll_input(&key_frame, frame, fire);
            *state = tick(state, &input, now_ms, &mut rng);
        }

        display::render(out, state, view, now_ms)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::init();

    // Fail before touching the terminal so the error prints normally
    let config = GameConfig::load()?;
    log::info!("Starting with rules {:?}", config.rules);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(GameError::from)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let clock = Instant::now();
    let mut state = init_state(config, 0);
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, state.field);

    game_loop(out, &mut state, &mut view, rx, clock)?;

    log::info!("Exiting on {:?} with score {}", state.screen, state.score);
    Ok(())
}
