mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use env_logger::Env;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use room_shooter::compute::{apply_input, init_state, tick, GameState, GameStatus, InputEvent};
use room_shooter::entities::Direction;
use room_shooter::GameConfig;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between player steps while a direction key is held.
const MOVE_COOLDOWN: u32 = 2;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser)]
#[command(name = "room_shooter")]
#[command(about = "Top-down room-crawling shooter in the terminal")]
#[command(version)]
struct Cli {
    /// Rooms in the generated level (at least 5)
    #[arg(short, long, default_value = "8")]
    rooms: usize,

    /// Seed for level generation; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log generation and room transitions to stderr
    #[arg(short, long)]
    verbose: bool,
}

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

/// First held direction among `bindings`, in binding order.
fn held_direction(
    key_frame: &HashMap<KeyCode, u64>,
    bindings: &[(Direction, &[KeyCode])],
    frame: u64,
) -> Option<Direction> {
    bindings
        .iter()
        .find(|(_, keys)| any_held(key_frame, keys, frame))
        .map(|(dir, _)| *dir)
}

const MOVE_KEYS: [(Direction, &[KeyCode]); 4] = [
    (Direction::Up, &[KeyCode::Char('w'), KeyCode::Char('W')]),
    (Direction::Down, &[KeyCode::Char('s'), KeyCode::Char('S')]),
    (Direction::Left, &[KeyCode::Char('a'), KeyCode::Char('A')]),
    (Direction::Right, &[KeyCode::Char('d'), KeyCode::Char('D')]),
];

const FIRE_KEYS: [(Direction, &[KeyCode]); 4] = [
    (Direction::Up, &[KeyCode::Up]),
    (Direction::Down, &[KeyCode::Down]),
    (Direction::Left, &[KeyCode::Left]),
    (Direction::Right, &[KeyCode::Right]),
];

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Inputs for a frame are applied first, then the simulation ticks, then
/// the resulting snapshot is drawn.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut move_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let dt_ms = FRAME.as_millis() as u64;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut inputs: Vec<InputEvent> = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            inputs.push(InputEvent::TogglePause)
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status != GameStatus::Playing =>
                        {
                            return Ok(LoopExit::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys become input events ─────────────────────────────────────
        if move_cooldown == 0 {
            if let Some(dir) = held_direction(&key_frame, &MOVE_KEYS, frame) {
                inputs.push(InputEvent::Move(dir));
                move_cooldown = MOVE_COOLDOWN;
            }
        }
        // The weapon interval throttles firing; no extra cooldown here.
        if let Some(dir) = held_direction(&key_frame, &FIRE_KEYS, frame) {
            inputs.push(InputEvent::Fire(dir));
        }
        move_cooldown = move_cooldown.saturating_sub(1);

        for input in &inputs {
            *state = apply_input(state, input);
        }
        *state = tick(state, dt_ms);

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    // Fail before touching the terminal if the level cannot be built.
    let config = GameConfig::default();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = match init_state(config.clone(), cli.rooms, &mut rng) {
        Ok(state) => state,
        Err(err) => {
            error!("cannot start: {err}");
            eprintln!("room_shooter: {err}");
            std::process::exit(2);
        }
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, state, &config, cli.rooms, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut state: GameState,
    config: &GameConfig,
    rooms: usize,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    loop {
        match game_loop(out, &mut state, rx)? {
            LoopExit::Quit => break,
            LoopExit::Restart => {
                info!("restarting with a new level");
                state = init_state(config.clone(), rooms, rng)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
            }
        }
    }
    Ok(())
}
