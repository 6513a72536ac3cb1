mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use drift_shooter::compute::{init_state, player_shoot, press_boost, tick};
use drift_shooter::config::GameConfig;
use drift_shooter::entities::{GameStatus, WorldState};
use drift_shooter::error::GameError;
use drift_shooter::logging;

use display::Viewport;

/// Top-down arcade shooter with time dilation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Canvas width, overriding the config file
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height, overriding the config file
    #[arg(long)]
    height: Option<f32>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key model ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is always refreshed before it
/// expires while the key is down.
const HOLD_WINDOW_MS: f32 = 133.0;

/// Returns true if any of `keys` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    })
}

const UP: [KeyCode; 3] = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const LEFT: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → start a fresh world.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key.  Each frame, keys still inside the hold window are
/// copied into the world's input state, so several directions can be held at
/// once.  Shoot and boost are one-shot actions fired on the press itself.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut WorldState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let frame_len = Duration::from_secs_f32(state.config.tick_interval_ms / 1000.0);
    let hold_window = u64::from(state.config.ms_to_ticks(HOLD_WINDOW_MS));
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, state.config.width, state.config.height);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Esc => return Ok(true),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status() == GameStatus::Dead =>
                            {
                                return Ok(false);
                            }
                            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char(' ') => {
                                player_shoot(state);
                            }
                            KeyCode::Char('q') | KeyCode::Char('Q') => press_boost(state),
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    state.input.cursor = view.to_canvas(column, row);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        player_shoot(state);
                    }
                }
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows, state.config.width, state.config.height);
                }
                _ => {}
            }
        }

        // ── Copy held keys into the world ─────────────────────────────────────
        state.input.up = is_held(&key_frame, &UP, frame, hold_window);
        state.input.down = is_held(&key_frame, &DOWN, frame, hold_window);
        state.input.left = is_held(&key_frame, &LEFT, frame, hold_window);
        state.input.right = is_held(&key_frame, &RIGHT, frame, hold_window);

        tick(state, rng);
        display::render(out, state, view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<GameConfig, GameError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    let log_file = args.log_file.as_ref().map(File::create).transpose()?;
    logging::init(args.verbose, log_file);

    let config = load_config(&args)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "canvas {}x{}, tick {:.2} ms",
        config.width, config.height, config.tick_interval_ms
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using the hold window");
    }

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

    let result = run(&mut out, &rx, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
) -> Result<(), GameError> {
    loop {
        let mut state = init_state(config.clone());
        let quit = game_loop(out, &mut state, rx, rng)?;
        info!(
            "round over after {} ticks with {} kills",
            state.tick, state.kills
        );
        if quit {
            break;
        }
    }
    Ok(())
}
