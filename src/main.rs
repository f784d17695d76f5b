mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Read, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pocket_invaders::clock::{MonotonicClock, TimeSource};
use pocket_invaders::compute::{tick, RoundOutcome};
use pocket_invaders::config::Rules;
use pocket_invaders::entities::GameState;
use pocket_invaders::input::{drain_remote, CommandParser, Intents};
use pocket_invaders::sprites::Framebuffer;

#[derive(Debug, Parser)]
#[command(name = "pocket_invaders", about = "Invaders on a 128x64 monochrome field")]
struct Args {
    /// TOML file overriding the default rules.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device or FIFO streaming wireless controller commands (`B0`, `J0:angle,dist`).
    #[arg(long)]
    serial: Option<PathBuf>,

    /// Delay between ticks, in milliseconds.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// How long the title card stays up, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    splash_ms: u64,

    /// Write logs here (filtered by RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Keyboard hold tracking ────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Input threads ─────────────────────────────────────────────────────────────

/// Reads the controller byte stream and forwards intent snapshots.  A fire
/// press is sent once and then cleared locally.
fn spawn_serial_reader(path: PathBuf, tx: mpsc::Sender<Intents>) -> Result<()> {
    let mut source = File::open(&path)
        .with_context(|| format!("failed to open controller stream {}", path.display()))?;
    thread::spawn(move || {
        let mut parser = CommandParser::new();
        let mut intents = Intents::default();
        let mut buf = [0u8; 64];
        loop {
            let n = match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    warn!(error = %e, "controller stream closed");
                    break;
                }
            };
            let before = intents;
            parser.push_bytes(&buf[..n], &mut intents);
            if intents != before && tx.send(intents).is_err() {
                break;
            }
            intents.fire = false;
        }
        // release the stick before hanging up
        let _ = tx.send(Intents::default());
    });
    Ok(())
}

fn spawn_event_reader(tx: mpsc::Sender<Event>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    rules: &Rules,
    frame_time: Duration,
    keys: &mpsc::Receiver<Event>,
    controller: &mpsc::Receiver<Intents>,
) -> Result<u32> {
    let clock = MonotonicClock::new();
    let mut state = GameState::new(rules, clock.now_ms());
    let mut fb = Framebuffer::new(rules.screen_width as usize, rules.screen_height as usize);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut remote = Intents::default();
    let mut intents = Intents::default();
    let mut best = 0u32;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain keyboard (non-blocking) ─────────────────────────────────────
        while let Ok(ev) = keys.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(best.max(state.score))
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(best.max(state.score))
                        }
                        KeyCode::Char(' ') => intents.fire = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Drain controller; latest snapshot wins, fire stays latched ────────
        drain_remote(controller, &mut remote);
        intents.fire |= std::mem::take(&mut remote.fire);

        intents.move_left = remote.move_left
            || any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            );
        intents.move_right = remote.move_right
            || any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            );

        let (next, report) = tick(&state, &intents, clock.now_ms(), rules);
        state = next;
        // consumed by the tick whether or not a slot was free
        intents.fire = false;

        if report.outcome != RoundOutcome::None {
            best = best.max(report.final_score);
        }

        display::render(out, &mut fb, &state, rules)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let rules = match &args.config {
        Some(path) => Rules::load(path)?,
        None => Rules::default(),
    };

    let (need_cols, need_rows) = display::required_size(&rules);
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    if cols < need_cols || rows < need_rows {
        bail!("terminal is {cols}x{rows}, need at least {need_cols}x{need_rows}");
    }

    let (intent_tx, intent_rx) = mpsc::channel::<Intents>();
    if let Some(path) = args.serial.clone() {
        spawn_serial_reader(path, intent_tx)?;
    }

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without support fall back to
    // the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (key_tx, key_rx) = mpsc::channel::<Event>();
    spawn_event_reader(key_tx);

    let result = display::splash(&mut out, &rules)
        .map_err(anyhow::Error::from)
        .and_then(|()| {
            thread::sleep(Duration::from_millis(args.splash_ms));
            game_loop(
                &mut out,
                &rules,
                Duration::from_millis(args.frame_ms),
                &key_rx,
                &intent_rx,
            )
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let best = result?;
    info!(best, "session over");
    println!("Best round score: {best}");
    Ok(())
}
