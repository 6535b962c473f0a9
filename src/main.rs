//! Terminal tile-matching runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `tui_gems::term`. The session is driven by a fixed frame tick.
//!
//! Environment:
//! - `GEMS_CONFIG`: TOML config path (defaults to built-in settings)
//! - `GEMS_SEED`: board seed, overrides the config file
//! - `GEMS_LOG_PATH`: write tracing output to this file (off when unset)
//! - `GEMS_LOG_LEVEL`: `error`, `warn`, `info`, `debug` or `trace` (default `info`)

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::filter::LevelFilter;

use tui_gems::core::{GameConfig, GameSnapshot, Session};
use tui_gems::input::{should_quit, InputGate};
use tui_gems::term::{frame_fingerprint, BoardView, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_gems::types::TICK_MS;

const LOG_PATH_ENV: &str = "GEMS_LOG_PATH";
const LOG_LEVEL_ENV: &str = "GEMS_LOG_LEVEL";

/// Redraw a still board at least this often.
const STATIC_REDRAW_MS: u64 = 500;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env().context("failed to load game config")?;
    if config.seed.is_none() {
        config.seed = Some(clock_seed());
    }
    let session = Session::new(config).context("failed to start session")?;
    tracing::info!(seed = session.seed(), "starting tui-gems");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result
}

/// Log to a file only; stdout belongs to the renderer.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_PATH_ENV) else {
        return Ok(());
    };
    let level = match std::env::var(LOG_LEVEL_ENV) {
        Ok(raw) => raw
            .parse::<LevelFilter>()
            .with_context(|| format!("invalid {LOG_LEVEL_ENV}: {raw}"))?,
        Err(_) => LevelFilter::INFO,
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut session: Session) -> Result<()> {
    let view = BoardView::default();
    let mut gate = InputGate::new(session.board().columns(), session.board().rows());
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Render.
        session.snapshot_into(&mut snap);
        let cursor = Some(gate.cursor());
        let fingerprint = frame_fingerprint(&snap, cursor, w, h);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint, snap.is_static()) {
            view.render_into(&snap, cursor, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let target = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    gate.handle_key(key, session.busy())
                }
                Event::Mouse(mouse) => {
                    let layout = view.layout(snap.columns, snap.rows, viewport);
                    gate.handle_mouse(mouse, |col, row| layout.hit_test(col, row), session.busy())
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                    None
                }
                _ => None,
            };

            if let Some(coord) = target {
                let outcome = session.click(coord)?;
                tracing::debug!(?outcome, "click");
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS)?;
        }
    }
}
