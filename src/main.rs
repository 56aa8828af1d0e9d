//! Terminal flight HUD demo (default binary).
//!
//! Stands in for the host application: a toy simulation thread produces
//! flight state, this loop owns the UI flags (HUD on/off, view transition,
//! collision status) and drives the overlay from the frame pacer.
//!
//! Keys: `h` toggles the HUD, `v` toggles cockpit/chase view, `c` cycles the
//! collision status, `q`/Esc quits.

mod sim;

use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::info;

use flight_hud::core::FlightState;
use flight_hud::engine::{FramePacer, HudOverlay, OverlayConfig};
use flight_hud::term::{
    viewport_for_terminal, HudLayout, HudView, TerminalPresenter, TerminalSurfaceProvider,
};

use crate::sim::SimProducer;

/// Seconds for a full cockpit <-> chase view transition.
const TRANSITION_SECS: f64 = 0.6;

fn main() -> Result<()> {
    let config = OverlayConfig::from_env();
    init_logging(&config)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let mut term = TerminalPresenter::new();
    term.enter()?;

    let result = rt.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &OverlayConfig) -> Result<()> {
    // The terminal is in the alternate screen, so stderr is only used when
    // asked for explicitly via RUST_LOG.
    let default_filter = if config.log_path.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    let _ = builder.try_init();
    Ok(())
}

async fn run(term: &mut TerminalPresenter, config: &OverlayConfig) -> Result<()> {
    let state = FlightState::shared();
    state.set_hud_enabled(!config.start_disabled);
    let _sim = SimProducer::spawn(Arc::clone(&state));

    let view = HudView::new(HudLayout::new(config.layout_scale));
    let mut overlay = HudOverlay::new(Arc::clone(&state), TerminalSurfaceProvider, view);
    let mut pacer = FramePacer::new(config.refresh_hz);
    info!(
        "flight hud demo: {} Hz, layout scale {}",
        config.refresh_hz, config.layout_scale
    );

    let mut view_target = 0.0f64;
    let mut last = Instant::now();
    let mut was_running = false;

    loop {
        // Host input.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        overlay.stop(&mut pacer);
                        return Ok(());
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        overlay.stop(&mut pacer);
                        return Ok(());
                    }
                    KeyCode::Char('h') => {
                        state.toggle_hud();
                    }
                    KeyCode::Char('v') => view_target = 1.0 - view_target,
                    KeyCode::Char('c') => state.set_collision(state.collision().cycle()),
                    _ => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Animate the view transition toward its target.
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;
        let t = state.transition();
        let step = dt / TRANSITION_SECS;
        let next = if view_target > t {
            (t + step).min(view_target)
        } else {
            (t - step).max(view_target)
        };
        state.set_transition(next);

        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = viewport_for_terminal(cols, rows);

        overlay.sync_enabled(viewport, &mut pacer);
        if overlay.is_running() {
            if !was_running {
                // Present the synchronous first frame from `start`.
                if let Some(surface) = overlay.surface() {
                    term.present(surface)?;
                }
            }
            match pacer.next_refresh().await {
                Some(handle) => {
                    overlay.on_refresh(handle, viewport, &mut pacer);
                    if let Some(surface) = overlay.surface() {
                        term.present(surface)?;
                    }
                }
                None => pacer.idle().await,
            }
        } else {
            if was_running {
                term.blank()?;
            }
            pacer.idle().await;
        }
        was_running = overlay.is_running();
    }
}
