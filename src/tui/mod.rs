//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle** (form showing): sleeps up to 500ms, only redraws on events,
//!   terminal resize, or a message from the background loader.

mod component;
mod components;
mod event;
mod keymap;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::data::{self, DataSource, RoutePolicy};
use crate::tui::component::EventHandler;
use crate::tui::components::{LoadScreen, LoadScreenEvent, PricesPanel};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+Enter through; terminals that don't
        // support it ignore the sequence
        execute!(
            stdout(),
            EnableMouseCapture,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn DataSource> = Arc::from(data::source_from_str(&config.data_source));
    let mut app = App::from_config(source.describe(), &config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_load(&source, &config, tx.clone());

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            let area = terminal.get_frame().area();
            for action in actions_for(&app, &event, area) {
                match update(&mut app, action) {
                    Effect::Quit => break 'outer,
                    Effect::LoadData => spawn_load(&source, &config, tx.clone()),
                    Effect::None => {}
                }
            }
        }

        // Handle background task actions (data loads)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'outer;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event to the screen that is showing.
fn actions_for(app: &App, event: &TuiEvent, area: ratatui::layout::Rect) -> Vec<Action> {
    let (Some(form), Some(data)) = (app.form.as_ref(), app.data.as_ref()) else {
        if matches!(event, TuiEvent::ForceQuit) {
            return vec![Action::Quit];
        }
        let mut screen = LoadScreen::new(&app.load, &app.source, 0);
        return match screen.handle_event(event) {
            Some(LoadScreenEvent::Reload) => vec![Action::Reload],
            Some(LoadScreenEvent::Quit) => vec![Action::Quit],
            None => Vec::new(),
        };
    };

    if let TuiEvent::MouseClick(col, row) = *event {
        let layout = ui::form_layout(
            area,
            form.hours_visible(),
            app.banner.is_some(),
            PricesPanel::content_height(&data.prices),
        );
        let hit = ui::hit_test(form, &layout, col, row);
        debug!("Click at ({}, {}) hit {:?}", col, row, hit);
        return keymap::click_actions(form, hit);
    }

    keymap::key_actions(form, app.banner.is_some(), event)
}

fn spawn_load(source: &Arc<dyn DataSource>, config: &ResolvedConfig, tx: mpsc::Sender<Action>) {
    let source = source.clone();
    let timeout = config.fetch_timeout;
    let policy: RoutePolicy = config.route_policy;
    info!("Spawning data load from {}", source.describe());

    tokio::spawn(async move {
        let result = data::load(source.as_ref(), timeout, policy).await;
        if tx.send(Action::DataLoaded(result)).is_err() {
            warn!("Failed to send load result: receiver dropped");
        }
    });
}
