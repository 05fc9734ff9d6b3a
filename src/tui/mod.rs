// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Feeding page completions from the loader back into the app

pub mod app;
pub mod components;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::feed::{FetchCompletion, LoadOutcome, Loader, PostSource};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Redraw interval, also the spinner speed
const TICK: Duration = Duration::from_millis(120);

/// Run the TUI until the user quits
pub async fn run_tui(
    config: Config,
    source: Arc<dyn PostSource>,
    log_buffer: LogBuffer,
) -> Result<()> {
    let (loader, mut completions) = Loader::new(source);
    let mut app = App::new(&config, loader, log_buffer);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.mount();
    let result = run_event_loop(&mut terminal, &mut app, &mut completions).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on whichever comes first:
/// 1. Keyboard or mouse input
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. A finished page fetch
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    completions: &mut mpsc::Receiver<FetchCompletion>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;
        app.after_draw();

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => app.handle_key(key),
                        Ok(Event::Mouse(mouse)) => app.handle_mouse(mouse),
                        // Picked up by the next draw through fit_feed
                        Ok(Event::Resize(_, _)) => {}
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(completion) = completions.recv() => {
                if let LoadOutcome::Failed = app.apply_completion(completion) {
                    app.show_toast("✗ Fetch failed (r to retry)");
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
