// TUI module - Terminal User Interface
//
// Manages the dashboard using ratatui:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, paste, timer ticks)
// - Receiving request outcomes from spawned service calls

pub mod app;
pub mod components;
pub mod layout;
pub mod modal;
pub mod text_input;
pub mod traits;
pub mod views;

use crate::clipboard::ClipboardChain;
use crate::config::Config;
use crate::controller::{Dispatcher, Outcome};
use crate::logging::LogBuffer;
use crate::remote::ServiceClient;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Run the dashboard until the user quits
pub async fn run_tui(log_buffer: LogBuffer, config: Config) -> Result<()> {
    let client = ServiceClient::new(&config.service).context("Failed to create service client")?;
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(client, outcome_tx);
    let export_dir = std::env::current_dir().context("Failed to resolve working directory")?;

    let mut app = App::new(
        config,
        log_buffer,
        dispatcher,
        Box::new(ClipboardChain::system()),
        Config::config_path(),
        export_dir,
    );

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut terminal = undo_on_error(enter_screen, leave_screen)?;

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    leave_screen();
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Best-effort restore; runs on both the normal and the failed-setup path
fn leave_screen() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste) {
        tracing::warn!("Failed to restore terminal: {}", e);
    }
}

/// Run a setup step, calling `undo` when it fails
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        undo();
    }
    result
}

/// Main event loop
///
/// Three sources, whichever completes first:
/// 1. Terminal input (keys, bracketed paste)
/// 2. Timer ticks (spinner, copy feedback and toast expiry)
/// 3. Outcomes of in-flight service calls
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::UnboundedReceiver<Outcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => app.handle_key(key_event),
                        Ok(Event::Paste(text)) => app.handle_paste(&text),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            Some(outcome) = outcome_rx.recv() => {
                tracing::debug!("Outcome for {:?} (generation {})", outcome.slot, outcome.generation);
                app.apply_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
