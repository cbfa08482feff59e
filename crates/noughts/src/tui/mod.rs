//! Terminal UI.

mod app;
mod input;
mod ui;

pub use app::{App, Screen, game_over_message};
pub use input::move_cursor;

use crate::config::GameConfig;
use crate::controller::GameMode;
use crate::session::{Command, Flow, GameSession};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// Runs the interactive game until the player quits.
///
/// With `mode` set the game starts straight away instead of at the menu.
pub async fn run(config: GameConfig, mode: Option<GameMode>) -> Result<()> {
    info!("Starting Noughts TUI");

    enable_raw_mode()?;
    let mut terminal = or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        restore_terminal,
    )?;

    let res = event_loop(&mut terminal, &config, mode).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI closed");
    res
}

/// Runs `setup`, calling `restore` when it fails.
fn or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

/// Best-effort terminal reset for when setup fails part way.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

#[instrument(skip_all)]
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &GameConfig,
    mode: Option<GameMode>,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut session = GameSession::new(config, event_tx);
    let mut app = App::new(session.controller().computer_mark());
    let mut terminal_events = spawn_event_reader();

    if let Some(mode) = mode {
        session.handle(Command::Start(mode));
    }

    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.apply(event);
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            event = terminal_events.recv() => {
                let Some(event) = event else {
                    warn!("Terminal event reader stopped");
                    break;
                };
                let Event::Key(key) = event else { continue };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.command_for(key.code) {
                    if session.handle(command) == Flow::Quit {
                        break;
                    }
                }
            }
            turn = session.next_computer_turn() => session.play_computer_turn(turn),
        }
    }

    Ok(())
}

/// Forwards terminal events from a blocking reader thread.
///
/// The thread exits once the receiver is dropped.
fn spawn_event_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    error!(error = %e, "Failed to poll terminal");
                    break;
                }
            }
        }
    });
    rx
}
