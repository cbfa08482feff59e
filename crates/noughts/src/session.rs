//! Cooperative driver joining the controller to its inputs and timer.

use crate::config::GameConfig;
use crate::controller::{ComputerTurn, GameController, GameEvent, GameMode};
use crate::scheduler::ThinkingScheduler;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, instrument, warn};

/// Request from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a game in the given mode.
    Start(GameMode),
    /// Play the cell at this index for the human to move.
    Submit(usize),
    /// Clear the board, keeping the mode.
    Reset,
    /// Abandon the game and go back to mode selection.
    ReturnToMenu,
    /// Stop the session.
    Quit,
}

/// Whether the session keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Stop.
    Quit,
}

/// One controller plus the timer that paces the computer.
#[derive(Debug)]
pub struct GameSession {
    controller: GameController,
    scheduler: ThinkingScheduler,
}

impl GameSession {
    /// Creates a session at the menu, reporting to `events`.
    #[instrument(skip(config, events))]
    pub fn new(config: &GameConfig, events: UnboundedSender<GameEvent>) -> Self {
        info!(
            computer_mark = %config.computer_mark(),
            delay_ms = config.thinking_delay_ms(),
            "Creating game session"
        );
        Self {
            controller: GameController::new(*config.computer_mark(), events),
            scheduler: ThinkingScheduler::new(config.thinking_delay()),
        }
    }

    /// Returns the controller.
    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &ThinkingScheduler {
        &self.scheduler
    }

    /// Applies one command.
    ///
    /// Rejected moves are logged and dropped.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Start(mode) => self.controller.start(mode),
            Command::Submit(index) => {
                if let Err(error) = self.controller.submit_move(index) {
                    debug!(index, %error, "Move rejected");
                }
            }
            Command::Reset => self.controller.reset(),
            Command::ReturnToMenu => self.controller.return_to_menu(),
            Command::Quit => {
                info!("Quit requested");
                return Flow::Quit;
            }
        }
        self.arm_scheduler();
        Flow::Continue
    }

    /// Waits until the pending computer turn is due.
    ///
    /// Never completes when nothing is pending.
    pub async fn next_computer_turn(&mut self) -> ComputerTurn {
        self.scheduler.due().await
    }

    /// Plays a due computer turn. Stale tickets are dropped by the controller.
    #[instrument(skip(self))]
    pub fn play_computer_turn(&mut self, turn: ComputerTurn) {
        match self.controller.run_computer_turn(turn) {
            Ok(Some(index)) => debug!(index, "Computer turn played"),
            Ok(None) => debug!("Computer turn skipped"),
            Err(error) => warn!(%error, "Computer move rejected"),
        }
        self.arm_scheduler();
    }

    /// Handles whichever comes first: a command or a due computer turn.
    ///
    /// A closed command channel counts as [`Flow::Quit`].
    pub async fn step(&mut self, commands: &mut UnboundedReceiver<Command>) -> Flow {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => self.handle(command),
                None => {
                    debug!("Command channel closed");
                    Flow::Quit
                }
            },
            turn = self.scheduler.due() => {
                self.play_computer_turn(turn);
                Flow::Continue
            }
        }
    }

    /// Steps until quit.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut commands: UnboundedReceiver<Command>) {
        info!("Session started");
        while self.step(&mut commands).await == Flow::Continue {}
        info!("Session ended");
    }

    fn arm_scheduler(&mut self) {
        if let Some(turn) = self.controller.take_scheduled() {
            self.scheduler.schedule(turn);
        }
    }
}
