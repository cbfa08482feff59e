//! Game controller: the only owner and mutator of the live board.
//!
//! The controller is synchronous. It applies moves through the rules
//! engine, tracks phase and turn, and reports everything that happens as
//! [`GameEvent`]s on a channel read by the presentation layer. When the
//! computer is to move it does not search right away; it leaves a
//! [`ComputerTurn`] ticket for the session to fire after the thinking
//! delay, and checks the ticket again before playing it.

use noughts_engine::{Board, Mark, MoveError, MoveSelector, Outcome, rules};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Who sits on the other side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, strum::Display)]
pub enum GameMode {
    /// Two humans share the keyboard.
    #[strum(to_string = "2 Player")]
    TwoPlayer,
    /// One human against the minimax opponent.
    #[strum(to_string = "vs AI")]
    VsComputer,
}

/// Phase of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// No mode chosen yet.
    #[default]
    NotStarted,
    /// Moves are accepted.
    InProgress,
    /// A mark completed a line.
    Won(Mark),
    /// Board filled without a line.
    Draw,
}

impl From<Outcome> for GamePhase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(mark) => GamePhase::Won(mark),
            Outcome::Draw => GamePhase::Draw,
        }
    }
}

/// Status line shown to the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Status {
    /// A human is to move.
    #[display("Player {}'s Turn", _0)]
    Turn(Mark),
    /// The computer will move after its delay.
    #[display("AI's Turn")]
    ComputerTurn,
    /// The computer is searching.
    #[display("AI is thinking...")]
    ComputerThinking,
    /// The game has ended.
    #[display("{}", _0)]
    Finished(Outcome),
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game started in the given mode.
    Started(GameMode),
    /// A mark was placed.
    MoveApplied {
        /// Cell index (0-8).
        index: usize,
        /// Mark placed.
        mark: Mark,
    },
    /// The status line changed.
    StatusChanged(Status),
    /// The game ended.
    GameOver(Outcome),
    /// The board was emptied by a reset or menu return.
    BoardCleared,
    /// Mode cleared; back at mode selection.
    ReturnedToMenu,
}

/// Ticket for a deferred computer move.
///
/// Records which game it was issued for so that a ticket outliving a
/// reset can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    epoch: u64,
    mark: Mark,
}

impl ComputerTurn {
    /// Mark the computer will play.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Snapshot of everything the controller tracks about the current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    phase: GamePhase,
    mode: Option<GameMode>,
    to_move: Mark,
}

impl GameState {
    fn fresh(mode: Option<GameMode>) -> Self {
        Self {
            board: Board::new(),
            phase: if mode.is_some() {
                GamePhase::InProgress
            } else {
                GamePhase::NotStarted
            },
            mode,
            to_move: Mark::X,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the mode, `None` at the menu.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Returns the mark to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }
}

/// Finite-state sequencer for one game at a time.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    computer: MoveSelector,
    epoch: u64,
    scheduled: Option<ComputerTurn>,
    events: UnboundedSender<GameEvent>,
}

impl GameController {
    /// Creates a controller at the menu.
    ///
    /// `computer_mark` is the side the computer plays in
    /// [`GameMode::VsComputer`].
    #[instrument(skip(events))]
    pub fn new(computer_mark: Mark, events: UnboundedSender<GameEvent>) -> Self {
        Self {
            state: GameState::fresh(None),
            computer: MoveSelector::new(computer_mark),
            epoch: 0,
            scheduled: None,
            events,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mark played by the computer in [`GameMode::VsComputer`].
    pub fn computer_mark(&self) -> Mark {
        self.computer.mark()
    }

    /// Counter advanced by every start, reset and menu return.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Starts a new game in `mode` with an empty board and X to move.
    #[instrument(skip(self))]
    pub fn start(&mut self, mode: GameMode) {
        info!(%mode, "Starting game");
        self.begin(Some(mode));
        self.emit(GameEvent::Started(mode));
        self.announce_turn();
    }

    /// Places the current mark at `index` for a human player.
    ///
    /// # Errors
    ///
    /// - [`MoveError::NotInProgress`] outside a running game
    /// - [`MoveError::InvalidIndex`] / [`MoveError::CellOccupied`] for a bad cell
    /// - [`MoveError::AwaitingComputer`] while the computer is to move
    ///
    /// A rejected move leaves the controller untouched.
    #[instrument(skip(self), fields(to_move = %self.state.to_move))]
    pub fn submit_move(&mut self, index: usize) -> Result<(), MoveError> {
        if self.state.phase != GamePhase::InProgress {
            return Err(MoveError::NotInProgress);
        }
        rules::check_move(&self.state.board, index)?;
        if self.is_computer_turn() {
            return Err(MoveError::AwaitingComputer);
        }
        self.place(index)
    }

    /// Plays a deferred computer move.
    ///
    /// Returns the chosen cell, or `None` when the ticket is stale: issued
    /// for an earlier game, for a mark no longer to move, or arriving after
    /// the game ended.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    pub fn run_computer_turn(&mut self, turn: ComputerTurn) -> Result<Option<usize>, MoveError> {
        if turn.epoch != self.epoch || turn.mark != self.state.to_move || !self.is_computer_turn() {
            debug!(?turn, "Discarding stale computer turn");
            return Ok(None);
        }
        if self.scheduled == Some(turn) {
            self.scheduled = None;
        }

        self.emit(GameEvent::StatusChanged(Status::ComputerThinking));
        let Some(index) = self.computer.best_move(&self.state.board) else {
            warn!("Computer to move on a full board");
            return Ok(None);
        };

        info!(index, mark = %turn.mark, "Computer moves");
        self.place(index)?;
        Ok(Some(index))
    }

    /// Takes the pending computer turn, if one was issued since the last call.
    pub fn take_scheduled(&mut self) -> Option<ComputerTurn> {
        self.scheduled.take()
    }

    /// Clears the board and starts over in the same mode.
    ///
    /// At the menu this only clears the board. Any outstanding computer
    /// turn becomes stale.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let mode = self.state.mode;
        info!(?mode, "Resetting game");
        self.begin(mode);
        self.emit(GameEvent::BoardCleared);
        if mode.is_some() {
            self.announce_turn();
        }
    }

    /// Abandons the game and clears the mode.
    #[instrument(skip(self))]
    pub fn return_to_menu(&mut self) {
        info!("Returning to menu");
        self.begin(None);
        self.emit(GameEvent::BoardCleared);
        self.emit(GameEvent::ReturnedToMenu);
    }

    fn begin(&mut self, mode: Option<GameMode>) {
        self.epoch += 1;
        self.scheduled = None;
        self.state = GameState::fresh(mode);
    }

    fn is_computer_turn(&self) -> bool {
        self.state.phase == GamePhase::InProgress
            && self.state.mode == Some(GameMode::VsComputer)
            && self.state.to_move == self.computer.mark()
    }

    // Shared by human and computer moves.
    fn place(&mut self, index: usize) -> Result<(), MoveError> {
        let mark = self.state.to_move;
        self.state.board = rules::apply_move(&self.state.board, index, mark)?;
        debug_assert!(
            marks_alternate(&self.state.board),
            "Board consistency violated"
        );
        self.emit(GameEvent::MoveApplied { index, mark });

        if let Some(outcome) = rules::is_terminal(&self.state.board) {
            info!(%outcome, "Game over");
            self.state.phase = outcome.into();
            self.emit(GameEvent::StatusChanged(Status::Finished(outcome)));
            self.emit(GameEvent::GameOver(outcome));
            return Ok(());
        }

        self.state.to_move = mark.opponent();
        self.announce_turn();
        Ok(())
    }

    fn announce_turn(&mut self) {
        if self.is_computer_turn() {
            let turn = ComputerTurn {
                epoch: self.epoch,
                mark: self.state.to_move,
            };
            debug!(?turn, "Scheduling computer turn");
            self.scheduled = Some(turn);
            self.emit(GameEvent::StatusChanged(Status::ComputerTurn));
        } else {
            self.emit(GameEvent::StatusChanged(Status::Turn(self.state.to_move)));
        }
    }

    fn emit(&self, event: GameEvent) {
        debug!(?event, "Emitting game event");
        if self.events.send(event).is_err() {
            debug!("No listener for game events");
        }
    }
}

/// X and O counts differ by at most one, X leading.
fn marks_alternate(board: &Board) -> bool {
    let x = board.count(Mark::X);
    let o = board.count(Mark::O);
    let valid = x == o || x == o + 1;
    if !valid {
        warn!(x, o, "Board consistency violated");
    }
    valid
}
