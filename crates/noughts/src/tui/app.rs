//! View model for the terminal UI.
//!
//! [`App`] never touches game rules beyond mirroring moves: it rebuilds
//! what to draw from [`GameEvent`]s and turns key presses into
//! [`Command`]s for the session.

use super::input::move_cursor;
use crate::controller::{GameEvent, GameMode, Status};
use crate::session::Command;
use crossterm::event::KeyCode;
use noughts_engine::{Board, Mark, Outcome, Position, rules};
use tracing::{debug, warn};

const MENU_STATUS: &str = "Choose a game mode";

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Mode selection.
    Menu,
    /// Board and status.
    Game,
}

/// Everything the renderer needs.
#[derive(Debug, Clone)]
pub struct App {
    screen: Screen,
    menu_choice: GameMode,
    mode: Option<GameMode>,
    board: Board,
    status: String,
    game_over: Option<String>,
    cursor: Position,
    computer_mark: Mark,
}

impl App {
    /// Creates the view model at the menu.
    pub fn new(computer_mark: Mark) -> Self {
        Self {
            screen: Screen::Menu,
            menu_choice: GameMode::VsComputer,
            mode: None,
            board: Board::new(),
            status: MENU_STATUS.to_string(),
            game_over: None,
            cursor: Position::Center,
            computer_mark,
        }
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Highlighted menu entry.
    pub fn menu_choice(&self) -> GameMode {
        self.menu_choice
    }

    /// Mode of the running game.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Mirrored board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Game-over message while the dialog is open.
    pub fn game_over(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    /// Cursor cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Mirrors one controller event.
    pub fn apply(&mut self, event: GameEvent) {
        debug!(?event, "Applying event to view");
        match event {
            GameEvent::Started(mode) => {
                self.screen = Screen::Game;
                self.mode = Some(mode);
                self.menu_choice = mode;
                self.board = Board::new();
                self.game_over = None;
                self.cursor = Position::Center;
            }
            GameEvent::MoveApplied { index, mark } => {
                match rules::apply_move(&self.board, index, mark) {
                    Ok(board) => self.board = board,
                    Err(error) => warn!(%error, index, "View board out of sync"),
                }
            }
            GameEvent::StatusChanged(Status::Finished(outcome)) => {
                self.status = self.outcome_message(outcome);
            }
            GameEvent::StatusChanged(status) => self.status = status.to_string(),
            GameEvent::GameOver(outcome) => self.game_over = Some(self.outcome_message(outcome)),
            GameEvent::BoardCleared => {
                self.board = Board::new();
                self.game_over = None;
            }
            GameEvent::ReturnedToMenu => {
                self.screen = Screen::Menu;
                self.mode = None;
                self.status = MENU_STATUS.to_string();
            }
        }
    }

    /// Maps a key press to a session command.
    ///
    /// Cursor and menu movement stay local and return `None`.
    pub fn command_for(&mut self, key: KeyCode) -> Option<Command> {
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Game => self.game_key(key),
        }
    }

    fn menu_key(&mut self, key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Up | KeyCode::Down => {
                self.menu_choice = match self.menu_choice {
                    GameMode::VsComputer => GameMode::TwoPlayer,
                    GameMode::TwoPlayer => GameMode::VsComputer,
                };
                None
            }
            KeyCode::Enter => Some(Command::Start(self.menu_choice)),
            KeyCode::Char('1') => Some(Command::Start(GameMode::VsComputer)),
            KeyCode::Char('2') => Some(Command::Start(GameMode::TwoPlayer)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }

    fn game_key(&mut self, key: KeyCode) -> Option<Command> {
        match key {
            KeyCode::Esc => {
                self.game_over = None;
                None
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Submit(self.cursor.to_index())),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                if let Some(position) = Position::from_index(index) {
                    self.cursor = position;
                }
                Some(Command::Submit(index))
            }
            KeyCode::Char('r') => Some(Command::Reset),
            KeyCode::Char('m') => Some(Command::ReturnToMenu),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn outcome_message(&self, outcome: Outcome) -> String {
        game_over_message(self.mode, outcome, self.computer_mark)
    }
}

/// Text for the game-over dialog.
pub fn game_over_message(mode: Option<GameMode>, outcome: Outcome, computer_mark: Mark) -> String {
    match (outcome, mode) {
        (Outcome::Draw, _) => "It's a Draw!".to_string(),
        (Outcome::Winner(mark), Some(GameMode::VsComputer)) if mark == computer_mark => {
            "AI Wins!".to_string()
        }
        (Outcome::Winner(_), Some(GameMode::VsComputer)) => "You Win!".to_string(),
        (Outcome::Winner(mark), _) => format!("Player {} Wins!", mark),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_engine::Cell;

    fn in_game(mode: GameMode) -> App {
        let mut app = App::new(Mark::O);
        app.apply(GameEvent::Started(mode));
        app
    }

    #[test]
    fn test_menu_keys() {
        let mut app = App::new(Mark::O);
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.command_for(KeyCode::Enter), Some(Command::Start(GameMode::VsComputer)));
        assert_eq!(app.command_for(KeyCode::Down), None);
        assert_eq!(app.command_for(KeyCode::Enter), Some(Command::Start(GameMode::TwoPlayer)));
        assert_eq!(app.command_for(KeyCode::Char('1')), Some(Command::Start(GameMode::VsComputer)));
        assert_eq!(app.command_for(KeyCode::Char('2')), Some(Command::Start(GameMode::TwoPlayer)));
        assert_eq!(app.command_for(KeyCode::Char('q')), Some(Command::Quit));
    }

    #[test]
    fn test_game_keys() {
        let mut app = in_game(GameMode::TwoPlayer);
        assert_eq!(app.command_for(KeyCode::Enter), Some(Command::Submit(4)));
        assert_eq!(app.command_for(KeyCode::Up), None);
        assert_eq!(app.cursor(), Position::TopCenter);
        assert_eq!(app.command_for(KeyCode::Char(' ')), Some(Command::Submit(1)));
        assert_eq!(app.command_for(KeyCode::Char('9')), Some(Command::Submit(8)));
        assert_eq!(app.cursor(), Position::BottomRight);
        assert_eq!(app.command_for(KeyCode::Char('r')), Some(Command::Reset));
        assert_eq!(app.command_for(KeyCode::Char('m')), Some(Command::ReturnToMenu));
        assert_eq!(app.command_for(KeyCode::Char('0')), None);
    }

    #[test]
    fn test_mirrors_moves_and_status() {
        let mut app = in_game(GameMode::VsComputer);
        app.apply(GameEvent::MoveApplied { index: 4, mark: Mark::X });
        app.apply(GameEvent::StatusChanged(Status::ComputerTurn));
        assert_eq!(app.board().get(4), Some(Cell::Occupied(Mark::X)));
        assert_eq!(app.status(), "AI's Turn");

        app.apply(GameEvent::StatusChanged(Status::ComputerThinking));
        assert_eq!(app.status(), "AI is thinking...");
    }

    #[test]
    fn test_game_over_dialog() {
        let mut app = in_game(GameMode::VsComputer);
        app.apply(GameEvent::GameOver(Outcome::Winner(Mark::O)));
        assert_eq!(app.game_over(), Some("AI Wins!"));

        app.command_for(KeyCode::Esc);
        assert_eq!(app.game_over(), None);

        app.apply(GameEvent::GameOver(Outcome::Draw));
        app.apply(GameEvent::BoardCleared);
        assert_eq!(app.game_over(), None);
        assert_eq!(app.board(), &Board::new());
    }

    #[test]
    fn test_return_to_menu() {
        let mut app = in_game(GameMode::TwoPlayer);
        app.apply(GameEvent::BoardCleared);
        app.apply(GameEvent::ReturnedToMenu);
        assert_eq!(app.screen(), Screen::Menu);
        assert_eq!(app.mode(), None);
        assert_eq!(app.status(), MENU_STATUS);
    }

    #[test]
    fn test_game_over_messages() {
        let vs = Some(GameMode::VsComputer);
        let two = Some(GameMode::TwoPlayer);
        assert_eq!(game_over_message(vs, Outcome::Winner(Mark::X), Mark::O), "You Win!");
        assert_eq!(game_over_message(vs, Outcome::Winner(Mark::O), Mark::O), "AI Wins!");
        assert_eq!(game_over_message(vs, Outcome::Winner(Mark::X), Mark::X), "AI Wins!");
        assert_eq!(game_over_message(two, Outcome::Winner(Mark::O), Mark::O), "Player O Wins!");
        assert_eq!(game_over_message(two, Outcome::Draw, Mark::O), "It's a Draw!");
    }
}
