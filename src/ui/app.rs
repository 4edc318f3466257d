use crate::game::{GameError, GameState, PlacementResult, Position};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::Roster;

pub struct App {
    game: GameState,
    roster: Roster,
    selected_column: usize,
    /// Where the most recent piece landed, highlighted on the board
    last_drop: Option<Position>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game: GameState, roster: Roster) -> Self {
        let selected_column = game.width() / 2; // Start in middle
        App {
            game,
            roster,
            selected_column,
            last_drop: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn last_drop(&self) -> Option<Position> {
        self.last_drop
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| -> io::Error { e.into() })?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                // Digits are 1-based column labels
                let column = c as usize - '1' as usize;
                if column < self.game.width() {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.game = self.game.reset();
                self.selected_column = self.game.width() / 2;
                self.last_drop = None;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.game.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        let result = self.game.drop_piece(self.selected_column);
        if let Ok(placement) = &result {
            self.last_drop = Some(placement.position());
        }

        match result {
            Ok(PlacementResult::InProgress { .. }) => {}
            Ok(PlacementResult::Won { winner, .. }) => {
                self.message = Some(format!("{} wins!", self.roster.name(winner)));
            }
            Ok(PlacementResult::Tie { .. }) => {
                self.message = Some("It's a tie!".to_string());
            }
            Err(GameError::ColumnFull { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(GameError::InvalidColumn { .. }) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game,
            &self.roster,
            self.selected_column,
            self.last_drop,
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::game::{GameStatus, Player};
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let config = AppConfig::default();
        App::new(config.new_game().unwrap(), Roster::from_config(&config.players))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_in_middle_column() {
        let app = app();
        assert_eq!(app.selected_column(), 3);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_selector_stays_on_board() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
    }

    #[test]
    fn test_enter_drops_in_selected_column() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(!app.game().board().get(5, 3).is_empty());
        assert_eq!(app.game().current_player(), Player::new(2));
    }

    #[test]
    fn test_last_drop_follows_placements() {
        let mut app = app();
        assert_eq!(app.last_drop(), None);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.last_drop(), Some(Position::new(5, 2)));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.last_drop(), Some(Position::new(4, 2)));
        assert_eq!(app.last_drop(), app.game().last_placed());

        // A rejected drop keeps the previous highlight
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('3'));
        }
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.message(), Some("Column is full!"));
        assert_eq!(app.last_drop(), Some(Position::new(0, 2)));

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.last_drop(), None);
    }

    #[test]
    fn test_digit_key_drops_directly() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.selected_column(), 0);
        assert!(!app.game().board().get(5, 0).is_empty());

        // Column 9 doesn't exist on a 7-wide board
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.selected_column(), 0);
        assert_eq!(app.game().current_player(), Player::new(2));
    }

    #[test]
    fn test_full_column_message() {
        let mut app = app();
        for _ in 0..6 {
            press(&mut app, KeyCode::Char('2'));
        }
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.message(), Some("Column is full!"));
    }

    #[test]
    fn test_win_announced_and_further_drops_refused() {
        let mut app = app();
        for key in ['1', '7', '2', '7', '3', '7', '4'] {
            press(&mut app, KeyCode::Char(key));
        }
        assert_eq!(app.game().status(), GameStatus::Won(Player::new(1)));
        assert_eq!(app.message(), Some("Player 1 wins!"));

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.message(), Some("Game over! Press 'r' to restart."));
    }

    #[test]
    fn test_restart_resets_game() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.message(), Some("New game started!"));
        assert_eq!(app.game().last_placed(), None);
        assert_eq!(app.game().current_player(), Player::new(1));
        assert_eq!(app.selected_column(), 3);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_render_shows_current_player() {
        let app = app();
        let text = screen(&app);
        assert!(text.contains("Connect Four"));
        assert!(text.contains("Current Player: Player 1"));
    }

    #[test]
    fn test_render_shows_outcome() {
        let mut app = app();
        for key in ['1', '7', '2', '7', '3', '7', '4'] {
            press(&mut app, KeyCode::Char(key));
        }
        let text = screen(&app);
        assert!(text.contains("Player 1 wins!"));
    }
}
