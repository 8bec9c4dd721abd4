use std::time::Duration;

use blockfall_engine::{Command, GameState, RandomPieces, SessionState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::GameDisplay,
};

/// Maps a key to the game command it issues while playing.
fn command_for_key(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Up | KeyCode::Char('x') => Command::Rotate,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Char(' ') => Command::HardDrop,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
pub struct PlayApp {
    state: GameState,
    pieces: RandomPieces,
    tick_interval: Duration,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(mut pieces: RandomPieces, tick_interval: Duration) -> Self {
        Self {
            state: GameState::new(&mut pieces),
            pieces,
            tick_interval,
            is_exiting: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn is_playing(&self) -> bool {
        !self.is_exiting && self.state.session_state().is_playing()
    }

    fn restart(&mut self) {
        self.state = GameState::new(&mut self.pieces);
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.is_exiting = true,
            KeyCode::Char('r') if self.state.is_game_over() => self.restart(),
            _ if self.is_playing() => {
                if let Some(command) = command_for_key(code) {
                    self.state.apply(command, &mut self.pieces);
                }
            }
            _ => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(self.tick_interval));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(event) = event.as_key_event()
            && event.kind == KeyEventKind::Press
        {
            let was_over = self.state.is_game_over();
            self.handle_key(event.code);
            if was_over && !self.state.is_game_over() {
                tui.reset_tick();
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = match self.state.session_state() {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↑ X (Rotate) | ↓ (Soft Drop) | Space (Hard Drop) | Q (Quit)"
            }
            SessionState::GameOver => "Controls: R (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(GameDisplay::new(&self.state), main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        if self.is_playing() {
            self.state.apply(Command::Tick, &mut self.pieces);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PlayApp {
        PlayApp::new(RandomPieces::seeded(3), Duration::from_secs(1))
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(command_for_key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(command_for_key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(command_for_key(KeyCode::Char('x')), Some(Command::Rotate));
        assert_eq!(command_for_key(KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(command_for_key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(command_for_key(KeyCode::Char('r')), None);
        assert_eq!(command_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut app = app();
        let mut tui = Tui::new();
        let row = app.state().active_piece().row();
        app.update(&mut tui);
        assert_eq!(app.state().active_piece().row(), row + 1);
    }

    #[test]
    fn test_keys_drive_the_game() {
        let mut app = app();
        let col = app.state().active_piece().col();
        app.handle_key(KeyCode::Left);
        assert_eq!(app.state().active_piece().col(), col - 1);

        app.handle_key(KeyCode::Char(' '));
        assert_eq!(app.state().stats().completed_pieces(), 1);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.state().stats().completed_pieces(), 1);

        while !app.state().is_game_over() {
            app.handle_key(KeyCode::Char(' '));
        }
        let frozen = app.state().clone();
        app.handle_key(KeyCode::Left);
        assert_eq!(app.state(), &frozen);

        app.handle_key(KeyCode::Char('r'));
        assert!(!app.state().is_game_over());
        assert_eq!(app.state().stats().completed_pieces(), 0);
        assert_eq!(app.state().board(), &blockfall_engine::Board::EMPTY);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_exit());
    }
}
