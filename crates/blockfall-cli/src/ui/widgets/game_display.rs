use blockfall_engine::{GameState, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Board and statistics side by side, with a banner once the game is over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match self.state.session_state() {
            SessionState::Playing => color::WHITE,
            SessionState::GameOver => color::RED,
        };

        let game_board = BoardDisplay::new(self.state.board())
            .active_piece(*self.state.active_piece())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(self.state.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [board_column, stats_column] = Layout::horizontal([
            Constraint::Length(game_board.width()),
            Constraint::Length(stats.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);

        let game_board_width = game_board.width();
        game_board.render(board_area, buf);
        stats.render(stats_area, buf);

        if self.state.is_game_over() {
            let style = style::GAME_OVER;
            let block = Block::new().style(style);
            let text = Text::styled("GAME OVER!!", style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Board, Command, ScriptedPieces, Shape};

    use super::*;

    fn render(state: &GameState) -> Buffer {
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(state).render(area, &mut buf);
        buf
    }

    fn contains_text(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| {
            let line: String = (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect();
            line.contains(needle)
        })
    }

    #[test]
    fn test_game_over_banner() {
        let mut source = ScriptedPieces::new([Shape::O]);
        let playing = GameState::new(&mut source);
        assert!(!contains_text(&render(&playing), "GAME OVER"));
        assert!(contains_text(&render(&playing), "SCORE:"));

        let board = Board::from_ascii(&"....##....\n".repeat(18)).unwrap();
        let mut over = GameState::with_board(board, &mut source);
        over.apply(Command::SoftDrop, &mut source);
        assert!(over.is_game_over());
        assert!(contains_text(&render(&over), "GAME OVER!!"));
    }
}
