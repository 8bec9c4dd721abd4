use std::iter;

use blockfall_engine::{ActivePiece, BOARD_HEIGHT, BOARD_WIDTH, Board};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::{Cell, CellDisplay};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active_piece: Option<ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, piece: ActivePiece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Board cells with the active piece drawn over them.
    fn cells(&self) -> [[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        let mut cells = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for (cell_row, board_row) in iter::zip(&mut cells, self.board.rows()) {
            for (cell, occupied) in iter::zip(cell_row, board_row.cells()) {
                if occupied {
                    *cell = Cell::Landed;
                }
            }
        }
        if let Some(piece) = self.active_piece {
            for (row, col) in piece.occupied_cells() {
                if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col))
                    && row < BOARD_HEIGHT
                    && col < BOARD_WIDTH
                {
                    cells[row][col] = Cell::Active(piece.shape());
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ BOARD_HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ BOARD_WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.cells()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_cell(cell).render(grid_cell, buf);
            }
        }
    }
}
