use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ParseGridError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, piece::ActivePiece};

// Bit N corresponds to column N.
const FULL_ROW_MASK: u16 = (1 << BOARD_WIDTH) - 1;

const FILLED_CHAR: char = '#';
const EMPTY_CHAR: char = '.';

/// Single row of the board.
///
/// Stores one row as a 16-bit bitmask where bit `N` is set when column `N` is
/// filled. Bits above [`BOARD_WIDTH`] are always zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardRow {
    bits: u16,
}

impl BoardRow {
    pub const EMPTY: Self = Self { bits: 0 };
    pub const FULL: Self = Self {
        bits: FULL_ROW_MASK,
    };

    /// Checks if every cell in the row is filled.
    #[inline]
    #[must_use]
    pub fn is_filled(self) -> bool {
        self.bits == FULL_ROW_MASK
    }

    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Checks if the cell at the given column is filled.
    ///
    /// Columns outside the board are reported as empty; bounds are the
    /// caller's concern (see [`Board::is_occupied`]).
    #[inline]
    #[must_use]
    pub fn is_cell_occupied(self, col: usize) -> bool {
        col < BOARD_WIDTH && (self.bits & (1 << col)) != 0
    }

    #[inline]
    fn occupy_cell(&mut self, col: usize) {
        self.bits |= 1 << col;
    }

    /// Iterates over the cells of the row from left to right.
    #[inline]
    pub fn cells(self) -> impl Iterator<Item = bool> {
        (0..BOARD_WIDTH).map(move |col| self.is_cell_occupied(col))
    }

    fn parse(row: usize, text: &str) -> Result<Self, ParseGridError> {
        let mut parsed = Self::EMPTY;
        let mut width = 0;
        for (col, ch) in text.chars().enumerate() {
            match ch {
                FILLED_CHAR if col < BOARD_WIDTH => parsed.occupy_cell(col),
                FILLED_CHAR | EMPTY_CHAR => {}
                cell => return Err(ParseGridError::InvalidCell { row, cell }),
            }
            width += 1;
        }
        if width != BOARD_WIDTH {
            return Err(ParseGridError::RowWidth {
                row,
                expected: BOARD_WIDTH,
                actual: width,
            });
        }
        Ok(parsed)
    }
}

impl fmt::Display for BoardRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for filled in self.cells() {
            let ch = if filled { FILLED_CHAR } else { EMPTY_CHAR };
            fmt::Write::write_char(f, ch)?;
        }
        Ok(())
    }
}

/// The grid of landed cells.
///
/// The board is [`BOARD_HEIGHT`] rows by [`BOARD_WIDTH`] columns. Row 0 is the
/// top of the board and column 0 is its left edge. A filled cell stays filled
/// until its row is completed and cleared.
///
/// The board knows nothing about the active piece; it is only written by
/// [`Board::merge`] and [`Board::clear_lines`].
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::EMPTY;
/// for col in 0..Board::WIDTH {
///     board.occupy(Board::HEIGHT - 1, col);
/// }
/// assert_eq!(board.clear_lines(), 1);
/// assert_eq!(board, Board::EMPTY);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: ["..........", ..., "####..####"] (top row first)
        serializer.collect_seq(self.rows.iter().map(ToString::to_string))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        if rows.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(ParseGridError::RowCount {
                expected: BOARD_HEIGHT,
                actual: rows.len(),
            }));
        }
        Self::from_rows(rows.iter().map(String::as_str)).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    /// Returns the row at the given index (0 is the top row).
    #[must_use]
    pub fn row(&self, row: usize) -> BoardRow {
        self.rows[row]
    }

    /// Returns an iterator over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = BoardRow> + '_ {
        self.rows.iter().copied()
    }

    /// Checks whether a cell is blocked.
    ///
    /// Any coordinate outside the board counts as blocked, so walls and the
    /// floor behave like filled cells for collision purposes.
    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        match cell_index(row, col) {
            Some((row, col)) => self.rows[row].is_cell_occupied(col),
            None => true,
        }
    }

    /// Marks a cell as filled.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the board.
    pub fn occupy(&mut self, row: usize, col: usize) {
        assert!(
            row < BOARD_HEIGHT && col < BOARD_WIDTH,
            "cell ({row}, {col}) is outside the {BOARD_HEIGHT}x{BOARD_WIDTH} board"
        );
        self.rows[row].occupy_cell(col);
    }

    /// Checks if any occupied cell of the piece is blocked on this board.
    #[must_use]
    pub fn is_colliding(&self, piece: &ActivePiece) -> bool {
        piece
            .occupied_cells()
            .any(|(row, col)| self.is_occupied(row, col))
    }

    /// Locks a piece onto the board by filling its occupied cells.
    ///
    /// The caller must have checked that the piece does not collide at its
    /// current position.
    ///
    /// # Panics
    ///
    /// Panics if any occupied cell of the piece lies outside the board or on a
    /// cell that is already filled.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (row, col) in piece.occupied_cells() {
            let Some((r, c)) = cell_index(row, col) else {
                panic!("cannot merge cell ({row}, {col}): outside the board");
            };
            assert!(
                !self.rows[r].is_cell_occupied(c),
                "cannot merge cell ({row}, {col}): already filled"
            );
            self.occupy(r, c);
        }
    }

    /// Clears completed rows and returns the number of rows cleared.
    ///
    /// Rows are scanned from top to bottom. Whenever row `i` is complete, rows
    /// `0..i` shift down by one into `1..=i` and row 0 becomes empty. Because
    /// the shift only moves rows that were already scanned, any number of
    /// complete rows (contiguous or not) is cleared in a single call.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in 0..BOARD_HEIGHT {
            if self.rows[y].is_filled() {
                self.rows.copy_within(0..y, 1);
                self.rows[0] = BoardRow::EMPTY;
                count += 1;
            }
        }
        count
    }

    /// Returns a copy of the board with completed rows cleared, together with
    /// the number of rows cleared.
    #[must_use]
    pub fn with_lines_cleared(&self) -> (Self, usize) {
        let mut board = self.clone();
        let count = board.clear_lines();
        (board, count)
    }

    /// Creates a board from exactly [`BOARD_HEIGHT`] textual rows.
    ///
    /// Each row must be [`BOARD_WIDTH`] characters of `'#'` (filled) or `'.'`
    /// (empty), top row first.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, ParseGridError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let rows: Vec<&str> = rows.into_iter().collect();
        if rows.len() != BOARD_HEIGHT {
            return Err(ParseGridError::RowCount {
                expected: BOARD_HEIGHT,
                actual: rows.len(),
            });
        }
        let mut board = Self::EMPTY;
        for (y, text) in rows.into_iter().enumerate() {
            board.rows[y] = BoardRow::parse(y, text)?;
        }
        Ok(board)
    }

    /// Creates a board from ASCII art.
    ///
    /// `'#'` is a filled cell and `'.'` an empty one. Blank lines and
    /// surrounding whitespace are ignored. The given rows describe the
    /// *bottom* of the board; rows above them are empty.
    ///
    /// ```
    /// use blockfall_engine::Board;
    ///
    /// let board = Board::from_ascii(
    ///     "
    ///     ....##....
    ///     .###..####
    ///     ",
    /// )
    /// .unwrap();
    /// assert!(board.is_occupied(18, 4));
    /// assert!(!board.is_occupied(19, 4));
    /// assert!(!board.is_occupied(19, 0));
    /// assert!(board.is_occupied(19, 1));
    /// ```
    pub fn from_ascii(art: &str) -> Result<Self, ParseGridError> {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() > BOARD_HEIGHT {
            return Err(ParseGridError::RowCount {
                expected: BOARD_HEIGHT,
                actual: lines.len(),
            });
        }
        let top = BOARD_HEIGHT - lines.len();
        let mut board = Self::EMPTY;
        for (i, text) in lines.into_iter().enumerate() {
            board.rows[top + i] = BoardRow::parse(top + i, text)?;
        }
        Ok(board)
    }
}

/// Converts signed board coordinates into array indices, or `None` when the
/// cell lies outside the board.
fn cell_index(row: i32, col: i32) -> Option<(usize, usize)> {
    let row = usize::try_from(row).ok().filter(|&r| r < BOARD_HEIGHT)?;
    let col = usize::try_from(col).ok().filter(|&c| c < BOARD_WIDTH)?;
    Some((row, col))
}
