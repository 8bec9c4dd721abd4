use serde::{Deserialize, Serialize};

use super::{BOARD_WIDTH, matrix::Matrix, shape::Shape};

/// The falling, player-controlled piece.
///
/// `row`/`col` locate the top-left corner of the piece's matrix on the board.
/// Pieces are immutable values: movement and rotation return new pieces, and
/// whether the result fits on the board is decided by the caller.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Shape};
///
/// let piece = ActivePiece::new(Shape::O);
/// assert_eq!((piece.row(), piece.col()), (0, 4));
///
/// let moved = piece.left().down();
/// assert_eq!((moved.row(), moved.col()), (1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ActivePiece {
    shape: Shape,
    matrix: Matrix,
    row: i32,
    col: i32,
}

impl ActivePiece {
    /// Creates a piece of the given shape at its spawn position.
    ///
    /// The piece starts unrotated at row 0, horizontally centered using the
    /// template width: `col = BOARD_WIDTH / 2 - template_width / 2`.
    #[must_use]
    pub const fn new(shape: Shape) -> Self {
        Self {
            shape,
            matrix: shape.template(),
            row: 0,
            col: spawn_col(shape),
        }
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub const fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Returns an iterator of the board cells `(row, col)` this piece covers.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix
            .occupied_cells()
            .map(move |(dr, dc)| (self.row + dr as i32, self.col + dc as i32))
    }

    /// Returns this piece moved by `d_row` rows and `d_col` columns.
    #[must_use]
    pub const fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            shape: self.shape,
            matrix: self.matrix,
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.shifted(0, -1)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.shifted(1, 0)
    }

    /// Returns the candidate matrix for a clockwise rotation.
    ///
    /// This does not check for collisions.
    #[must_use]
    pub const fn rotated_matrix(&self) -> Matrix {
        self.matrix.rotated_cw()
    }

    /// Returns this piece with its matrix replaced.
    #[must_use]
    pub const fn with_matrix(&self, matrix: Matrix) -> Self {
        Self {
            shape: self.shape,
            matrix,
            row: self.row,
            col: self.col,
        }
    }

    /// Returns this piece rotated 90° clockwise about its top-left corner.
    #[must_use]
    pub const fn rotated(&self) -> Self {
        self.with_matrix(self.rotated_matrix())
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn spawn_col(shape: Shape) -> i32 {
    (BOARD_WIDTH / 2 - shape.template().width() / 2) as i32
}
