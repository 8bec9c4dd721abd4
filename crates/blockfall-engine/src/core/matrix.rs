use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ParseGridError;

/// Largest side of any piece matrix.
pub const MAX_MATRIX_SIZE: usize = 4;

/// Occupancy grid of a piece in one orientation.
///
/// A matrix is `height` rows by `width` columns (each at most
/// [`MAX_MATRIX_SIZE`]). Matrices are values: rotation returns a new matrix
/// and never touches the shape templates it was derived from.
///
/// # Example
///
/// ```
/// use blockfall_engine::Shape;
///
/// let t = Shape::T.template();
/// assert_eq!((t.height(), t.width()), (2, 3));
///
/// let rotated = t.rotated_cw();
/// assert_eq!((rotated.height(), rotated.width()), (3, 2));
/// assert_eq!(rotated.to_string(), "#.\n##\n#.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    height: u8,
    width: u8,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Serialize for Matrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: [".#.", "###"] (top row first)
        serializer.collect_seq((0..self.height()).map(|row| self.row_string(row)))
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Self::from_rows(rows.iter().map(String::as_str)).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                writeln!(f)?;
            }
            f.write_str(&self.row_string(row))?;
        }
        Ok(())
    }
}

impl Matrix {
    /// Builds a matrix from a const table of `0`/`1` cells.
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) const fn from_bits<const H: usize, const W: usize>(bits: [[u8; W]; H]) -> Self {
        assert!(H > 0 && H <= MAX_MATRIX_SIZE);
        assert!(W > 0 && W <= MAX_MATRIX_SIZE);
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = bits[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            height: H as u8,
            width: W as u8,
            cells,
        }
    }

    /// Parses a matrix from textual rows of `'#'` (occupied) and `'.'` (empty).
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, ParseGridError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let rows: Vec<&str> = rows.into_iter().collect();
        if rows.is_empty() || rows.len() > MAX_MATRIX_SIZE {
            return Err(ParseGridError::RowCount {
                expected: MAX_MATRIX_SIZE,
                actual: rows.len(),
            });
        }
        let width = rows[0].chars().count();
        if width == 0 || width > MAX_MATRIX_SIZE {
            return Err(ParseGridError::RowWidth {
                row: 0,
                expected: MAX_MATRIX_SIZE,
                actual: width,
            });
        }

        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, text) in rows.iter().enumerate() {
            let actual = text.chars().count();
            if actual != width {
                return Err(ParseGridError::RowWidth {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, ch) in text.chars().enumerate() {
                cells[y][x] = match ch {
                    '#' => true,
                    '.' => false,
                    cell => return Err(ParseGridError::InvalidCell { row: y, cell }),
                };
            }
        }
        Ok(Self {
            height: rows.len() as u8,
            width: width as u8,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Returns whether the cell at `(row, col)` is occupied.
    ///
    /// Cells outside the matrix are unoccupied.
    #[must_use]
    pub const fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Returns an iterator of occupied `(row, col)` cells, top to bottom and
    /// left to right.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width()).filter_map(move |col| self.cells[row][col].then_some((row, col)))
        })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// An `R×C` matrix becomes `C×R`: cell `(i, j)` of the result is cell
    /// `(R - 1 - j, i)` of the source.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let height = self.width();
        let width = self.height();
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        let mut i = 0;
        while i < height {
            let mut j = 0;
            while j < width {
                cells[i][j] = self.cells[self.height() - 1 - j][i];
                j += 1;
            }
            i += 1;
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }

    fn row_string(&self, row: usize) -> String {
        (0..self.width())
            .map(|col| if self.cells[row][col] { '#' } else { '.' })
            .collect()
    }
}
