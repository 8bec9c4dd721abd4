use crate::{ActivePiece, Board};

/// Checks whether `piece`, moved by `d_row` rows and `d_col` columns, would
/// collide with the board.
///
/// A collision happens when any occupied cell of the piece's matrix lands
/// below the floor, beyond either wall, or on a filled board cell.
#[must_use]
pub fn collides(board: &Board, piece: &ActivePiece, d_row: i32, d_col: i32) -> bool {
    board.is_colliding(&piece.shifted(d_row, d_col))
}

#[cfg(test)]
mod tests {
    use crate::{BOARD_HEIGHT, BOARD_WIDTH, Shape};

    use super::*;

    fn fixture_board() -> Board {
        Board::from_ascii(
            "
            ..........
            ....#.....
            ...###....
            #........#
            ##.####.##
            ",
        )
        .unwrap()
    }

    fn in_bounds(row: i32, col: i32) -> bool {
        (0..BOARD_HEIGHT as i32).contains(&row) && (0..BOARD_WIDTH as i32).contains(&col)
    }

    #[test]
    fn test_collides_matches_cell_rule_everywhere() {
        let board = fixture_board();
        for shape in Shape::ALL {
            let mut piece = ActivePiece::new(shape);
            for _ in 0..4 {
                for d_row in -2..=22 {
                    for d_col in -6..=12 {
                        let moved = piece.shifted(d_row, d_col);
                        let expected = moved.occupied_cells().any(|(row, col)| {
                            !in_bounds(row, col)
                                || board.row(row as usize).is_cell_occupied(col as usize)
                        });
                        assert_eq!(
                            collides(&board, &piece, d_row, d_col),
                            expected,
                            "{shape:?} {:?} at ({}, {})",
                            piece.matrix(),
                            moved.row(),
                            moved.col()
                        );
                    }
                }
                piece = piece.rotated();
            }
        }
    }

    #[test]
    fn test_collides_at_walls_and_floor() {
        let board = Board::EMPTY;
        let piece = ActivePiece::new(Shape::I); // cols 3..=6
        assert!(!collides(&board, &piece, 0, -3));
        assert!(collides(&board, &piece, 0, -4));
        assert!(!collides(&board, &piece, 0, 3));
        assert!(collides(&board, &piece, 0, 4));
        assert!(!collides(&board, &piece, 19, 0));
        assert!(collides(&board, &piece, 20, 0));
    }

    #[test]
    fn test_collides_with_filled_cells() {
        let board = fixture_board();
        let piece = ActivePiece::new(Shape::O); // cols 4..=5
        // Row 16 holds a single block at col 4.
        assert!(!collides(&board, &piece, 14, 0));
        assert!(collides(&board, &piece, 15, 0));
        assert!(!collides(&board, &piece, 15, 2));
    }
}
