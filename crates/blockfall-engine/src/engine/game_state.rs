use serde::{Deserialize, Serialize};

use crate::{ActivePiece, Board, InvalidStateError};

use super::{
    collision::collides,
    command::{Command, CommandOutcome},
    game_stats::{GameStats, SCORE_PER_LINE},
    piece_source::PieceSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Complete state of one game: board, active piece, statistics and the
/// game-over flag.
///
/// A `GameState` is a plain value owned by whoever runs the game. Every
/// change goes through [`GameState::apply`] (or the by-value [`step`]); the
/// board and piece are only readable from outside.
///
/// Once the game is over the state is frozen: every further command returns
/// [`CommandOutcome::GameOver`] and leaves the state untouched.
///
/// Deserialization runs [`GameState::validate`], so a loaded state is
/// always one the engine could have produced itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    board: Board,
    active: ActivePiece,
    stats: GameStats,
    game_over: bool,
}

impl GameState {
    /// Starts a new game on an empty board.
    pub fn new<S>(source: &mut S) -> Self
    where
        S: PieceSource + ?Sized,
    {
        Self::with_board(Board::EMPTY, source)
    }

    /// Starts a new game on a pre-filled board.
    ///
    /// Complete rows on `board` are cleared first, without scoring. If the
    /// first piece cannot spawn, the game starts already over.
    pub fn with_board<S>(mut board: Board, source: &mut S) -> Self
    where
        S: PieceSource + ?Sized,
    {
        board.clear_lines();
        let active = source.spawn();
        let game_over = collides(&board, &active, 0, 0);
        Self {
            board,
            active,
            stats: GameStats::new(),
            game_over,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else {
            SessionState::Playing
        }
    }

    /// Checks that this state is one the engine can reach.
    ///
    /// - the active piece collides exactly when the game is over
    /// - no row of the board is complete
    /// - the score is [`SCORE_PER_LINE`] times the cleared lines
    pub fn validate(&self) -> Result<(), InvalidStateError> {
        match (collides(&self.board, &self.active, 0, 0), self.game_over) {
            (true, false) => return Err(InvalidStateError::ActivePieceCollides),
            (false, true) => return Err(InvalidStateError::GameOverWithoutCollision),
            _ => {}
        }
        if let Some(row) = self.board.rows().position(|row| row.is_filled()) {
            return Err(InvalidStateError::CompleteRow { row });
        }
        let score = self.stats.score();
        let cleared_lines = self.stats.total_cleared_lines();
        if score != SCORE_PER_LINE * cleared_lines {
            return Err(InvalidStateError::ScoreMismatch {
                score,
                cleared_lines,
            });
        }
        Ok(())
    }

    /// Applies one command and reports what happened.
    ///
    /// `source` is only consulted when the active piece lands and a new piece
    /// has to be spawned.
    pub fn apply<S>(&mut self, command: Command, source: &mut S) -> CommandOutcome
    where
        S: PieceSource + ?Sized,
    {
        if self.game_over {
            return CommandOutcome::GameOver;
        }
        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::Rotate => self.try_rotate(),
            Command::SoftDrop | Command::Tick => self.drop_or_land(source),
            Command::HardDrop => {
                while !collides(&self.board, &self.active, 1, 0) {
                    self.active = self.active.down();
                }
                self.land(source)
            }
        }
    }

    fn try_shift(&mut self, d_col: i32) -> CommandOutcome {
        if collides(&self.board, &self.active, 0, d_col) {
            return CommandOutcome::Blocked;
        }
        self.active = self.active.shifted(0, d_col);
        CommandOutcome::Moved
    }

    fn try_rotate(&mut self) -> CommandOutcome {
        // No wall kicks: a colliding rotation is simply discarded.
        let rotated = self.active.rotated();
        if self.board.is_colliding(&rotated) {
            return CommandOutcome::Blocked;
        }
        self.active = rotated;
        CommandOutcome::Rotated
    }

    fn drop_or_land<S>(&mut self, source: &mut S) -> CommandOutcome
    where
        S: PieceSource + ?Sized,
    {
        if collides(&self.board, &self.active, 1, 0) {
            return self.land(source);
        }
        self.active = self.active.down();
        CommandOutcome::Dropped
    }

    /// Merges the active piece, clears rows, scores, and spawns the next
    /// piece.
    ///
    /// The next piece becomes active either way. When it collides at its
    /// spawn position the game ends, and it is kept overlapping the board so
    /// the final position can still be drawn.
    fn land<S>(&mut self, source: &mut S) -> CommandOutcome
    where
        S: PieceSource + ?Sized,
    {
        self.board.merge(&self.active);
        let cleared_lines = self.board.clear_lines();
        self.stats.complete_piece_drop(cleared_lines);

        self.active = source.spawn();
        self.game_over = collides(&self.board, &self.active, 0, 0);
        CommandOutcome::Landed {
            cleared_lines,
            game_over: self.game_over,
        }
    }
}

#[derive(Deserialize)]
struct RawGameState {
    board: Board,
    active: ActivePiece,
    stats: GameStats,
    game_over: bool,
}

impl TryFrom<RawGameState> for GameState {
    type Error = InvalidStateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let RawGameState {
            board,
            active,
            stats,
            game_over,
        } = raw;
        let state = Self {
            board,
            active,
            stats,
            game_over,
        };
        state.validate()?;
        Ok(state)
    }
}

/// Applies `command` to `state` and returns the resulting state together
/// with the outcome.
///
/// This is the by-value form of [`GameState::apply`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, CommandOutcome, GameState, ScriptedPieces, Shape, step};
///
/// let mut pieces = ScriptedPieces::new([Shape::O]);
/// let state = GameState::new(&mut pieces);
///
/// let (state, outcome) = step(state, Command::MoveLeft, &mut pieces);
/// assert_eq!(outcome, CommandOutcome::Moved);
/// assert_eq!(state.active_piece().col(), 3);
/// ```
pub fn step<S>(
    mut state: GameState,
    command: Command,
    source: &mut S,
) -> (GameState, CommandOutcome)
where
    S: PieceSource + ?Sized,
{
    let outcome = state.apply(command, source);
    (state, outcome)
}
