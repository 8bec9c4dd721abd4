use serde::{Deserialize, Serialize};

/// Points awarded per cleared row.
pub const SCORE_PER_LINE: usize = 100;

/// Largest number of rows a single landing can clear (a vertical I-piece).
pub const MAX_LINES_PER_LANDING: usize = 4;

/// Game statistics tracking score, lines cleared, and piece count.
///
/// Scoring is flat: every landing adds [`SCORE_PER_LINE`] points per row it
/// cleared, with no multi-line, combo or level bonuses. The score therefore
/// starts at 0, never decreases, and is always a multiple of 100.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(0);
/// stats.complete_piece_drop(3);
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.completed_pieces(), 2);
/// assert_eq!(stats.line_cleared_counter()[3], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; MAX_LINES_PER_LANDING + 1],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; MAX_LINES_PER_LANDING + 1],
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the number of pieces that have landed.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns the total number of rows cleared.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of landings by rows cleared.
    ///
    /// Index `n` counts the landings that cleared exactly `n` rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; MAX_LINES_PER_LANDING + 1] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lands.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
        self.score += SCORE_PER_LINE * cleared_lines;
    }
}
