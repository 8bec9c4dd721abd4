//! Game rules and state transitions.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameState`] - Board, active piece, statistics and game-over flag
//! - [`Command`] / [`CommandOutcome`] - Inputs accepted by the state and what they did
//! - [`PieceSource`] - Where new pieces come from ([`RandomPieces`], [`ScriptedPieces`])
//! - [`GameStats`] - Score and line counters
//! - [`collides`] - The single collision rule used by every move
//!
//! # Game Flow
//!
//! 1. Create a [`GameState`], which spawns the first piece
//! 2. Apply player commands (move, rotate, drop) and timer ticks
//! 3. When a piece cannot move down it lands: it is merged into the board,
//!    complete rows are cleared, and the score grows by 100 per row
//! 4. A new piece spawns; if it collides immediately the game is over
//!
//! The engine has no clock. Ticks are ordinary [`Command::Tick`] inputs
//! issued by whoever runs the game.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, GameState, RandomPieces};
//!
//! let mut pieces = RandomPieces::seeded(42);
//! let mut state = GameState::new(&mut pieces);
//!
//! state.apply(Command::MoveLeft, &mut pieces);
//! state.apply(Command::Rotate, &mut pieces);
//! let outcome = state.apply(Command::HardDrop, &mut pieces);
//!
//! assert!(outcome.is_landed());
//! assert_eq!(state.stats().completed_pieces(), 1);
//! ```

pub use self::{collision::*, command::*, game_state::*, game_stats::*, piece_source::*};

mod collision;
mod command;
mod game_state;
mod game_stats;
mod piece_source;
