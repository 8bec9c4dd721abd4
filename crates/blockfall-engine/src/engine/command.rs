use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseCommandError;

/// A discrete player or timer input applied to a [`GameState`](crate::GameState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Move the piece one column left.
    MoveLeft,
    /// Move the piece one column right.
    MoveRight,
    /// Rotate the piece 90° clockwise (discarded if it would collide).
    Rotate,
    /// Move the piece one row down, landing it if it cannot move.
    SoftDrop,
    /// Automatic gravity step; behaves exactly like [`Command::SoftDrop`].
    Tick,
    /// Drop the piece as far as it goes and land it.
    HardDrop,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
        Command::Tick,
        Command::HardDrop,
    ];

    /// Returns the kebab-case name of this command.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Command::MoveLeft => "move-left",
            Command::MoveRight => "move-right",
            Command::Rotate => "rotate",
            Command::SoftDrop => "soft-drop",
            Command::Tick => "tick",
            Command::HardDrop => "hard-drop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses a command name (case-insensitive).
    ///
    /// Accepts the kebab-case names plus the short aliases `left`, `right`,
    /// `down` and `drop`.
    ///
    /// ```
    /// use blockfall_engine::Command;
    ///
    /// assert_eq!("move-left".parse(), Ok(Command::MoveLeft));
    /// assert_eq!("Down".parse(), Ok(Command::SoftDrop));
    /// assert!("jump".parse::<Command>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.to_ascii_lowercase().as_str() {
            "move-left" | "left" => Command::MoveLeft,
            "move-right" | "right" => Command::MoveRight,
            "rotate" => Command::Rotate,
            "soft-drop" | "down" => Command::SoftDrop,
            "tick" => Command::Tick,
            "hard-drop" | "drop" => Command::HardDrop,
            _ => return Err(ParseCommandError { name: s.to_owned() }),
        };
        Ok(command)
    }
}

/// What a command did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum CommandOutcome {
    /// The piece moved left or right.
    Moved,
    /// The piece rotated.
    Rotated,
    /// The piece moved down one row.
    Dropped,
    /// The move would collide; nothing changed.
    Blocked,
    /// The piece was merged into the board.
    Landed {
        /// Rows cleared by this landing.
        cleared_lines: usize,
        /// Whether the next piece could not spawn.
        game_over: bool,
    },
    /// The game is already over; nothing changed.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>(), Ok(command));
            assert_eq!(command.to_string(), command.as_str());
        }
    }

    #[test]
    fn test_command_aliases() {
        assert_eq!("LEFT".parse(), Ok(Command::MoveLeft));
        assert_eq!("right".parse(), Ok(Command::MoveRight));
        assert_eq!("down".parse(), Ok(Command::SoftDrop));
        assert_eq!("drop".parse(), Ok(Command::HardDrop));
        assert_eq!(
            "hold".parse::<Command>(),
            Err(ParseCommandError {
                name: "hold".to_owned()
            })
        );
    }

    #[test]
    fn test_command_serialization() {
        assert_eq!(
            serde_json::to_string(&Command::SoftDrop).unwrap(),
            "\"soft-drop\""
        );
        assert_eq!(
            serde_json::from_str::<Command>("\"move-right\"").unwrap(),
            Command::MoveRight
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let landed = CommandOutcome::Landed {
            cleared_lines: 2,
            game_over: false,
        };
        let serialized = serde_json::to_string(&landed).unwrap();
        assert_eq!(
            serialized,
            r#"{"outcome":"landed","cleared_lines":2,"game_over":false}"#
        );
        assert_eq!(
            serde_json::from_str::<CommandOutcome>(&serialized).unwrap(),
            landed
        );
        assert_eq!(
            serde_json::to_string(&CommandOutcome::Blocked).unwrap(),
            r#"{"outcome":"blocked"}"#
        );
    }
}
