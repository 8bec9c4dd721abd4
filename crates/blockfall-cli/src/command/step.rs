use std::path::PathBuf;

use blockfall_engine::{
    Command, CommandOutcome, GameState, PieceSource, RandomPieces, ScriptedPieces, Shape,
};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StepArg {
    /// Game state to continue from (JSON); starts a new game if omitted
    #[clap(long)]
    pub(super) state: Option<PathBuf>,
    /// Seed for the piece generator (random if omitted)
    #[clap(long)]
    pub(super) seed: Option<u64>,
    /// Fixed, repeating piece sequence such as `I,O,T` (overrides --seed)
    #[clap(long, value_delimiter = ',')]
    pub(super) pieces: Vec<Shape>,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    pub(super) output: Option<PathBuf>,
    /// Commands to apply in order: move-left, move-right, rotate, soft-drop, tick, hard-drop
    pub(super) commands: Vec<Command>,
}

/// Result of one `step` invocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct StepReport {
    /// One outcome per applied command, in order.
    outcomes: Vec<CommandOutcome>,
    /// State after the last command.
    state: GameState,
}

pub(crate) fn run(arg: &StepArg) -> anyhow::Result<()> {
    let StepArg {
        state,
        seed,
        pieces,
        output,
        commands,
    } = arg;

    let mut source = piece_source(*seed, pieces);
    let state = match state {
        Some(path) => util::read_game_state_file(path)?,
        None => GameState::new(&mut source),
    };

    let report = run_commands(state, commands, &mut source);
    Output::save_json(&report, output.clone())?;
    Ok(())
}

fn piece_source(seed: Option<u64>, pieces: &[Shape]) -> Box<dyn PieceSource> {
    if !pieces.is_empty() {
        return Box::new(ScriptedPieces::new(pieces.iter().copied()));
    }
    match seed {
        Some(seed) => Box::new(RandomPieces::seeded(seed)),
        None => Box::new(RandomPieces::new()),
    }
}

fn run_commands<S>(mut state: GameState, commands: &[Command], source: &mut S) -> StepReport
where
    S: PieceSource + ?Sized,
{
    let outcomes = commands
        .iter()
        .map(|&command| state.apply(command, source))
        .collect();
    StepReport { outcomes, state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_commands_collects_outcomes() {
        let mut source = ScriptedPieces::new([Shape::O, Shape::T]);
        let state = GameState::new(&mut source);
        let report = run_commands(
            state,
            &[Command::MoveLeft, Command::Rotate, Command::HardDrop],
            &mut source,
        );

        assert_eq!(
            report.outcomes,
            vec![
                CommandOutcome::Moved,
                CommandOutcome::Rotated,
                CommandOutcome::Landed {
                    cleared_lines: 0,
                    game_over: false,
                },
            ]
        );
        assert!(report.state.board().is_occupied(19, 3));
        assert!(report.state.board().is_occupied(18, 4));
        assert_eq!(report.state.active_piece().shape(), Shape::T);
    }

    #[test]
    fn test_report_continues_from_serialized_state() {
        let mut source = ScriptedPieces::new([Shape::I]);
        let state = GameState::new(&mut source);
        let first = run_commands(state, &[Command::HardDrop], &mut source);

        let json = serde_json::to_string(&first.state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        let second = run_commands(restored, &[Command::HardDrop], &mut source);

        assert_eq!(second.state.stats().completed_pieces(), 2);
        assert!(second.state.board().is_occupied(18, 3));
        assert!(second.state.board().is_occupied(19, 6));
    }

    #[test]
    fn test_report_json_layout() {
        let mut source = ScriptedPieces::new([Shape::O]);
        let state = GameState::new(&mut source);
        let report = run_commands(state, &[Command::Tick], &mut source);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["outcomes"][0]["outcome"], "dropped");
        assert_eq!(value["state"]["active"]["row"], 1);
        assert_eq!(value["state"]["stats"]["score"], 0);
    }

    #[test]
    fn test_scripted_pieces_override_seed() {
        let mut source = piece_source(Some(1), &[Shape::Z]);
        for _ in 0..5 {
            assert_eq!(source.next_shape(), Shape::Z);
        }

        let mut a = piece_source(Some(9), &[]);
        let mut b = piece_source(Some(9), &[]);
        for _ in 0..20 {
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }
}
