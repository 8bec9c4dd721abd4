use clap::{Parser, Subcommand};

use self::{play::PlayArg, step::StepArg};

mod play;
mod step;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Apply commands to a saved game state and print the result as JSON
    Step(#[clap(flatten)] StepArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Step(arg) => step::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args_are_consistent() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_step_mode() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "step",
            "--seed",
            "3",
            "--pieces",
            "O,i",
            "left",
            "hard-drop",
        ])
        .unwrap();
        let Some(Mode::Step(arg)) = args.mode else {
            panic!("expected step mode");
        };
        assert_eq!(arg.seed, Some(3));
        assert_eq!(
            arg.pieces,
            vec![blockfall_engine::Shape::O, blockfall_engine::Shape::I]
        );
        assert_eq!(
            arg.commands,
            vec![
                blockfall_engine::Command::MoveLeft,
                blockfall_engine::Command::HardDrop
            ]
        );
    }

    #[test]
    fn test_reject_unknown_command() {
        let result = CommandArgs::try_parse_from(["blockfall", "step", "jump"]);
        assert!(result.is_err());
    }
}
