use std::time::Duration;

use blockfall_engine::RandomPieces;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Milliseconds between automatic drops
    #[clap(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    tick_interval_ms: u64,
    /// Seed for the piece generator (random if omitted)
    #[clap(long)]
    seed: Option<u64>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        tick_interval_ms,
        seed,
    } = arg;

    let pieces = seed.map_or_else(RandomPieces::new, RandomPieces::seeded);
    let mut app = PlayApp::new(pieces, Duration::from_millis(*tick_interval_ms));
    Tui::new().run(&mut app)?;

    let stats = app.state().stats();
    println!(
        "Score: {} ({} lines, {} pieces)",
        stats.score(),
        stats.total_cleared_lines(),
        stats.completed_pieces()
    );
    Ok(())
}
