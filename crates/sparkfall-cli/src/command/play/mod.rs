use anyhow::Context as _;
use ratatui_runtime::Runtime;
use sparkfall_engine::{GameConfig, GameLoop};

use self::app::PlayApp;

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for a reproducible shape and particle sequence
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Frame rate cap (frames per second)
    #[clap(long, default_value_t = 60.0, value_parser = parse_fps)]
    pub(crate) fps: f64,
}

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("frame rate must be positive, got {s}"))
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, fps } = arg;

    let config = GameConfig::default();
    let game = match seed {
        Some(seed) => GameLoop::with_seed(config, *seed),
        None => GameLoop::new(config),
    }
    .context("invalid game configuration")?;

    let mut app = PlayApp::new(game, *fps);
    Runtime::new()
        .run(&mut app)
        .context("terminal session failed")?;

    let stats = app.stats();
    eprintln!(
        "Session ended: {} pieces locked, {} lines cleared, {} restarts, {} frames",
        stats.locked_pieces, stats.cleared_lines, stats.restarts, stats.frames
    );
    Ok(())
}
