//! Application entry point for the RRT viewer.
//!
//! Usage: `rrt_view [config.toml]`. Without a path the default build
//! parameters are used. Set `RUST_LOG=debug` to log every iteration.

mod viewer;

use anyhow::{Context, anyhow};
use rrt_core::Config;
use viewer::Viewer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            Config::from_file(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => Config::default(),
    };
    let viewer = Viewer::new(cfg).context("building tree")?;

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "RRT Build",
        options,
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
