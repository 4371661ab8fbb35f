mod chart;
mod color;
mod config;
mod data;
mod pipeline;
mod preview;
mod stats;

use anyhow::{Context, Result};

use config::Config;

fn main() -> Result<()> {
    env_logger::init();

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = Config::load(&cwd)?;
    log::debug!("{config:?}");

    pipeline::run(&config)
}
