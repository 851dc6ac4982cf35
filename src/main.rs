// src/main.rs
mod batch;
mod cli;
mod render;
mod types;
mod wave;
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use crate::batch::{collect_work_items, BatchRunner};
use crate::cli::Cli;
use crate::render::{FigureStyle, ResultRenderer};
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Cli::parse().into_config()?;
    let items = collect_work_items(&config.batches, &config.suffix)
        .context("failed to collect artifacts")?;
    let runner = BatchRunner::new(config.workers).with_fail_fast(config.fail_fast);
    info!("{} artifact(s) on {} worker(s)", items.len(), runner.workers());
    let (panel_width, panel_height) = config.panel_size;
    let mut renderer = ResultRenderer::new(config.limits).with_style(FigureStyle {
        panel_width,
        panel_height,
        ..FigureStyle::default()
    });
    if config.svg {
        renderer = renderer.with_svg_overlay(FigureStyle::overlay());
    }
    let summary = runner.run(&items, |item| renderer.render(&item.input, &item.output))?;
    if let Some(path) = &config.summary {
        summary
            .write_json(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }
    if !summary.is_success() {
        bail!(
            "{} of {} artifact(s) failed, {} skipped",
            summary.failed,
            items.len(),
            summary.skipped
        );
    }
    Ok(())
}
