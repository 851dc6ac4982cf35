// src/cli.rs
use std::path::PathBuf;
use anyhow::{bail, Result};
use clap::Parser;
use crate::batch::{SubBatch, LARGE_SUFFIX};
use crate::render::FigureStyle;
use crate::types::RenderLimits;
/// Plots every saved resampler test result found under the given roots.
#[derive(Parser, Debug)]
#[command(name = "resample-inspect", version)]
pub struct Cli {
    /// Number of parallel workers (1 renders sequentially).
    #[arg(short = 'j', long = "workers-amt")]
    pub workers_amt: Option<usize>,
    /// Base directory the plot paths are resolved against.
    #[arg(long = "plot-input-base")]
    pub plot_input_base: Option<PathBuf>,
    /// Base directory figures are mirrored into (defaults to beside the inputs).
    #[arg(long = "plot-output-base")]
    pub plot_output_base: Option<PathBuf>,
    /// Sub-batch root, repeatable.
    #[arg(
        short = 'p',
        long = "plot-path",
        aliases = ["plot-path1", "plot-path2", "plot-path3", "plot-path4", "plot-path5"]
    )]
    pub plot_paths: Vec<PathBuf>,
    /// Only files whose name ends with this are rendered.
    #[arg(long, default_value = LARGE_SUFFIX)]
    pub suffix: String,
    /// Also write a high resolution `.svg` overlay of reference vs resampled wave.
    #[arg(long)]
    pub svg: bool,
    /// Sample cap for cross-rate and multi-channel views.
    #[arg(long, default_value_t = RenderLimits::default().max_wave_len)]
    pub max_wave_len: usize,
    /// Sample cap for single-channel same-rate views.
    #[arg(long, default_value_t = RenderLimits::default().single_channel_cap)]
    pub single_channel_cap: usize,
    /// Width of one figure panel in pixels.
    #[arg(long, default_value_t = FigureStyle::default().panel_width)]
    pub panel_width: u32,
    /// Height of one figure panel in pixels.
    #[arg(long, default_value_t = FigureStyle::default().panel_height)]
    pub panel_height: u32,
    /// Stop starting new artifacts after the first failure.
    #[arg(long)]
    pub fail_fast: bool,
    /// Write the batch summary as JSON to this file.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}
/// Everything a run needs, resolved from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    pub batches: Vec<SubBatch>,
    pub suffix: String,
    pub workers: usize,
    pub limits: RenderLimits,
    pub svg: bool,
    /// Panel width and height of the PNG figure.
    pub panel_size: (u32, u32),
    pub fail_fast: bool,
    pub summary: Option<PathBuf>,
}
impl Cli {
    pub fn into_config(self) -> Result<BatchConfig> {
        let workers = match self.workers_amt {
            Some(0) => bail!("--workers-amt must be at least 1"),
            Some(n) => n,
            None => rayon::current_num_threads(),
        };
        if self.panel_width == 0 || self.panel_height == 0 {
            bail!("--panel-width and --panel-height must be at least 1");
        }
        let batches = resolve_roots(
            self.plot_input_base.as_deref(),
            self.plot_output_base.as_deref(),
            &self.plot_paths,
        )?;
        Ok(BatchConfig {
            batches,
            suffix: self.suffix,
            workers,
            limits: RenderLimits {
                max_wave_len: self.max_wave_len,
                single_channel_cap: self.single_channel_cap,
            },
            svg: self.svg,
            panel_size: (self.panel_width, self.panel_height),
            fail_fast: self.fail_fast,
            summary: self.summary,
        })
    }
}
/// Pairs every plot path with its output directory.
///
/// `base/P` is read and `out_base/P` written; without an output base figures land
/// beside the inputs. With no plot paths the input base is the only root.
pub fn resolve_roots(
    input_base: Option<&std::path::Path>,
    output_base: Option<&std::path::Path>,
    plot_paths: &[PathBuf],
) -> Result<Vec<SubBatch>> {
    if plot_paths.is_empty() {
        let Some(base) = input_base else {
            bail!("nothing to plot: pass --plot-path or --plot-input-base");
        };
        return Ok(vec![SubBatch {
            input_root: base.to_path_buf(),
            output_root: output_base.unwrap_or(base).to_path_buf(),
        }]);
    }
    Ok(plot_paths
        .iter()
        .map(|p| {
            let input_root = input_base.map_or_else(|| p.clone(), |base| base.join(p));
            let output_root =
                output_base.map_or_else(|| input_root.clone(), |out| out.join(p));
            SubBatch {
                input_root,
                output_root,
            }
        })
        .collect())
}
