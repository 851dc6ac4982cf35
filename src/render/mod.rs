// src/render/mod.rs
pub mod layout;
pub mod plot;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use serde::Serialize;
use crate::types::RenderLimits;
use crate::wave::{ErrorStats, InspectError, WaveformArtifact};
pub use layout::{plan_figure, plan_overlay};
pub use plot::{render_figure_png, render_figure_svg, FigureStyle};
/// What one artifact produced.
#[derive(Clone, Debug, Serialize)]
pub struct RenderReport {
    pub outputs: Vec<PathBuf>,
    pub error_stats: Vec<ErrorStats>,
}
/// `<output>.<ext>`, keeping the whole file name
/// (names like `sine:large` have no extension to replace).
pub fn output_path(output: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
fn write_file(path: &Path, bytes: impl AsRef<[u8]>) -> Result<(), InspectError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| InspectError::io(parent, e))?;
    }
    fs::write(path, bytes).map_err(|e| InspectError::io(path, e))
}
/// Turns one artifact file into its comparison figures.
#[derive(Clone, Debug, Default)]
pub struct ResultRenderer {
    limits: RenderLimits,
    style: FigureStyle,
    overlay_style: Option<FigureStyle>,
}
impl ResultRenderer {
    pub fn new(limits: RenderLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }
    pub fn with_style(mut self, style: FigureStyle) -> Self {
        self.style = style;
        self
    }
    /// Also write the dense `.svg` overlay for artifacts that carry a reference wave.
    pub fn with_svg_overlay(mut self, style: FigureStyle) -> Self {
        self.overlay_style = Some(style);
        self
    }
    pub fn render(&self, input: &Path, output: &Path) -> Result<RenderReport, InspectError> {
        info!("Working on {}", input.display());
        let artifact = WaveformArtifact::load(input)?;
        self.render_artifact(&artifact, output)
    }
    pub fn render_artifact(
        &self,
        artifact: &WaveformArtifact,
        output: &Path,
    ) -> Result<RenderReport, InspectError> {
        let mut outputs = Vec::new();
        if let Some(overlay_style) = &self.overlay_style {
            if let Some(plan) = plan_overlay(artifact, &self.limits)? {
                let path = output_path(output, "svg");
                write_file(&path, render_figure_svg(&plan, overlay_style)?)?;
                outputs.push(path);
            }
        }
        let plan = plan_figure(artifact, &self.limits)?;
        for stats in &plan.error_stats {
            info!(
                "{} ch {}: {} compared, {} normal, {} > 20%, {} > 10000, mse {:.3}",
                output.display(),
                stats.channel,
                stats.compared,
                stats.normal,
                stats.elevated,
                stats.extreme,
                stats.mean_squared_error
            );
        }
        let path = output_path(output, "png");
        write_file(&path, render_figure_png(&plan, &self.style)?)?;
        outputs.push(path);
        Ok(RenderReport {
            outputs,
            error_stats: plan.error_stats,
        })
    }
}
