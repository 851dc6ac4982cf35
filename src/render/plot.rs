use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::*;
use crate::render::layout::{FigurePlan, PanelPlan};
use crate::wave::InspectError;
/// Largest bitmap a single figure may allocate, in pixels.
pub const MAX_FIGURE_PIXELS: usize = 1 << 28;
#[derive(Clone, Debug)]
pub struct FigureStyle {
    pub panel_width: u32,
    pub panel_height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub caption_size: u32,
}
impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            panel_width: 1600,
            panel_height: 600,
            background: WHITE,
            foreground: BLACK,
            caption_size: 24,
        }
    }
}
impl FigureStyle {
    /// Wide single strip used for the dense vector overlay.
    pub fn overlay() -> Self {
        Self {
            panel_width: 3000,
            panel_height: 500,
            ..Self::default()
        }
    }
    pub fn figure_size(&self, plan: &FigurePlan) -> Result<(u32, u32), InspectError> {
        let scale = |panel: u32, count: usize| {
            u32::try_from(count.max(1))
                .ok()
                .and_then(|count| panel.checked_mul(count))
        };
        match (scale(self.panel_width, plan.cols), scale(self.panel_height, plan.rows)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(too_large(plan)),
        }
    }
}
fn too_large(plan: &FigurePlan) -> InspectError {
    InspectError::Plot(format!("figure too large: {}x{} panels", plan.rows, plan.cols))
}
/// Byte length of the RGB buffer behind a `width` x `height` bitmap.
fn bitmap_len(plan: &FigurePlan, width: u32, height: u32) -> Result<usize, InspectError> {
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .filter(|&pixels| pixels <= MAX_FIGURE_PIXELS)
        .ok_or_else(|| too_large(plan))?;
    Ok(pixels * 3)
}
fn axis_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        0.0..1.0
    } else if (max - min).abs() < f64::EPSILON {
        (min - 1.0)..(max + 1.0)
    } else {
        min..max
    }
}
fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelPlan,
    style: &FigureStyle,
) -> Result<(), InspectError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points = || panel.series.iter().flat_map(|s| s.points.iter());
    let x_range = axis_range(points().map(|(x, _)| *x));
    let y_range = axis_range(points().map(|(_, y)| *y));
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(
            &panel.title,
            ("sans-serif", style.caption_size).into_font().color(&style.foreground),
        )
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .light_line_style(&style.foreground.mix(0.05))
        .bold_line_style(&style.foreground.mix(0.15))
        .label_style(("sans-serif", 14).into_font().color(&style.foreground))
        .draw()?;
    let mut labelled = false;
    for series in &panel.series {
        let color = series.style.color.mix(series.style.opacity);
        let radius = series.style.radius;
        let anno = chart.draw_series(
            series
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
        )?;
        if !series.style.label.is_empty() {
            // legend markers are always opaque
            let marker = series.style.color;
            anno.label(series.style.label.clone())
                .legend(move |(x, y)| Circle::new((x, y), 4u32, marker.filled()));
            labelled = true;
        }
    }
    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(&style.foreground.mix(0.3))
            .background_style(&style.background.mix(0.8))
            .label_font(("sans-serif", 14).into_font().color(&style.foreground))
            .draw()?;
    }
    Ok(())
}
fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    plan: &FigurePlan,
    style: &FigureStyle,
) -> Result<(), InspectError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&style.background)?;
    let areas = root.split_evenly((plan.rows.max(1), plan.cols.max(1)));
    for ((row, col), panel) in &plan.panels {
        let area = areas.get(row * plan.cols + col).ok_or_else(|| {
            InspectError::Plot(format!(
                "panel ({row}, {col}) outside a {}x{} grid",
                plan.rows, plan.cols
            ))
        })?;
        draw_panel(area, panel, style)?;
    }
    root.present()?;
    Ok(())
}
pub fn render_figure_png(plan: &FigurePlan, style: &FigureStyle) -> Result<Vec<u8>, InspectError> {
    let (width, height) = style.figure_size(plan)?;
    let mut buffer = vec![0u8; bitmap_len(plan, width, height)?];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, plan, style)?;
    }
    encode_png(buffer, width, height)
}
pub fn render_figure_svg(plan: &FigurePlan, style: &FigureStyle) -> Result<String, InspectError> {
    let size = style.figure_size(plan)?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(&root, plan, style)?;
    }
    Ok(svg)
}
fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, InspectError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer)
        .ok_or_else(|| InspectError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::plan_figure;
    use crate::types::RenderLimits;
    use crate::wave::WaveformArtifact;
    use std::path::Path;
    #[test]
    fn axis_range_handles_flat_and_empty_input() {
        assert_eq!(axis_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(axis_range([3.0, 3.0].into_iter()), 2.0..4.0);
        assert_eq!(axis_range([-1.0, f64::NAN, 5.0].into_iter()), -1.0..5.0);
    }
    #[test]
    fn figure_size_scales_with_grid() {
        let plan = FigurePlan {
            rows: 3,
            cols: 2,
            panels: Vec::new(),
            error_stats: Vec::new(),
        };
        let style = FigureStyle {
            panel_width: 100,
            panel_height: 50,
            ..FigureStyle::default()
        };
        assert_eq!(style.figure_size(&plan).unwrap(), (200, 150));
    }
    #[test]
    fn oversized_figures_are_rejected() {
        // 1500 channels: one same-rate slot each
        let tall = FigurePlan {
            rows: 2 + 1500 / 2,
            cols: 2,
            panels: Vec::new(),
            error_stats: Vec::new(),
        };
        let err = render_figure_png(&tall, &FigureStyle::default()).unwrap_err();
        assert!(matches!(err, InspectError::Plot(ref msg) if msg.contains("too large")));
        let huge = FigurePlan {
            rows: usize::MAX,
            ..tall
        };
        assert!(matches!(
            FigureStyle::default().figure_size(&huge),
            Err(InspectError::Plot(_))
        ));
        assert!(matches!(
            render_figure_svg(&huge, &FigureStyle::default()),
            Err(InspectError::Plot(_))
        ));
    }
    #[test]
    fn renders_png_and_svg() {
        let artifact = WaveformArtifact::from_json(
            Path::new("fixture:large"),
            r#"{"NumChannels":1,"CorrectW":[1,2,3],"Resampeled":[1,2,30001],"InWave":[1,2],"InRate":8000,"OutRate":12000}"#,
        )
        .unwrap();
        let plan = plan_figure(&artifact, &RenderLimits::default()).unwrap();
        let style = FigureStyle {
            panel_width: 320,
            panel_height: 200,
            ..FigureStyle::default()
        };
        let png = render_figure_png(&plan, &style).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (640, 400));
        let svg = render_figure_svg(&plan, &style).unwrap();
        assert!(svg.contains("<svg"));
    }
}
