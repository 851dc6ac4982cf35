//! Backend-free description of what goes on each figure.
//!
//! The main figure is a two column grid. The right column holds the cross-rate
//! views ("input wave" on row 0, "resampled wave" on row 1). Same-rate views and
//! their error overlays fill the slots `(0,0), (1,0), (2,0), (2,1), (3,0), ...`.
use log::debug;
use plotters::style::{RGBColor, BLACK, BLUE, CYAN, GREEN, MAGENTA, RED};
use crate::types::{RenderLimits, RenderOptions, SeriesStyle, PURPLE, TEAL};
use crate::wave::{
    classify, error_stats, time_axis, truncate, truncation_length, ErrorBucket,
    ErrorClassification, ErrorStats, InspectError, WaveformArtifact,
};
const CHANNEL_PALETTE: [RGBColor; 6] = [RED, BLUE, GREEN, CYAN, MAGENTA, BLACK];
/// Opacity of the high resolution overlay points.
pub const OVERLAY_OPACITY: f64 = 0.05;
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPlan {
    pub style: SeriesStyle,
    pub points: Vec<(f64, f64)>,
}
#[derive(Clone, Debug, PartialEq)]
pub struct PanelPlan {
    pub title: String,
    pub series: Vec<SeriesPlan>,
}
#[derive(Clone, Debug, PartialEq)]
pub struct FigurePlan {
    pub rows: usize,
    pub cols: usize,
    /// `(row, col)` placement of every panel.
    pub panels: Vec<((usize, usize), PanelPlan)>,
    pub error_stats: Vec<ErrorStats>,
}
/// Grid position of the `index`-th same-rate/error slot.
pub fn slot(index: usize) -> (usize, usize) {
    match index {
        0 => (0, 0),
        1 => (1, 0),
        k => (2 + (k - 2) / 2, (k - 2) % 2),
    }
}
fn rows_for_slots(slots: usize) -> usize {
    2 + (slots.saturating_sub(2) + 1) / 2
}
pub fn channel_styles(num_channels: usize) -> Vec<SeriesStyle> {
    (0..num_channels)
        .map(|i| {
            SeriesStyle::new(
                CHANNEL_PALETTE[i % CHANNEL_PALETTE.len()],
                1,
                format!("channel {i}"),
            )
        })
        .collect()
}
fn same_rate_options() -> RenderOptions {
    RenderOptions::new(vec![
        SeriesStyle::new(RED, 1, "correct wave"),
        SeriesStyle::new(BLUE, 1, "resampled wave"),
    ])
    .set_title("correct wave")
}
fn indexed(wave: &[f64], style: SeriesStyle) -> SeriesPlan {
    SeriesPlan {
        style,
        points: wave.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect(),
    }
}
fn bucket_series(points: &[(usize, f64)], style: SeriesStyle) -> SeriesPlan {
    SeriesPlan {
        style,
        points: points.iter().map(|(i, v)| (*i as f64, *v)).collect(),
    }
}
/// Every channel of `channels` on its own time axis, cut so that it spans the
/// same duration as the signal recorded at `other_rate`.
pub fn cross_rate_panel(
    opts: &RenderOptions,
    channels: &[Vec<f64>],
    rate: f64,
    other_rate: f64,
    limits: &RenderLimits,
) -> Result<PanelPlan, InspectError> {
    let cap = truncation_length(limits.max_wave_len, rate, other_rate)?;
    debug!("{}: {} channel(s) capped at {cap} samples", opts.title(), channels.len());
    let mut series = Vec::with_capacity(channels.len());
    for (i, channel) in channels.iter().enumerate() {
        let cut = truncate(channel, cap);
        let xs = time_axis(cut.len(), rate)?;
        series.push(SeriesPlan {
            style: opts.style(i),
            points: xs.into_iter().zip(cut.iter().copied()).collect(),
        });
    }
    Ok(PanelPlan {
        title: opts.title().to_owned(),
        series,
    })
}
/// Reference and candidate overlaid on the sample index axis.
pub fn same_rate_panel(opts: &RenderOptions, reference: &[f64], candidate: &[f64]) -> PanelPlan {
    PanelPlan {
        title: opts.title().to_owned(),
        series: vec![indexed(reference, opts.style(0)), indexed(candidate, opts.style(1))],
    }
}
/// Signed error split into its three buckets.
pub fn error_panel(title: String, classification: &ErrorClassification) -> PanelPlan {
    PanelPlan {
        title,
        series: vec![
            bucket_series(
                classification.bucket(ErrorBucket::Elevated),
                SeriesStyle::new(TEAL, 2, "abs error > 20%"),
            ),
            bucket_series(
                classification.bucket(ErrorBucket::Normal),
                SeriesStyle::new(RED, 1, "signed error"),
            ),
            bucket_series(
                classification.bucket(ErrorBucket::Extreme),
                SeriesStyle::new(PURPLE, 5, "abs error > 10000"),
            ),
        ],
    }
}
/// Same-rate panels for each channel, followed by the error panels when requested.
///
/// Error overlays are only produced for one or two channels.
pub fn same_rate_views(
    opts: &RenderOptions,
    reference: &[Vec<f64>],
    candidate: &[Vec<f64>],
    cap: usize,
) -> (Vec<PanelPlan>, Vec<ErrorStats>) {
    let num_channels = reference.len().min(candidate.len());
    let with_error = opts.with_error() && (num_channels == 1 || num_channels == 2);
    let mut waves = Vec::with_capacity(num_channels);
    let mut errors = Vec::new();
    let mut stats = Vec::new();
    for i in 0..num_channels {
        let ch_opts = opts.set_title(format!("{} ch {i}", opts.title()));
        let (ref_cut, cand_cut) = (truncate(&reference[i], cap), truncate(&candidate[i], cap));
        waves.push(same_rate_panel(&ch_opts, ref_cut, cand_cut));
        if with_error {
            let classification = classify(ref_cut, cand_cut);
            debug!("{}: {} sample(s) classified", ch_opts.title(), classification.len());
            errors.push(error_panel(format!("{} signed error", ch_opts.title()), &classification));
            stats.push(error_stats(i, ref_cut, cand_cut));
        }
    }
    waves.extend(errors);
    (waves, stats)
}
pub fn plan_figure(
    artifact: &WaveformArtifact,
    limits: &RenderLimits,
) -> Result<FigurePlan, InspectError> {
    let styles = RenderOptions::default().set_series_styles(channel_styles(artifact.num_channels));
    let resampled = artifact.resampled_channels()?;
    let mut panels = vec![
        (
            (0, 1),
            cross_rate_panel(
                &styles.set_title("input wave"),
                &artifact.input_channels()?,
                artifact.in_rate,
                artifact.out_rate,
                limits,
            )?,
        ),
        (
            (1, 1),
            cross_rate_panel(
                &styles.set_title("resampled wave"),
                &resampled,
                artifact.out_rate,
                artifact.in_rate,
                limits,
            )?,
        ),
    ];
    let mut error_stats = Vec::new();
    let mut slots = 0;
    if let Some(correct) = artifact.correct_channels()? {
        let cap = limits.same_rate_cap(artifact.num_channels);
        let (views, stats) =
            same_rate_views(&same_rate_options().set_with_error(true), &correct, &resampled, cap);
        slots = views.len();
        panels.extend(views.into_iter().enumerate().map(|(i, panel)| (slot(i), panel)));
        error_stats = stats;
    }
    let rows = rows_for_slots(slots);
    debug!("figure grid {rows}x2 with {slots} same-rate slot(s)");
    Ok(FigurePlan {
        rows,
        cols: 2,
        panels,
        error_stats,
    })
}
/// Single dense panel with every channel's reference and candidate overlaid,
/// drawn with near-transparent points. `None` without a reference wave.
pub fn plan_overlay(
    artifact: &WaveformArtifact,
    limits: &RenderLimits,
) -> Result<Option<FigurePlan>, InspectError> {
    let Some(correct) = artifact.correct_channels()? else {
        return Ok(None);
    };
    let resampled = artifact.resampled_channels()?;
    let cap = limits.same_rate_cap(artifact.num_channels);
    let mut series = Vec::new();
    for (i, (reference, candidate)) in correct.iter().zip(&resampled).enumerate() {
        let reference_style = SeriesStyle::new(RED, 1, format!("correct wave ch {i}"));
        let candidate_style = SeriesStyle::new(BLUE, 1, format!("resampled wave ch {i}"));
        series.push(indexed(
            truncate(reference, cap),
            reference_style.with_opacity(OVERLAY_OPACITY),
        ));
        series.push(indexed(
            truncate(candidate, cap),
            candidate_style.with_opacity(OVERLAY_OPACITY),
        ));
    }
    Ok(Some(FigurePlan {
        rows: 1,
        cols: 1,
        panels: vec![(
            (0, 0),
            PanelPlan {
                title: "result wave".to_owned(),
                series,
            },
        )],
        error_stats: Vec::new(),
    }))
}
