// src/types.rs
use plotters::style::RGBColor;

/// Teal used for the "abs error > 20%" series.
pub const TEAL: RGBColor = RGBColor(0, 128, 128);
/// Purple used for the "abs error > 10000" series.
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);

// Look of one overlaid scatter series
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub radius: u32,
    pub opacity: f64,
    pub label: String,
}

impl SeriesStyle {
    pub fn new(color: RGBColor, radius: u32, label: impl Into<String>) -> Self {
        Self {
            color,
            radius,
            opacity: 1.0,
            label: label.into(),
        }
    }

    pub fn with_opacity(&self, opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self.clone()
        }
    }
}

// Immutable options bundle for one panel; every `set_*` returns a new value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    title: String,
    series_styles: Vec<SeriesStyle>,
    with_error: bool,
}

impl RenderOptions {
    pub fn new(series_styles: Vec<SeriesStyle>) -> Self {
        Self {
            series_styles,
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_error(&self) -> bool {
        self.with_error
    }

    /// Style for the `index`-th overlaid series, cycling when there are fewer styles than series.
    pub fn style(&self, index: usize) -> SeriesStyle {
        if self.series_styles.is_empty() {
            return SeriesStyle::new(plotters::style::BLACK, 1, "");
        }
        self.series_styles[index % self.series_styles.len()].clone()
    }

    pub fn set_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn set_series_styles(&self, series_styles: Vec<SeriesStyle>) -> Self {
        Self {
            series_styles,
            ..self.clone()
        }
    }

    pub fn set_with_error(&self, with_error: bool) -> Self {
        Self {
            with_error,
            ..self.clone()
        }
    }
}

// Sample caps applied before plotting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderLimits {
    /// Cap for cross-rate views and multi-channel same-rate views.
    pub max_wave_len: usize,
    /// Cap for a single-channel same-rate view; denser point clouds stop being readable.
    pub single_channel_cap: usize,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_wave_len: 60_000,
            single_channel_cap: 10_000,
        }
    }
}

impl RenderLimits {
    pub fn same_rate_cap(&self, num_channels: usize) -> usize {
        if num_channels == 1 {
            self.single_channel_cap
        } else {
            self.max_wave_len
        }
    }
}
