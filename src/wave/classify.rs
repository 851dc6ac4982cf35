//! Per-sample error buckets between a reference wave and a resampled wave.
//!
//! Rules, evaluated in order for `diff = reference[i] - candidate[i]`:
//! - `|diff| > 10000` goes to [`ErrorBucket::Extreme`], stored as `0` (only the index matters).
//! - `|diff| > |reference[i]| * 0.2` goes to [`ErrorBucket::Elevated`], stored as `diff`.
//! - everything else is [`ErrorBucket::Normal`], stored as `diff`.
//!
//! A zero reference sample therefore only lands in `Normal` when `diff == 0`.
use serde::Serialize;
/// Absolute error above which a sample is treated as a gross misalignment.
pub const EXTREME_ERROR_CAP: f64 = 10_000.0;
/// Relative error (fraction of the reference magnitude) above which a sample is elevated.
pub const RELATIVE_ERROR_RATIO: f64 = 0.2;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorBucket {
    Normal,
    Elevated,
    Extreme,
}
impl ErrorBucket {
    pub fn of(reference: f64, diff: f64) -> Self {
        if diff.abs() > EXTREME_ERROR_CAP {
            ErrorBucket::Extreme
        } else if diff.abs() > reference.abs() * RELATIVE_ERROR_RATIO {
            ErrorBucket::Elevated
        } else {
            ErrorBucket::Normal
        }
    }
}
/// Disjoint `(sample index, value)` lists, one per bucket, each in index order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorClassification {
    pub normal: Vec<(usize, f64)>,
    pub elevated: Vec<(usize, f64)>,
    pub extreme: Vec<(usize, f64)>,
}
impl ErrorClassification {
    pub fn bucket(&self, bucket: ErrorBucket) -> &[(usize, f64)] {
        match bucket {
            ErrorBucket::Normal => &self.normal,
            ErrorBucket::Elevated => &self.elevated,
            ErrorBucket::Extreme => &self.extreme,
        }
    }
    /// Number of samples compared.
    pub fn len(&self) -> usize {
        self.normal.len() + self.elevated.len() + self.extreme.len()
    }
}
/// Buckets the first `min(reference.len(), candidate.len())` samples.
pub fn classify(reference: &[f64], candidate: &[f64]) -> ErrorClassification {
    let mut out = ErrorClassification::default();
    for (i, (r, c)) in reference.iter().zip(candidate).enumerate() {
        let diff = r - c;
        match ErrorBucket::of(*r, diff) {
            ErrorBucket::Extreme => out.extreme.push((i, 0.0)),
            ErrorBucket::Elevated => out.elevated.push((i, diff)),
            ErrorBucket::Normal => out.normal.push((i, diff)),
        }
    }
    out
}
/// Summary numbers for one compared channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorStats {
    pub channel: usize,
    pub compared: usize,
    pub normal: usize,
    pub elevated: usize,
    pub extreme: usize,
    /// Share of compared samples whose error is above 20% or above the absolute cap.
    pub elevated_ratio: f64,
    pub squared_error: f64,
    pub mean_squared_error: f64,
}
pub fn error_stats(channel: usize, reference: &[f64], candidate: &[f64]) -> ErrorStats {
    let mut stats = ErrorStats {
        channel,
        ..ErrorStats::default()
    };
    for (r, c) in reference.iter().zip(candidate) {
        let diff = r - c;
        stats.compared += 1;
        stats.squared_error += diff * diff;
        match ErrorBucket::of(*r, diff) {
            ErrorBucket::Normal => stats.normal += 1,
            ErrorBucket::Elevated => stats.elevated += 1,
            ErrorBucket::Extreme => stats.extreme += 1,
        }
    }
    if stats.compared > 0 {
        let compared = stats.compared as f64;
        stats.elevated_ratio = (stats.elevated + stats.extreme) as f64 / compared;
        stats.mean_squared_error = stats.squared_error / compared;
    }
    stats
}
