use crate::wave::InspectError;
fn check_rate(sample_rate: f64) -> Result<(), InspectError> {
    // NaN fails this comparison too
    if sample_rate > 0.0 {
        Ok(())
    } else {
        Err(InspectError::InvalidSampleRate(sample_rate))
    }
}
/// Absolute time (seconds) of the first `length` samples: `[0, 1/rate, 2/rate, ...]`.
pub fn time_axis(length: usize, sample_rate: f64) -> Result<Vec<f64>, InspectError> {
    check_rate(sample_rate)?;
    Ok((0..length).map(|i| i as f64 / sample_rate).collect())
}
/// Sample cap for a signal at `rate_a` shown next to a signal at `rate_b`.
///
/// When `rate_a < rate_b` the cap shrinks by `rate_a / rate_b` (floored) so both
/// signals, each cut to its own cap, cover the same wall-clock span. Otherwise
/// `base_max_length` is returned as is.
pub fn truncation_length(
    base_max_length: usize,
    rate_a: f64,
    rate_b: f64,
) -> Result<usize, InspectError> {
    check_rate(rate_a)?;
    check_rate(rate_b)?;
    if rate_a < rate_b {
        Ok((base_max_length as f64 * rate_a / rate_b).floor() as usize)
    } else {
        Ok(base_max_length)
    }
}
/// Leading `cap` samples of a channel. Never pads.
pub fn truncate(channel: &[f64], cap: usize) -> &[f64] {
    &channel[..channel.len().min(cap)]
}
