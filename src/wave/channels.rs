use crate::wave::InspectError;
/// Returns every `num_channels`-th sample starting at `channel_index`.
///
/// Interleaved streams store frame `f` of channel `c` at `f * num_channels + c`.
/// A trailing partial frame is not an error: the channel just gets whatever
/// samples are present.
pub fn split(
    samples: &[f64],
    num_channels: usize,
    channel_index: usize,
) -> Result<Vec<f64>, InspectError> {
    if num_channels == 0 {
        return Err(InspectError::InvalidChannelCount);
    }
    if channel_index >= num_channels {
        return Err(InspectError::ChannelOutOfRange {
            index: channel_index,
            channels: num_channels,
        });
    }
    Ok(samples
        .iter()
        .skip(channel_index)
        .step_by(num_channels)
        .copied()
        .collect())
}
/// Splits a stream into all of its channels (channel -> samples).
pub fn split_all(samples: &[f64], num_channels: usize) -> Result<Vec<Vec<f64>>, InspectError> {
    if num_channels == 0 {
        return Err(InspectError::InvalidChannelCount);
    }
    (0..num_channels)
        .map(|idx| split(samples, num_channels, idx))
        .collect()
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    fn interleave(channels: &[Vec<f64>]) -> Vec<f64> {
        let frames = channels.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut out = Vec::new();
        for f in 0..frames {
            for channel in channels {
                if let Some(v) = channel.get(f) {
                    out.push(*v);
                }
            }
        }
        out
    }
    #[test]
    fn splits_stereo_stream() {
        let samples = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        assert_eq!(split(&samples, 2, 0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(split(&samples, 2, 1).unwrap(), vec![-1.0, -2.0, -3.0]);
    }
    #[test]
    fn mono_is_identity() {
        let samples = [4.0, 5.0, 6.0];
        assert_eq!(split(&samples, 1, 0).unwrap(), samples.to_vec());
    }
    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            split(&[1.0], 0, 0),
            Err(InspectError::InvalidChannelCount)
        ));
        assert!(matches!(
            split(&[1.0, 2.0], 2, 2),
            Err(InspectError::ChannelOutOfRange {
                index: 2,
                channels: 2,
            })
        ));
        assert!(split_all(&[1.0], 0).is_err());
    }
    #[test]
    fn partial_trailing_frame_is_kept() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(split(&samples, 2, 0).unwrap(), vec![1.0, 3.0, 5.0]);
        assert_eq!(split(&samples, 2, 1).unwrap(), vec![2.0, 4.0]);
        assert!(split(&[], 3, 2).unwrap().is_empty());
    }
    #[test]
    fn lengths_and_interleave_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let num_channels = rng.gen_range(1..=6usize);
            let len = rng.gen_range(0..64usize);
            let samples: Vec<f64> = (0..len).map(|_| rng.gen_range(-32768.0..32768.0)).collect();
            let channels = split_all(&samples, num_channels).unwrap();
            for (idx, channel) in channels.iter().enumerate() {
                let expected = if len > idx {
                    (len - idx + num_channels - 1) / num_channels
                } else {
                    0
                };
                assert_eq!(channel.len(), expected);
            }
            assert_eq!(interleave(&channels), samples);
        }
    }
}
