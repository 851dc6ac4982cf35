use std::fs;
use std::path::Path;
use serde::Deserialize;
use crate::wave::channels::split_all;
use crate::wave::InspectError;
/// One resampler test result, as written by the test harness.
///
/// Wave arrays are interleaved by channel (`sample[frame * num_channels + channel]`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WaveformArtifact {
    #[serde(rename = "NumChannels")]
    pub num_channels: usize,
    #[serde(rename = "CorrectW", default)]
    pub correct_wave: Option<Vec<f64>>,
    // field name is misspelled by the producer
    #[serde(rename = "Resampeled")]
    pub resampled_wave: Vec<f64>,
    #[serde(rename = "InWave")]
    pub input_wave: Vec<f64>,
    #[serde(rename = "InRate")]
    pub in_rate: f64,
    #[serde(rename = "OutRate")]
    pub out_rate: f64,
}
impl WaveformArtifact {
    pub fn load(path: &Path) -> Result<Self, InspectError> {
        let raw = fs::read_to_string(path).map_err(|e| InspectError::io(path, e))?;
        Self::from_json(path, &raw)
    }
    /// Decodes and validates; `origin` only labels errors.
    pub fn from_json(origin: &Path, raw: &str) -> Result<Self, InspectError> {
        let artifact: WaveformArtifact =
            serde_json::from_str(raw).map_err(|e| InspectError::decode(origin, e.to_string()))?;
        artifact.validate(origin)?;
        Ok(artifact)
    }
    fn validate(&self, origin: &Path) -> Result<(), InspectError> {
        if self.num_channels == 0 {
            return Err(InspectError::decode(origin, "NumChannels must be positive"));
        }
        for (name, rate) in [("InRate", self.in_rate), ("OutRate", self.out_rate)] {
            if !(rate > 0.0) {
                return Err(InspectError::decode(
                    origin,
                    format!("{name} must be positive, got {rate}"),
                ));
            }
        }
        let mut waves = vec![("InWave", &self.input_wave), ("Resampeled", &self.resampled_wave)];
        if let Some(correct) = &self.correct_wave {
            waves.push(("CorrectW", correct));
        }
        for (name, wave) in waves {
            if wave.len() % self.num_channels != 0 {
                return Err(InspectError::decode(
                    origin,
                    format!(
                        "{name} has {} samples, not a multiple of {} channels",
                        wave.len(),
                        self.num_channels
                    ),
                ));
            }
        }
        Ok(())
    }
    pub fn input_channels(&self) -> Result<Vec<Vec<f64>>, InspectError> {
        split_all(&self.input_wave, self.num_channels)
    }
    pub fn resampled_channels(&self) -> Result<Vec<Vec<f64>>, InspectError> {
        split_all(&self.resampled_wave, self.num_channels)
    }
    pub fn correct_channels(&self) -> Result<Option<Vec<Vec<f64>>>, InspectError> {
        self.correct_wave
            .as_deref()
            .map(|wave| split_all(wave, self.num_channels))
            .transpose()
    }
}
