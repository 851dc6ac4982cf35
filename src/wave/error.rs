use std::path::PathBuf;
use thiserror::Error;
/// Coarse class of an [`InspectError`], reported in the batch summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidArgument,
    Decode,
    Io,
    Render,
}
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("sample rate must be greater than zero, got {0}")]
    InvalidSampleRate(f64),
    #[error("channel count must be greater than zero")]
    InvalidChannelCount,
    #[error("channel index {index} out of range for {channels} channel(s)")]
    ChannelOutOfRange { index: usize, channels: usize },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}
impl InspectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InspectError::Io {
            path: path.into(),
            source,
        }
    }
    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        InspectError::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }
    pub fn kind(&self) -> ErrorKind {
        match self {
            InspectError::InvalidSampleRate(_)
            | InspectError::InvalidChannelCount
            | InspectError::ChannelOutOfRange { .. } => ErrorKind::InvalidArgument,
            InspectError::Decode { .. } => ErrorKind::Decode,
            InspectError::Io { .. } => ErrorKind::Io,
            InspectError::Encode { .. }
            | InspectError::Plot(_)
            | InspectError::WorkerPool(_) => ErrorKind::Render,
        }
    }
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for InspectError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        InspectError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for InspectError {
    fn from(value: image::ImageError) -> Self {
        InspectError::Plot(value.to_string())
    }
}
