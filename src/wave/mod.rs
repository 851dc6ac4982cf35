// src/wave/mod.rs
pub mod artifact;
pub mod channels;
pub mod classify;
pub mod error;
pub mod timeline;
pub use artifact::WaveformArtifact;
pub use classify::{classify, error_stats, ErrorBucket, ErrorClassification, ErrorStats};
pub use error::{ErrorKind, InspectError};
pub use timeline::{time_axis, truncate, truncation_length};
