//! Error types for the trip tracker pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema mismatch: {0}")]
    Schema(String),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Insufficient data: keypoint '{keypoint}' has no valid samples")]
    InsufficientData { keypoint: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown keypoint: '{0}'")]
    UnknownKeypoint(String),

    #[error("Frame {frame} out of range for session of {frame_count} frames")]
    FrameOutOfRange { frame: usize, frame_count: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_names_keypoint() {
        let err = Error::InsufficientData {
            keypoint: "tailbase".into(),
        };
        assert!(err.to_string().contains("tailbase"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
