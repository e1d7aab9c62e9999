//! Error types for the beamforming analysis engine

use std::fmt;

/// Errors that can occur while loading or processing a recording session
#[derive(Debug, Clone)]
pub enum BeamformError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Audio file could not be read or written
    DecodingError(String),

    /// Geometry file row count or shape does not match expectations
    MalformedGeometry(String),

    /// Channel counts disagree between recordings or with the microphone array
    ChannelCountMismatch(String),

    /// A required key was not found in the parameter file
    MissingParameter(String),

    /// Processing error during beamforming or analysis
    ProcessingError(String),
}

impl fmt::Display for BeamformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeamformError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            BeamformError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            BeamformError::MalformedGeometry(msg) => write!(f, "Malformed geometry file: {}", msg),
            BeamformError::ChannelCountMismatch(msg) => {
                write!(f, "Channel count mismatch: {}", msg)
            }
            BeamformError::MissingParameter(msg) => write!(f, "Missing parameter: {}", msg),
            BeamformError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for BeamformError {}
