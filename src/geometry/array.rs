//! Microphone array geometry

use glam::Vec3;

use crate::error::BeamformError;

/// Ordered microphone positions, one per recording channel
///
/// Fixed for the whole recording. The position order must match the channel
/// order of the audio streams; this is validated against the streams when a
/// session is loaded.
#[derive(Debug, Clone)]
pub struct MicrophoneArray {
    positions: Vec<Vec3>,
}

impl MicrophoneArray {
    /// Create an array from ordered channel positions
    ///
    /// # Errors
    ///
    /// Returns `BeamformError::MalformedGeometry` if `positions` is empty or
    /// contains a non-finite coordinate.
    pub fn new(positions: Vec<Vec3>) -> Result<Self, BeamformError> {
        if positions.is_empty() {
            return Err(BeamformError::MalformedGeometry(
                "microphone array has no positions".to_string(),
            ));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(BeamformError::MalformedGeometry(format!(
                "microphone position {} is not finite",
                i
            )));
        }
        Ok(Self { positions })
    }

    /// Number of microphones (equals the expected channel count)
    pub fn channel_count(&self) -> usize {
        self.positions.len()
    }

    /// Microphone positions in channel order
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Euclidean distance from every microphone to `source`, in channel order
    pub fn distances_to(&self, source: Vec3) -> Vec<f32> {
        self.positions.iter().map(|p| p.distance(source)).collect()
    }
}
