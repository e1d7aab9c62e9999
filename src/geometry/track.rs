//! Time-indexed source position track

use glam::Vec3;

use crate::error::BeamformError;

/// One recorded source position sample
///
/// `position` is `None` while the source was inactive at `time_s`.
#[derive(Debug, Clone, Copy)]
pub struct TrackSample {
    /// Timestamp in seconds from the start of the recording
    pub time_s: f32,
    /// Recorded 3D position, or `None` if the source was marked inactive
    pub position: Option<Vec3>,
}

/// Ordered sequence of timestamped source positions
///
/// Sampling may be irregular. Lookups return the sample whose timestamp is
/// closest to the query time; there is no interpolation between samples.
/// When two samples are equidistant from the query time the earlier sample
/// wins.
#[derive(Debug, Clone)]
pub struct SourceTrack {
    samples: Vec<TrackSample>,
}

impl SourceTrack {
    /// Create a track from position samples, sorting them by timestamp
    ///
    /// The sort is stable, so samples sharing a timestamp keep their input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `BeamformError::MalformedGeometry` if `samples` is empty or
    /// contains a non-finite timestamp.
    pub fn new(mut samples: Vec<TrackSample>) -> Result<Self, BeamformError> {
        if samples.is_empty() {
            return Err(BeamformError::MalformedGeometry(
                "source track has no samples".to_string(),
            ));
        }
        if samples.iter().any(|s| !s.time_s.is_finite()) {
            return Err(BeamformError::MalformedGeometry(
                "source track contains a non-finite timestamp".to_string(),
            ));
        }
        samples.sort_by(|a, b| a.time_s.total_cmp(&b.time_s));
        Ok(Self { samples })
    }

    /// Position at the track sample nearest in time to `time_s`
    ///
    /// Returns `None` when the nearest sample marks the source inactive.
    /// Nearest-sample only, no interpolation.
    pub fn location_at(&self, time_s: f32) -> Option<Vec3> {
        let mut best = &self.samples[0];
        let mut best_diff = (best.time_s - time_s).abs();

        // Strict comparison keeps the earlier sample on a tie.
        for sample in &self.samples[1..] {
            let diff = (sample.time_s - time_s).abs();
            if diff < best_diff {
                best = sample;
                best_diff = diff;
            }
        }

        best.position
    }

    /// All samples in timestamp order
    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }
}
