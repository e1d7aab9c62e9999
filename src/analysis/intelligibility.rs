//! Windowed speech-intelligibility index
//!
//! Articulation-index style score: the per-window SNR is clamped to the
//! +/-15 dB range that spans "useless" to "fully usable" speech audibility
//! and mapped linearly onto [0, 1]. The mean over windows estimates how
//! comprehensible the target is against the noise; the standard deviation
//! captures how much that varies over time.

use serde::{Deserialize, Serialize};

use crate::analysis::snr::snr_db;
use crate::error::BeamformError;

/// SNR range mapped onto the [0, 1] intelligibility scale, in dB.
const AUDIBILITY_RANGE_DB: f32 = 15.0;

/// Windowed intelligibility summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IntelligibilityStats {
    /// Mean per-window intelligibility index in [0, 1]
    pub mean: f32,
    /// Standard deviation of the per-window index
    pub std_dev: f32,
    /// Number of windows that entered the statistics
    pub windows: usize,
}

/// Compute the windowed intelligibility index of a target/noise stream pair
///
/// Both streams are cut into windows of `window_len` samples (a trailing
/// partial window is ignored); each window contributes one clamped,
/// normalized SNR value.
///
/// # Errors
///
/// Returns `BeamformError::InvalidInput` when `window_len` is zero, the
/// streams differ in length, or not even one full window fits.
pub fn intelligibility_index(
    target: &[f32],
    noise: &[f32],
    window_len: usize,
) -> Result<IntelligibilityStats, BeamformError> {
    if window_len == 0 {
        return Err(BeamformError::InvalidInput(
            "intelligibility window must be at least one sample".to_string(),
        ));
    }
    if target.len() != noise.len() {
        return Err(BeamformError::InvalidInput(format!(
            "stream lengths differ: target {}, noise {}",
            target.len(),
            noise.len()
        )));
    }
    let windows = target.len() / window_len;
    if windows == 0 {
        return Err(BeamformError::InvalidInput(format!(
            "streams shorter than one window ({} < {})",
            target.len(),
            window_len
        )));
    }

    let mut indices = Vec::with_capacity(windows);
    for w in 0..windows {
        let range = w * window_len..(w + 1) * window_len;
        let snr = snr_db(&target[range.clone()], &noise[range]);
        let clamped = snr.clamp(-AUDIBILITY_RANGE_DB, AUDIBILITY_RANGE_DB);
        indices.push((clamped + AUDIBILITY_RANGE_DB) / (2.0 * AUDIBILITY_RANGE_DB));
    }

    let mean = indices.iter().sum::<f32>() / windows as f32;
    let variance = indices.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / windows as f32;

    Ok(IntelligibilityStats {
        mean,
        std_dev: variance.sqrt(),
        windows,
    })
}
