//! Beamforming analysis report types

use serde::{Deserialize, Serialize};

use crate::analysis::intelligibility::IntelligibilityStats;

/// Objective before/after comparison of beamforming benefit
///
/// "Before" figures come from the closest-microphone comparison streams;
/// "after" figures from the delay-and-sum output. Both are computed on the
/// target-only and noise-only conditions of the same processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamformReport {
    /// SNR of the closest single microphone, in dB
    pub snr_closest_mic_db: f32,
    /// SNR of the beamformed output, in dB
    pub snr_beamformed_db: f32,
    /// SNR improvement of beamforming over the closest microphone, in dB
    pub snr_improvement_db: f32,
    /// Intelligibility of the closest single microphone
    pub intelligibility_closest_mic: IntelligibilityStats,
    /// Intelligibility of the beamformed output
    pub intelligibility_beamformed: IntelligibilityStats,
    /// Run metadata
    pub metadata: ReportMetadata,
}

/// Metadata about one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Processed duration in seconds (full windows only)
    pub duration_seconds: f32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of recording channels
    pub channels: usize,
    /// Window length in samples
    pub window_len_samples: usize,
    /// Windows that ran the full beamforming path
    pub windows_processed: usize,
    /// Windows zero-filled while no source location was known
    pub windows_skipped: usize,
    /// Whole-recording SNR measured before scaling, in dB
    pub measured_snr_db: f32,
    /// Linear gain applied to the target stream
    pub target_gain: f32,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,
    /// Version of the analysis algorithm
    pub algorithm_version: String,
}
