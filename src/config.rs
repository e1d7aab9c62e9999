//! Configuration parameters for beamforming analysis

/// Beamforming configuration parameters
///
/// These mirror the edit-time constants of the original measurement tool;
/// every field here is a recognized option of the pipeline.
#[derive(Debug, Clone)]
pub struct BeamformConfig {
    /// Which recorded target speaker to load from a session directory (default: 1)
    ///
    /// Selects `target<N>.wav` and the matching `source_track<N>.txt`.
    pub target_index: u32,

    /// Distance weight exponent `wp` (default: 1.0)
    ///
    /// Channel weights are inverse-distance, normalized so the closest
    /// channel gets exactly 1.0, then raised to this power. `0.0` yields
    /// uniform weights, positive values sharpen emphasis on near channels,
    /// negative values favor distant channels.
    pub distance_weight_exponent: f32,

    /// Desired mixture SNR in dB (default: -7.0)
    ///
    /// The target-only stream is scaled by a single linear gain so that the
    /// whole-recording power ratio between target and background matches
    /// this value.
    pub desired_snr_db: f32,

    /// High-pass cutoff frequency in Hz (default: 100.0)
    ///
    /// Applied as a fourth-order Butterworth high-pass to every stream
    /// before beamforming, with filter state carried across windows.
    pub highpass_cutoff_hz: f32,

    /// Processing window duration in seconds (default: 0.040)
    ///
    /// The recording is processed in fixed windows of this duration; a
    /// trailing partial window is dropped, never padded.
    pub window_duration_s: f32,
}

impl Default for BeamformConfig {
    fn default() -> Self {
        Self {
            target_index: 1,
            distance_weight_exponent: 1.0,
            desired_snr_db: -7.0,
            highpass_cutoff_hz: 100.0,
            window_duration_s: 0.040,
        }
    }
}
