//! # speechbeam
//!
//! An offline analysis engine estimating the benefit of microphone-array
//! beamforming on speech intelligibility in noisy, multi-talker rooms.
//!
//! Given time-synchronized multichannel recordings of an isolated target
//! speaker and of competing background conversations (identical microphone
//! geometry), the engine mixes them at a controlled SNR and processes the
//! mixture in short sliding windows with a delay-and-sum beamformer that
//! tracks the moving speaker. It reports SNR and intelligibility-index
//! improvements between the best single microphone and the beamformed
//! output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use speechbeam::{analyze_recording, load_session, BeamformConfig};
//!
//! let config = BeamformConfig::default();
//! let session = load_session(Path::new("sessions/room_a"), &config)?;
//! let outcome = analyze_recording(&session, &config)?;
//!
//! let report = &outcome.report;
//! println!("SNR: {:.1} dB -> {:.1} dB", report.snr_closest_mic_db, report.snr_beamformed_db);
//! println!(
//!     "Intelligibility: {:.2} -> {:.2}",
//!     report.intelligibility_closest_mic.mean, report.intelligibility_beamformed.mean
//! );
//! # Ok::<(), speechbeam::BeamformError>(())
//! ```
//!
//! ## Architecture
//!
//! The processing pipeline follows this flow:
//!
//! ```text
//! Recordings -> Mixing -> High-Pass Filter -> Localization -> Weighting
//!     -> Delay-and-Sum -> Output Streams -> SNR / Intelligibility Report
//! ```
//!
//! Processing is single-threaded and strictly sequential: every window
//! depends on the previous window's filter state and trailing samples.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pipeline;

// Re-export main types
pub use analysis::result::{BeamformReport, ReportMetadata};
pub use config::BeamformConfig;
pub use error::BeamformError;
pub use io::session::{load_session, RecordingSession};
pub use io::wav::MultichannelBuffer;
pub use pipeline::scheduler::{PipelineOutput, StreamOutput};

use analysis::intelligibility::intelligibility_index;
use analysis::snr::{measured_snr_db, snr_db, target_gain};

/// Streams and report produced by one analysis run
#[derive(Debug, Clone)]
pub struct BeamformOutcome {
    /// Stitched full-length output streams for all three conditions
    pub streams: PipelineOutput,
    /// Objective before/after comparison
    pub report: BeamformReport,
}

/// Main analysis function
///
/// Mixes the session's target and background recordings at the configured
/// SNR, runs the windowed delay-and-sum pipeline, and compares the
/// beamformed target/noise outputs against the closest-microphone streams.
///
/// # Arguments
///
/// * `session` - Loaded and validated recordings, geometry, speed of sound
/// * `config` - Beamforming configuration parameters
///
/// # Errors
///
/// Returns `BeamformError` if the inputs are inconsistent or degenerate
/// (channel mismatch, empty recordings, invalid window or filter
/// parameters).
pub fn analyze_recording(
    session: &RecordingSession,
    config: &BeamformConfig,
) -> Result<BeamformOutcome, BeamformError> {
    use std::time::Instant;
    let start_time = Instant::now();

    if session.target.is_empty() || session.noise.is_empty() {
        return Err(BeamformError::InvalidInput(
            "empty recording".to_string(),
        ));
    }

    log::debug!(
        "Starting beamforming analysis: {} channels, {:.2} s at {} Hz",
        session.target.channel_count(),
        session.target.duration_seconds(),
        session.target.sample_rate
    );

    // Fixed linear target gain from the whole-recording power ratio. The
    // stationarity assumption is deliberate; the gain is not re-estimated
    // per window.
    let measured_db = measured_snr_db(&session.target, &session.noise);
    let gain = target_gain(&session.target, &session.noise, config.desired_snr_db);
    log::debug!(
        "Measured SNR {:.2} dB, desired {:.2} dB, target gain {:.4}",
        measured_db,
        config.desired_snr_db,
        gain
    );

    let streams = pipeline::run_pipeline(
        &session.target,
        &session.noise,
        &session.array,
        &session.track,
        gain,
        session.speed_of_sound,
        config,
    )?;

    if streams.windows_processed == 0 {
        return Err(BeamformError::ProcessingError(
            "no window produced beamformed output (recording too short or source never active)"
                .to_string(),
        ));
    }

    // Before/after comparison on the target-only and noise-only conditions.
    let snr_closest = snr_db(&streams.target.closest_mic, &streams.noise.closest_mic);
    let snr_beamformed = snr_db(&streams.target.beamformed, &streams.noise.beamformed);
    let intel_closest = intelligibility_index(
        &streams.target.closest_mic,
        &streams.noise.closest_mic,
        streams.window_len,
    )?;
    let intel_beamformed = intelligibility_index(
        &streams.target.beamformed,
        &streams.noise.beamformed,
        streams.window_len,
    )?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Analysis done in {:.1} ms: SNR {:.2} -> {:.2} dB",
        processing_time_ms,
        snr_closest,
        snr_beamformed
    );

    let report = BeamformReport {
        snr_closest_mic_db: snr_closest,
        snr_beamformed_db: snr_beamformed,
        snr_improvement_db: snr_beamformed - snr_closest,
        intelligibility_closest_mic: intel_closest,
        intelligibility_beamformed: intel_beamformed,
        metadata: ReportMetadata {
            duration_seconds: streams.mixture.beamformed.len() as f32
                / session.target.sample_rate as f32,
            sample_rate: session.target.sample_rate,
            channels: session.target.channel_count(),
            window_len_samples: streams.window_len,
            windows_processed: streams.windows_processed,
            windows_skipped: streams.windows_skipped,
            measured_snr_db: measured_db,
            target_gain: gain,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    Ok(BeamformOutcome { streams, report })
}
