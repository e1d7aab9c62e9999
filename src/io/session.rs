//! Recording session loading and cross-validation

use std::path::Path;

use crate::config::BeamformConfig;
use crate::error::BeamformError;
use crate::geometry::{MicrophoneArray, SourceTrack};
use crate::io::params::{read_param, SPEED_OF_SOUND_KEY};
use crate::io::positions::{load_mic_positions, load_source_track};
use crate::io::wav::{load_wav, MultichannelBuffer};

/// One fully loaded, validated recording session
///
/// Holds the two time-synchronized multichannel recordings, the geometry
/// and the measured speed of sound. Everything is read-only for the run.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    /// Isolated target speaker recording
    pub target: MultichannelBuffer,
    /// Competing background recording, same geometry and sample rate
    pub noise: MultichannelBuffer,
    /// Microphone positions in channel order
    pub array: MicrophoneArray,
    /// Time-indexed source position track for the selected target
    pub track: SourceTrack,
    /// Speed of sound in m/s from the parameter file
    pub speed_of_sound: f32,
}

/// Load a session directory
///
/// Expects `target<N>.wav`, `source_track<N>.txt` (N = `config.target_index`),
/// `background.wav`, `mic_positions.txt` and `parameters.txt`.
///
/// # Errors
///
/// Returns `BeamformError::ChannelCountMismatch` when the two recordings or
/// the microphone array disagree on channel count, and
/// `BeamformError::InvalidInput` when the sample rates differ. File-level
/// failures surface as the respective loader errors.
pub fn load_session(
    dir: &Path,
    config: &BeamformConfig,
) -> Result<RecordingSession, BeamformError> {
    let target = load_wav(&dir.join(format!("target{}.wav", config.target_index)))?;
    let noise = load_wav(&dir.join("background.wav"))?;
    let array = load_mic_positions(&dir.join("mic_positions.txt"))?;
    let track = load_source_track(&dir.join(format!("source_track{}.txt", config.target_index)))?;
    let speed_of_sound = read_param(&dir.join("parameters.txt"), SPEED_OF_SOUND_KEY)?;

    if target.channel_count() != noise.channel_count() {
        return Err(BeamformError::ChannelCountMismatch(format!(
            "target has {} channels, background has {}",
            target.channel_count(),
            noise.channel_count()
        )));
    }
    if target.channel_count() != array.channel_count() {
        return Err(BeamformError::ChannelCountMismatch(format!(
            "recordings have {} channels, microphone array has {}",
            target.channel_count(),
            array.channel_count()
        )));
    }
    if target.sample_rate != noise.sample_rate {
        return Err(BeamformError::InvalidInput(format!(
            "sample rates differ: target {} Hz, background {} Hz",
            target.sample_rate, noise.sample_rate
        )));
    }
    if speed_of_sound <= 0.0 {
        return Err(BeamformError::InvalidInput(format!(
            "speed of sound must be positive, got {}",
            speed_of_sound
        )));
    }

    log::debug!(
        "Session loaded: {} channels, {:.2} s target / {:.2} s background at {} Hz, c = {} m/s",
        target.channel_count(),
        target.duration_seconds(),
        noise.duration_seconds(),
        target.sample_rate,
        speed_of_sound
    );

    Ok(RecordingSession {
        target,
        noise,
        array,
        track,
        speed_of_sound,
    })
}
