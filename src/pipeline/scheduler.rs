//! Window scheduler: drives the beamforming loop over paired recordings

use glam::Vec3;

use crate::config::BeamformConfig;
use crate::error::BeamformError;
use crate::geometry::{MicrophoneArray, SourceTrack};
use crate::io::wav::MultichannelBuffer;
use crate::pipeline::delay_sum::beamform;
use crate::pipeline::filter::{FilterState, HighPassFilter};
use crate::pipeline::weights::distance_weights;

/// One processing condition's pair of stitched output streams
#[derive(Debug, Clone, Default)]
pub struct StreamOutput {
    /// Delay-and-sum beamformed output
    pub beamformed: Vec<f32>,
    /// Unweighted, unbeamformed closest-microphone comparison stream
    pub closest_mic: Vec<f32>,
}

/// Stitched full-length output streams for the three parallel conditions
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Mixture condition (background plus scaled target)
    pub mixture: StreamOutput,
    /// Background-only condition
    pub noise: StreamOutput,
    /// Target-only condition
    pub target: StreamOutput,
    /// Window length in samples
    pub window_len: usize,
    /// Windows that ran the full weight/beamform path
    pub windows_processed: usize,
    /// Windows emitted as zero-fill because no source location was known yet
    pub windows_skipped: usize,
}

/// Per-stream state threaded through the loop: filter continuation plus the
/// previous weighted window retained for the beamformer's tail borrowing.
struct StreamState {
    filter: FilterState,
    previous: Vec<Vec<f32>>,
}

impl StreamState {
    fn new(channels: usize, window_len: usize) -> Self {
        Self {
            filter: FilterState::zeroed(channels),
            previous: vec![vec![0.0f32; window_len]; channels],
        }
    }
}

/// Run the windowed beamforming pipeline
///
/// Processes the paired recordings in fixed windows of
/// `config.window_duration_s`. Per window: the target segment is scaled by
/// `target_gain` and added to the background segment to form the mixture;
/// all three segments are high-pass filtered with carried state; the source
/// location is resolved from the track at the window midpoint with
/// carry-forward of the last known location; channel weights and
/// delay-and-sum follow. While no location has ever resolved, the window is
/// emitted as zeros on every output and the weight/beamform steps are
/// skipped.
///
/// The loop stops before the first window that would read past the shorter
/// recording; a trailing partial window is dropped, never padded.
///
/// # Errors
///
/// Returns `BeamformError::ChannelCountMismatch` when the recordings and
/// the array disagree, and `BeamformError::InvalidInput` for degenerate
/// window or filter parameters.
pub fn run_pipeline(
    target: &MultichannelBuffer,
    noise: &MultichannelBuffer,
    array: &MicrophoneArray,
    track: &SourceTrack,
    target_gain: f32,
    speed_of_sound: f32,
    config: &BeamformConfig,
) -> Result<PipelineOutput, BeamformError> {
    let channels = array.channel_count();
    if target.channel_count() != channels || noise.channel_count() != channels {
        return Err(BeamformError::ChannelCountMismatch(format!(
            "array has {} channels, target {} and background {}",
            channels,
            target.channel_count(),
            noise.channel_count()
        )));
    }
    if target.sample_rate != noise.sample_rate {
        return Err(BeamformError::InvalidInput(
            "target and background sample rates differ".to_string(),
        ));
    }

    let sample_rate = target.sample_rate as f32;
    // Round, don't truncate: 0.040 s at 16 kHz is 639.99999 in f32.
    let window_len = (config.window_duration_s * sample_rate).round() as usize;
    if window_len == 0 {
        return Err(BeamformError::InvalidInput(format!(
            "window duration {} s is shorter than one sample",
            config.window_duration_s
        )));
    }

    let filter = HighPassFilter::new(config.highpass_cutoff_hz, sample_rate)?;

    let stream_len = target.len().min(noise.len());
    let mut mixture_state = StreamState::new(channels, window_len);
    let mut noise_state = StreamState::new(channels, window_len);
    let mut target_state = StreamState::new(channels, window_len);

    let mut output = PipelineOutput {
        mixture: StreamOutput::default(),
        noise: StreamOutput::default(),
        target: StreamOutput::default(),
        window_len,
        windows_processed: 0,
        windows_skipped: 0,
    };

    let mut last_location: Option<Vec3> = None;
    let mut start = 0usize;

    // DONE once the next window's end would pass the shorter recording.
    while start + window_len <= stream_len {
        let end = start + window_len;

        // Read paired segments and mix at the fixed target gain.
        let mut target_win: Vec<Vec<f32>> = target
            .channels
            .iter()
            .map(|c| c[start..end].to_vec())
            .collect();
        let mut noise_win: Vec<Vec<f32>> = noise
            .channels
            .iter()
            .map(|c| c[start..end].to_vec())
            .collect();
        let mut mixture_win: Vec<Vec<f32>> = noise_win
            .iter()
            .zip(target_win.iter())
            .map(|(n, t)| {
                n.iter()
                    .zip(t.iter())
                    .map(|(ns, ts)| ns + target_gain * ts)
                    .collect()
            })
            .collect();

        // High-pass with carried state. This runs even for windows that end
        // up zero-filled, so the filter history stays aligned with the
        // recording position.
        filter.apply(&mut mixture_win, &mut mixture_state.filter)?;
        filter.apply(&mut noise_win, &mut noise_state.filter)?;
        filter.apply(&mut target_win, &mut target_state.filter)?;

        // Resolve the source location at the window midpoint, carrying the
        // last known location through inactive stretches.
        let midpoint_s = (start + window_len / 2) as f32 / sample_rate;
        let resolved = track.location_at(midpoint_s);
        let location = resolved.or(last_location);

        let Some(location) = location else {
            // No location has ever been known: zero-fill every output and
            // leave the retained tails at zero.
            for stream in [&mut output.mixture, &mut output.noise, &mut output.target] {
                stream.beamformed.extend(std::iter::repeat(0.0).take(window_len));
                stream.closest_mic.extend(std::iter::repeat(0.0).take(window_len));
            }
            output.windows_skipped += 1;
            start = end;
            continue;
        };

        let weights = distance_weights(
            &array.distances_to(location),
            config.distance_weight_exponent,
        )?;

        for (win, state, stream) in [
            (&mixture_win, &mut mixture_state, &mut output.mixture),
            (&noise_win, &mut noise_state, &mut output.noise),
            (&target_win, &mut target_state, &mut output.target),
        ] {
            let weighted: Vec<Vec<f32>> = win
                .iter()
                .zip(weights.weights.iter())
                .map(|(c, &w)| c.iter().map(|s| s * w).collect())
                .collect();

            let summed = beamform(
                &weighted,
                &state.previous,
                &weights,
                location,
                array,
                sample_rate,
                speed_of_sound,
            )?;
            stream.beamformed.extend_from_slice(&summed);
            stream
                .closest_mic
                .extend_from_slice(&win[weights.closest]);

            state.previous = weighted;
        }

        if resolved.is_some() {
            last_location = resolved;
        }
        output.windows_processed += 1;
        start = end;
    }

    log::debug!(
        "Pipeline done: {} windows processed, {} zero-filled, {} output samples",
        output.windows_processed,
        output.windows_skipped,
        output.mixture.beamformed.len()
    );

    Ok(output)
}
