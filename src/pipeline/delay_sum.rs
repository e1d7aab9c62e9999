//! Time-delay-compensated coherent summation across channels

use glam::Vec3;

use crate::error::BeamformError;
use crate::geometry::MicrophoneArray;
use crate::pipeline::weights::ChannelWeights;

/// Delay-and-sum one weighted multichannel window into a mono window
///
/// For each channel the propagation delay is distance(microphone, source)
/// divided by the speed of sound, converted to a fractional sample shift.
/// Channels are aligned to the farthest microphone: each channel is delayed
/// by `max_delay - delay`, so a source equidistant from all microphones
/// needs no shifting at all. Fractional shifts are resolved by linear
/// interpolation; shifts that reach before the window start borrow trailing
/// samples from `previous`, the immediately preceding processed window of
/// the same stream (a zero window on the first call).
///
/// The summed output is divided by the sum of channel weights, undoing the
/// weighting's arbitrary scale.
///
/// # Arguments
///
/// * `weighted` - Current window, channel-major, already weighted
/// * `previous` - Previous processed window of the same stream, same shape
/// * `weights` - The weights applied to `weighted`, for normalization
/// * `source` - Resolved source position for this window
/// * `array` - Microphone positions, channel order
/// * `sample_rate` - Stream sample rate in Hz
/// * `speed_of_sound` - Propagation speed in m/s
///
/// # Errors
///
/// Returns `BeamformError::ChannelCountMismatch` when the window shapes and
/// the array disagree, and `BeamformError::InvalidInput` for a non-positive
/// sample rate or speed of sound.
pub fn beamform(
    weighted: &[Vec<f32>],
    previous: &[Vec<f32>],
    weights: &ChannelWeights,
    source: Vec3,
    array: &MicrophoneArray,
    sample_rate: f32,
    speed_of_sound: f32,
) -> Result<Vec<f32>, BeamformError> {
    let channels = array.channel_count();
    if weighted.len() != channels || previous.len() != channels || weights.weights.len() != channels
    {
        return Err(BeamformError::ChannelCountMismatch(format!(
            "beamformer expected {} channels, got window {} / tail {} / weights {}",
            channels,
            weighted.len(),
            previous.len(),
            weights.weights.len()
        )));
    }
    if sample_rate <= 0.0 {
        return Err(BeamformError::InvalidInput(
            "sample rate must be positive".to_string(),
        ));
    }
    if speed_of_sound <= 0.0 {
        return Err(BeamformError::InvalidInput(
            "speed of sound must be positive".to_string(),
        ));
    }

    let window_len = weighted[0].len();
    if weighted.iter().any(|c| c.len() != window_len)
        || previous.iter().any(|c| c.len() != window_len)
    {
        return Err(BeamformError::InvalidInput(
            "all channels must share one window length".to_string(),
        ));
    }

    // Per-channel propagation delay in samples. Aligning to the farthest
    // channel keeps every shift non-negative, so alignment only ever looks
    // backward into the current window and the previous tail.
    let delays: Vec<f32> = array
        .distances_to(source)
        .iter()
        .map(|d| d / speed_of_sound * sample_rate)
        .collect();
    let max_delay = delays.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let shifts: Vec<f32> = delays.iter().map(|d| max_delay - d).collect();

    let weight_sum = weights.sum();
    if weight_sum <= f32::EPSILON {
        return Err(BeamformError::InvalidInput(
            "channel weights sum to zero".to_string(),
        ));
    }

    let mut output = vec![0.0f32; window_len];
    for (channel, &shift) in shifts.iter().enumerate() {
        let current = &weighted[channel];
        let tail = &previous[channel];

        for (n, out) in output.iter_mut().enumerate() {
            let pos = n as f32 - shift;
            let i0 = pos.floor();
            let frac = pos - i0;
            let i0 = i0 as isize;

            let a = sample_at(current, tail, i0);
            let b = if frac > 0.0 {
                sample_at(current, tail, i0 + 1)
            } else {
                0.0
            };
            *out += a * (1.0 - frac) + b * frac;
        }
    }

    for out in output.iter_mut() {
        *out /= weight_sum;
    }

    Ok(output)
}

/// Sample at index `i`, borrowing from the previous window's tail for
/// negative indices
fn sample_at(current: &[f32], tail: &[f32], i: isize) -> f32 {
    if i >= 0 {
        current.get(i as usize).copied().unwrap_or(0.0)
    } else {
        let j = tail.len() as isize + i;
        if j >= 0 {
            tail[j as usize]
        } else {
            0.0
        }
    }
}
