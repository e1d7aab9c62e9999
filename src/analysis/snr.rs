//! Signal-to-noise ratio and target gain computation

use crate::io::wav::MultichannelBuffer;

/// Guard against a numerically silent stream in SNR denominators.
pub const POWER_EPSILON: f32 = 1e-12;

/// Mean power (mean squared sample value) of a stream
pub fn mean_power(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|x| x * x).sum::<f32>() / samples.len() as f32
}

/// Mean power over all channels of a multichannel buffer
fn mean_power_multichannel(buffer: &MultichannelBuffer) -> f32 {
    if buffer.channel_count() == 0 {
        return 0.0;
    }
    buffer.channels.iter().map(|c| mean_power(c)).sum::<f32>() / buffer.channel_count() as f32
}

/// SNR in dB between paired signal and noise streams
///
/// Ratio of mean signal power to mean noise power; both terms carry a small
/// epsilon so a numerically silent stream yields a finite value instead of
/// an infinity or NaN.
pub fn snr_db(signal: &[f32], noise: &[f32]) -> f32 {
    let ps = mean_power(signal);
    let pn = mean_power(noise);
    10.0 * ((ps + POWER_EPSILON) / (pn + POWER_EPSILON)).log10()
}

/// Measured whole-recording SNR in dB between two multichannel streams
pub fn measured_snr_db(signal: &MultichannelBuffer, noise: &MultichannelBuffer) -> f32 {
    let ps = mean_power_multichannel(signal);
    let pn = mean_power_multichannel(noise);
    10.0 * ((ps + POWER_EPSILON) / (pn + POWER_EPSILON)).log10()
}

/// Linear gain scaling the target stream to hit `desired_snr_db`
///
/// Computed once from the whole-recording power ratio: the dB difference
/// between the desired and measured SNR, converted to a linear amplitude
/// factor. With equal measured powers and a desired SNR of 0 dB the gain is
/// exactly 1.0.
pub fn target_gain(
    target: &MultichannelBuffer,
    noise: &MultichannelBuffer,
    desired_snr_db: f32,
) -> f32 {
    let measured_db = measured_snr_db(target, noise);
    10.0f32.powf((desired_snr_db - measured_db) / 20.0)
}

/// Best single-channel SNR in dB across a multichannel signal/noise pair
///
/// Returns the channel index attaining the maximum along with the value.
pub fn best_channel_snr_db(
    signal: &MultichannelBuffer,
    noise: &MultichannelBuffer,
) -> (usize, f32) {
    let mut best = (0usize, f32::NEG_INFINITY);
    for (i, (s, n)) in signal.channels.iter().zip(noise.channels.iter()).enumerate() {
        let snr = snr_db(s, n);
        if snr > best.1 {
            best = (i, snr);
        }
    }
    best
}
