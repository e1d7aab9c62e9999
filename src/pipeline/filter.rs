//! Continuity-preserving high-pass filter
//!
//! A fourth-order Butterworth high-pass realized as two cascaded biquad
//! sections in direct form II transposed. Filter state is an explicit value
//! owned by the caller and threaded window to window, so filtering a
//! recording in windows produces the same output as filtering it in one
//! pass.

use crate::error::BeamformError;

/// Section Q values for a fourth-order Butterworth cascade
/// (1 / (2 cos(pi/8)) and 1 / (2 cos(3 pi/8)))
const SECTION_Q: [f32; 2] = [0.541_196_1, 1.306_563];

/// Normalized biquad coefficients (a0 divided out)
#[derive(Debug, Clone, Copy)]
struct BiquadCoeffs {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl BiquadCoeffs {
    /// High-pass biquad from cutoff, sample rate and section Q
    fn high_pass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = 2.0 * std::f32::consts::PI * cutoff_hz / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);

        let b0 = (1.0 + cos_w0) / 2.0;
        let b1 = -(1.0 + cos_w0);
        let b2 = (1.0 + cos_w0) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_w0;
        let a2 = 1.0 - alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        }
    }
}

/// Delay elements of one biquad section for one channel
#[derive(Debug, Clone, Copy, Default)]
struct SectionState {
    s1: f32,
    s2: f32,
}

/// Filter continuation state for one stream
///
/// Holds the delay elements of both cascade sections for every channel.
/// Create one instance per stream with [`FilterState::zeroed`] and pass it
/// to every [`HighPassFilter::apply`] call for that stream; never share one
/// state between streams.
#[derive(Debug, Clone)]
pub struct FilterState {
    channels: Vec<[SectionState; 2]>,
}

impl FilterState {
    /// Rest state (all delay elements zero) for `channels` channels
    pub fn zeroed(channels: usize) -> Self {
        Self {
            channels: vec![[SectionState::default(); 2]; channels],
        }
    }

    /// Number of channels this state was created for
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

/// Fourth-order Butterworth high-pass filter
///
/// The coefficient set is fixed at construction; all mutable state lives in
/// the caller-owned [`FilterState`].
#[derive(Debug, Clone)]
pub struct HighPassFilter {
    sections: [BiquadCoeffs; 2],
}

impl HighPassFilter {
    /// Create a high-pass filter for the given cutoff and sample rate
    ///
    /// # Errors
    ///
    /// Returns `BeamformError::InvalidInput` if the cutoff is not strictly
    /// between 0 and the Nyquist frequency.
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Result<Self, BeamformError> {
        if sample_rate <= 0.0 {
            return Err(BeamformError::InvalidInput(
                "sample rate must be positive".to_string(),
            ));
        }
        if !(cutoff_hz > 0.0 && cutoff_hz < sample_rate / 2.0) {
            return Err(BeamformError::InvalidInput(format!(
                "cutoff {} Hz outside (0, {}) Hz",
                cutoff_hz,
                sample_rate / 2.0
            )));
        }

        Ok(Self {
            sections: [
                BiquadCoeffs::high_pass(cutoff_hz, sample_rate, SECTION_Q[0]),
                BiquadCoeffs::high_pass(cutoff_hz, sample_rate, SECTION_Q[1]),
            ],
        })
    }

    /// Filter one multichannel window in place, continuing from `state`
    ///
    /// On the very first window for a stream, `state` is the zeroed rest
    /// state. On every later window it must be the state left behind by the
    /// previous call for the same stream; the filtered signal is then
    /// continuous across window boundaries.
    ///
    /// # Errors
    ///
    /// Returns `BeamformError::ChannelCountMismatch` if `state` was created
    /// for a different channel count than `channels`.
    pub fn apply(
        &self,
        channels: &mut [Vec<f32>],
        state: &mut FilterState,
    ) -> Result<(), BeamformError> {
        if channels.len() != state.channels.len() {
            return Err(BeamformError::ChannelCountMismatch(format!(
                "filter state holds {} channels, window has {}",
                state.channels.len(),
                channels.len()
            )));
        }

        for (samples, channel_state) in channels.iter_mut().zip(state.channels.iter_mut()) {
            for sample in samples.iter_mut() {
                let mut x = *sample;
                for (coeffs, s) in self.sections.iter().zip(channel_state.iter_mut()) {
                    // Direct form II transposed.
                    let y = coeffs.b0 * x + s.s1;
                    s.s1 = coeffs.b1 * x + s.s2 - coeffs.a1 * y;
                    s.s2 = coeffs.b2 * x - coeffs.a2 * y;
                    x = y;
                }
                *sample = x;
            }
        }

        Ok(())
    }
}
