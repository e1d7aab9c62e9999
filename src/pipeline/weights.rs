//! Distance-based channel weighting

use crate::error::BeamformError;

/// Guard against division by zero when a microphone sits on the source.
const DISTANCE_EPSILON: f32 = 1e-6;

/// Per-channel weights derived from microphone-to-source distances
#[derive(Debug, Clone)]
pub struct ChannelWeights {
    /// Normalized weights in (0, 1], one per channel
    pub weights: Vec<f32>,
    /// Index of the channel closest to the source (weight exactly 1.0)
    pub closest: usize,
}

impl ChannelWeights {
    /// Sum of all channel weights, used to undo the weighting scale after
    /// coherent summation
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Compute normalized inverse-distance channel weights
///
/// Base weights are inverse distance, so closer channels weigh more. They
/// are normalized by the maximum so the closest channel gets exactly 1.0,
/// then raised to `exponent`:
///
/// - `exponent = 0.0` yields uniform weights of 1.0 regardless of distance
/// - `exponent > 0.0` sharpens emphasis on near channels
/// - `exponent < 0.0` favors distant channels
///
/// # Arguments
///
/// * `distances` - Non-negative microphone-to-source distances, channel order
/// * `exponent` - Distance weight exponent `wp`
///
/// # Errors
///
/// Returns `BeamformError::InvalidInput` if `distances` is empty or contains
/// a negative or non-finite value.
pub fn distance_weights(
    distances: &[f32],
    exponent: f32,
) -> Result<ChannelWeights, BeamformError> {
    if distances.is_empty() {
        return Err(BeamformError::InvalidInput(
            "no distances to weight".to_string(),
        ));
    }
    if distances.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(BeamformError::InvalidInput(
            "distances must be finite and non-negative".to_string(),
        ));
    }

    let base: Vec<f32> = distances.iter().map(|d| 1.0 / (d + DISTANCE_EPSILON)).collect();

    // Closest channel = largest base weight. First index wins on a tie.
    let mut closest = 0;
    let mut max_weight = base[0];
    for (i, &w) in base.iter().enumerate().skip(1) {
        if w > max_weight {
            max_weight = w;
            closest = i;
        }
    }

    let weights = base
        .iter()
        .map(|w| (w / max_weight).powf(exponent))
        .collect();

    Ok(ChannelWeights { weights, closest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_channel_weight_is_one() {
        let w = distance_weights(&[2.0, 0.5, 1.0], 1.0).unwrap();
        assert_eq!(w.closest, 1);
        assert!((w.weights[1] - 1.0).abs() < 1e-6);
        assert_eq!(
            w.weights.iter().filter(|&&x| (x - 1.0).abs() < 1e-6).count(),
            1,
            "exactly one channel should attain weight 1.0"
        );
    }

    #[test]
    fn test_weights_in_unit_interval_for_positive_exponent() {
        let w = distance_weights(&[1.0, 2.0, 4.0, 8.0], 1.5).unwrap();
        for &x in &w.weights {
            assert!(x > 0.0 && x <= 1.0, "weight {} out of (0, 1]", x);
        }
        // Monotonically decreasing with distance.
        for pair in w.weights.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_zero_exponent_is_uniform() {
        let w = distance_weights(&[0.3, 5.0, 17.0], 0.0).unwrap();
        for &x in &w.weights {
            assert_eq!(x, 1.0);
        }
        // The closest channel is still identified for the comparison stream.
        assert_eq!(w.closest, 0);
    }

    #[test]
    fn test_negative_exponent_favors_distant_channels() {
        let w = distance_weights(&[1.0, 4.0], -1.0).unwrap();
        assert!(w.weights[1] > w.weights[0]);
        // Normalization still pins the closest channel's pre-exponent weight,
        // so with a negative exponent it stays exactly 1.0.
        assert!((w.weights[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_distance_does_not_produce_nan() {
        let w = distance_weights(&[0.0, 1.0], 1.0).unwrap();
        assert!(w.weights.iter().all(|x| x.is_finite()));
        assert_eq!(w.closest, 0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(distance_weights(&[], 1.0).is_err());
        assert!(distance_weights(&[1.0, -0.5], 1.0).is_err());
        assert!(distance_weights(&[1.0, f32::NAN], 1.0).is_err());
    }
}
