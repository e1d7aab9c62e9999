//! Multichannel WAV loading and output writing

use std::path::Path;

use crate::error::BeamformError;

/// Channel-major multichannel audio
///
/// All channels have the same length and sample rate; samples are f32
/// normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct MultichannelBuffer {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// One sample vector per channel, all of equal length
    pub channels: Vec<Vec<f32>>,
}

impl MultichannelBuffer {
    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recording duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.len() as f32 / self.sample_rate as f32
    }
}

/// Load a multichannel WAV file
///
/// Integer PCM is converted to f32 in [-1.0, 1.0]; float WAV is taken as-is.
/// Samples are deinterleaved into channel-major order.
///
/// # Errors
///
/// Returns `BeamformError::DecodingError` if the file cannot be opened or
/// decoded, or `BeamformError::InvalidInput` if it holds no channels.
pub fn load_wav(path: &Path) -> Result<MultichannelBuffer, BeamformError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?;
    let spec = reader.spec();

    if spec.channels == 0 {
        return Err(BeamformError::InvalidInput(format!(
            "{}: WAV file has no channels",
            path.display()
        )));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?
        }
    };

    let channel_count = spec.channels as usize;
    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame.iter()) {
            channel.push(sample);
        }
    }

    log::debug!(
        "Loaded {}: {} channels, {} frames at {} Hz",
        path.display(),
        channel_count,
        frames,
        spec.sample_rate
    );

    Ok(MultichannelBuffer {
        sample_rate: spec.sample_rate,
        channels,
    })
}

/// Write a mono stream as a 16-bit PCM WAV file
///
/// Samples are clamped to [-1.0, 1.0] before conversion.
///
/// # Errors
///
/// Returns `BeamformError::DecodingError` if the file cannot be created or
/// written.
pub fn write_mono_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), BeamformError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?;
    }
    writer
        .finalize()
        .map_err(|e| BeamformError::DecodingError(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_wav_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("speechbeam_test_{}_{}.wav", std::process::id(), name))
    }

    #[test]
    fn test_mono_write_read_round_trip() {
        let path = temp_wav_path("round_trip");
        let samples: Vec<f32> = (0..256).map(|n| (n as f32 * 0.05).sin() * 0.8).collect();

        write_mono_wav(&path, &samples, 16_000).unwrap();
        let loaded = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.channel_count(), 1);
        assert_eq!(loaded.sample_rate, 16_000);
        assert_eq!(loaded.len(), samples.len());
        for (&a, &b) in samples.iter().zip(loaded.channels[0].iter()) {
            // 16-bit quantization tolerance.
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_multichannel_deinterleave() {
        let path = temp_wav_path("deinterleave");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for frame in 0..10 {
            writer.write_sample((frame * 100) as i16).unwrap();
            writer.write_sample(-(frame * 100) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.channel_count(), 2);
        assert_eq!(loaded.len(), 10);
        for frame in 0..10 {
            assert!(loaded.channels[0][frame] >= 0.0);
            assert!(loaded.channels[1][frame] <= 0.0);
            assert!((loaded.channels[0][frame] + loaded.channels[1][frame]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_file_is_decoding_error() {
        let result = load_wav(Path::new("/nonexistent/speechbeam.wav"));
        assert!(matches!(result, Err(BeamformError::DecodingError(_))));
    }
}
