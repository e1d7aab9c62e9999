//! Text parsing for microphone positions and the source track

use std::path::Path;

use glam::Vec3;

use crate::error::BeamformError;
use crate::geometry::{MicrophoneArray, SourceTrack, TrackSample};

/// Parse whitespace-separated numeric rows, skipping blank and `#` lines
///
/// `NaN` tokens parse to `f32::NAN`; rows must all have the same width.
fn parse_rows(text: &str) -> Result<Vec<Vec<f32>>, BeamformError> {
    let mut rows: Vec<Vec<f32>> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f32>().map_err(|_| {
                    BeamformError::MalformedGeometry(format!(
                        "line {}: '{}' is not a number",
                        line_no + 1,
                        token
                    ))
                })
            })
            .collect::<Result<Vec<f32>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(BeamformError::MalformedGeometry(format!(
                    "line {}: expected {} columns, found {}",
                    line_no + 1,
                    first.len(),
                    row.len()
                )));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(BeamformError::MalformedGeometry(
            "no data rows found".to_string(),
        ));
    }
    Ok(rows)
}

/// Parse microphone positions from text
///
/// Accepts either N rows of `x y z` (one microphone per row) or exactly 3
/// rows of N columns (one coordinate axis per row); any other shape is a
/// malformed geometry file. When the file is exactly 3x3 the row-per-
/// microphone reading applies.
pub fn parse_mic_positions(text: &str) -> Result<MicrophoneArray, BeamformError> {
    let rows = parse_rows(text)?;
    let width = rows[0].len();

    let positions: Vec<Vec3> = if width == 3 {
        rows.iter().map(|r| Vec3::new(r[0], r[1], r[2])).collect()
    } else if rows.len() == 3 {
        (0..width)
            .map(|c| Vec3::new(rows[0][c], rows[1][c], rows[2][c]))
            .collect()
    } else {
        return Err(BeamformError::MalformedGeometry(format!(
            "expected Nx3 or 3xN positions, found {}x{}",
            rows.len(),
            width
        )));
    };

    MicrophoneArray::new(positions)
}

/// Parse a source track from text
///
/// Rows are `timestamp x y z`; a `NaN` in any coordinate marks the source
/// inactive at that timestamp.
pub fn parse_source_track(text: &str) -> Result<SourceTrack, BeamformError> {
    let rows = parse_rows(text)?;
    if rows[0].len() != 4 {
        return Err(BeamformError::MalformedGeometry(format!(
            "expected 4 columns (t x y z), found {}",
            rows[0].len()
        )));
    }

    let samples: Vec<TrackSample> = rows
        .iter()
        .map(|r| {
            let position = if r[1].is_nan() || r[2].is_nan() || r[3].is_nan() {
                None
            } else {
                Some(Vec3::new(r[1], r[2], r[3]))
            };
            TrackSample {
                time_s: r[0],
                position,
            }
        })
        .collect();

    SourceTrack::new(samples)
}

/// Load microphone positions from a file
pub fn load_mic_positions(path: &Path) -> Result<MicrophoneArray, BeamformError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| BeamformError::MalformedGeometry(format!("{}: {}", path.display(), e)))?;
    parse_mic_positions(&text)
}

/// Load a source track from a file
pub fn load_source_track(path: &Path) -> Result<SourceTrack, BeamformError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| BeamformError::MalformedGeometry(format!("{}: {}", path.display(), e)))?;
    parse_source_track(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_per_microphone() {
        let array = parse_mic_positions("0 0 0\n1 0 0\n# comment\n0 1 0\n0 0 1\n").unwrap();
        assert_eq!(array.channel_count(), 4);
        assert_eq!(array.positions()[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_axis_per_row() {
        // 3 rows of 4 columns: one coordinate axis per row.
        let array = parse_mic_positions("0 1 2 3\n4 5 6 7\n8 9 10 11\n").unwrap();
        assert_eq!(array.channel_count(), 4);
        assert_eq!(array.positions()[2], Vec3::new(2.0, 6.0, 10.0));
    }

    #[test]
    fn test_bad_shape_rejected() {
        assert!(parse_mic_positions("0 1\n2 3\n").is_err());
        assert!(parse_mic_positions("").is_err());
        assert!(parse_mic_positions("0 0 zero\n").is_err());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(parse_mic_positions("0 0 0\n1 0\n").is_err());
    }

    #[test]
    fn test_source_track_with_inactive_samples() {
        let track = parse_source_track("0.0 NaN NaN NaN\n0.5 1.0 2.0 3.0\n1.0 NaN NaN NaN\n")
            .unwrap();
        assert_eq!(track.samples().len(), 3);
        assert_eq!(track.location_at(0.0), None);
        assert_eq!(track.location_at(0.5), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(track.location_at(1.0), None);
    }

    #[test]
    fn test_source_track_wrong_width_rejected() {
        assert!(parse_source_track("0.0 1.0 2.0\n").is_err());
    }
}
