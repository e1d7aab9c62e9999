//! Key-value scanning of the recording parameter file
//!
//! The parameter file is free-form text; a parameter is any line containing
//! a key token followed by `=` and a numeric value, e.g.
//! `speed_of_sound = 343.0`.

use std::path::Path;

use crate::error::BeamformError;

/// Parameter file key for the speed of sound in m/s
pub const SPEED_OF_SOUND_KEY: &str = "speed_of_sound";

/// Scan `text` for `key = <number>` and return the value
///
/// The first matching line wins. Returns `None` when the key is absent or
/// its value does not parse as a number.
pub fn parse_param(text: &str, key: &str) -> Option<f32> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((left, right)) = line.split_once('=') else {
            continue;
        };
        if left.trim() != key {
            continue;
        }
        // Take the first token after '=' so trailing units or comments are
        // tolerated ("speed_of_sound = 343.0 # m/s").
        if let Some(token) = right.split_whitespace().next() {
            if let Ok(value) = token.parse::<f32>() {
                return Some(value);
            }
        }
    }
    None
}

/// Read one numeric parameter from a file
///
/// # Errors
///
/// Returns `BeamformError::MissingParameter` when the file cannot be read
/// or the key is not present with a numeric value.
pub fn read_param(path: &Path, key: &str) -> Result<f32, BeamformError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| BeamformError::MissingParameter(format!("{}: {}", path.display(), e)))?;
    parse_param(&text, key).ok_or_else(|| {
        BeamformError::MissingParameter(format!("'{}' not found in {}", key, path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lookup() {
        let text = "# session parameters\nroom = 4\nspeed_of_sound = 343.0\n";
        assert_eq!(parse_param(text, SPEED_OF_SOUND_KEY), Some(343.0));
        assert_eq!(parse_param(text, "room"), Some(4.0));
    }

    #[test]
    fn test_trailing_comment_tolerated() {
        let text = "speed_of_sound=340.5 # m/s measured at 18C\n";
        assert_eq!(parse_param(text, SPEED_OF_SOUND_KEY), Some(340.5));
    }

    #[test]
    fn test_missing_or_non_numeric_key() {
        assert_eq!(parse_param("temperature = warm\n", "temperature"), None);
        assert_eq!(parse_param("speed = 1.0\n", SPEED_OF_SOUND_KEY), None);
        // Key must match the whole token left of '='.
        assert_eq!(parse_param("speed_of_sound_sq = 2\n", SPEED_OF_SOUND_KEY), None);
    }
}
