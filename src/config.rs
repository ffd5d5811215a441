// THEORY:
// `TrackerConfig` collects the handful of tunable constants of the detector. The
// defaults are the values the device firmware has always run with; a JSON file can
// override any subset of them.

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SEARCH_RADIUS: usize = 3;
pub const DEFAULT_TRACK_MARGIN: usize = 3;
pub const DEFAULT_SCAN_BANDS: usize = 15;
pub const DEFAULT_MAX_TRACKS: usize = 10;
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 0x95;

/// Configuration for the marker tracker, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Radius of the square neighbourhood enqueued around every accepted pixel while growing.
    pub search_radius: usize,
    /// How far a track's last box is expanded on every side when re-localizing it.
    pub track_margin: usize,
    /// Number of horizontal bands the frame is split into for new-blob discovery.
    pub scan_bands: usize,
    /// Maximum number of simultaneous tracks.
    pub max_tracks: usize,
    /// A pixel is a marker pixel when every channel is strictly above this value.
    pub brightness_threshold: u8,
    /// Draw the debug overlay into the frame after each pass.
    pub draw_overlay: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            track_margin: DEFAULT_TRACK_MARGIN,
            scan_bands: DEFAULT_SCAN_BANDS,
            max_tracks: DEFAULT_MAX_TRACKS,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            draw_overlay: true,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.scan_bands == 0 {
            return Err(TrackerError::InvalidConfig(
                "scan_bands must be at least 1".to_string(),
            ));
        }
        if self.max_tracks == 0 {
            return Err(TrackerError::InvalidConfig(
                "max_tracks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TrackerError> {
        let text = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_firmware_constants() {
        let config = TrackerConfig::default();
        assert_eq!(config.search_radius, 3);
        assert_eq!(config.track_margin, 3);
        assert_eq!(config.scan_bands, 15);
        assert_eq!(config.max_tracks, 10);
        assert_eq!(config.brightness_threshold, 0x95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TrackerConfig = serde_json::from_str(r#"{ "max_tracks": 4 }"#).unwrap();
        assert_eq!(config.max_tracks, 4);
        assert_eq!(config.scan_bands, DEFAULT_SCAN_BANDS);
    }

    #[test]
    fn zero_bands_is_rejected() {
        let config = TrackerConfig {
            scan_bands: 0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(&path, r#"{ "search_radius": 2, "draw_overlay": false }"#).unwrap();

        let config = TrackerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.search_radius, 2);
        assert!(!config.draw_overlay);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            TrackerConfig::from_json_file(&path),
            Err(TrackerError::Config(_))
        ));
    }
}
