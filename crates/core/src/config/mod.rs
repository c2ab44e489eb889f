use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    mapping::{Rect, Size},
    Result,
};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub capture: CaptureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads a configuration file serialised as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Logical display layout the games position their effects in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub size: Size,
    /// Viewport the camera feed (and all mapped detections) occupy.
    pub camera_view: Rect,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            size: Size::new(1024.0, 768.0),
            camera_view: Rect::new(50.0, 50.0, 320.0, 240.0),
        }
    }
}

/// Properties of the capture reference space detections are reported in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub size: Size,
    /// Nominal tick rate of the session loop; all game timers count ticks.
    pub ticks_per_second: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            size: Size::new(640.0, 480.0),
            ticks_per_second: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_spaces() {
        let config = AppConfig::default();
        assert_eq!(config.capture.size, Size::new(640.0, 480.0));
        assert_eq!(config.display.size, Size::new(1024.0, 768.0));
        assert_eq!(config.capture.ticks_per_second, 30);
    }

    #[test]
    fn round_trips_through_json() {
        let config = AppConfig::default();
        let raw = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.display.camera_view, config.display.camera_view);
        assert_eq!(back.capture.ticks_per_second, 30);
    }
}
