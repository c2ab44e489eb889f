use crate::{ColorLabel, DetectionFrame, FaceBox, HandDetection, KidCamError, Result};

use super::VisionSource;

/// Deterministic [`VisionSource`] that replays a pre-built list of frames.
///
/// Each scripted entry is either a full [`DetectionFrame`] or `None` for a
/// tick on which capture yields nothing. Used by the `simulate` subcommand
/// and by tests; it also counts `capture_tick` calls so callers can verify
/// that paused sessions stop requesting frames.
#[derive(Debug, Default)]
pub struct ScriptedVision {
    frames: Vec<Option<DetectionFrame>>,
    cursor: usize,
    current: Option<DetectionFrame>,
    fail_startup: bool,
    initialized: bool,
    capture_calls: usize,
}

impl ScriptedVision {
    pub fn new(frames: Vec<Option<DetectionFrame>>) -> Self {
        Self {
            frames,
            ..Default::default()
        }
    }

    /// Builds a script where every tick yields a frame.
    pub fn from_frames(frames: Vec<DetectionFrame>) -> Self {
        Self::new(frames.into_iter().map(Some).collect())
    }

    /// Makes `initialize` fail, for exercising the startup error path.
    pub fn with_startup_failure(mut self) -> Self {
        self.fail_startup = true;
        self
    }

    /// Number of `capture_tick` calls made so far.
    pub fn capture_calls(&self) -> usize {
        self.capture_calls
    }

    /// Whether `initialize` has been called successfully.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl VisionSource for ScriptedVision {
    fn initialize(&mut self) -> Result<()> {
        if self.fail_startup {
            return Err(KidCamError::VisionStartup(
                "scripted source configured to fail".into(),
            ));
        }
        self.initialized = true;
        Ok(())
    }

    fn capture_tick(&mut self) -> bool {
        self.capture_calls += 1;
        match self.frames.get(self.cursor) {
            Some(entry) => {
                self.cursor += 1;
                self.current = entry.clone();
                self.current.is_some()
            }
            None => {
                self.current = None;
                false
            }
        }
    }

    fn detect_faces(&mut self) -> Vec<FaceBox> {
        self.current
            .as_ref()
            .map(|frame| frame.faces.clone())
            .unwrap_or_default()
    }

    fn detect_hands(&mut self) -> Vec<HandDetection> {
        self.current
            .as_ref()
            .map(|frame| frame.hands.clone())
            .unwrap_or_default()
    }

    fn detect_dominant_color(&mut self) -> Option<ColorLabel> {
        self.current.as_ref().and_then(|frame| frame.dominant_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_frames_in_order() {
        let mut vision = ScriptedVision::from_frames(vec![
            DetectionFrame {
                dominant_color: Some(ColorLabel::Red),
                ..Default::default()
            },
            DetectionFrame::default(),
        ]);

        assert!(vision.capture_tick());
        assert_eq!(vision.detect_dominant_color(), Some(ColorLabel::Red));
        assert!(vision.capture_tick());
        assert_eq!(vision.detect_dominant_color(), None);
        assert!(!vision.capture_tick(), "script exhausted");
        assert_eq!(vision.capture_calls(), 3);
    }

    #[test]
    fn missing_entries_report_no_frame() {
        let mut vision = ScriptedVision::new(vec![None, Some(DetectionFrame::default())]);
        assert!(!vision.capture_tick());
        assert!(vision.detect_faces().is_empty());
        assert!(vision.capture_tick());
    }

    #[test]
    fn startup_failure_surfaces_an_error() {
        let mut vision = ScriptedVision::default().with_startup_failure();
        assert!(vision.initialize().is_err());
        assert!(!vision.is_initialized());
    }
}
