//! Types and the collaborator contract for the computer-vision side of the
//! system. The core never touches pixels; it consumes one [`DetectionFrame`]
//! per tick from an implementation of [`VisionSource`] and treats a missing
//! frame as "nothing changed this tick".

use serde::{Deserialize, Serialize};

use crate::{
    palette::{self, Rgb},
    Result,
};

pub mod scripted;

pub use scripted::ScriptedVision;

/// The fixed set of color labels the dominant-color classifier reports.
/// A reading below the classifier's pixel floor is `None` on the frame,
/// which every consumer treats as a normal non-match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLabel {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl ColorLabel {
    /// Every label the classifier can produce, in reporting order.
    pub const ALL: [ColorLabel; 5] = [
        ColorLabel::Red,
        ColorLabel::Blue,
        ColorLabel::Green,
        ColorLabel::Yellow,
        ColorLabel::Purple,
    ];

    /// Display color associated with the label.
    pub fn rgb(self) -> Rgb {
        match self {
            ColorLabel::Red => palette::RED,
            ColorLabel::Blue => palette::BLUE,
            ColorLabel::Green => palette::GREEN,
            ColorLabel::Yellow => palette::YELLOW,
            ColorLabel::Purple => palette::PURPLE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorLabel::Red => "red",
            ColorLabel::Blue => "blue",
            ColorLabel::Green => "green",
            ColorLabel::Yellow => "yellow",
            ColorLabel::Purple => "purple",
        }
    }
}

/// One detected face in capture-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub confidence: f32,
}

/// One detected hand in capture-space pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    pub center: (f32, f32),
    pub landmarks: Vec<(f32, f32)>,
}

/// Snapshot of all recognition results for a single tick. Immutable once
/// produced; the game modes only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    pub faces: Vec<FaceBox>,
    pub hands: Vec<HandDetection>,
    pub dominant_color: Option<ColorLabel>,
}

/// Contract the core needs from the capture/inference collaborator.
///
/// `initialize` is called once, lazily, when a game is first started; its
/// failure is the only vision error surfaced to the user. After that the
/// session calls `capture_tick` once per tick and, when it reports a fresh
/// frame, reads the three detection products for that frame.
pub trait VisionSource {
    /// Opens the capture device and warms up the detectors.
    fn initialize(&mut self) -> Result<()>;

    /// Attempts to advance to a new frame. `false` means no frame is
    /// available this tick.
    fn capture_tick(&mut self) -> bool;

    /// Faces detected in the current frame, in reporting order.
    fn detect_faces(&mut self) -> Vec<FaceBox>;

    /// Hands detected in the current frame, in reporting order.
    fn detect_hands(&mut self) -> Vec<HandDetection>;

    /// Area-majority dominant color of the current frame, if any region
    /// cleared the classifier's minimum pixel count.
    fn detect_dominant_color(&mut self) -> Option<ColorLabel>;
}
