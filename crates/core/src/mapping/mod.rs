use serde::{Deserialize, Serialize};

/// Width/height pair in logical display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in logical display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Maps detector output from the capture reference space into the camera
/// view rectangle of the display.
///
/// Detections arrive in a fixed capture space (640x480 by default) while the
/// game draws them inside a smaller viewport, so every face box and hand
/// center goes through this translation before any gameplay geometry runs.
#[derive(Debug, Clone, Copy)]
pub struct DetectionAdapter {
    capture: Size,
    view: Rect,
}

impl DetectionAdapter {
    pub fn new(capture: Size, view: Rect) -> Self {
        Self { capture, view }
    }

    /// Returns the camera view rectangle detections are mapped into.
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Maps a capture-space point into the camera view.
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.view.x + x * self.view.width / self.capture.width,
            self.view.y + y * self.view.height / self.capture.height,
        )
    }

    /// Maps a capture-space box into the camera view.
    pub fn map_box(&self, x: f32, y: f32, width: f32, height: f32) -> Rect {
        let (mapped_x, mapped_y) = self.map_point(x, y);
        Rect::new(
            mapped_x,
            mapped_y,
            width * self.view.width / self.capture.width,
            height * self.view.height / self.capture.height,
        )
    }
}
