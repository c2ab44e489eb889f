use serde::{Deserialize, Serialize};

/// 8-bit RGB triple used for particles, wands, stars and trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
pub const PINK: Rgb = Rgb::new(255, 192, 203);
pub const MAGENTA: Rgb = Rgb::new(255, 100, 255);

/// Wand/star colors, assigned cyclically by hand index.
pub const MAGIC_COLORS: [Rgb; 6] = [PURPLE, PINK, YELLOW, BLUE, GREEN, MAGENTA];

/// Accent colors for celebration bursts.
pub const CELEBRATION_COLORS: [Rgb; 4] = [YELLOW, PINK, ORANGE, PURPLE];

/// Colors for the small sparkles emitted around detected faces.
pub const SPARKLE_COLORS: [Rgb; 3] = [WHITE, YELLOW, PINK];
