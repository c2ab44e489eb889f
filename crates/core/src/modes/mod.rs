//! The three game modes and the capability contract they share. Each mode
//! is an independent state machine driven by one [`DetectionFrame`] per
//! tick; it owns its score, timers and particle system outright, and all of
//! that state dies with the instance when the session switches modes.

use std::str::FromStr;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, scene::ModeSnapshot, vision::DetectionFrame, KidCamError};

pub mod color_hunt;
pub mod face_fun;
pub mod motion_magic;

pub use color_hunt::ColorHuntMode;
pub use face_fun::FaceFunMode;
pub use motion_magic::MotionMagicMode;

/// Capability contract every game mode implements.
pub trait GameMode {
    fn kind(&self) -> ModeKind;

    /// Marks the mode as running. Called once by the session after
    /// construction.
    fn start(&mut self);

    /// Tears down transient state (particles, timers). The instance is
    /// dropped right after.
    fn stop(&mut self);

    /// Advances the mode one tick using a fresh detection frame. Not called
    /// while the session is paused or when no frame was captured.
    fn update(&mut self, frame: &DetectionFrame);

    /// Read-only state for the rendering collaborator.
    fn snapshot(&self) -> ModeSnapshot;

    fn score(&self) -> u32;
}

/// Names the three selectable game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    FaceFun,
    ColorHunt,
    MotionMagic,
}

impl ModeKind {
    pub const ALL: [ModeKind; 3] = [ModeKind::FaceFun, ModeKind::ColorHunt, ModeKind::MotionMagic];

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::FaceFun => "face_fun",
            ModeKind::ColorHunt => "color_hunt",
            ModeKind::MotionMagic => "motion_magic",
        }
    }
}

impl FromStr for ModeKind {
    type Err = KidCamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "face_fun" => Ok(ModeKind::FaceFun),
            "color_hunt" => Ok(ModeKind::ColorHunt),
            "motion_magic" => Ok(ModeKind::MotionMagic),
            other => Err(KidCamError::UnknownMode(other.to_string())),
        }
    }
}

/// Constructs a boxed mode of the requested kind with its own random source.
pub fn build_mode(kind: ModeKind, config: &AppConfig, rng: StdRng) -> Box<dyn GameMode> {
    match kind {
        ModeKind::FaceFun => Box::new(FaceFunMode::new(config, rng)),
        ModeKind::ColorHunt => Box::new(ColorHuntMode::new(config, rng)),
        ModeKind::MotionMagic => Box::new(MotionMagicMode::new(config, rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_mode_names() {
        for kind in ModeKind::ALL {
            assert_eq!(kind.name().parse::<ModeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_mode_names() {
        let err = "laser_tag".parse::<ModeKind>().unwrap_err();
        assert!(matches!(err, KidCamError::UnknownMode(name) if name == "laser_tag"));
    }
}
