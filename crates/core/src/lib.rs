//! Core library for the Kid Cam camera games application.
//!
//! The crate owns everything with real state and timing: the session state
//! machine, the three game modes, their tick timers, and the particle
//! simulation they share. Video capture, detection inference, drawing and
//! window plumbing live behind narrow collaborator traits so the core can
//! be driven deterministically by tests and by the command line demo.

pub mod config;
pub mod error;
pub mod mapping;
pub mod modes;
pub mod palette;
pub mod particles;
pub mod scene;
pub mod session;
pub mod timeline;
pub mod vision;

pub use config::{AppConfig, CaptureConfig, DisplayConfig};
pub use error::{KidCamError, Result};
pub use mapping::{DetectionAdapter, Rect, Size};
pub use modes::{build_mode, ColorHuntMode, FaceFunMode, GameMode, ModeKind, MotionMagicMode};
pub use palette::Rgb;
pub use particles::{Particle, ParticleHandle, ParticleSystem};
pub use scene::{ModeSnapshot, SceneView};
pub use session::{InputEvent, SessionOrchestrator, SessionPhase};
pub use timeline::{Cooldown, IntervalTimer};
pub use vision::{
    ColorLabel, DetectionFrame, FaceBox, HandDetection, ScriptedVision, VisionSource,
};
