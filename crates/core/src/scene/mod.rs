//! Read-only state snapshots handed to the rendering collaborator each
//! tick. The renderer draws from these views; it never gets write access to
//! mode state.

use serde::{Deserialize, Serialize};

use crate::{mapping::Rect, modes::ModeKind, palette::Rgb, particles::Particle, vision::ColorLabel};

/// Everything the renderer needs to draw the active mode for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeSnapshot {
    pub kind: ModeKind,
    pub score: u32,
    pub particles: Vec<ParticleView>,
    pub scene: SceneView,
}

impl ModeSnapshot {
    /// Serialises the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Mode-specific portion of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneView {
    ColorHunt(ColorHuntView),
    FaceFun(FaceFunView),
    MotionMagic(MotionMagicView),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorHuntView {
    pub target: ColorLabel,
    pub detected: Option<ColorLabel>,
    /// Confirmation progress toward the detection threshold, in [0, 1].
    pub progress: f32,
    /// Fraction of the rotation window still to run, in [0, 1].
    pub time_remaining: f32,
    pub success_flash: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceFunView {
    /// Face boxes already mapped into the camera view.
    pub faces: Vec<Rect>,
    pub instruction: String,
    pub celebrating: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionMagicView {
    pub wands: Vec<WandView>,
    pub stars: Vec<StarView>,
    pub trails: Vec<TrailView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WandView {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailView {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
}

/// Particle with its remaining life expressed as draw opacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    pub opacity: f32,
}

impl From<&Particle> for ParticleView {
    fn from(particle: &Particle) -> Self {
        Self {
            x: particle.x,
            y: particle.y,
            color: particle.color,
            size: particle.size,
            opacity: particle.life as f32 / particle.max_life.max(1) as f32,
        }
    }
}

/// Collects render views for every live particle in a system.
pub fn particle_views(system: &crate::particles::ParticleSystem) -> Vec<ParticleView> {
    system.particles().iter().map(ParticleView::from).collect()
}
