//! Top-level session state machine: menu, active game, pause. Owns the
//! vision collaborator and the single live game mode instance, and routes
//! one detection frame per tick into it.

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::AppConfig,
    modes::{build_mode, GameMode, ModeKind},
    scene::ModeSnapshot,
    vision::{DetectionFrame, VisionSource},
    KidCamError, Result,
};

/// Where the session currently is. `Menu` holds no game state at all;
/// `Paused` keeps the mode alive but gates its updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Playing,
    Paused,
}

/// High-level input events produced by the windowing collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Start the named game mode from the menu (or restart over a running
    /// one). Unrecognised names are ignored.
    Select(String),
    PauseToggle,
    Cancel,
    Quit,
}

pub struct SessionOrchestrator<V> {
    config: AppConfig,
    vision: V,
    vision_ready: bool,
    phase: SessionPhase,
    active: Option<Box<dyn GameMode>>,
    seed: Option<u64>,
    finished: bool,
}

impl<V: VisionSource> SessionOrchestrator<V> {
    pub fn new(config: AppConfig, vision: V) -> Self {
        Self {
            config,
            vision,
            vision_ready: false,
            phase: SessionPhase::Menu,
            active: None,
            seed: None,
            finished: false,
        }
    }

    /// Fixes the random seed handed to every mode started by this session,
    /// making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn active_kind(&self) -> Option<ModeKind> {
        self.active.as_ref().map(|mode| mode.kind())
    }

    pub fn score(&self) -> Option<u32> {
        self.active.as_ref().map(|mode| mode.score())
    }

    /// Render snapshot of the active mode, if a game is alive (also while
    /// paused, so the frozen scene stays visible).
    pub fn snapshot(&self) -> Option<ModeSnapshot> {
        self.active.as_ref().map(|mode| mode.snapshot())
    }

    pub fn vision(&self) -> &V {
        &self.vision
    }

    /// Applies one input event to the state machine.
    ///
    /// Only a failed vision startup during `Select` is an error; an
    /// unrecognised mode name is a logged no-op per the selection contract.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Select(name) => match name.parse::<ModeKind>() {
                Ok(kind) => self.start_mode(kind),
                Err(KidCamError::UnknownMode(name)) => {
                    tracing::warn!(%name, "ignoring unknown mode selection");
                    Ok(())
                }
                Err(other) => Err(other),
            },
            InputEvent::PauseToggle => {
                match self.phase {
                    SessionPhase::Playing => {
                        self.phase = SessionPhase::Paused;
                        tracing::info!("game paused");
                    }
                    SessionPhase::Paused => {
                        self.phase = SessionPhase::Playing;
                        tracing::info!("game resumed");
                    }
                    SessionPhase::Menu => {}
                }
                Ok(())
            }
            InputEvent::Cancel => {
                self.stop_active();
                Ok(())
            }
            InputEvent::Quit => {
                self.stop_active();
                self.finished = true;
                Ok(())
            }
        }
    }

    /// Advances the session one tick. Only a playing session requests a
    /// capture; a tick without a fresh frame leaves the mode untouched.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        let Some(mode) = self.active.as_mut() else {
            return;
        };
        if !self.vision.capture_tick() {
            return;
        }
        let frame = DetectionFrame {
            faces: self.vision.detect_faces(),
            hands: self.vision.detect_hands(),
            dominant_color: self.vision.detect_dominant_color(),
        };
        mode.update(&frame);
    }

    fn start_mode(&mut self, kind: ModeKind) -> Result<()> {
        if !self.vision_ready {
            self.vision.initialize().map_err(|err| {
                tracing::error!(%err, "cannot enter game: vision startup failed");
                err
            })?;
            self.vision_ready = true;
        }

        self.stop_active();
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut mode = build_mode(kind, &self.config, rng);
        mode.start();
        self.active = Some(mode);
        self.phase = SessionPhase::Playing;
        tracing::info!(mode = kind.name(), "game started");
        Ok(())
    }

    fn stop_active(&mut self) {
        if let Some(mut mode) = self.active.take() {
            mode.stop();
            tracing::info!(mode = mode.kind().name(), "game stopped");
        }
        self.phase = SessionPhase::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scene::SceneView,
        vision::{FaceBox, ScriptedVision},
    };

    fn face_frame(count: usize) -> DetectionFrame {
        DetectionFrame {
            faces: (0..count)
                .map(|i| FaceBox {
                    x: 50.0 * i as f32,
                    y: 60.0,
                    width: 80.0,
                    height: 90.0,
                    confidence: 0.8,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn session_with(frames: Vec<Option<DetectionFrame>>) -> SessionOrchestrator<ScriptedVision> {
        SessionOrchestrator::new(AppConfig::default(), ScriptedVision::new(frames)).with_seed(11)
    }

    #[test]
    fn starts_in_the_menu_with_no_game() {
        let session = session_with(vec![]);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.snapshot().is_none());
        assert!(session.score().is_none());
    }

    #[test]
    fn unknown_selection_is_a_no_op() {
        let mut session = session_with(vec![]);
        session
            .handle_event(InputEvent::Select("laser_tag".into()))
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(!session.vision().is_initialized());
    }

    #[test]
    fn vision_startup_failure_keeps_the_session_in_menu() {
        let mut session = SessionOrchestrator::new(
            AppConfig::default(),
            ScriptedVision::default().with_startup_failure(),
        );
        let err = session
            .handle_event(InputEvent::Select("face_fun".into()))
            .unwrap_err();
        assert!(matches!(err, KidCamError::VisionStartup(_)));
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.snapshot().is_none());
    }

    #[test]
    fn pause_gates_updates_and_capture_requests() {
        let frames = std::iter::repeat_with(|| Some(face_frame(1)))
            .take(10)
            .collect();
        let mut session = session_with(frames);
        session
            .handle_event(InputEvent::Select("face_fun".into()))
            .unwrap();

        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(session.vision().capture_calls(), 3);
        let score_before = session.score().unwrap();

        session.handle_event(InputEvent::PauseToggle).unwrap();
        assert_eq!(session.phase(), SessionPhase::Paused);
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.vision().capture_calls(), 3, "paused ticks never capture");
        assert_eq!(session.score().unwrap(), score_before);
        assert!(session.snapshot().is_some(), "paused scene stays visible");

        session.handle_event(InputEvent::PauseToggle).unwrap();
        session.tick();
        assert_eq!(session.vision().capture_calls(), 4);
    }

    #[test]
    fn a_missed_capture_skips_the_mode_update() {
        let mut session = session_with(vec![None, Some(face_frame(1))]);
        session
            .handle_event(InputEvent::Select("face_fun".into()))
            .unwrap();

        session.tick();
        assert_eq!(session.score(), Some(0), "no frame, no update");
        session.tick();
        assert_eq!(session.score(), Some(10), "fresh frame celebrates the face");
    }

    #[test]
    fn switching_modes_leaks_no_state_between_instances() {
        let frames = std::iter::repeat_with(|| Some(face_frame(2)))
            .take(20)
            .collect();
        let mut session = session_with(frames);
        session
            .handle_event(InputEvent::Select("face_fun".into()))
            .unwrap();
        for _ in 0..15 {
            session.tick();
        }
        let snapshot = session.snapshot().unwrap();
        assert!(snapshot.score > 0);
        assert!(!snapshot.particles.is_empty());

        session.handle_event(InputEvent::Cancel).unwrap();
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.snapshot().is_none());

        session
            .handle_event(InputEvent::Select("motion_magic".into()))
            .unwrap();
        let fresh = session.snapshot().unwrap();
        assert_eq!(fresh.score, 0);
        assert!(fresh.particles.is_empty());
        assert!(matches!(fresh.scene, SceneView::MotionMagic(_)));
        assert_eq!(session.active_kind(), Some(ModeKind::MotionMagic));
    }

    #[test]
    fn quit_finishes_the_session_from_any_phase() {
        let mut session = session_with(vec![Some(face_frame(0))]);
        session
            .handle_event(InputEvent::Select("color_hunt".into()))
            .unwrap();
        session.handle_event(InputEvent::Quit).unwrap();
        assert!(session.is_finished());
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert!(session.snapshot().is_none());
    }
}
