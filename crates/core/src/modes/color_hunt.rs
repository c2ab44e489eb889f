//! Color hunt: the player shows the camera an object of the target color
//! and must hold it steady until the match is confirmed.

use rand::{rngs::StdRng, Rng};

use crate::{
    config::AppConfig,
    mapping::{Rect, Size},
    particles::{jittered_velocity, spawn_radial_burst, ParticleSystem},
    scene::{self, ColorHuntView, ModeSnapshot, SceneView},
    timeline::{Cooldown, IntervalTimer},
    vision::{ColorLabel, DetectionFrame},
};

use super::{GameMode, ModeKind};

/// Consecutive matching ticks required to confirm a target.
const DETECTION_THRESHOLD: u32 = 30;
/// Decay applied to the confirmation count on a mismatching tick.
const MISS_DECAY: u32 = 2;
/// Ticks before an unfound target is rotated out.
const ROTATION_PERIOD: u32 = 600;
/// Chance per tick of ambient particles while any color is detected.
const AMBIENT_CHANCE: f64 = 0.3;
/// Particles in the confirmation celebration burst.
const SUCCESS_BURST: usize = 30;
/// Duration of the success overlay flash.
const SUCCESS_FLASH_TICKS: u32 = 120;

pub struct ColorHuntMode {
    display: Size,
    camera_view: Rect,
    rng: StdRng,
    running: bool,
    score: u32,
    target: ColorLabel,
    detected: Option<ColorLabel>,
    consecutive_detections: u32,
    rotation: IntervalTimer,
    success_flash: Cooldown,
    particles: ParticleSystem,
}

impl ColorHuntMode {
    pub fn new(config: &AppConfig, mut rng: StdRng) -> Self {
        let target = random_target(&mut rng);
        Self {
            display: config.display.size,
            camera_view: config.display.camera_view,
            rng,
            running: false,
            score: 0,
            target,
            detected: None,
            consecutive_detections: 0,
            rotation: IntervalTimer::new(ROTATION_PERIOD),
            success_flash: Cooldown::default(),
            particles: ParticleSystem::new(),
        }
    }

    pub fn target(&self) -> ColorLabel {
        self.target
    }

    pub fn consecutive_detections(&self) -> u32 {
        self.consecutive_detections
    }

    fn choose_new_target(&mut self) {
        // Uniform over the full palette: the fresh target may repeat the
        // one just completed.
        self.target = random_target(&mut self.rng);
        self.consecutive_detections = 0;
        self.rotation.reset();
        tracing::debug!(color = self.target.name(), "new color target");
    }

    fn confirm_target(&mut self) {
        self.score += 1;
        self.success_flash.arm(SUCCESS_FLASH_TICKS);
        spawn_radial_burst(
            &mut self.particles,
            &mut self.rng,
            SUCCESS_BURST,
            (self.display.width * 0.5, self.display.height * 0.5),
            50.0,
            2.0..=8.0,
            3..=8,
            self.target.rgb(),
        );
        tracing::info!(score = self.score, color = self.target.name(), "color confirmed");
        self.choose_new_target();
    }

    fn spawn_ambient_particles(&mut self) {
        let Some(detected) = self.detected else {
            return;
        };
        let (center_x, center_y) = self.camera_view.center();
        for _ in 0..2 {
            let position = (
                center_x + self.rng.random_range(-60.0..=60.0),
                center_y + self.rng.random_range(-60.0..=60.0),
            );
            let size = self.rng.random_range(2..=5) as f32;
            let velocity = jittered_velocity(&mut self.rng, (0.0, -2.0));
            self.particles.spawn(position, detected.rgb(), size, velocity);
        }
    }
}

impl GameMode for ColorHuntMode {
    fn kind(&self) -> ModeKind {
        ModeKind::ColorHunt
    }

    fn start(&mut self) {
        self.running = true;
        tracing::info!(color = self.target.name(), "color hunt started");
    }

    fn stop(&mut self) {
        self.running = false;
        self.particles.clear();
        tracing::info!(score = self.score, "color hunt stopped");
    }

    fn update(&mut self, frame: &DetectionFrame) {
        if !self.running {
            return;
        }

        self.detected = frame.dominant_color;
        if self.detected == Some(self.target) {
            self.consecutive_detections += 1;
            if self.consecutive_detections >= DETECTION_THRESHOLD {
                self.confirm_target();
            }
        } else {
            self.consecutive_detections = self.consecutive_detections.saturating_sub(MISS_DECAY);
        }

        if self.rotation.tick() {
            self.choose_new_target();
        }

        self.particles.update();

        if self.rng.random_bool(AMBIENT_CHANCE) {
            self.spawn_ambient_particles();
        }

        self.success_flash.tick();
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            kind: self.kind(),
            score: self.score,
            particles: scene::particle_views(&self.particles),
            scene: SceneView::ColorHunt(ColorHuntView {
                target: self.target,
                detected: self.detected,
                progress: (self.consecutive_detections as f32 / DETECTION_THRESHOLD as f32)
                    .min(1.0),
                time_remaining: self.rotation.remaining_fraction(),
                success_flash: self.success_flash.active(),
            }),
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}

fn random_target(rng: &mut StdRng) -> ColorLabel {
    ColorLabel::ALL[rng.random_range(0..ColorLabel::ALL.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn mode() -> ColorHuntMode {
        let mut mode = ColorHuntMode::new(&AppConfig::default(), StdRng::seed_from_u64(42));
        mode.start();
        mode
    }

    fn frame(color: Option<ColorLabel>) -> DetectionFrame {
        DetectionFrame {
            dominant_color: color,
            ..Default::default()
        }
    }

    #[test]
    fn thirty_consecutive_matches_confirm_exactly_once() {
        let mut mode = mode();
        let target = mode.target();

        for tick in 0..30 {
            assert_eq!(mode.score(), 0, "no score before tick {tick}");
            mode.update(&frame(Some(target)));
        }

        assert_eq!(mode.score(), 1);
        assert_eq!(mode.consecutive_detections(), 0, "confirmation resets the count");
        assert!(mode.particles.len() >= SUCCESS_BURST, "celebration burst spawned");
    }

    #[test]
    fn a_mismatch_decays_by_two_not_to_zero() {
        let mut mode = mode();
        let target = mode.target();

        for _ in 0..29 {
            mode.update(&frame(Some(target)));
        }
        assert_eq!(mode.consecutive_detections(), 29);

        mode.update(&frame(None));
        assert_eq!(mode.consecutive_detections(), 27);
        assert_eq!(mode.score(), 0);
    }

    #[test]
    fn count_never_goes_below_zero() {
        let mut mode = mode();
        for _ in 0..5 {
            mode.update(&frame(None));
            assert_eq!(mode.consecutive_detections(), 0);
        }
    }

    #[test]
    fn rotation_fires_on_tick_601_not_earlier() {
        let mut mode = mode();
        let target = mode.target();

        // 596 misses, then matches riding into the rotation boundary.
        for _ in 0..596 {
            mode.update(&frame(None));
        }
        for _ in 0..4 {
            mode.update(&frame(Some(target)));
        }
        assert_eq!(mode.consecutive_detections(), 4, "rotation has not fired at tick 600");

        mode.update(&frame(Some(target)));
        assert_eq!(
            mode.consecutive_detections(),
            0,
            "rotation on tick 601 resets the confirmation count"
        );
        assert_eq!(mode.score(), 0);
    }

    #[test]
    fn ambient_particles_appear_while_any_color_is_detected() {
        let mut mode = mode();
        // A non-target detection never confirms but still drives ambience.
        let detected = ColorLabel::ALL
            .into_iter()
            .find(|label| *label != mode.target())
            .unwrap();

        for _ in 0..50 {
            mode.update(&frame(Some(detected)));
        }
        assert!(!mode.particles.is_empty());
        assert_eq!(mode.score(), 0);
    }

    #[test]
    fn no_dominant_color_is_a_normal_non_match() {
        let mut mode = mode();
        for _ in 0..100 {
            mode.update(&frame(None));
        }
        assert_eq!(mode.score(), 0);
        let ModeSnapshot { scene, .. } = mode.snapshot();
        let SceneView::ColorHunt(view) = scene else {
            panic!("wrong scene variant");
        };
        assert_eq!(view.detected, None);
        assert_eq!(view.progress, 0.0);
    }
}
