//! Motion magic: each detected hand projects a wand into the scene, and
//! wands catch the stars drifting down from the top of the display.

use rand::{rngs::StdRng, Rng};

use crate::{
    config::AppConfig,
    mapping::{DetectionAdapter, Size},
    palette::{Rgb, MAGIC_COLORS},
    particles::{jittered_velocity, spawn_radial_burst, ParticleSystem},
    scene::{self, ModeSnapshot, MotionMagicView, SceneView, StarView, TrailView, WandView},
    timeline::IntervalTimer,
    vision::{DetectionFrame, HandDetection},
};

use super::{GameMode, ModeKind};

/// Ticks between star spawns.
const STAR_SPAWN_PERIOD: u32 = 60;
/// Points per caught star.
const CATCH_SCORE: u32 = 10;
/// Particles in a catch burst.
const CATCH_BURST: usize = 15;
/// Margin below the display before a star is discarded.
const BOTTOM_MARGIN: f32 = 50.0;
/// Trail lifetime in ticks.
const TRAIL_LIFE: u32 = 30;
/// Trail starting size.
const TRAIL_SIZE: f32 = 15.0;
/// Multiplicative trail size decay per tick.
const TRAIL_DECAY: f32 = 0.95;
/// Trails below this size are removed regardless of remaining life.
const TRAIL_MIN_SIZE: f32 = 1.0;
/// Chance per hand per tick of a stray hand sparkle.
const HAND_SPARKLE_CHANCE: f64 = 0.5;

/// Interaction zone derived from one hand detection. Rebuilt from scratch
/// every tick; there is no wand identity across ticks, so color follows the
/// detection index even if the detector reorders hands between ticks.
#[derive(Debug, Clone)]
pub struct MagicWand {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
}

/// A star drifting down the display at constant velocity.
#[derive(Debug, Clone)]
pub struct FallingStar {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub size: f32,
    pub rotation: f32,
    pub caught: bool,
}

impl FallingStar {
    /// Whether the wand's zone overlaps this star.
    pub fn is_caught_by(&self, wand: &MagicWand) -> bool {
        let distance = ((self.x - wand.x).powi(2) + (self.y - wand.y).powi(2)).sqrt();
        distance < wand.size + self.size
    }
}

/// Decaying marker left behind a moving wand.
#[derive(Debug, Clone)]
pub struct MagicTrail {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub size: f32,
    pub life: u32,
}

pub struct MotionMagicMode {
    display: Size,
    adapter: DetectionAdapter,
    rng: StdRng,
    running: bool,
    score: u32,
    ticks: u64,
    wands: Vec<MagicWand>,
    stars: Vec<FallingStar>,
    trails: Vec<MagicTrail>,
    star_spawn: IntervalTimer,
    particles: ParticleSystem,
}

impl MotionMagicMode {
    pub fn new(config: &AppConfig, rng: StdRng) -> Self {
        Self {
            display: config.display.size,
            adapter: DetectionAdapter::new(config.capture.size, config.display.camera_view),
            rng,
            running: false,
            score: 0,
            ticks: 0,
            wands: Vec::new(),
            stars: Vec::new(),
            trails: Vec::new(),
            star_spawn: IntervalTimer::new(STAR_SPAWN_PERIOD),
            particles: ParticleSystem::new(),
        }
    }

    fn rebuild_wands(&mut self, hands: &[HandDetection]) {
        self.wands.clear();
        for (index, hand) in hands.iter().enumerate() {
            let (x, y) = self.adapter.map_point(hand.center.0, hand.center.1);
            let color = MAGIC_COLORS[index % MAGIC_COLORS.len()];
            let pulse = (self.ticks as f32 * 0.1 + index as f32).sin().abs();
            let wand = MagicWand {
                x,
                y,
                color,
                size: 20.0 + pulse * 10.0,
            };
            self.trails.push(MagicTrail {
                x: wand.x,
                y: wand.y,
                color: wand.color,
                size: TRAIL_SIZE,
                life: TRAIL_LIFE,
            });
            self.wands.push(wand);
        }
    }

    fn spawn_star(&mut self) {
        self.stars.push(FallingStar {
            x: self.rng.random_range(0.0..self.display.width),
            y: -20.0,
            vx: self.rng.random_range(-2.0..=2.0),
            vy: self.rng.random_range(2.0..=5.0),
            color: MAGIC_COLORS[self.rng.random_range(0..MAGIC_COLORS.len())],
            size: self.rng.random_range(8..=15) as f32,
            rotation: 0.0,
            caught: false,
        });
    }

    fn update_stars(&mut self) {
        let mut catches: Vec<(f32, f32, Rgb)> = Vec::new();

        for star in &mut self.stars {
            if star.caught {
                continue;
            }
            star.x += star.vx;
            star.y += star.vy;
            star.rotation += 0.1;

            // First wand in iteration order wins the catch.
            if self.wands.iter().any(|wand| star.is_caught_by(wand)) {
                star.caught = true;
                catches.push((star.x, star.y, star.color));
            }
        }

        for (x, y, color) in catches {
            self.score += CATCH_SCORE;
            spawn_radial_burst(
                &mut self.particles,
                &mut self.rng,
                CATCH_BURST,
                (x, y),
                10.0,
                2.0..=6.0,
                3..=8,
                color,
            );
            tracing::debug!(score = self.score, "star caught");
        }

        let bottom = self.display.height + BOTTOM_MARGIN;
        self.stars.retain(|star| !star.caught && star.y <= bottom);
    }

    fn update_trails(&mut self) {
        for trail in &mut self.trails {
            trail.life = trail.life.saturating_sub(1);
            trail.size *= TRAIL_DECAY;
        }
        self.trails
            .retain(|trail| trail.life > 0 && trail.size >= TRAIL_MIN_SIZE);
    }

    fn spawn_hand_sparkles(&mut self, hands: &[HandDetection]) {
        for (index, hand) in hands.iter().enumerate() {
            if !self.rng.random_bool(HAND_SPARKLE_CHANCE) {
                continue;
            }
            let (x, y) = self.adapter.map_point(hand.center.0, hand.center.1);
            let position = (
                x + self.rng.random_range(-20.0..=20.0),
                y + self.rng.random_range(-20.0..=20.0),
            );
            let color = MAGIC_COLORS[index % MAGIC_COLORS.len()];
            let size = self.rng.random_range(2..=6) as f32;
            let base = (
                self.rng.random_range(-2.0..=2.0),
                self.rng.random_range(-3.0..=1.0),
            );
            let velocity = jittered_velocity(&mut self.rng, base);
            self.particles.spawn(position, color, size, velocity);
        }
    }
}

impl GameMode for MotionMagicMode {
    fn kind(&self) -> ModeKind {
        ModeKind::MotionMagic
    }

    fn start(&mut self) {
        self.running = true;
        tracing::info!("motion magic started");
    }

    fn stop(&mut self) {
        self.running = false;
        self.particles.clear();
        self.wands.clear();
        self.stars.clear();
        self.trails.clear();
        tracing::info!(score = self.score, "motion magic stopped");
    }

    fn update(&mut self, frame: &DetectionFrame) {
        if !self.running {
            return;
        }

        self.ticks += 1;
        self.rebuild_wands(&frame.hands);

        if self.star_spawn.tick() {
            self.spawn_star();
        }
        self.update_stars();

        self.particles.update();
        self.update_trails();
        self.spawn_hand_sparkles(&frame.hands);
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            kind: self.kind(),
            score: self.score,
            particles: scene::particle_views(&self.particles),
            scene: SceneView::MotionMagic(MotionMagicView {
                wands: self
                    .wands
                    .iter()
                    .map(|wand| WandView {
                        x: wand.x,
                        y: wand.y,
                        color: wand.color,
                        size: wand.size,
                    })
                    .collect(),
                stars: self
                    .stars
                    .iter()
                    .filter(|star| !star.caught)
                    .map(|star| StarView {
                        x: star.x,
                        y: star.y,
                        size: star.size,
                        color: star.color,
                        rotation: star.rotation,
                    })
                    .collect(),
                trails: self
                    .trails
                    .iter()
                    .map(|trail| TrailView {
                        x: trail.x,
                        y: trail.y,
                        color: trail.color,
                        size: trail.size,
                        opacity: trail.life as f32 / TRAIL_LIFE as f32,
                    })
                    .collect(),
            }),
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn mode() -> MotionMagicMode {
        let mut mode = MotionMagicMode::new(&AppConfig::default(), StdRng::seed_from_u64(9));
        mode.start();
        mode
    }

    fn frame_with_hands(centers: &[(f32, f32)]) -> DetectionFrame {
        DetectionFrame {
            hands: centers
                .iter()
                .map(|center| HandDetection {
                    center: *center,
                    landmarks: vec![*center],
                })
                .collect(),
            ..Default::default()
        }
    }

    fn star_view(mode: &MotionMagicMode) -> Vec<StarView> {
        match mode.snapshot().scene {
            SceneView::MotionMagic(view) => view.stars,
            _ => panic!("wrong scene variant"),
        }
    }

    #[test]
    fn catch_test_uses_combined_radii() {
        let star = FallingStar {
            x: 100.0,
            y: 100.0,
            vx: 0.0,
            vy: 0.0,
            color: MAGIC_COLORS[0],
            size: 10.0,
            rotation: 0.0,
            caught: false,
        };
        let near = MagicWand {
            x: 105.0,
            y: 100.0,
            color: MAGIC_COLORS[0],
            size: 8.0,
        };
        let far = MagicWand {
            x: 130.0,
            y: 100.0,
            color: MAGIC_COLORS[0],
            size: 8.0,
        };

        assert!(star.is_caught_by(&near), "distance 5 < 18");
        assert!(!star.is_caught_by(&far), "distance 30 >= 18");
    }

    #[test]
    fn wand_colors_follow_detection_index() {
        let mut mode = mode();
        mode.update(&frame_with_hands(&[(100.0, 100.0), (400.0, 300.0)]));

        assert_eq!(mode.wands.len(), 2);
        assert_eq!(mode.wands[0].color, MAGIC_COLORS[0]);
        assert_eq!(mode.wands[1].color, MAGIC_COLORS[1]);
        for wand in &mode.wands {
            assert!((20.0..=30.0).contains(&wand.size));
        }
    }

    #[test]
    fn stars_spawn_on_the_61st_tick() {
        let mut mode = mode();
        for _ in 0..60 {
            mode.update(&DetectionFrame::default());
        }
        assert!(star_view(&mode).is_empty());

        mode.update(&DetectionFrame::default());
        assert_eq!(star_view(&mode).len(), 1);
    }

    #[test]
    fn a_wand_on_the_star_path_catches_it() {
        let mut mode = mode();
        for _ in 0..61 {
            mode.update(&DetectionFrame::default());
        }
        let star = mode.stars[0].clone();
        let next = (star.x + star.vx, star.y + star.vy);

        // Invert the adapter mapping so the wand lands exactly on the
        // star's next position.
        let view = mode.adapter.view();
        let capture = (
            (next.0 - view.x) * 640.0 / view.width,
            (next.1 - view.y) * 480.0 / view.height,
        );

        mode.update(&frame_with_hands(&[capture]));
        assert_eq!(mode.score(), CATCH_SCORE);
        assert!(star_view(&mode).is_empty(), "caught star pruned the same tick");
        assert!(mode.particles.len() >= CATCH_BURST, "catch burst emitted");
    }

    #[test]
    fn stars_past_the_bottom_are_discarded_uncaught() {
        let mut mode = mode();
        for _ in 0..1000 {
            mode.update(&DetectionFrame::default());
        }
        // 16 stars spawned by tick 1000; the slowest clear the 818-unit
        // drop in ~420 ticks, so only the latest handful can be alive.
        assert!(!mode.stars.is_empty());
        assert!(mode.stars.len() <= 7);
        assert_eq!(mode.score(), 0);
    }

    #[test]
    fn trails_fade_out_after_their_lifetime() {
        let mut mode = mode();
        mode.update(&frame_with_hands(&[(320.0, 240.0)]));
        assert_eq!(mode.trails.len(), 1);

        for _ in 0..28 {
            mode.update(&DetectionFrame::default());
        }
        assert_eq!(mode.trails.len(), 1, "still alive one tick before expiry");
        assert!(mode.trails[0].size < TRAIL_SIZE);

        mode.update(&DetectionFrame::default());
        assert!(mode.trails.is_empty(), "life reaches zero on tick 30");
    }

    #[test]
    fn stopping_clears_all_transient_state() {
        let mut mode = mode();
        for _ in 0..100 {
            mode.update(&frame_with_hands(&[(320.0, 240.0)]));
        }
        mode.stop();
        assert!(mode.particles.is_empty());
        assert!(mode.stars.is_empty());
        assert!(mode.trails.is_empty());
        assert!(mode.wands.is_empty());
    }
}
