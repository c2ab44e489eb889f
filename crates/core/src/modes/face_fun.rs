//! Face fun: every new face joining the frame earns a celebration, and
//! detected faces get a steady drizzle of sparkles.

use rand::{rngs::StdRng, Rng};

use crate::{
    config::AppConfig,
    mapping::{DetectionAdapter, Rect, Size},
    palette::{CELEBRATION_COLORS, SPARKLE_COLORS},
    particles::{jittered_velocity, ParticleSystem},
    scene::{self, FaceFunView, ModeSnapshot, SceneView},
    timeline::{Cooldown, IntervalTimer},
    vision::{DetectionFrame, FaceBox},
};

use super::{GameMode, ModeKind};

/// Points awarded when the face count rises.
const CELEBRATION_SCORE: u32 = 10;
/// Particles in one celebration burst.
const CELEBRATION_BURST: usize = 20;
/// Duration of the celebration overlay.
const CELEBRATION_TICKS: u32 = 60;
/// Sparkles emitted per face when the sparkle timer fires.
const SPARKLES_PER_FACE: usize = 3;
/// Ticks between sparkle emissions while faces are present.
const SPARKLE_PERIOD: u32 = 10;
/// Ticks between guidance rotations.
const INSTRUCTION_PERIOD: u32 = 180;

const INSTRUCTIONS: [&str; 4] = [
    "Make faces at the camera!",
    "Smile to create sparkles!",
    "Open your mouth for surprises!",
    "Wink to change colors!",
];

pub struct FaceFunMode {
    display: Size,
    adapter: DetectionAdapter,
    rng: StdRng,
    running: bool,
    score: u32,
    faces: Vec<Rect>,
    last_face_count: usize,
    celebration: Cooldown,
    // Plain counter rather than an interval: the pending emission waits
    // until a face is actually present, then fires immediately.
    sparkle_ticks: u32,
    instruction_rotation: IntervalTimer,
    instruction_index: usize,
    particles: ParticleSystem,
}

impl FaceFunMode {
    pub fn new(config: &AppConfig, rng: StdRng) -> Self {
        Self {
            display: config.display.size,
            adapter: DetectionAdapter::new(config.capture.size, config.display.camera_view),
            rng,
            running: false,
            score: 0,
            faces: Vec::new(),
            last_face_count: 0,
            celebration: Cooldown::default(),
            sparkle_ticks: 0,
            instruction_rotation: IntervalTimer::new(INSTRUCTION_PERIOD),
            instruction_index: 0,
            particles: ParticleSystem::new(),
        }
    }

    pub fn instruction(&self) -> &'static str {
        INSTRUCTIONS[self.instruction_index]
    }

    fn celebrate(&mut self) {
        self.celebration.arm(CELEBRATION_TICKS);
        self.score += CELEBRATION_SCORE;
        for _ in 0..CELEBRATION_BURST {
            let position = (
                self.rng.random_range(0.0..self.display.width),
                self.rng.random_range(0.0..self.display.height * 0.5),
            );
            let color = CELEBRATION_COLORS[self.rng.random_range(0..CELEBRATION_COLORS.len())];
            let size = self.rng.random_range(3..=8) as f32;
            let velocity = jittered_velocity(&mut self.rng, (0.0, -2.0));
            self.particles.spawn(position, color, size, velocity);
        }
        tracing::info!(score = self.score, "new face celebrated");
    }

    fn spawn_face_sparkles(&mut self, faces: &[FaceBox]) {
        for face in faces {
            let mapped = self
                .adapter
                .map_box(face.x, face.y, face.width, face.height);
            for _ in 0..SPARKLES_PER_FACE {
                let position = (
                    mapped.x
                        + self
                            .rng
                            .random_range(-mapped.width * 0.5..=mapped.width * 1.5),
                    mapped.y
                        + self
                            .rng
                            .random_range(-mapped.height * 0.5..=mapped.height * 1.5),
                );
                let color = SPARKLE_COLORS[self.rng.random_range(0..SPARKLE_COLORS.len())];
                let velocity = jittered_velocity(&mut self.rng, (0.0, -1.0));
                self.particles.spawn(position, color, 2.0, velocity);
            }
        }
    }
}

impl GameMode for FaceFunMode {
    fn kind(&self) -> ModeKind {
        ModeKind::FaceFun
    }

    fn start(&mut self) {
        self.running = true;
        tracing::info!("face fun started");
    }

    fn stop(&mut self) {
        self.running = false;
        self.particles.clear();
        self.faces.clear();
        tracing::info!(score = self.score, "face fun stopped");
    }

    fn update(&mut self, frame: &DetectionFrame) {
        if !self.running {
            return;
        }

        if self.instruction_rotation.tick() {
            self.instruction_index = (self.instruction_index + 1) % INSTRUCTIONS.len();
        }

        if frame.faces.len() > self.last_face_count {
            self.celebrate();
        }
        self.last_face_count = frame.faces.len();

        self.sparkle_ticks += 1;
        if self.sparkle_ticks > SPARKLE_PERIOD && !frame.faces.is_empty() {
            self.spawn_face_sparkles(&frame.faces);
            self.sparkle_ticks = 0;
        }

        let adapter = self.adapter;
        self.faces = frame
            .faces
            .iter()
            .map(|face| adapter.map_box(face.x, face.y, face.width, face.height))
            .collect();

        self.particles.update();
        self.celebration.tick();
    }

    fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            kind: self.kind(),
            score: self.score,
            particles: scene::particle_views(&self.particles),
            scene: SceneView::FaceFun(FaceFunView {
                faces: self.faces.clone(),
                instruction: self.instruction().to_string(),
                celebrating: self.celebration.active(),
            }),
        }
    }

    fn score(&self) -> u32 {
        self.score
    }
}
