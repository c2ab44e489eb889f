//! Mode-agnostic particle simulation. Every game mode owns one
//! [`ParticleSystem`] and spawns into it from its own event logic; the
//! system only advances physics and expires particles.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::palette::Rgb;

/// Downward acceleration applied to every particle, in units per tick².
pub const GRAVITY: f32 = 0.2;

/// Default particle lifetime in ticks.
pub const DEFAULT_LIFE: u32 = 60;

/// Identifier handed back by [`ParticleSystem::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle(u64);

/// One short-lived visual particle. Invariant: `life <= max_life`, and the
/// particle is removed from its system once `life` reaches 0.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleHandle,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    pub size: f32,
    pub life: u32,
    pub max_life: u32,
}

#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    next_id: u64,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a particle with the default lifetime.
    pub fn spawn(
        &mut self,
        position: (f32, f32),
        color: Rgb,
        size: f32,
        velocity: (f32, f32),
    ) -> ParticleHandle {
        self.spawn_with_life(position, color, size, velocity, DEFAULT_LIFE)
    }

    pub fn spawn_with_life(
        &mut self,
        position: (f32, f32),
        color: Rgb,
        size: f32,
        velocity: (f32, f32),
        life: u32,
    ) -> ParticleHandle {
        let id = ParticleHandle(self.next_id);
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            x: position.0,
            y: position.1,
            vx: velocity.0,
            vy: velocity.1,
            color,
            size,
            life,
            max_life: life,
        });
        id
    }

    /// Advances every particle one tick and compacts away the expired ones.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.vy += GRAVITY;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|particle| particle.life > 0);
    }

    /// Drops every live particle. Used when a mode stops.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.particles.iter().any(|particle| particle.id == handle)
    }
}

/// Adds the standard spawn jitter to a base velocity: up to ±2 horizontally
/// and ±1 vertically.
pub fn jittered_velocity(rng: &mut impl Rng, base: (f32, f32)) -> (f32, f32) {
    (
        base.0 + (rng.random::<f32>() - 0.5) * 4.0,
        base.1 + (rng.random::<f32>() - 0.5) * 2.0,
    )
}

/// Spawns `count` particles flying outward from `center` at random angles.
/// Positions scatter uniformly within ±`scatter` of the center on each axis;
/// speeds and integer sizes are drawn from the given ranges.
pub fn spawn_radial_burst(
    system: &mut ParticleSystem,
    rng: &mut impl Rng,
    count: usize,
    center: (f32, f32),
    scatter: f32,
    speed: RangeInclusive<f32>,
    size: RangeInclusive<u32>,
    color: Rgb,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let magnitude = rng.random_range(speed.clone());
        let velocity = jittered_velocity(rng, (angle.cos() * magnitude, angle.sin() * magnitude));
        let position = (
            center.0 + rng.random_range(-scatter..=scatter),
            center.1 + rng.random_range(-scatter..=scatter),
        );
        let size = rng.random_range(size.clone()) as f32;
        system.spawn(position, color, size, velocity);
    }
}
