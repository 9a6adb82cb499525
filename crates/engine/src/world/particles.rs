use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_PARTICLE_SPEED: f32 = 5.0;
pub const DEFAULT_MAX_PARTICLES: usize = 512;

/// One raindrop in screen space. `speed` is in pixels per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub speed: f32,
    pub max_particles: usize,
    pub seed: Option<u64>,
}

impl ParticleConfig {
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            viewport_width: width as f32,
            viewport_height: height as f32,
            speed: DEFAULT_PARTICLE_SPEED,
            max_particles: DEFAULT_MAX_PARTICLES,
            seed: None,
        }
    }
}

/// Rain overlay state.
///
/// Live particles are bounded by `max_particles`. Once full, admitting a new drop evicts the
/// oldest one, which is always the lowest drop on screen since every drop falls at the same
/// speed.
#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleConfig,
    particles: VecDeque<Particle>,
    rng: SmallRng,
    evicted_total: u64,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            particles: VecDeque::with_capacity(config.max_particles.min(DEFAULT_MAX_PARTICLES)),
            config,
            rng,
            evicted_total: 0,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// New drop at the top edge with `x` uniform in `[0, viewport_width)`.
    pub fn spawn(&mut self, viewport_width: f32) -> Particle {
        let x = if viewport_width.is_finite() && viewport_width > 0.0 {
            self.rng.gen_range(0.0..viewport_width)
        } else {
            0.0
        };
        Particle {
            x,
            y: 0.0,
            speed: self.config.speed,
        }
    }

    /// Admits `particle`, returning whichever particle had to be evicted to stay in budget.
    pub fn push(&mut self, particle: Particle) -> Option<Particle> {
        if self.config.max_particles == 0 {
            self.evicted_total = self.evicted_total.saturating_add(1);
            return Some(particle);
        }
        let evicted = if self.particles.len() >= self.config.max_particles {
            self.evicted_total = self.evicted_total.saturating_add(1);
            self.particles.pop_front()
        } else {
            None
        };
        self.particles.push_back(particle);
        evicted
    }

    /// Moves every drop down by its speed and drops the ones past the bottom edge.
    /// Returns how many were removed.
    pub fn advance(&mut self) -> usize {
        let viewport_height = self.config.viewport_height;
        let before = self.particles.len();
        for particle in self.particles.iter_mut() {
            particle.y += particle.speed;
        }
        self.particles.retain(|particle| particle.y <= viewport_height);
        before - self.particles.len()
    }

    /// One rain tick: spawn a drop, then advance everything.
    pub fn tick(&mut self) -> usize {
        let particle = self.spawn(self.config.viewport_width);
        self.push(particle);
        self.advance()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(max_particles: usize) -> ParticleSystem {
        ParticleSystem::new(ParticleConfig {
            max_particles,
            seed: Some(7),
            ..ParticleConfig::for_viewport(800, 600)
        })
    }

    #[test]
    fn spawn_starts_at_top_within_viewport_width() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        for _ in 0..1000 {
            let particle = system.spawn(800.0);
            assert!(particle.x >= 0.0 && particle.x < 800.0, "x={}", particle.x);
            assert_eq!(particle.y, 0.0);
            assert_eq!(particle.speed, DEFAULT_PARTICLE_SPEED);
        }
        assert!(system.is_empty());
    }

    #[test]
    fn spawn_with_degenerate_width_pins_to_left_edge() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        assert_eq!(system.spawn(0.0).x, 0.0);
        assert_eq!(system.spawn(-10.0).x, 0.0);
        assert_eq!(system.spawn(f32::NAN).x, 0.0);
    }

    #[test]
    fn same_seed_spawns_same_drops() {
        let mut a = seeded(DEFAULT_MAX_PARTICLES);
        let mut b = seeded(DEFAULT_MAX_PARTICLES);
        for _ in 0..16 {
            assert_eq!(a.spawn(800.0), b.spawn(800.0));
        }
    }

    #[test]
    fn n_ticks_without_removal_leave_n_particles() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        for tick in 1..=100 {
            assert_eq!(system.tick(), 0);
            assert_eq!(system.len(), tick);
        }
    }

    #[test]
    fn particle_past_bottom_is_removed_on_next_advance() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        system.push(Particle {
            x: 10.0,
            y: 598.0,
            speed: 5.0,
        });
        system.push(Particle {
            x: 20.0,
            y: 100.0,
            speed: 5.0,
        });
        assert_eq!(system.advance(), 1);
        assert_eq!(system.len(), 1);
        assert_eq!(system.iter().next().map(|p| p.y), Some(105.0));
    }

    #[test]
    fn particle_exactly_at_bottom_edge_survives() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        system.push(Particle {
            x: 0.0,
            y: 595.0,
            speed: 5.0,
        });
        assert_eq!(system.advance(), 0);
        assert_eq!(system.advance(), 1);
    }

    #[test]
    fn advancing_culled_set_never_readds() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        system.push(Particle {
            x: 0.0,
            y: 700.0,
            speed: 5.0,
        });
        assert_eq!(system.advance(), 1);
        for _ in 0..5 {
            assert_eq!(system.advance(), 0);
            assert!(system.is_empty());
        }
    }

    #[test]
    fn adjacent_removals_are_not_skipped() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        for y in [599.0, 599.0, 10.0, 599.0, 599.0] {
            system.push(Particle { x: 0.0, y, speed: 5.0 });
        }
        assert_eq!(system.advance(), 4);
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn hundred_drops_all_fall_out() {
        let mut system = seeded(DEFAULT_MAX_PARTICLES);
        for _ in 0..100 {
            let particle = system.spawn(800.0);
            system.push(particle);
        }
        assert_eq!(system.len(), 100);

        let mut advances = 0;
        while !system.is_empty() {
            system.advance();
            advances += 1;
            assert!(advances <= 121, "drops never left the viewport");
        }
        assert_eq!(advances, 121);
    }

    #[test]
    fn full_system_evicts_oldest() {
        let mut system = seeded(3);
        for y in [1.0, 2.0, 3.0] {
            assert_eq!(system.push(Particle { x: 0.0, y, speed: 5.0 }), None);
        }
        let evicted = system.push(Particle {
            x: 0.0,
            y: 4.0,
            speed: 5.0,
        });
        assert_eq!(evicted.map(|p| p.y), Some(1.0));
        assert_eq!(system.len(), 3);
        assert_eq!(system.evicted_total(), 1);
        let ys: Vec<f32> = system.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn sustained_rain_stays_bounded() {
        let mut system = seeded(50);
        for _ in 0..10_000 {
            system.tick();
            assert!(system.len() <= 50);
        }
        assert_eq!(system.len(), 50);
    }

    #[test]
    fn zero_capacity_admits_nothing() {
        let mut system = seeded(0);
        system.tick();
        assert!(system.is_empty());
        assert_eq!(system.evicted_total(), 1);
    }
}
