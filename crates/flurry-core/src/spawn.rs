//! Particle creation on the CPU side

use glam::{Vec2, Vec4};
use rand::Rng;

use crate::particle::{Particle, MAX_PARTICLES};
use crate::viewport::Viewport;

/// Particle counts the settings surface offers.
pub const SUPPORTED_COUNTS: [u32; 4] = [100, 1_000, 10_000, 100_000];

/// How freshly spawned particles are tinted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Coloring {
    /// Uniform pick from a four-color opaque palette
    #[default]
    Colorful,
    /// White with one of four alpha steps
    Monochrome,
}

/// Parameters for seeding a particle buffer.
#[derive(Clone, Copy, Debug)]
pub struct SpawnConfig {
    pub coloring: Coloring,
    pub count: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            coloring: Coloring::default(),
            count: SUPPORTED_COUNTS[1],
        }
    }
}

impl SpawnConfig {
    /// Requested count, never past the buffer cap.
    pub fn effective_count(&self) -> u32 {
        self.count.min(MAX_PARTICLES)
    }
}

const COLORFUL_PALETTE: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 0.6, 0.2, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

const MONOCHROME_ALPHAS: [f32; 4] = [0.2, 0.4, 0.6, 0.8];

fn spawn_color(coloring: Coloring, rng: &mut impl Rng) -> Vec4 {
    match coloring {
        Coloring::Colorful => Vec4::from_array(COLORFUL_PALETTE[rng.gen_range(0..4)]),
        Coloring::Monochrome => {
            let alpha = MONOCHROME_ALPHAS[rng.gen_range(0..4)];
            Vec4::new(1.0, 1.0, 1.0, alpha)
        }
    }
}

/// Create one particle somewhere in the viewport, drifting downward.
pub fn spawn_particle(config: &SpawnConfig, viewport: Viewport, rng: &mut impl Rng) -> Particle {
    let half = viewport.half_extent();
    let position = Vec2::new(
        rng.gen_range(-half.x..half.x),
        rng.gen_range(-half.y..half.y),
    );
    let velocity = Vec2::new(0.0, rng.gen_range(-10.0..=-1.0));
    let phase = rng.gen_range(-std::f32::consts::PI..=std::f32::consts::PI);

    Particle::new(spawn_color(config.coloring, rng), position, velocity, phase)
}

/// Seed a full batch of `config.effective_count()` particles.
pub fn spawn_batch(config: &SpawnConfig, viewport: Viewport, rng: &mut impl Rng) -> Vec<Particle> {
    (0..config.effective_count())
        .map(|_| spawn_particle(config, viewport, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Viewport = Viewport {
        width: 640,
        height: 480,
    };

    #[test]
    fn spawned_particles_land_inside_the_viewport() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SpawnConfig::default();

        for _ in 0..1_000 {
            let p = spawn_particle(&config, VIEWPORT, &mut rng);
            assert!(p.position[0] >= -320.0 && p.position[0] < 320.0);
            assert!(p.position[1] >= -240.0 && p.position[1] < 240.0);
        }
    }

    #[test]
    fn velocity_is_straight_down_within_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SpawnConfig::default();

        for _ in 0..1_000 {
            let p = spawn_particle(&config, VIEWPORT, &mut rng);
            assert_eq!(p.velocity[0], 0.0);
            assert!(p.velocity[1] >= -10.0 && p.velocity[1] <= -1.0);
        }
    }

    #[test]
    fn phase_starts_wrapped() {
        let mut rng = StdRng::seed_from_u64(13);
        let config = SpawnConfig::default();

        for _ in 0..1_000 {
            let p = spawn_particle(&config, VIEWPORT, &mut rng);
            assert!(p.phase >= -std::f32::consts::PI && p.phase <= std::f32::consts::PI);
        }
    }

    #[test]
    fn colorful_draws_from_the_palette() {
        let mut rng = StdRng::seed_from_u64(17);
        let config = SpawnConfig {
            coloring: Coloring::Colorful,
            ..Default::default()
        };

        for _ in 0..200 {
            let p = spawn_particle(&config, VIEWPORT, &mut rng);
            assert!(COLORFUL_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn monochrome_is_white_with_stepped_alpha() {
        let mut rng = StdRng::seed_from_u64(19);
        let config = SpawnConfig {
            coloring: Coloring::Monochrome,
            ..Default::default()
        };

        for _ in 0..200 {
            let p = spawn_particle(&config, VIEWPORT, &mut rng);
            assert_eq!(&p.color[..3], &[1.0, 1.0, 1.0]);
            assert!(MONOCHROME_ALPHAS.contains(&p.color[3]));
        }
    }

    #[test]
    fn batch_size_follows_config() {
        let mut rng = StdRng::seed_from_u64(23);
        let config = SpawnConfig {
            count: 10_000,
            ..Default::default()
        };
        assert_eq!(spawn_batch(&config, VIEWPORT, &mut rng).len(), 10_000);
    }

    #[test]
    fn count_is_capped_at_the_buffer_bound() {
        let config = SpawnConfig {
            count: 2_000_000,
            ..Default::default()
        };
        assert_eq!(config.effective_count(), MAX_PARTICLES);
    }
}
