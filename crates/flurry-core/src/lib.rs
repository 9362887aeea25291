pub mod particle;
pub mod spawn;
pub mod viewport;

pub use particle::{Particle, MAX_PARTICLES};
pub use spawn::{spawn_batch, spawn_particle, Coloring, SpawnConfig, SUPPORTED_COUNTS};
pub use viewport::Viewport;
