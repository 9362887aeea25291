//! wgpu renderer for flurry particle buffers
//!
//! One frame is one command submission: a compute pass steps every
//! particle one simulation tick, then a render pass draws the freshly
//! simulated buffer as alpha-blended point sprites. Particle records
//! live in a small ring of shared buffers so the simulation input of
//! tick N+1 is always the output of tick N.

pub mod buffers;
pub mod draw;
pub mod simulate;

mod renderer;

pub use renderer::{Renderer, RendererConfig};

/// Result type for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or driving the renderer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}
