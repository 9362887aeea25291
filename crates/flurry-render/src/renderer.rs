//! Renderer facade tying the simulate and draw passes together

use std::sync::Arc;

use flurry_core::{spawn_batch, SpawnConfig, Viewport};

use crate::buffers::ParticleBuffers;
use crate::draw::DrawPipeline;
use crate::simulate::SimulatePipeline;
use crate::{Error, Result};

/// Renderer configuration
pub struct RendererConfig {
    pub width: u32,
    pub height: u32,
    pub surface_format: wgpu::TextureFormat,
    pub spawn: SpawnConfig,
}

/// Particle renderer.
///
/// Every frame: simulate one tick from ring slot N into slot N+1, draw
/// slot N+1, advance the ring. Both passes go into a single command
/// submission, which serializes simulation against itself and against
/// the draw that consumes it.
pub struct Renderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,

    buffers: ParticleBuffers,
    simulate: SimulatePipeline,
    draw: DrawPipeline,

    viewport: Viewport,
    count: u32,
    frame_count: u64,
}

impl Renderer {
    pub fn new(
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        config: RendererConfig,
    ) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::Config(format!(
                "viewport must be non-empty, got {}x{}",
                config.width, config.height
            )));
        }

        log::info!("Creating flurry renderer");
        log::info!("  Surface format: {:?}", config.surface_format);
        log::info!("  Resolution: {}x{}", config.width, config.height);

        let buffers = ParticleBuffers::new(&device);
        let simulate = SimulatePipeline::new(&device, &buffers);
        let draw = DrawPipeline::new(&device, config.surface_format);

        let mut renderer = Self {
            device,
            queue,
            buffers,
            simulate,
            draw,
            viewport: Viewport::new(config.width, config.height),
            count: 0,
            frame_count: 0,
        };
        renderer.reseed(config.spawn);

        Ok(renderer)
    }

    /// Replace the particle population. The new batch lands in the ring
    /// slot the next simulate pass reads, so it takes effect on the very
    /// next frame.
    pub fn reseed(&mut self, spawn: SpawnConfig) {
        let batch = spawn_batch(&spawn, self.viewport, &mut rand::thread_rng());
        self.buffers.seed(&self.queue, &batch);
        self.count = batch.len() as u32;
        log::info!(
            "Seeded {} particles ({:?})",
            self.count,
            spawn.coloring
        );
    }

    /// Update the viewport extent. Particles keep their positions;
    /// anything now outside the extent wraps on the next tick.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        log::info!("Resizing renderer to {}x{}", width, height);
        self.viewport = Viewport::new(width, height);
    }

    /// Simulate one tick and draw the result into `target`.
    pub fn render(&mut self, target: &wgpu::TextureView) -> Result<()> {
        if self.count == 0 {
            return Ok(());
        }

        log::trace!("Rendering frame {}", self.frame_count);

        self.simulate
            .update_params(&self.queue, self.viewport, self.count);
        self.draw.update_params(&self.queue, self.viewport);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let cursor = self.buffers.cursor();
        self.simulate.encode(&mut encoder, cursor.source(), self.count);
        self.draw.encode(
            &mut encoder,
            target,
            self.buffers.slot(cursor.destination()),
            self.count,
        );

        self.queue.submit(Some(encoder.finish()));

        self.buffers.advance();
        self.frame_count += 1;
        Ok(())
    }

    pub fn particle_count(&self) -> u32 {
        self.count
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
