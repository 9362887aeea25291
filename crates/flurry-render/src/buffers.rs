//! Triple-buffered particle storage shared by the simulate and draw passes

use flurry_core::{Particle, MAX_PARTICLES};

/// Number of particle buffers in the ring.
pub const FRAMES_IN_FLIGHT: usize = 3;

/// Ring position tracking which buffer each pass touches this frame.
///
/// Frame N simulates from slot `source()` into slot `destination()` and
/// draws `destination()`; `advance()` then rotates so the next tick
/// consumes what this one produced.
#[derive(Clone, Copy, Debug, Default)]
pub struct RingCursor {
    current: usize,
}

impl RingCursor {
    pub fn source(&self) -> usize {
        self.current
    }

    pub fn destination(&self) -> usize {
        (self.current + 1) % FRAMES_IN_FLIGHT
    }

    pub fn advance(&mut self) {
        self.current = (self.current + 1) % FRAMES_IN_FLIGHT;
    }
}

/// The particle buffer ring.
pub struct ParticleBuffers {
    slots: Vec<wgpu::Buffer>,
    cursor: RingCursor,
}

impl ParticleBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        let size = Particle::STRIDE as u64 * MAX_PARTICLES as u64;
        let slots = (0..FRAMES_IN_FLIGHT)
            .map(|i| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("Particle Buffer {}", i + 1)),
                    size,
                    usage: wgpu::BufferUsages::STORAGE
                        | wgpu::BufferUsages::VERTEX
                        | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();

        Self {
            slots,
            cursor: RingCursor::default(),
        }
    }

    /// Upload a fresh batch into the slot the next simulate pass reads.
    pub fn seed(&self, queue: &wgpu::Queue, particles: &[Particle]) {
        queue.write_buffer(
            &self.slots[self.cursor.source()],
            0,
            bytemuck::cast_slice(particles),
        );
    }

    pub fn slot(&self, index: usize) -> &wgpu::Buffer {
        &self.slots[index]
    }

    pub fn cursor(&self) -> RingCursor {
        self.cursor
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_follows_the_triple_buffer_schedule() {
        let mut cursor = RingCursor::default();
        let mut schedule = Vec::new();
        for _ in 0..5 {
            schedule.push((cursor.source(), cursor.destination()));
            cursor.advance();
        }
        assert_eq!(schedule, [(0, 1), (1, 2), (2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn next_frame_consumes_what_this_one_produced() {
        let mut cursor = RingCursor::default();
        for _ in 0..FRAMES_IN_FLIGHT {
            let produced = cursor.destination();
            cursor.advance();
            assert_eq!(cursor.source(), produced);
        }
    }
}
