//! The particle record shared between the CPU producer and the GPU consumer

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// Upper bound on particles per buffer, shared by every buffer allocator.
pub const MAX_PARTICLES: u32 = 100_000;

/// One simulated particle, laid out identically on both sides of the
/// CPU/GPU boundary.
///
/// A contiguous `&[Particle]` casts to raw bytes (`bytemuck::cast_slice`)
/// and is consumed by the simulation and render shaders without any
/// per-field conversion. Field order and widths are therefore frozen;
/// the assertions below pin them.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct Particle {
    /// RGBA, each component nominally in [0, 1]
    pub color: [f32; 4],
    /// Pixels, origin at the viewport center, y-up
    pub position: [f32; 2],
    /// Position units per simulation tick
    pub velocity: [f32; 2],
    /// Free-running phase scalar, wrapped to [-π, π] by the simulation
    pub phase: f32,
    /// Rounds the record up to the 16-byte alignment of the vec4 member,
    /// matching the stride GPU-side struct layout assigns
    pub _pad: [f32; 3],
}

impl Particle {
    /// Byte stride of one record in a particle buffer.
    pub const STRIDE: usize = std::mem::size_of::<Particle>();

    pub const COLOR_OFFSET: usize = std::mem::offset_of!(Particle, color);
    pub const POSITION_OFFSET: usize = std::mem::offset_of!(Particle, position);
    pub const VELOCITY_OFFSET: usize = std::mem::offset_of!(Particle, velocity);
    pub const PHASE_OFFSET: usize = std::mem::offset_of!(Particle, phase);

    pub fn new(color: Vec4, position: Vec2, velocity: Vec2, phase: f32) -> Self {
        Self {
            color: color.to_array(),
            position: position.to_array(),
            velocity: velocity.to_array(),
            phase,
            _pad: [0.0; 3],
        }
    }
}

// Producer and consumer exchange raw buffers of this record; any drift
// in the layout must fail the build.
const _: () = assert!(Particle::STRIDE == 48);
const _: () = assert!(Particle::COLOR_OFFSET == 0);
const _: () = assert!(Particle::POSITION_OFFSET == 16);
const _: () = assert!(Particle::VELOCITY_OFFSET == 24);
const _: () = assert!(Particle::PHASE_OFFSET == 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_48_bytes() {
        assert_eq!(std::mem::size_of::<Particle>(), 48);
        assert_eq!(std::mem::align_of::<Particle>(), 4);
    }

    #[test]
    fn field_offsets_match_the_layout_table() {
        assert_eq!(std::mem::offset_of!(Particle, color), 0);
        assert_eq!(std::mem::offset_of!(Particle, position), 16);
        assert_eq!(std::mem::offset_of!(Particle, velocity), 24);
        assert_eq!(std::mem::offset_of!(Particle, phase), 32);
        assert_eq!(std::mem::offset_of!(Particle, _pad), 36);
    }

    #[test]
    fn bytes_round_trip_boundary_values() {
        let samples = [
            Particle::default(),
            Particle::new(
                Vec4::new(f32::MAX, f32::MAX, f32::MAX, f32::MAX),
                Vec2::splat(f32::MAX),
                Vec2::splat(f32::MAX),
                f32::MAX,
            ),
            Particle::new(
                Vec4::new(1.0, 0.6, 0.2, 1.0),
                Vec2::new(-320.0, -240.0),
                Vec2::new(0.0, -10.0),
                -std::f32::consts::PI,
            ),
        ];

        for original in samples {
            let bytes = bytemuck::bytes_of(&original);
            assert_eq!(bytes.len(), Particle::STRIDE);
            let read: Particle = bytemuck::pod_read_unaligned(bytes);
            assert_eq!(read.color, original.color);
            assert_eq!(read.position, original.position);
            assert_eq!(read.velocity, original.velocity);
            assert_eq!(read.phase, original.phase);
        }
    }

    #[test]
    fn slice_casts_to_one_contiguous_block() {
        let particles = vec![
            Particle::new(Vec4::ONE, Vec2::new(1.0, 2.0), Vec2::new(0.0, -3.0), 0.5),
            Particle::new(Vec4::ZERO, Vec2::new(-4.0, 5.0), Vec2::new(0.0, -6.0), -0.5),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&particles);
        assert_eq!(bytes.len(), particles.len() * Particle::STRIDE);

        // Record k's position lives at k * STRIDE + POSITION_OFFSET.
        let base = Particle::STRIDE + Particle::POSITION_OFFSET;
        let x = f32::from_ne_bytes(bytes[base..base + 4].try_into().unwrap());
        assert_eq!(x, -4.0);
    }

    // An independently written consumer-side definition, built only from
    // the layout table. Bytes produced through `Particle` must read back
    // identically through this one.
    #[repr(C)]
    #[derive(Clone, Copy, Pod, Zeroable)]
    struct ConsumerRecord {
        color: [f32; 4],
        position: [f32; 2],
        velocity: [f32; 2],
        phase: f32,
        _pad: [f32; 3],
    }

    #[test]
    fn independent_definitions_are_binary_compatible() {
        let produced = Particle::new(
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec2::new(12.5, -87.25),
            Vec2::new(0.0, -7.5),
            1.25,
        );
        let consumed: ConsumerRecord = bytemuck::pod_read_unaligned(bytemuck::bytes_of(&produced));
        assert_eq!(consumed.color, produced.color);
        assert_eq!(consumed.position, produced.position);
        assert_eq!(consumed.velocity, produced.velocity);
        assert_eq!(consumed.phase, produced.phase);

        let round_tripped: Particle = bytemuck::pod_read_unaligned(bytemuck::bytes_of(&consumed));
        assert_eq!(round_tripped.position, produced.position);
    }
}
