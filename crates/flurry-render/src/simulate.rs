//! Compute pass stepping every particle one simulation tick

use flurry_core::Viewport;

use crate::buffers::{ParticleBuffers, FRAMES_IN_FLIGHT};

// Keep in sync with @workgroup_size in simulate.wgsl.
const WORKGROUP_SIZE: u32 = 256;

/// Per-dispatch parameters – must match the WGSL SimParams struct (16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SimParams {
    extent: [f32; 2],
    count: u32,
    _pad: u32,
}

/// Simulation compute pipeline.
///
/// Tick N+1 reads tick N's output, so at most one simulate dispatch is
/// ever in flight; encoding simulate and draw into the same command
/// buffer preserves that ordering without extra synchronization.
pub struct SimulatePipeline {
    pipeline: wgpu::ComputePipeline,
    params_buffer: wgpu::Buffer,
    /// One bind group per ring rotation: entry `i` reads slot `i` and
    /// writes slot `(i + 1) % FRAMES_IN_FLIGHT`
    bind_groups: Vec<wgpu::BindGroup>,
}

impl SimulatePipeline {
    pub fn new(device: &wgpu::Device, buffers: &ParticleBuffers) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Simulate Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: false },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Simulate Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/simulate.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Simulate Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Simulate Pipeline"),
            layout: Some(&layout),
            module: &shader,
            entry_point: "simulate",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Simulate Params Buffer"),
            size: std::mem::size_of::<SimParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_groups = (0..FRAMES_IN_FLIGHT)
            .map(|i| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Simulate Bind Group {}", i + 1)),
                    layout: &bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffers.slot(i).as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: buffers
                                .slot((i + 1) % FRAMES_IN_FLIGHT)
                                .as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: params_buffer.as_entire_binding(),
                        },
                    ],
                })
            })
            .collect();

        Self {
            pipeline,
            params_buffer,
            bind_groups,
        }
    }

    pub fn update_params(&self, queue: &wgpu::Queue, viewport: Viewport, count: u32) {
        let params = SimParams {
            extent: viewport.extent().to_array(),
            count,
            _pad: 0,
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }

    /// Encode one tick: read ring slot `source`, write its successor.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, source: usize, count: u32) {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Simulate Pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_groups[source], &[]);
        pass.dispatch_workgroups(count.div_ceil(WORKGROUP_SIZE), 1, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_match_the_wgsl_uniform_size() {
        assert_eq!(std::mem::size_of::<SimParams>(), 16);
    }

    #[test]
    fn dispatch_covers_every_particle() {
        assert_eq!(100u32.div_ceil(WORKGROUP_SIZE), 1);
        assert_eq!(256u32.div_ceil(WORKGROUP_SIZE), 1);
        assert_eq!(257u32.div_ceil(WORKGROUP_SIZE), 2);
        assert_eq!(100_000u32.div_ceil(WORKGROUP_SIZE), 391);
    }
}
