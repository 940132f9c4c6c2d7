use super::helpers;
use crate::scene::material::srgb_to_linear;
use crate::scene::StarLayer;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LayerUniforms {
    pub(crate) tint_opacity: [f32; 4],
    pub(crate) size: [f32; 4],
}

pub(crate) struct StarLayerGpu {
    instances: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

pub(crate) struct StarResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    layers: Vec<StarLayerGpu>,
}

const STAR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub(crate) fn create_star_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    layer_counts: &[usize],
) -> StarResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("stars_shader"),
        source: wgpu::ShaderSource::Wgsl(super::STARS_WGSL.into()),
    });
    let layer_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("star_layer_bgl"),
        entries: &[helpers::uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("stars_pl"),
        bind_group_layouts: &[globals_bgl, &layer_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_quad_pipeline(
        device,
        "stars_pipeline",
        &pl,
        &shader,
        "vs_star",
        "fs_star",
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &STAR_ATTRIBUTES,
        },
        color_format,
    );

    let layers = layer_counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let instances = helpers::create_vertex_buffer(
                device,
                &format!("star_layer_{}_instances", i),
                (count * std::mem::size_of::<[f32; 3]>()) as u64,
            );
            let uniform_buffer = helpers::create_uniform_buffer::<LayerUniforms>(
                device,
                &format!("star_layer_{}_uniforms", i),
            );
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("star_layer_bg"),
                layout: &layer_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            StarLayerGpu {
                instances,
                uniform_buffer,
                bind_group,
                count: count as u32,
            }
        })
        .collect();

    StarResources { pipeline, layers }
}

impl StarResources {
    /// Upload the displaced positions and look of every layer.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, layers: &[StarLayer], half_fov_tan: f32) {
        for (gpu, layer) in self.layers.iter().zip(layers) {
            let n = (gpu.count as usize).min(layer.len());
            if n > 0 {
                queue.write_buffer(
                    &gpu.instances,
                    0,
                    bytemuck::cast_slice(&layer.positions()[..n]),
                );
            }
            let tint = srgb_to_linear(layer.tint);
            let u = LayerUniforms {
                tint_opacity: [tint.x, tint.y, tint.z, layer.opacity],
                size: [layer.point_size * half_fov_tan, 0.0, 0.0, 0.0],
            };
            queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        for layer in &self.layers {
            if layer.count == 0 {
                continue;
            }
            rpass.set_bind_group(1, &layer.bind_group, &[]);
            rpass.set_vertex_buffer(0, layer.instances.slice(..));
            rpass.draw(0..6, 0..layer.count);
        }
    }
}
