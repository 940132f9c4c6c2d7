use super::helpers;
use super::textures::BallTextures;
use crate::scene::material::srgb_to_linear;
use crate::scene::{GrapeType, ObjectSet, VisualObject};
use glam::Vec3;
use std::ops::Range;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BallInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

impl BallInstance {
    fn from_object(obj: &VisualObject) -> Self {
        let mat = obj.material();
        let color = srgb_to_linear(mat.color);
        let emissive = srgb_to_linear(mat.emissive);
        Self {
            model: obj.model_matrix().to_cols_array_2d(),
            color: [color.x, color.y, color.z, mat.opacity],
            emissive: [emissive.x, emissive.y, emissive.z, mat.emissive_intensity],
            params: [
                mat.roughness,
                mat.metalness,
                if mat.map.is_some() { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

const BALL_ATTRIBUTES: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    0 => Float32x4,
    1 => Float32x4,
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
];

/// Consecutive instances sharing one surface texture.
pub(crate) struct DrawRun {
    map: Option<GrapeType>,
    instances: Range<u32>,
}

pub(crate) struct BallResources {
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    capacity: usize,
    runs: Vec<DrawRun>,
}

pub(crate) fn create_ball_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    textures: &BallTextures,
    color_format: wgpu::TextureFormat,
) -> BallResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("balls_shader"),
        source: wgpu::ShaderSource::Wgsl(super::BALLS_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("balls_pl"),
        bind_group_layouts: &[globals_bgl, &textures.layout],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_quad_pipeline(
        device,
        "balls_pipeline",
        &pl,
        &shader,
        "vs_ball",
        "fs_ball",
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BallInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &BALL_ATTRIBUTES,
        },
        color_format,
    );
    let capacity = 64;
    let instances = helpers::create_vertex_buffer(
        device,
        "ball_instances",
        (capacity * std::mem::size_of::<BallInstance>()) as u64,
    );
    BallResources {
        pipeline,
        instances,
        capacity,
        runs: Vec::new(),
    }
}

/// Draw order for blended discs: render order first, then farthest to nearest.
pub(crate) fn sorted_for_blending<'a>(objects: &'a ObjectSet, eye: Vec3) -> Vec<&'a VisualObject> {
    let mut sorted: Vec<&VisualObject> = objects.iter().collect();
    sorted.sort_by(|a, b| {
        a.render_order.cmp(&b.render_order).then_with(|| {
            let da = a.position.distance_squared(eye);
            let db = b.position.distance_squared(eye);
            db.total_cmp(&da)
        })
    });
    sorted
}

impl BallResources {
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        objects: &ObjectSet,
        eye: Vec3,
    ) {
        self.runs.clear();
        let sorted = sorted_for_blending(objects, eye);
        if sorted.is_empty() {
            return;
        }
        if sorted.len() > self.capacity {
            self.capacity = sorted.len().next_power_of_two();
            self.instances = helpers::create_vertex_buffer(
                device,
                "ball_instances",
                (self.capacity * std::mem::size_of::<BallInstance>()) as u64,
            );
        }

        let mut packed = Vec::with_capacity(sorted.len());
        for (i, obj) in sorted.iter().enumerate() {
            let map = obj.material().map;
            let i = i as u32;
            match self.runs.last_mut() {
                Some(run) if run.map == map => run.instances.end = i + 1,
                _ => self.runs.push(DrawRun {
                    map,
                    instances: i..i + 1,
                }),
            }
            packed.push(BallInstance::from_object(obj));
        }
        queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&packed));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, textures: &BallTextures) {
        if self.runs.is_empty() {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.instances.slice(..));
        for run in &self.runs {
            rpass.set_bind_group(1, textures.bind_group(run.map), &[]);
            rpass.draw(0..6, run.instances.clone());
        }
    }
}
