use crate::scene::constants::*;
use crate::scene::material::{rgb_from_hex, srgb_to_linear};
use crate::scene::{GrapeType, ViewerState};
use web_sys as web;

mod balls;
mod helpers;
mod stars;
mod textures;

use balls::{create_ball_resources, BallResources};
use stars::{create_star_resources, StarResources};
use textures::BallTextures;

// Shaders bundled as string constants
pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");
pub static BALLS_WGSL: &str = include_str!("../shaders/balls.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
    ambient: [f32; 4],
    light_a: [f32; 4],
    light_b: [f32; 4],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    stars: StarResources,
    balls: BallResources,
    textures: BallTextures,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        star_layer_counts: &[usize],
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let globals_buffer = helpers::create_uniform_buffer::<Globals>(&device, "globals");
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let textures = BallTextures::new(&device, &queue);
        let stars = create_star_resources(&device, &globals_bgl, format, star_layer_counts);
        let balls = create_ball_resources(&device, &globals_bgl, &textures, format);

        let bg = srgb_to_linear(rgb_from_hex(BACKGROUND_HEX));
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bg,
            stars,
            balls,
            textures,
            width,
            height,
            clear_color: wgpu::Color {
                r: bg.x as f64,
                g: bg.y as f64,
                b: bg.z as f64,
                a: 1.0,
            },
        })
    }

    pub fn install_preview(&mut self, kind: GrapeType, bitmap: &web::ImageBitmap) {
        self.textures
            .install_preview(&self.device, &self.queue, kind, bitmap);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn write_globals(&self, viewer: &ViewerState) {
        let cam = &viewer.camera;
        let (right, up) = cam.basis();
        let fog = srgb_to_linear(rgb_from_hex(BACKGROUND_HEX));
        let front = FRONT_LIGHT_FROM.normalize();
        let top = TOP_LIGHT_FROM.normalize();
        let g = Globals {
            view_proj: cam.view_projection().to_cols_array_2d(),
            camera_pos: cam.eye.extend(1.0).to_array(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            fog_color: fog.extend(1.0).to_array(),
            fog_range: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
            ambient: [AMBIENT_INTENSITY, AMBIENT_INTENSITY, AMBIENT_INTENSITY, 1.0],
            light_a: front.extend(FRONT_LIGHT_INTENSITY).to_array(),
            light_b: top.extend(TOP_LIGHT_INTENSITY).to_array(),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&g));
    }

    /// Draw stars first, then the blended balls, straight into the swapchain.
    pub fn render(&mut self, viewer: &ViewerState) -> Result<(), wgpu::SurfaceError> {
        self.write_globals(viewer);
        let half_fov_tan = (viewer.camera.fovy_radians * 0.5).tan();
        self.stars
            .upload(&self.queue, viewer.starfield.layers(), half_fov_tan);
        self.balls
            .upload(&self.device, &self.queue, &viewer.objects, viewer.camera.eye);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            self.stars.draw(&mut rpass);
            self.balls.draw(&mut rpass, &self.textures);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
