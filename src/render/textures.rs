use super::helpers;
use crate::scene::GrapeType;
use fnv::FnvHashMap;
use web_sys as web;
use wgpu;

/// Bind groups for ball surfaces: one per preview image plus an untextured one.
pub(crate) struct BallTextures {
    pub(crate) layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    plain: wgpu::BindGroup,
    previews: FnvHashMap<GrapeType, wgpu::BindGroup>,
}

fn white_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
    let (tex, view) = helpers::create_color_texture_device(
        device,
        "white_1x1",
        1,
        1,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[255, 255, 255, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    view
}

impl BallTextures {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ball_texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ball_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = white_texture(device, queue);
        let plain = bind(device, &layout, &white, &sampler, "ball_plain_bg");
        let previews = GrapeType::ALL
            .iter()
            .map(|&kind| (kind, bind(device, &layout, &white, &sampler, "ball_preview_bg")))
            .collect();
        Self {
            layout,
            sampler,
            plain,
            previews,
        }
    }

    /// Bind group for a material map; untextured materials get the white texture.
    pub(crate) fn bind_group(&self, map: Option<GrapeType>) -> &wgpu::BindGroup {
        map.and_then(|kind| self.previews.get(&kind))
            .unwrap_or(&self.plain)
    }

    /// Upload a decoded preview image and use it for `kind` from now on.
    pub(crate) fn install_preview(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        kind: GrapeType,
        bitmap: &web::ImageBitmap,
    ) {
        let size = wgpu::Extent3d {
            width: bitmap.width().max(1),
            height: bitmap.height().max(1),
            depth_or_array_layers: 1,
        };
        let (tex, view) = helpers::create_color_texture_device(
            device,
            "ball_preview",
            size.width,
            size.height,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::ImageBitmap(bitmap.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            size,
        );
        let bg = bind(device, &self.layout, &view, &self.sampler, "ball_preview_bg");
        self.previews.insert(kind, bg);
        log::info!("[textures] {} preview {}x{}", kind, size.width, size.height);
    }
}

fn bind(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
