use crate::common::BoundBox;

use super::{VolumeData, TEXEL_BYTES};

/// GPU resident volume: one 3D texture plus its sampling parameters
/// and world bounds.
///
/// Dropping the previous instance on reload releases the old texture;
/// replacement happens between frames only.
pub struct VolumeTexture {
    // the view borrows from this texture, keep both together
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    bounds: BoundBox,
}

impl VolumeTexture {
    pub fn from_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &VolumeData,
    ) -> VolumeTexture {
        let size = data.size();
        let extent = wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: size.z,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("volume texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D3,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.texels(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(TEXEL_BYTES * size.x),
                rows_per_image: Some(size.y),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("volume sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        log::info!(
            "uploaded volume texture {}x{}x{} ({} channels)",
            size.x,
            size.y,
            size.z,
            data.channels()
        );

        VolumeTexture {
            _texture: texture,
            view,
            sampler,
            bounds: data.bound_box(),
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn bounds(&self) -> BoundBox {
        self.bounds
    }
}
