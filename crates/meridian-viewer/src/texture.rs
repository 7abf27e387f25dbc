//! The shared cube texture.
//!
//! Starts life as a 1x1 solid blue placeholder so the first frames can
//! render before the image fetch completes. When the bytes arrive the
//! texture is rebuilt at full size with a complete mip chain and marked
//! ready. Exactly one instance exists; both cube draws sample it.

use anyhow::{Context, Result};
use image::imageops::FilterType;

const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

pub struct SceneTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    ready: bool,
    /// Bumped whenever the view is replaced, so the renderer knows to rebuild
    /// its texture bind group.
    generation: u64,
}

impl SceneTexture {
    /// Creates the placeholder texture.
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("meridian cube texture (placeholder)"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        write_level(queue, &texture, 0, 1, 1, &PLACEHOLDER_PIXEL);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("meridian cube sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            sampler,
            ready: false,
            generation: 0,
        }
    }

    /// Replaces the placeholder with the decoded image and a full mip chain.
    ///
    /// Called at most once, when the fetch delivers. On decode failure the
    /// placeholder stays in place (the caller logs and moves on).
    pub fn complete(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
    ) -> Result<()> {
        let decoded = image::load_from_memory(bytes)
            .context("failed to decode texture image")?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        anyhow::ensure!(width > 0 && height > 0, "decoded image is empty");

        let mip_level_count = mip_count(width, height);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("meridian cube texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Mip chain by successive halving on the CPU; level 0 is the image
        // itself.
        let mut level_image = decoded;
        for level in 0..mip_level_count {
            let (w, h) = level_image.dimensions();
            write_level(queue, &texture, level, w, h, level_image.as_raw());

            if level + 1 < mip_level_count {
                let (nw, nh) = ((w / 2).max(1), (h / 2).max(1));
                level_image = image::imageops::resize(&level_image, nw, nh, FilterType::Triangle);
            }
        }

        self.view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.ready = true;
        self.generation += 1;

        log::info!("cube texture ready: {width}x{height}, {mip_level_count} mip levels");
        Ok(())
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    level: u32,
    width: u32,
    height: u32,
    data: &[u8],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Number of mip levels for a full chain down to 1x1.
fn mip_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_count_covers_full_chain() {
        assert_eq!(mip_count(1, 1), 1);
        assert_eq!(mip_count(2, 2), 2);
        assert_eq!(mip_count(1024, 1024), 11);
        assert_eq!(mip_count(1024, 768), 11);
        assert_eq!(mip_count(3, 2), 2);
    }
}
