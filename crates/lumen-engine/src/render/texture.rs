use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use super::ctx::RenderCtx;

/// Where a scene texture comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// `cells` x `cells` checkerboard alternating `a` and `b`.
    Checker {
        size: u32,
        cells: u32,
        a: [u8; 4],
        b: [u8; 4],
    },
    /// Vertical gradient from `top` to `bottom`.
    Gradient {
        size: u32,
        top: [u8; 4],
        bottom: [u8; 4],
    },
    /// PNG or JPEG on disk, decoded by the `image` crate.
    File(PathBuf),
}

/// Decoded RGBA8 pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.rgba.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Fails if either side exceeds `max_dimension` (the device's 2D limit).
    pub fn ensure_fits(&self, max_dimension: u32) -> Result<()> {
        ensure!(
            self.width <= max_dimension && self.height <= max_dimension,
            "texture is {}x{}, device allows at most {max_dimension}x{max_dimension}",
            self.width,
            self.height
        );
        Ok(())
    }
}

impl fmt::Display for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSource::Checker { size, cells, .. } => {
                write!(f, "checker {size}px/{cells}")
            }
            TextureSource::Gradient { size, .. } => write!(f, "gradient {size}px"),
            TextureSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl TextureSource {
    pub fn load(&self) -> Result<TextureImage> {
        match self {
            TextureSource::Checker { size, cells, a, b } => checker(*size, *cells, *a, *b),
            TextureSource::Gradient { size, top, bottom } => gradient(*size, *top, *bottom),
            TextureSource::File(path) => {
                let img = image::open(path)
                    .with_context(|| format!("failed to load texture {}", path.display()))?
                    .to_rgba8();
                let (width, height) = img.dimensions();
                ensure!(width > 0 && height > 0, "texture {} is empty", path.display());
                Ok(TextureImage {
                    width,
                    height,
                    rgba: img.into_raw(),
                })
            }
        }
    }
}

fn checker(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Result<TextureImage> {
    ensure!(size > 0, "checker texture size must be positive");
    ensure!(
        cells > 0 && cells <= size,
        "checker cell count {cells} must be in 1..={size}"
    );

    let cell = size / cells;
    let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            rgba.extend_from_slice(if even { &a } else { &b });
        }
    }

    Ok(TextureImage {
        width: size,
        height: size,
        rgba,
    })
}

fn gradient(size: u32, top: [u8; 4], bottom: [u8; 4]) -> Result<TextureImage> {
    ensure!(size > 0, "gradient texture size must be positive");

    let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
    let denom = (size - 1).max(1) as f32;
    for y in 0..size {
        let t = y as f32 / denom;
        let row: [u8; 4] =
            std::array::from_fn(|c| (top[c] as f32 + (bottom[c] as f32 - top[c] as f32) * t).round() as u8);
        for _ in 0..size {
            rgba.extend_from_slice(&row);
        }
    }

    Ok(TextureImage {
        width: size,
        height: size,
        rgba,
    })
}

/// Uploaded sRGB texture plus its default view.
pub struct GpuTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(ctx: &RenderCtx<'_>, label: &str, image: &TextureImage) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn checker_alternates_cells() {
        let img = TextureSource::Checker { size: 8, cells: 2, a: RED, b: BLUE }
            .load()
            .unwrap();
        assert_eq!(img.rgba.len(), 8 * 8 * 4);
        assert_eq!(img.pixel(0, 0), Some(RED));
        assert_eq!(img.pixel(4, 0), Some(BLUE));
        assert_eq!(img.pixel(0, 4), Some(BLUE));
        assert_eq!(img.pixel(7, 7), Some(RED));
        assert_eq!(img.pixel(8, 0), None);
    }

    #[test]
    fn checker_rejects_bad_cell_count() {
        assert!(TextureSource::Checker { size: 4, cells: 0, a: RED, b: BLUE }.load().is_err());
        assert!(TextureSource::Checker { size: 4, cells: 5, a: RED, b: BLUE }.load().is_err());
    }

    #[test]
    fn gradient_endpoints() {
        let img = TextureSource::Gradient { size: 5, top: [0, 0, 0, 255], bottom: [200, 100, 40, 255] }
            .load()
            .unwrap();
        assert_eq!(img.pixel(3, 0), Some([0, 0, 0, 255]));
        assert_eq!(img.pixel(3, 4), Some([200, 100, 40, 255]));
        assert_eq!(img.pixel(0, 2), Some([100, 50, 20, 255]));
    }

    #[test]
    fn single_pixel_gradient() {
        let img = TextureSource::Gradient { size: 1, top: RED, bottom: BLUE }.load().unwrap();
        assert_eq!(img.pixel(0, 0), Some(RED));
    }

    #[test]
    fn file_source_decodes_png() {
        let path = std::env::temp_dir().join(format!("lumen-texture-{}.png", std::process::id()));
        let mut src = image::RgbaImage::new(2, 1);
        src.put_pixel(0, 0, image::Rgba(RED));
        src.put_pixel(1, 0, image::Rgba(BLUE));
        src.save(&path).unwrap();

        let img = TextureSource::File(path.clone()).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(1, 0), Some(BLUE));
    }

    #[test]
    fn pixel_index_does_not_wrap_on_large_sizes() {
        let img = TextureImage { width: 1 << 30, height: 2, rgba: vec![0; 16] };
        assert_eq!(img.pixel(0, 1), None);
        assert_eq!(img.pixel(1, 0), Some([0; 4]));
    }

    // ── device limits ─────────────────────────────────────────────────────

    #[test]
    fn oversized_image_is_rejected() {
        let img = TextureImage { width: 4096, height: 1, rgba: vec![0; 4096 * 4] };
        let err = img.ensure_fits(2048).unwrap_err();
        assert!(err.to_string().contains("4096x1"));
        assert!(img.ensure_fits(4096).is_ok());
    }

    #[test]
    fn oversized_file_fails_with_its_path() {
        let path = std::env::temp_dir().join(format!("lumen-wide-{}.png", std::process::id()));
        image::RgbaImage::new(4096, 1).save(&path).unwrap();

        let source = TextureSource::File(path.clone());
        let result = source
            .load()
            .and_then(|img| img.ensure_fits(2048).map(|_| img))
            .with_context(|| format!("texture {source}"));
        std::fs::remove_file(&path).ok();

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("lumen-wide-"), "{msg}");
        assert!(msg.contains("at most 2048x2048"), "{msg}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = TextureSource::File(PathBuf::from("/nonexistent/lumen.png")).load().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/lumen.png"));
    }
}
