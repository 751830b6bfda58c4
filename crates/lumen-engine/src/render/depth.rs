use super::ctx::{RenderCtx, Viewport};

/// Depth buffer format used by every depth-tested scene.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth attachment that follows the surface size.
#[derive(Default)]
pub struct DepthTarget {
    size: Viewport,
    view: Option<wgpu::TextureView>,
}

impl DepthTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view matching the current viewport, recreating it on resize.
    pub fn ensure(&mut self, ctx: &RenderCtx<'_>) -> Option<&wgpu::TextureView> {
        if !ctx.viewport.is_valid() {
            return None;
        }

        if self.size != ctx.viewport || self.view.is_none() {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("lumen depth"),
                size: wgpu::Extent3d {
                    width: ctx.viewport.width,
                    height: ctx.viewport.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            log::debug!(
                "depth target resized to {}x{}",
                ctx.viewport.width,
                ctx.viewport.height
            );

            self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.size = ctx.viewport;
        }

        self.view.as_ref()
    }
}
