use std::borrow::Cow;

use anyhow::{ensure, Context, Result};
use wgpu::util::DeviceExt;

use super::ctx::{RenderCtx, RenderTarget};
use super::depth::{DepthTarget, DEPTH_FORMAT};
use super::layout::VertexLayout;
use super::texture::{GpuTexture, TextureSource};
use super::uniforms::{UniformHandle, UniformRegistry, UniformSpec};

/// Everything needed to set up one drawable scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub label: String,
    /// WGSL source with `vs_main` and `fs_main` entry points.
    pub shader: Cow<'static, str>,
    pub vertex_layout: VertexLayout,
    /// Interleaved vertex data matching `vertex_layout`.
    pub vertices: Vec<f32>,
    /// Triangle-list indices; `None` draws vertices in order.
    pub indices: Option<Vec<u16>>,
    pub uniforms: Vec<UniformSpec>,
    pub textures: Vec<TextureSource>,
    pub depth_test: bool,
    pub clear_color: wgpu::Color,
}

impl SceneConfig {
    pub fn vertex_count(&self) -> usize {
        match self.vertex_layout.floats_per_vertex() {
            0 => 0,
            n => self.vertices.len() / n,
        }
    }

    /// Number of vertices or indices submitted per draw.
    pub fn draw_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertex_count() as u32,
        }
    }

    /// Checks that the data and declarations are consistent.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.vertex_layout.is_empty(), "vertex layout has no attributes");

        let per_vertex = self.vertex_layout.floats_per_vertex();
        ensure!(
            self.vertices.len() % per_vertex == 0,
            "{} floats is not a whole number of {}-float vertices",
            self.vertices.len(),
            per_vertex
        );

        let vertex_count = self.vertex_count();
        ensure!(vertex_count > 0, "scene has no vertices");

        match &self.indices {
            Some(indices) => {
                ensure!(!indices.is_empty(), "index list is empty");
                ensure!(
                    indices.len() % 3 == 0,
                    "{} indices do not form whole triangles",
                    indices.len()
                );
                if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                    anyhow::bail!("index {bad} out of range for {vertex_count} vertices");
                }
            }
            None => ensure!(
                vertex_count % 3 == 0,
                "{vertex_count} vertices do not form whole triangles"
            ),
        }

        UniformRegistry::from_specs(&self.uniforms)?;
        Ok(())
    }
}

/// GPU resources for one [`SceneConfig`], built once at setup.
pub struct Scene {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    uniforms: UniformRegistry,
    uniform_buffers: Vec<wgpu::Buffer>,

    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    draw_count: u32,

    depth: Option<DepthTarget>,
    clear_color: wgpu::Color,

    // Kept alive for the bind group.
    _textures: Vec<GpuTexture>,
}

impl Scene {
    pub fn new(ctx: &RenderCtx<'_>, config: &SceneConfig) -> Result<Self> {
        config
            .validate()
            .with_context(|| format!("invalid scene `{}`", config.label))?;

        let label = config.label.as_str();
        let uniforms = UniformRegistry::from_specs(&config.uniforms)?;
        let max_dimension = ctx.device.limits().max_texture_dimension_2d;

        let textures = config
            .textures
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let image = source
                    .load()
                    .and_then(|image| image.ensure_fits(max_dimension).map(|_| image))
                    .with_context(|| format!("scene `{label}` texture {i} ({source})"))?;
                Ok(GpuTexture::upload(ctx, &format!("{label} texture {i}"), &image))
            })
            .collect::<Result<Vec<_>>>()?;

        let uniform_buffers: Vec<wgpu::Buffer> = uniforms
            .iter()
            .map(|(_, slot)| {
                ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(format!("{label} {} ubo", slot.name).as_str()),
                    size: slot.size,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();

        let sampler = (!textures.is_empty()).then(|| {
            ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some(format!("{label} sampler").as_str()),
                address_mode_u: wgpu::AddressMode::Repeat,
                address_mode_v: wgpu::AddressMode::Repeat,
                address_mode_w: wgpu::AddressMode::Repeat,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            })
        });

        // ── bind group layout: uniforms, textures, sampler ───────────────
        let texture_base = uniforms.len() as u32;
        let sampler_binding = texture_base + textures.len() as u32;

        let mut layout_entries: Vec<wgpu::BindGroupLayoutEntry> = uniforms
            .iter()
            .map(|(handle, slot)| wgpu::BindGroupLayoutEntry {
                binding: handle.binding(),
                visibility: slot.visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(slot.size),
                },
                count: None,
            })
            .collect();

        for i in 0..textures.len() as u32 {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: texture_base + i,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
        }

        if sampler.is_some() {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: sampler_binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(format!("{label} bgl").as_str()),
                entries: &layout_entries,
            });

        let mut group_entries: Vec<wgpu::BindGroupEntry> = uniform_buffers
            .iter()
            .enumerate()
            .map(|(i, buffer)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: buffer.as_entire_binding(),
            })
            .collect();

        for (i, texture) in textures.iter().enumerate() {
            group_entries.push(wgpu::BindGroupEntry {
                binding: texture_base + i as u32,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
        }

        if let Some(sampler) = sampler.as_ref() {
            group_entries.push(wgpu::BindGroupEntry {
                binding: sampler_binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            });
        }

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(format!("{label} bind group").as_str()),
            layout: &bind_group_layout,
            entries: &group_entries,
        });

        // ── pipeline ─────────────────────────────────────────────────────
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(format!("{label} shader").as_str()),
            source: wgpu::ShaderSource::Wgsl(config.shader.clone()),
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(format!("{label} pipeline layout").as_str()),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let depth_stencil = config.depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(format!("{label} pipeline").as_str()),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[config.vertex_layout.buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // ── geometry ─────────────────────────────────────────────────────
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(format!("{label} vbo").as_str()),
            contents: bytemuck::cast_slice(&config.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = config.indices.as_ref().map(|indices| {
            // Index buffers must be a multiple of 4 bytes.
            let mut padded = indices.clone();
            if padded.len() % 2 == 1 {
                padded.push(0);
            }
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(format!("{label} ibo").as_str()),
                contents: bytemuck::cast_slice(&padded),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        log::info!(
            "scene `{label}` ready: {} vertices, {} uniform block(s), {} texture(s){}",
            config.vertex_count(),
            uniforms.len(),
            textures.len(),
            if config.depth_test { ", depth tested" } else { "" }
        );

        Ok(Self {
            label: config.label.clone(),
            pipeline,
            bind_group,
            uniforms,
            uniform_buffers,
            vertex_buffer,
            index_buffer,
            draw_count: config.draw_count(),
            depth: config.depth_test.then(DepthTarget::new),
            clear_color: config.clear_color,
            _textures: textures,
        })
    }

    /// Resolves a uniform block name. Call once at setup and keep the handle.
    pub fn uniform(&self, name: &str) -> Result<UniformHandle> {
        self.uniforms
            .handle(name)
            .with_context(|| format!("scene `{}` has no uniform block `{name}`", self.label))
    }

    /// Uploads `value` into the block behind `handle`.
    pub fn write_uniform<T: bytemuck::Pod>(
        &self,
        queue: &wgpu::Queue,
        handle: UniformHandle,
        value: &T,
    ) -> Result<()> {
        let bytes = bytemuck::bytes_of(value);
        self.uniforms
            .check_write(handle, bytes.len())
            .with_context(|| format!("scene `{}`", self.label))?;

        queue.write_buffer(&self.uniform_buffers[handle.index()], 0, bytes);
        Ok(())
    }

    /// Records a render pass drawing this scene over `target`.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let depth_view = match self.depth.as_mut() {
            Some(depth) => match depth.ensure(ctx) {
                Some(view) => Some(view),
                None => return,
            },
            None => None,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.label.as_str()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: depth_view.map(|view| {
                wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        match &self.index_buffer {
            Some(ibo) => {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..self.draw_count, 0, 0..1);
            }
            None => rpass.draw(0..self.draw_count, 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> SceneConfig {
        SceneConfig {
            label: "quad".into(),
            shader: Cow::Borrowed(""),
            vertex_layout: VertexLayout::position2(),
            vertices: vec![-0.5, 0.5, 0.5, 0.5, 0.5, -0.5, -0.5, -0.5],
            indices: Some(vec![0, 1, 2, 2, 3, 0]),
            uniforms: vec![UniformSpec::new("tint", 16, wgpu::ShaderStages::FRAGMENT)],
            textures: vec![],
            depth_test: false,
            clear_color: wgpu::Color::BLACK,
        }
    }

    #[test]
    fn valid_quad_passes() {
        let cfg = quad();
        cfg.validate().unwrap();
        assert_eq!(cfg.vertex_count(), 4);
        assert_eq!(cfg.draw_count(), 6);
    }

    #[test]
    fn ragged_vertex_data_rejected() {
        let mut cfg = quad();
        cfg.vertices.push(0.25);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn out_of_range_index_rejected() {
        let mut cfg = quad();
        cfg.indices = Some(vec![0, 1, 4]);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn partial_triangle_rejected() {
        let mut cfg = quad();
        cfg.indices = Some(vec![0, 1, 2, 3]);
        assert!(cfg.validate().is_err());

        cfg.indices = None;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_indexed_draw_count_is_vertex_count() {
        let mut cfg = quad();
        cfg.vertices.extend_from_slice(&[0.0, 0.0, 1.0, 1.0]);
        cfg.indices = None;
        cfg.validate().unwrap();
        assert_eq!(cfg.draw_count(), 6);
    }

    #[test]
    fn duplicate_uniforms_rejected() {
        let mut cfg = quad();
        cfg.uniforms.push(UniformSpec::new("tint", 16, wgpu::ShaderStages::VERTEX));
        assert!(cfg.validate().is_err());
    }
}
