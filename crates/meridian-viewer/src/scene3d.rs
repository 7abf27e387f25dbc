//! 3D scene renderer: the textured cube in both viewports plus the overlay
//! lines in the left one.
//!
//! GPU geometry is uploaded once from the scene crate's builders. Per frame
//! the five (matrix, toggle) uniform slots are rewritten and the draws are
//! issued in a fixed order inside a single depth-tested render pass; the
//! pass loads the color cleared by the frame's clear pass and clears its own
//! depth attachment.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use meridian_engine::render::{RenderCtx, RenderTarget};
use meridian_scene::{self as scene, Mesh, Plane, VertexLayout, ViewportRect};

use crate::texture::SceneTexture;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The four per-frame MVP matrices.
#[derive(Debug, Copy, Clone)]
pub struct FrameMatrices {
    pub left: Mat4,
    pub right: Mat4,
    pub camera_line: Mat4,
    pub latitude: Mat4,
}

/// Per-frame scene description handed to [`SceneRenderer::render`].
#[derive(Debug, Copy, Clone)]
pub struct SceneInput {
    pub matrices: FrameMatrices,
    /// Left viewport in logical pixels.
    pub left_viewport: ViewportRect,
    /// Right viewport in logical pixels.
    pub right_viewport: ViewportRect,
    /// Surface size in physical pixels; viewports are clamped against it.
    pub surface_size: (u32, u32),
}

// Uniform slot assignment. One slot per (matrix, toggle) combination the
// frame needs — wgpu cannot rewrite a uniform between draws in one pass.
const SLOT_LEFT_CUBE: usize = 0;
const SLOT_LEFT_LINES: usize = 1;
const SLOT_CAMERA_LINE: usize = 2;
const SLOT_LATITUDE: usize = 3;
const SLOT_RIGHT_CUBE: usize = 4;
const SLOT_COUNT: usize = 5;

const TOGGLE_SOLID: u32 = 0;
const TOGGLE_TEXTURED: u32 = 1;

/// An uploaded mesh. `None` index buffer means a plain vertex-order draw.
struct GpuMesh {
    vbo: wgpu::Buffer,
    ibo: Option<wgpu::Buffer>,
    draw_count: u32,
}

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

#[derive(Default)]
pub struct SceneRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    cube_pipeline: Option<wgpu::RenderPipeline>,
    line_list_pipeline: Option<wgpu::RenderPipeline>,
    line_strip_pipeline: Option<wgpu::RenderPipeline>,

    uniform_layout: Option<wgpu::BindGroupLayout>,
    texture_layout: Option<wgpu::BindGroupLayout>,
    slots: Vec<UniformSlot>,

    texture: Option<SceneTexture>,
    texture_bind_group: Option<wgpu::BindGroup>,
    texture_generation: u64,

    depth_view: Option<wgpu::TextureView>,
    depth_size: (u32, u32),

    // Undrawable meshes (failed validation/upload) stay `None` and are
    // skipped; the rest of the scene still renders.
    cube: Option<GpuMesh>,
    equator: Option<GpuMesh>,
    latitude_ring: Option<GpuMesh>,
    camera_line: Option<GpuMesh>,
    axes: Option<GpuMesh>,

    meshes_uploaded: bool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps the placeholder texture contents for the fetched image.
    ///
    /// Invoked once by the frame loop when the fetch delivers; failures are
    /// the caller's to log and leave the placeholder in place.
    pub fn complete_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
    ) -> anyhow::Result<()> {
        let texture = self
            .texture
            .get_or_insert_with(|| SceneTexture::placeholder(device, queue));
        if texture.ready() {
            log::debug!("cube texture already completed; ignoring duplicate delivery");
            return Ok(());
        }
        texture.complete(device, queue, bytes)
    }

    /// Draws the whole scene for one frame.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        input: &SceneInput,
    ) {
        self.ensure_pipelines(ctx);
        self.ensure_slots(ctx);
        self.ensure_meshes(ctx);
        self.ensure_texture(ctx);
        self.ensure_depth(ctx, input.surface_size);

        self.write_slots(ctx, &input.matrices);

        let Some(cube_pipeline) = self.cube_pipeline.as_ref() else {
            return;
        };
        let Some(line_list_pipeline) = self.line_list_pipeline.as_ref() else {
            return;
        };
        let Some(line_strip_pipeline) = self.line_strip_pipeline.as_ref() else {
            return;
        };
        let Some(texture_bind_group) = self.texture_bind_group.as_ref() else {
            return;
        };
        let Some(depth_view) = self.depth_view.as_ref() else {
            return;
        };
        if self.slots.len() != SLOT_COUNT {
            return;
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("meridian scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(1, texture_bind_group, &[]);

        // ── left viewport ─────────────────────────────────────────────────
        let Some(left) = physical_viewport(input.left_viewport, ctx.scale_factor, input.surface_size)
        else {
            return;
        };
        rpass.set_viewport(left.0, left.1, left.2, left.3, 0.0, 1.0);

        if let Some(cube) = &self.cube {
            rpass.set_pipeline(cube_pipeline);
            rpass.set_bind_group(0, &self.slots[SLOT_LEFT_CUBE].bind_group, &[]);
            draw_mesh(&mut rpass, cube);
        }

        rpass.set_pipeline(line_strip_pipeline);
        rpass.set_bind_group(0, &self.slots[SLOT_LEFT_LINES].bind_group, &[]);
        if let Some(equator) = &self.equator {
            draw_mesh(&mut rpass, equator);
        }

        if let Some(axes) = &self.axes {
            rpass.set_pipeline(line_list_pipeline);
            draw_mesh(&mut rpass, axes);
        }

        if let Some(camera_line) = &self.camera_line {
            rpass.set_pipeline(line_list_pipeline);
            rpass.set_bind_group(0, &self.slots[SLOT_CAMERA_LINE].bind_group, &[]);
            draw_mesh(&mut rpass, camera_line);
        }

        if let Some(ring) = &self.latitude_ring {
            rpass.set_pipeline(line_strip_pipeline);
            rpass.set_bind_group(0, &self.slots[SLOT_LATITUDE].bind_group, &[]);
            draw_mesh(&mut rpass, ring);
        }

        // ── right viewport: the cube alone ────────────────────────────────
        let Some(right) =
            physical_viewport(input.right_viewport, ctx.scale_factor, input.surface_size)
        else {
            return;
        };
        rpass.set_viewport(right.0, right.1, right.2, right.3, 0.0, 1.0);

        if let Some(cube) = &self.cube {
            rpass.set_pipeline(cube_pipeline);
            rpass.set_bind_group(0, &self.slots[SLOT_RIGHT_CUBE].bind_group, &[]);
            draw_mesh(&mut rpass, cube);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.cube_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("meridian scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let uniform_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("meridian scene uniform bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(scene_uniform_size()),
                        },
                        count: None,
                    }],
                });

        let texture_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("meridian scene texture bgl"),
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

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("meridian scene pipeline layout"),
                    bind_group_layouts: &[&uniform_layout, &texture_layout],
                    immediate_size: 0,
                });

        let make_pipeline = |label: &str,
                             entry: &str,
                             buffers: &[wgpu::VertexBufferLayout<'_>],
                             topology: wgpu::PrimitiveTopology,
                             cull_mode: Option<wgpu::Face>| {
            ctx.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(label),
                    layout: Some(&pipeline_layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some(entry),
                        compilation_options: Default::default(),
                        buffers,
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
                        topology,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: DEPTH_FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }),
                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                })
        };

        self.cube_pipeline = Some(make_pipeline(
            "meridian cube pipeline",
            "vs_textured",
            &[cube_vertex_layout()],
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        ));
        self.line_list_pipeline = Some(make_pipeline(
            "meridian line-list pipeline",
            "vs_color",
            &[line_vertex_layout()],
            wgpu::PrimitiveTopology::LineList,
            None,
        ));
        self.line_strip_pipeline = Some(make_pipeline(
            "meridian line-strip pipeline",
            "vs_color",
            &[line_vertex_layout()],
            wgpu::PrimitiveTopology::LineStrip,
            None,
        ));

        self.pipeline_format = Some(ctx.surface_format);
        self.uniform_layout = Some(uniform_layout);
        self.texture_layout = Some(texture_layout);
        self.slots.clear();
        self.texture_bind_group = None;
    }

    fn ensure_slots(&mut self, ctx: &RenderCtx<'_>) {
        if self.slots.len() == SLOT_COUNT {
            return;
        }
        let Some(layout) = self.uniform_layout.as_ref() else {
            return;
        };

        self.slots = (0..SLOT_COUNT)
            .map(|_| {
                let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("meridian scene uniform slot"),
                    size: scene_uniform_size().get(),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("meridian scene uniform bind group"),
                    layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                UniformSlot { buffer, bind_group }
            })
            .collect();
    }

    fn ensure_meshes(&mut self, ctx: &RenderCtx<'_>) {
        if self.meshes_uploaded {
            return;
        }
        self.cube = upload(ctx, &scene::cube());
        self.equator = upload(ctx, &scene::circle(Plane::Equator));
        self.latitude_ring = upload(ctx, &scene::circle(Plane::Latitude));
        self.camera_line = upload(ctx, &scene::camera_line());
        self.axes = upload(ctx, &scene::axes());
        self.meshes_uploaded = true;
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>) {
        let texture = self
            .texture
            .get_or_insert_with(|| SceneTexture::placeholder(ctx.device, ctx.queue));

        let stale =
            self.texture_bind_group.is_none() || self.texture_generation != texture.generation();
        if !stale {
            return;
        }
        let Some(layout) = self.texture_layout.as_ref() else {
            return;
        };

        self.texture_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meridian scene texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        }));
        self.texture_generation = texture.generation();
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>, surface_size: (u32, u32)) {
        let size = (surface_size.0.max(1), surface_size.1.max(1));
        if self.depth_view.is_some() && self.depth_size == size {
            return;
        }

        let depth = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("meridian depth buffer"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth_view = Some(depth.create_view(&wgpu::TextureViewDescriptor::default()));
        self.depth_size = size;
    }

    fn write_slots(&mut self, ctx: &RenderCtx<'_>, m: &FrameMatrices) {
        let writes: [(usize, Mat4, u32); SLOT_COUNT] = [
            (SLOT_LEFT_CUBE, m.left, TOGGLE_TEXTURED),
            (SLOT_LEFT_LINES, m.left, TOGGLE_SOLID),
            (SLOT_CAMERA_LINE, m.camera_line, TOGGLE_SOLID),
            (SLOT_LATITUDE, m.latitude, TOGGLE_SOLID),
            (SLOT_RIGHT_CUBE, m.right, TOGGLE_TEXTURED),
        ];

        for (slot, mvp, toggle) in writes {
            let Some(entry) = self.slots.get(slot) else {
                continue;
            };
            let u = SceneUniform {
                mvp: mvp.to_cols_array_2d(),
                toggle,
                _pad: [0; 3],
            };
            ctx.queue.write_buffer(&entry.buffer, 0, bytemuck::bytes_of(&u));
        }
    }
}

fn draw_mesh(rpass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh) {
    rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
    match &mesh.ibo {
        Some(ibo) => {
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..mesh.draw_count, 0, 0..1);
        }
        None => rpass.draw(0..mesh.draw_count, 0..1),
    }
}

/// Uploads a mesh, or logs and returns `None` when it fails validation.
///
/// An undrawable mesh leaves a hole in the scene but never aborts the frame.
fn upload(ctx: &RenderCtx<'_>, mesh: &Mesh) -> Option<GpuMesh> {
    if let Some(violation) = mesh.validate() {
        log::error!("mesh '{}' failed validation: {violation}", mesh.label);
        return None;
    }

    let vbo = ctx
        .device
        .create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.label),
            contents: bytemuck::cast_slice(&mesh.vertex_data),
            usage: wgpu::BufferUsages::VERTEX,
        });

    let ibo = mesh.index_data.as_ref().map(|indices| {
        ctx.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(mesh.label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
    });

    Some(GpuMesh {
        vbo,
        ibo,
        draw_count: mesh.draw_count() as u32,
    })
}

/// Converts a logical viewport rect to physical pixels, clamped to the
/// surface. Returns `None` for a degenerate result.
fn physical_viewport(
    vp: ViewportRect,
    scale: f32,
    surface: (u32, u32),
) -> Option<(f32, f32, f32, f32)> {
    if !vp.is_valid() {
        return None;
    }
    let (sw, sh) = (surface.0 as f32, surface.1 as f32);
    let x = (vp.x * scale).clamp(0.0, sw);
    let y = (vp.y * scale).clamp(0.0, sh);
    let w = (vp.width * scale).min(sw - x);
    let h = (vp.height * scale).min(sh - y);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some((x, y, w, h))
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    mvp: [[f32; 4]; 4],
    toggle: u32,
    _pad: [u32; 3], // uniform structs round up to 16-byte multiples
}

fn scene_uniform_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<SceneUniform>() as u64)
        .expect("SceneUniform has non-zero size by construction")
}

/// Interleaved position+color vertices (stride 6 floats), attributes at the
/// shader's fixed slots 1 and 2.
fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x3, // position
        2 => Float32x3  // color
    ];
    wgpu::VertexBufferLayout {
        array_stride: (VertexLayout::PositionColor.stride() * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// Interleaved position+UV vertices (stride 5 floats), attributes at the
/// shader's fixed slots 1 and 3.
fn cube_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x3, // position
        3 => Float32x2  // uv
    ];
    wgpu::VertexBufferLayout {
        array_stride: (VertexLayout::PositionUv.stride() * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}
