//! wgpu render pipeline setup

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::shapes::{TextureSlot, build_frame};
use super::texture::{self, GpuTexture};
use super::vertex::Vertex;
use crate::assets::{self, AssetError, AssetPaths, SpriteId};
use crate::scene::DrawCommand;

/// Orthographic projection matrix (column-major) mapping logical pixels to
/// clip space, y down
pub fn orthographic_projection(width: f32, height: f32) -> [f32; 16] {
    #[rustfmt::skip]
    let m = [
        2.0 / width, 0.0,           0.0, 0.0,
        0.0,         -2.0 / height, 0.0, 0.0,
        0.0,         0.0,           1.0, 0.0,
        -1.0,        1.0,           0.0, 1.0,
    ];
    m
}

/// Region of the surface the logical playfield is drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Surface pixels per logical pixel
    pub scale: f32,
}

impl Viewport {
    /// Largest uniform scale of `logical` that fits `surface`, centered
    pub fn letterbox(surface: (u32, u32), logical: Vec2) -> Self {
        let (sw, sh) = (surface.0 as f32, surface.1 as f32);
        let scale = (sw / logical.x).min(sh / logical.y);
        let (width, height) = (logical.x * scale, logical.y * scale);
        Self {
            x: (sw - width) / 2.0,
            y: (sh - height) / 2.0,
            width,
            height,
            scale,
        }
    }

    /// Surface pixel position to logical coordinates
    pub fn to_logical(&self, physical: Vec2) -> Vec2 {
        (physical - Vec2::new(self.x, self.y)) / self.scale
    }
}

/// Main render state
pub struct RenderState {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    projection_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    sprites: HashMap<SpriteId, GpuTexture>,
    /// Logical drawing area, scaled to the window
    logical_size: Vec2,
    viewport: Viewport,
}

impl RenderState {
    pub async fn new(window: Arc<Window>, logical_size: Vec2) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("no suitable GPU adapter found")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("skyclad-device"),
                ..Default::default()
            })
            .await
            .context("failed to create device")?;

        // Sprites are plain RGBA; a linear surface shows them as authored
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let projection_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("projection_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let texture_layout = texture::bind_group_layout(&device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&projection_layout, &texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let projection = orthographic_projection(logical_size.x, logical_size.y);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&projection),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &projection_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let sampler = texture::pixel_sampler(&device);
        let white = GpuTexture::white(&device, &queue, &texture_layout, &sampler);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            viewport: Viewport::letterbox((config.width, config.height), logical_size),
            config,
            pipeline,
            projection_bind_group,
            texture_layout,
            sampler,
            white,
            sprites: HashMap::new(),
            logical_size,
        })
    }

    /// Upload one sprite, replacing any previous image for `id`
    pub fn load_sprite(&mut self, id: SpriteId, img: &image::RgbaImage) {
        let label = format!("sprite_{id:?}");
        let texture = GpuTexture::from_rgba(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            img,
            &label,
        );
        self.sprites.insert(id, texture);
    }

    /// Decode and upload every sprite; the first failure aborts
    pub fn load_sprites(&mut self, paths: &AssetPaths) -> Result<(), AssetError> {
        for id in SpriteId::ALL {
            let img = assets::load_rgba(paths.sprite(id))?;
            self.load_sprite(id, &img);
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.viewport = Viewport::letterbox((new_size.width, new_size.height), self.logical_size);
        }
    }

    /// Configure the surface again at the window's current size
    pub fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        self.resize(size);
    }

    /// Draw `commands` and present
    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), wgpu::SurfaceError> {
        let frame = build_frame(commands, |id| {
            self.sprites.get(&id).map(|t| (t.width, t.height))
        });

        // Recreated every frame; entity counts are small
        let vertex_buffer = (!frame.vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&frame.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        let [r, g, b, a] = frame.clear.unwrap_or([0.0, 0.0, 0.0, 1.0]);
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                let vp = self.viewport;
                render_pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.projection_bind_group, &[]);
                render_pass.set_vertex_buffer(0, buffer.slice(..));

                for batch in &frame.batches {
                    let texture = match batch.texture {
                        TextureSlot::White => &self.white,
                        TextureSlot::Sprite(id) => match self.sprites.get(&id) {
                            Some(t) => t,
                            None => continue,
                        },
                    };
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    render_pass.draw(batch.vertices.clone(), 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Render, recovering from a lost or outdated surface
    pub fn render_or_recover(&mut self, commands: &[DrawCommand]) {
        match self.render(commands) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_corners() {
        let m = orthographic_projection(640.0, 480.0);
        let apply = |x: f32, y: f32| Vec2::new(m[0] * x + m[12], m[5] * y + m[13]);
        assert!((apply(0.0, 0.0) - Vec2::new(-1.0, 1.0)).length() < 1e-6);
        assert!((apply(640.0, 480.0) - Vec2::new(1.0, -1.0)).length() < 1e-6);
        assert!(apply(320.0, 240.0).length() < 1e-6);
    }

    #[test]
    fn test_letterbox_exact_double() {
        let vp = Viewport::letterbox((1280, 960), Vec2::new(640.0, 480.0));
        assert_eq!(vp.scale, 2.0);
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (0.0, 0.0, 1280.0, 960.0));
    }

    #[test]
    fn test_letterbox_widescreen_pillarboxes() {
        let vp = Viewport::letterbox((1920, 1080), Vec2::new(640.0, 480.0));
        assert_eq!(vp.scale, 2.25);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.width, 1440.0);
        assert_eq!(vp.x, 240.0);
        assert_eq!(vp.y, 0.0);
    }

    #[test]
    fn test_to_logical() {
        let vp = Viewport::letterbox((1920, 1080), Vec2::new(640.0, 480.0));
        assert_eq!(vp.to_logical(Vec2::new(240.0, 0.0)), Vec2::ZERO);
        assert_eq!(
            vp.to_logical(Vec2::new(240.0 + 1440.0, 1080.0)),
            Vec2::new(640.0, 480.0)
        );
    }
}
