use crate::constants::BACKGROUND_SRGB;
use crate::core::{
    SceneMesh, AMBIENT_COLOR, AMBIENT_INTENSITY, DIRECTIONAL_COLOR, DIRECTIONAL_INTENSITY,
    DIRECTIONAL_POSITION,
};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod mesh;
mod targets;
use mesh::{create_mesh_resources, GpuMesh, MeshResources, SceneUniforms};
use targets::RenderTargets;

/// GPU side of one viewer: surface, device, attachments and the uploaded model.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// sRGB view of the swapchain texture; may differ from `config.format`.
    view_format: wgpu::TextureFormat,
    targets: RenderTargets,
    mesh: MeshResources,
    model: Option<GpuMesh>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL2 adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 only guarantees the downlevel set
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: Some("viewer_device"),
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
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // WebGPU canvases are never sRGB; render through an sRGB view instead.
        let view_format = format.add_srgb_suffix();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height, view_format);
        let mesh = create_mesh_resources(&device, view_format);
        log::info!(
            "[gpu] backend={:?} format={:?} size={}x{}",
            adapter.get_info().backend,
            view_format,
            width,
            height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            targets,
            mesh,
            model: None,
            width,
            height,
            clear_color: helpers::clear_color_from_hex(BACKGROUND_SRGB),
        })
    }

    #[inline]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn upload_model(&mut self, mesh: &SceneMesh) {
        self.model = Some(GpuMesh::upload(&self.device, mesh));
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
            self.targets.recreate(&self.device, width, height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, view_proj: Mat4, model: Mat4) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        let light_dir = light_direction();
        let scale_rgb = |c: [f32; 3], k: f32| [c[0] * k, c[1] * k, c[2] * k, 0.0];
        let u = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            ambient: scale_rgb(AMBIENT_COLOR, AMBIENT_INTENSITY),
            light_dir: light_dir.extend(0.0).to_array(),
            light_color: scale_rgb(DIRECTIONAL_COLOR, DIRECTIONAL_INTENSITY),
        };
        self.queue
            .write_buffer(&self.mesh.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(m) = &self.model {
                rpass.set_pipeline(&self.mesh.pipeline);
                rpass.set_bind_group(0, &self.mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, m.vertex_buffer.slice(..));
                rpass.set_index_buffer(m.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..m.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Direction toward the directional light, world space.
#[inline]
fn light_direction() -> Vec3 {
    DIRECTIONAL_POSITION.normalize_or_zero()
}
