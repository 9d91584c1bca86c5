use super::helpers;
use crate::constants::{DEPTH_FORMAT, MSAA_SAMPLES};
use wgpu;

/// Offscreen attachments for the scene pass.
///
/// - `msaa_*` is the multisampled colour target resolved into the swapchain.
/// - `depth_*` matches its sample count.
pub(crate) struct RenderTargets {
    pub(crate) msaa_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
    color_format: wgpu::TextureFormat,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        let msaa_view = helpers::create_render_texture(
            device,
            "msaa_color",
            width,
            height,
            MSAA_SAMPLES,
            color_format,
        );
        let depth_view = helpers::create_render_texture(
            device,
            "depth",
            width,
            height,
            MSAA_SAMPLES,
            DEPTH_FORMAT,
        );
        Self {
            msaa_view,
            depth_view,
            color_format,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height, self.color_format);
    }
}
