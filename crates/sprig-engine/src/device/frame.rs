/// A swapchain image acquired for one game frame, plus the encoder that
/// records into it.
///
/// Finish it with [`Gpu::present`](super::Gpu::present) promptly; the next
/// image cannot be acquired while this one is held.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
