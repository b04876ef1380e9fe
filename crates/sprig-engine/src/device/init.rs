/// GPU setup knobs for the game window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when the surface offers one.
    ///
    /// Sprite textures are uploaded as sRGB, so a linear swapchain would make
    /// everything look washed out.
    pub prefer_srgb: bool,

    /// Swap behavior. `AutoVsync` falls back to FIFO where needed.
    pub present_mode: wgpu::PresentMode,

    /// Preferred compositing alpha mode; ignored when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; backends may clamp it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
