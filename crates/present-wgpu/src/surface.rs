use tilecast_render::{PresentError, Presenter};

use crate::FrameBlitter;

/// A window surface plus the device state needed to blit frames onto it.
pub struct WgpuPresenter {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    blitter: FrameBlitter,
    backend: String,
}

impl WgpuPresenter {
    /// Create a presenter for `target`, whose drawable area is
    /// `surface_size`, showing frames of `frame_size`.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        surface_size: (u32, u32),
        frame_size: (u32, u32),
    ) -> Result<Self, PresentError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(target)
            .map_err(|e| PresentError::Backend(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| PresentError::Backend("no compatible adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tilecast_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| PresentError::Backend(format!("request device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| PresentError::Backend("surface reports no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: surface_size.0.max(1),
            height: surface_size.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let blitter = FrameBlitter::new(&device, format, frame_size.0, frame_size.1);
        let backend = adapter.get_info().backend.to_str().to_string();
        tracing::info!(
            backend = %backend,
            ?format,
            frame_width = frame_size.0,
            frame_height = frame_size.1,
            "presentation surface ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            blitter,
            backend,
        })
    }

    /// Reconfigure the surface for a new window size. The frame keeps its
    /// own size and is stretched.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        tracing::debug!(width, height, "surface resized");
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }
}

impl Presenter for WgpuPresenter {
    fn present(&mut self, pixels: &[u8], row_bytes: usize) -> Result<(), PresentError> {
        self.blitter.upload(&self.queue, pixels, row_bytes)?;

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(PresentError::SurfaceLost);
            }
            Err(e) => return Err(PresentError::Backend(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.blitter.draw(&self.device, &self.queue, &view);
        output.present();
        Ok(())
    }
}
