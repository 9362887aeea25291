//! Falling particles demo
//!
//! Controls:
//!   1 / 2 / 3 / 4 — 100 / 1 000 / 10 000 / 100 000 particles
//!   C             — toggle colorful / monochrome
//!   Escape        — exit
//!
//! Rendering pauses while the window is unfocused.

use flurry_core::{Coloring, SpawnConfig, SUPPORTED_COUNTS};
use flurry_render::{Renderer, RendererConfig};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};
use std::sync::Arc;

fn main() {
    env_logger::init();
    log::info!("Starting falling particles demo");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = App::new();

    event_loop.run_app(&mut app).expect("Event loop error");
}

struct App {
    state: Option<AppState>,
}

struct AppState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    surface_format: wgpu::TextureFormat,
    renderer: Renderer,
    spawn: SpawnConfig,
    paused: bool,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("flurry – falling particles")
                        .with_inner_size(winit::dpi::LogicalSize::new(1280u32, 720u32)),
                )
                .expect("Failed to create window"),
        );

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .expect("Failed to create device");

        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let spawn = SpawnConfig::default();
        let renderer = Renderer::new(
            device.clone(),
            queue.clone(),
            RendererConfig {
                width: size.width,
                height: size.height,
                surface_format,
                spawn,
            },
        )
        .expect("Failed to create renderer");

        self.state = Some(AppState {
            window,
            surface,
            device,
            surface_format,
            renderer,
            spawn,
            paused: false,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else { return };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutting down");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    state: ElementState::Pressed,
                    physical_key: PhysicalKey::Code(key),
                    repeat: false,
                    ..
                },
                ..
            } => match key {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Digit1 => state.set_count(SUPPORTED_COUNTS[0]),
                KeyCode::Digit2 => state.set_count(SUPPORTED_COUNTS[1]),
                KeyCode::Digit3 => state.set_count(SUPPORTED_COUNTS[2]),
                KeyCode::Digit4 => state.set_count(SUPPORTED_COUNTS[3]),
                KeyCode::KeyC => state.toggle_coloring(),
                _ => {}
            },

            // Don't render while in the background
            WindowEvent::Focused(focused) => {
                state.paused = !focused;
                if focused {
                    state.window.request_redraw();
                }
            }

            WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                let config = wgpu::SurfaceConfiguration {
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    format: state.surface_format,
                    width: size.width,
                    height: size.height,
                    present_mode: wgpu::PresentMode::Fifo,
                    alpha_mode: wgpu::CompositeAlphaMode::Auto,
                    view_formats: vec![],
                    desired_maximum_frame_latency: 2,
                };
                state.surface.configure(&state.device, &config);
                state.renderer.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                if state.paused {
                    return;
                }
                state.render();
                state.window.request_redraw();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            if !state.paused {
                state.window.request_redraw();
            }
        }
    }
}

impl AppState {
    fn set_count(&mut self, count: u32) {
        if self.spawn.count == count {
            return;
        }
        self.spawn.count = count;
        self.renderer.reseed(self.spawn);
    }

    fn toggle_coloring(&mut self) {
        self.spawn.coloring = match self.spawn.coloring {
            Coloring::Colorful => Coloring::Monochrome,
            Coloring::Monochrome => Coloring::Colorful,
        };
        self.renderer.reseed(self.spawn);
    }

    fn render(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Err(e) = self.renderer.render(&view) {
            log::error!("Render error: {:?}", e);
        }

        output.present();
    }
}
