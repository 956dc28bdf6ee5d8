use crate::backend::{Gl, NativeBackend};
use crate::config::AppConfig;

use anyhow::Context as _;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::SwapInterval;
use glutin_winit::GlWindow;
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use std::ffi::CString;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};


pub trait MainLoop {
	fn present(&mut self, delta: Duration);

	fn resize(&mut self, _width: u32, _height: u32) {}
}


/// Opens the window, makes a GL context current on this thread and drives `M` until the window
/// is closed.
pub fn run<F, M>(config: AppConfig, init: F) -> anyhow::Result<()>
	where F: FnOnce(Gl) -> anyhow::Result<M>
		, M: MainLoop + 'static
{
	let event_loop = EventLoop::new();

	let window_builder = WindowBuilder::new()
		.with_title(&config.window.title)
		.with_inner_size(LogicalSize::new(config.window.width as f64, config.window.height as f64));

	let template = ConfigTemplateBuilder::new()
		.with_alpha_size(8);

	let (window, gl_config) = create_window(&event_loop, window_builder, template)?;
	let gl_display = gl_config.display();

	let (major, minor) = config.window.gl_version;
	let context_attributes = ContextAttributesBuilder::new()
		.with_profile(GlProfile::Core)
		.with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
		.build(Some(window.raw_window_handle()));

	let not_current_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
		.with_context(|| format!("Failed to create OpenGL {major}.{minor} core context"))?;

	let surface_attributes = window.build_surface_attributes(Default::default());
	let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
		.context("Failed to create window surface")?;

	let gl_context = not_current_context.make_current(&gl_surface)
		.context("Failed to make context current")?;

	gl::load_with(|symbol| match CString::new(symbol) {
		Ok(symbol) => gl_display.get_proc_address(&symbol).cast(),
		Err(_) => std::ptr::null(),
	});

	let swap_interval = match NonZeroU32::new(config.window.swap_interval) {
		Some(interval) => SwapInterval::Wait(interval),
		None => SwapInterval::DontWait,
	};

	if let Err(error) = gl_surface.set_swap_interval(&gl_context, swap_interval) {
		log::warn!("Couldn't set swap interval: {error}");
	}

	// SAFETY: function pointers were just loaded for `gl_context`, which is current on this thread
	let gl: Gl = Rc::new(unsafe { NativeBackend::new() });

	let mut main_loop = Some(init(gl)?);
	let mut last_frame = Instant::now();

	event_loop.run(move |event, _, control_flow| {
		match event {
			Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
				*control_flow = ControlFlow::Exit;
			}

			Event::WindowEvent { event: WindowEvent::Resized(size), .. } => {
				let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
					return
				};

				gl_surface.resize(&gl_context, width, height);

				if let Some(main_loop) = main_loop.as_mut() {
					main_loop.resize(size.width, size.height);
				}
			}

			Event::MainEventsCleared => {
				window.request_redraw();
			}

			Event::RedrawRequested(_) => {
				let Some(main_loop) = main_loop.as_mut() else {
					return
				};

				let now = Instant::now();
				main_loop.present(now - last_frame);
				last_frame = now;

				if let Err(error) = gl_surface.swap_buffers(&gl_context) {
					log::error!("Failed to swap buffers: {error}");
					*control_flow = ControlFlow::ExitWithCode(1);
				}
			}

			Event::LoopDestroyed => {
				// GL objects have to be released while the context is still current
				drop(main_loop.take());
			}

			_ => {}
		}
	})
}


/// Creates the window and picks the config with the most samples.
///
/// WGL can only enumerate full-featured pixel formats for an existing window, so on Windows the
/// window comes first. Elsewhere the config is chosen first and the window is built to match it.
#[cfg(target_os = "windows")]
fn create_window(event_loop: &EventLoop<()>, window_builder: WindowBuilder, template: ConfigTemplateBuilder)
	-> anyhow::Result<(Window, Config)>
{
	let window = window_builder.build(event_loop)
		.context("Failed to create window")?;

	let raw_window_handle = window.raw_window_handle();
	let preference = DisplayApiPreference::WglThenEgl(Some(raw_window_handle));
	let gl_display = unsafe { Display::new(event_loop.raw_display_handle(), preference) }
		.context("Failed to open GL display")?;

	let gl_config = pick_config(&gl_display, template.compatible_with_native_window(raw_window_handle))?;
	Ok((window, gl_config))
}

#[cfg(not(target_os = "windows"))]
fn create_window(event_loop: &EventLoop<()>, window_builder: WindowBuilder, template: ConfigTemplateBuilder)
	-> anyhow::Result<(Window, Config)>
{
	let gl_display = unsafe { Display::new(event_loop.raw_display_handle(), display_preference()) }
		.context("Failed to open GL display")?;

	let gl_config = pick_config(&gl_display, template)?;

	let window = glutin_winit::finalize_window(event_loop, window_builder, &gl_config)
		.context("Failed to create window")?;

	Ok((window, gl_config))
}

#[cfg(target_os = "macos")]
fn display_preference() -> DisplayApiPreference {
	DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn display_preference() -> DisplayApiPreference {
	DisplayApiPreference::EglThenGlx(Box::new(winit::platform::unix::register_xlib_error_hook))
}

fn pick_config(gl_display: &Display, template: ConfigTemplateBuilder) -> anyhow::Result<Config> {
	let configs = unsafe { gl_display.find_configs(template.build()) }
		.context("Failed to query GL configs")?;

	most_samples(configs, |config| config.num_samples())
		.context("Display offered no GL configs matching the template")
}

// Earliest wins on ties.
fn most_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
	configs.reduce(|best, config| if samples(&config) > samples(&best) { config } else { best })
}
