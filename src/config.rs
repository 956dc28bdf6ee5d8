use crate::logging::LoggingConfig;

use std::path::PathBuf;


/// Window and GL context parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
	pub title: String,
	/// Logical pixels.
	pub width: u32,
	pub height: u32,
	/// Number of vblanks to wait per swap. Zero disables vsync.
	pub swap_interval: u32,
	pub gl_version: (u8, u8),
}

impl Default for WindowConfig {
	fn default() -> Self {
		Self {
			title: "gl-sandbox".to_string(),
			width: 960,
			height: 540,
			swap_interval: 1,
			gl_version: (3, 3),
		}
	}
}


/// Everything the sandbox needs at start-up. There are no flags or config files; these are the
/// values it runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub window: WindowConfig,
	pub resource_root: PathBuf,
	pub clear_color: [f32; 4],
	pub logging: LoggingConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			window: WindowConfig::default(),
			resource_root: PathBuf::from("resource"),
			clear_color: [0.1, 0.1, 0.12, 1.0],
			logging: LoggingConfig::default(),
		}
	}
}
