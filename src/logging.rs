use std::sync::Once;


/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "gl_sandbox=trace").
/// When unset, `RUST_LOG` is consulted before falling back to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
	pub env_filter: Option<String>,
	pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			env_filter: None,
			write_style: env_logger::WriteStyle::Auto,
		}
	}
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
	INIT.call_once(|| {
		let mut builder = env_logger::Builder::new();

		if let Some(filter) = config.env_filter {
			builder.parse_filters(&filter);
		} else if let Ok(filter) = std::env::var("RUST_LOG") {
			builder.parse_filters(&filter);
		} else {
			builder.filter_level(log::LevelFilter::Info);
		}

		builder.write_style(config.write_style);

		// Tests may have installed a logger already
		if builder.try_init().is_err() {
			return;
		}

		log::debug!("logging initialized");
	});
}
