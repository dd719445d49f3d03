//! Logging setup.

use radar_conf::FrontendSettings;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter comes from the settings'
/// effective log level. Returns `false` when a subscriber was already
/// installed, which leaves the existing one in place.
pub fn init_logging(settings: &FrontendSettings) -> bool {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(settings.effective_log_level()));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_target(false))
		.try_init()
		.is_ok()
}
