//! Frontend settings and their layered loader.

use super::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Prefix of every environment variable the frontend reads.
pub const ENV_PREFIX: &str = "RADAR_";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Settings consumed by the RADAR frontend at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
	/// Display name used in the page shell.
	pub app_name: String,
	/// Deployment environment (`development`, `staging`, `production`).
	pub environment: String,
	/// Base path the application is served under (`RADAR_BASE_URL`).
	pub base_url: String,
	/// Enables verbose logging.
	pub debug: bool,
	/// Default log filter directive.
	pub log_level: String,
}

impl Default for FrontendSettings {
	fn default() -> Self {
		Self {
			app_name: "RADAR".to_string(),
			environment: "development".to_string(),
			base_url: "/".to_string(),
			debug: false,
			log_level: "info".to_string(),
		}
	}
}

impl FrontendSettings {
	/// Loads settings from defaults and the environment.
	///
	/// # Errors
	///
	/// Fails when a source cannot be read or the merged settings are invalid.
	pub fn from_env() -> Result<Self, SettingsError> {
		SettingsLoader::new().load()
	}

	/// Returns the effective log level: `debug` when debug mode is on.
	pub fn effective_log_level(&self) -> &str {
		if self.debug { "debug" } else { self.log_level.as_str() }
	}

	/// Returns whether this is a production deployment.
	pub fn is_production(&self) -> bool {
		self.environment.eq_ignore_ascii_case("production")
	}

	/// Checks invariants the rest of the application relies on.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.base_url.starts_with('/') {
			return Err(SettingsError::Invalid {
				field: "base_url",
				reason: format!("must start with '/', got '{}'", self.base_url),
			});
		}
		if self.base_url.contains(['?', '#']) {
			return Err(SettingsError::Invalid {
				field: "base_url",
				reason: "must not contain a query or fragment".to_string(),
			});
		}
		if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
			return Err(SettingsError::Invalid {
				field: "log_level",
				reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
			});
		}
		Ok(())
	}
}

/// Error type for settings loading
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// A source failed to load.
	#[error("Failed to load {source_name}: {error}")]
	Source {
		/// Description of the failing source.
		source_name: String,
		/// Underlying failure.
		#[source]
		error: SourceError,
	},

	/// The merged values do not fit [`FrontendSettings`].
	#[error("Failed to deserialize settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	/// A setting has an invalid value.
	#[error("Invalid setting '{field}': {reason}")]
	Invalid {
		/// Field name.
		field: &'static str,
		/// Why it was rejected.
		reason: String,
	},
}

/// Loads [`FrontendSettings`] from layered sources.
///
/// Sources are merged in ascending priority, so later layers override
/// earlier ones key by key.
///
/// ```
/// use radar_conf::settings::{DefaultSource, SettingsLoader};
/// use serde_json::Value;
///
/// let settings = SettingsLoader::empty()
///     .source(DefaultSource::new().with_value("base_url", Value::String("/radar".into())))
///     .load()
///     .unwrap();
/// assert_eq!(settings.base_url, "/radar");
/// assert_eq!(settings.app_name, "RADAR");
/// ```
pub struct SettingsLoader {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsLoader {
	/// Creates a loader reading defaults and `RADAR_*` environment variables.
	pub fn new() -> Self {
		Self::empty().source(DefaultSource::new()).source(Self::env_source())
	}

	/// Creates a loader with no sources; unset fields take their defaults.
	pub fn empty() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	/// Adds a TOML file layered between the defaults and the environment.
	pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
		self.source(TomlFileSource::new(path))
	}

	/// Adds a source.
	pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	fn env_source() -> EnvSource {
		EnvSource::new(ENV_PREFIX).with_bool_key("debug")
	}

	/// Merges every source and validates the result.
	pub fn load(mut self) -> Result<FrontendSettings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(source = %source.description(), keys = values.len(), "Loaded settings source");
			merged.extend(values);
		}

		let settings: FrontendSettings = serde_json::from_value(Value::Object(merged))?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsLoader {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	fn test_defaults() {
		let settings = FrontendSettings::default();
		assert_eq!(settings.base_url, "/");
		assert_eq!(settings.effective_log_level(), "info");
		assert!(!settings.is_production());
		settings.validate().unwrap();
	}

	#[rstest]
	#[case("radar")]
	#[case("/radar?x=1")]
	#[case("")]
	fn test_invalid_base_url(#[case] base_url: &str) {
		let settings = FrontendSettings {
			base_url: base_url.to_string(),
			..Default::default()
		};
		assert!(matches!(
			settings.validate(),
			Err(SettingsError::Invalid {
				field: "base_url",
				..
			})
		));
	}

	#[rstest]
	fn test_invalid_log_level() {
		let settings = FrontendSettings {
			log_level: "verbose".to_string(),
			..Default::default()
		};
		assert!(settings.validate().is_err());
	}

	#[rstest]
	fn test_debug_raises_log_level() {
		let settings = FrontendSettings {
			debug: true,
			..Default::default()
		};
		assert_eq!(settings.effective_log_level(), "debug");
	}

	#[rstest]
	fn test_file_overrides_defaults_regardless_of_order() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "app_name = \"RADAR Roraima\"").unwrap();

		let settings = SettingsLoader::empty()
			.with_file(file.path())
			.source(
				DefaultSource::new()
					.with_value("app_name", Value::String("RADAR".into()))
					.with_value("environment", Value::String("staging".into())),
			)
			.load()
			.unwrap();

		assert_eq!(settings.app_name, "RADAR Roraima");
		assert_eq!(settings.environment, "staging");
	}

	#[rstest]
	fn test_wrong_type_is_reported() {
		let err = SettingsLoader::empty()
			.source(DefaultSource::new().with_value("debug", Value::String("sim".into())))
			.load()
			.unwrap_err();
		assert!(matches!(err, SettingsError::Deserialize(_)));
	}
}
