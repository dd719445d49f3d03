//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > config
//! file > defaults). Each source yields a flat map of lowercase keys.

use super::env::{EnvError, parse_bool};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	/// Reading a file failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Content had an unexpected shape.
	#[error("Parse error: {0}")]
	Parse(String),

	/// Reading the environment failed.
	#[error("Environment error: {0}")]
	Env(#[from] EnvError),

	/// The TOML file is malformed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Converting TOML to JSON values failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// Only variables starting with the prefix are read. The prefix is removed
/// and the remainder lowercased, so `RADAR_BASE_URL` becomes `base_url`.
pub struct EnvSource {
	prefix: String,
	bool_keys: Vec<String>,
}

impl EnvSource {
	/// Create a source reading variables that start with `prefix`
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			bool_keys: Vec::new(),
		}
	}

	/// Parse the given key as a boolean instead of a string
	pub fn with_bool_key(mut self, key: impl Into<String>) -> Self {
		self.bool_keys.push(key.into());
		self
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (raw_key, raw_value) in std::env::vars_os() {
			// Unrelated variables are skipped before decoding, whatever their encoding.
			if !raw_key.as_encoded_bytes().starts_with(self.prefix.as_bytes()) {
				continue;
			}
			let key = raw_key.into_string().map_err(|raw| EnvError::NotUnicode {
				key: raw.to_string_lossy().into_owned(),
			})?;
			let value = raw_value
				.into_string()
				.map_err(|_| EnvError::NotUnicode { key: key.clone() })?;
			let lower_key = key[self.prefix.len()..].to_lowercase();

			let parsed_value = if self.bool_keys.contains(&lower_key) {
				let parsed = parse_bool(&value).map_err(|error| EnvError::ParseError {
					key: key.clone(),
					value_len: value.len(),
					error,
				})?;
				Value::Bool(parsed)
			} else {
				Value::String(value)
			};

			config.insert(lower_key, parsed_value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// A missing file yields no values.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use radar_conf::settings::TomlFileSource;
	/// use std::path::PathBuf;
	///
	/// let source = TomlFileSource::new(PathBuf::from("radar.toml"));
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(&toml_value)?;

		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
#[derive(Default)]
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default source
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a default value
	///
	/// # Examples
	///
	/// ```
	/// use radar_conf::settings::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("debug", Value::Bool(false))
	///     .with_value("base_url", Value::String("/".into()));
	/// ```
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::io::Write;

	#[rstest]
	fn test_toml_source_reads_table() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "base_url = \"/radar\"\ndebug = true").unwrap();

		let values = TomlFileSource::new(file.path()).load().unwrap();

		assert_eq!(values.get("base_url"), Some(&Value::String("/radar".into())));
		assert_eq!(values.get("debug"), Some(&Value::Bool(true)));
	}

	#[rstest]
	fn test_toml_source_missing_file_is_empty() {
		let values = TomlFileSource::new("/nonexistent/radar.toml").load().unwrap();
		assert!(values.is_empty());
	}

	#[rstest]
	fn test_toml_source_rejects_malformed_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "base_url = ").unwrap();
		assert!(matches!(
			TomlFileSource::new(file.path()).load(),
			Err(SourceError::Toml(_))
		));
	}

	#[rstest]
	#[serial(radar_env)]
	fn test_env_source_strips_prefix_and_parses_bools() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("RADARSRC_BASE_URL", "/radar");
			std::env::set_var("RADARSRC_DEBUG", "1");
		}

		let values = EnvSource::new("RADARSRC_")
			.with_bool_key("debug")
			.load()
			.unwrap();

		assert_eq!(values.get("base_url"), Some(&Value::String("/radar".into())));
		assert_eq!(values.get("debug"), Some(&Value::Bool(true)));

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("RADARSRC_BASE_URL");
			std::env::remove_var("RADARSRC_DEBUG");
		}
	}

	#[cfg(unix)]
	#[rstest]
	#[serial(radar_env)]
	fn test_env_source_skips_unrelated_non_unicode_variables() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("UNRELATED_BYTES", OsStr::from_bytes(b"f\xffo"));
			std::env::set_var("RADARBYTES_BASE_URL", "/radar");
		}

		let values = EnvSource::new("RADARBYTES_").load();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("UNRELATED_BYTES");
			std::env::remove_var("RADARBYTES_BASE_URL");
		}

		let values = values.unwrap();
		assert_eq!(values.len(), 1);
		assert_eq!(values.get("base_url"), Some(&Value::String("/radar".into())));
	}

	#[cfg(unix)]
	#[rstest]
	#[serial(radar_env)]
	fn test_env_source_rejects_non_unicode_prefixed_value() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("RADARBAD_BASE_URL", OsStr::from_bytes(b"/r\xffdar"));
		}

		let result = EnvSource::new("RADARBAD_").load();

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("RADARBAD_BASE_URL");
		}

		assert!(matches!(
			result,
			Err(SourceError::Env(EnvError::NotUnicode { key })) if key == "RADARBAD_BASE_URL"
		));
	}

	#[rstest]
	fn test_priorities_are_ordered() {
		assert!(DefaultSource::new().priority() < TomlFileSource::new("x.toml").priority());
		assert!(TomlFileSource::new("x.toml").priority() < EnvSource::new("RADAR_").priority());
	}
}
