//! Environment value parsing and errors.

/// Parses `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, ignoring case.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		other => Err(format!("expected a boolean, got '{}'", other)),
	}
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
	/// The variable is set but could not be parsed.
	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		/// Full variable name.
		key: String,
		/// Length of the original value
		value_len: usize,
		/// Parser message.
		error: String,
	},

	/// A prefixed variable's name or value is not valid Unicode.
	#[error("Environment variable '{key}' is not valid Unicode")]
	NotUnicode {
		/// Variable name, lossily decoded.
		key: String,
	},
}
