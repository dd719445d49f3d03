//! Error types for client-side routing.

/// Error returned when a path pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	/// Pattern is longer than the allowed maximum.
	#[error("Pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual pattern length in bytes.
		length: usize,
		/// Maximum accepted length.
		max: usize,
	},
	/// Pattern has more segments than allowed.
	#[error("Pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual segment count.
		count: usize,
		/// Maximum accepted segment count.
		max: usize,
	},
	/// Pattern does not start with `/`.
	#[error("Pattern '{0}' must start with '/'")]
	NotAbsolute(String),
	/// A `{` placeholder was never closed, or has an empty name.
	#[error("Malformed parameter in pattern '{0}'")]
	MalformedParameter(String),
	/// The same parameter name appears twice.
	#[error("Duplicate parameter '{name}' in pattern '{pattern}'")]
	DuplicateParameter {
		/// Offending pattern.
		pattern: String,
		/// Repeated parameter name.
		name: String,
	},
	/// The generated regex failed to compile.
	#[error("Failed to compile pattern regex: {0}")]
	Regex(String),
}

/// Failure reported by a lazy view loader.
///
/// Clonable so a single in-flight load can be shared by every navigation
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoadError {
	message: String,
}

impl LoadError {
	/// Creates a load error with the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the error message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// A route pattern failed to compile.
	#[error("Invalid route pattern '{pattern}': {source}")]
	InvalidPattern {
		/// The pattern as written.
		pattern: String,
		/// Why it was rejected.
		source: PatternError,
	},
	/// Two routes share the same path pattern.
	#[error("Duplicate route path: {0}")]
	DuplicatePath(String),
	/// Two routes share the same name.
	#[error("Duplicate route name: {0}")]
	DuplicateName(String),
	/// No route is registered under this name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// A parameter required by the route pattern was not supplied.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// The host history rejected the navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A lazy view failed to load.
	#[error("Failed to load view for route '{route}': {source}")]
	LoadFailed {
		/// Name (or pattern) of the route whose view failed.
		route: String,
		/// Loader failure.
		source: LoadError,
	},
}
