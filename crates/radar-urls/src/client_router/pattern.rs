//! Path pattern matching for client-side routes.
//!
//! Supported syntax:
//! - `/interrupcoes` - literal path
//! - `/municipios/{ibge}` - single segment parameter (excludes `/`)
//! - `/arquivos/{path:*}` - tail wildcard (includes `/`)

use super::error::{PatternError, RouterError};
use std::collections::HashMap;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for the compiled regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20;

/// How a pattern compares against incoming paths.
///
/// Defaults follow the usual SPA router behaviour: a trailing slash is
/// optional and literal segments compare case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
	/// Require the trailing slash to match exactly.
	pub strict: bool,
	/// Compare literal segments case-sensitively.
	pub sensitive: bool,
}

impl Default for MatchOptions {
	fn default() -> Self {
		Self {
			strict: false,
			sensitive: false,
		}
	}
}

impl MatchOptions {
	/// Exact matching: trailing slash and case both significant.
	pub fn exact() -> Self {
		Self {
			strict: true,
			sensitive: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
	Wildcard(String),
}

/// A compiled route path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	pattern: String,
	segments: Vec<Segment>,
	regex: regex::Regex,
	param_names: Vec<String>,
	options: MatchOptions,
}

impl PathPattern {
	/// Compiles a pattern with default [`MatchOptions`].
	///
	/// # Errors
	///
	/// Returns [`PatternError`] when the pattern is oversized, not absolute,
	/// has a malformed or duplicated parameter, or fails to compile.
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		Self::with_options(pattern, MatchOptions::default())
	}

	/// Compiles a pattern with explicit matching options.
	pub fn with_options(pattern: &str, options: MatchOptions) -> Result<Self, PatternError> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		if !pattern.starts_with('/') {
			return Err(PatternError::NotAbsolute(pattern.to_string()));
		}

		let segments = Self::parse(pattern)?;
		let param_names: Vec<String> = segments
			.iter()
			.filter_map(|s| match s {
				Segment::Param(name) | Segment::Wildcard(name) => Some(name.clone()),
				Segment::Literal(_) => None,
			})
			.collect();

		for (i, name) in param_names.iter().enumerate() {
			if param_names[..i].contains(name) {
				return Err(PatternError::DuplicateParameter {
					pattern: pattern.to_string(),
					name: name.clone(),
				});
			}
		}

		let regex = regex::RegexBuilder::new(&Self::compile(&segments, options))
			.case_insensitive(!options.sensitive)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex(e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
			regex,
			param_names,
			options,
		})
	}

	fn parse(pattern: &str) -> Result<Vec<Segment>, PatternError> {
		let malformed = || PatternError::MalformedParameter(pattern.to_string());
		let mut segments = Vec::new();
		let mut rest = pattern;

		while let Some(open) = rest.find('{') {
			if open > 0 {
				segments.push(Segment::Literal(rest[..open].to_string()));
			}
			let close = rest[open..].find('}').ok_or_else(malformed)? + open;
			let body = &rest[open + 1..close];
			let (name, wildcard) = match body.strip_suffix(":*") {
				Some(name) => (name, true),
				None => (body, false),
			};

			let valid_name = name
				.chars()
				.next()
				.is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
				&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
			if !valid_name {
				return Err(malformed());
			}

			segments.push(if wildcard {
				Segment::Wildcard(name.to_string())
			} else {
				Segment::Param(name.to_string())
			});
			rest = &rest[close + 1..];
		}

		if rest.contains('}') {
			return Err(malformed());
		}
		if !rest.is_empty() {
			segments.push(Segment::Literal(rest.to_string()));
		}
		Ok(segments)
	}

	fn compile(segments: &[Segment], options: MatchOptions) -> String {
		let mut regex_str = String::from("^");
		let last = segments.len().saturating_sub(1);

		for (i, segment) in segments.iter().enumerate() {
			match segment {
				Segment::Literal(text) => {
					let text = if !options.strict && i == last {
						text.strip_suffix('/').unwrap_or(text)
					} else {
						text.as_str()
					};
					regex_str.push_str(&regex::escape(text));
				}
				Segment::Param(name) => {
					regex_str.push_str(&format!("(?P<{}>[^/]+)", name));
				}
				Segment::Wildcard(name) => {
					regex_str.push_str(&format!("(?P<{}>.*)", name));
				}
			}
		}

		if !options.strict {
			regex_str.push_str("/?");
		}
		regex_str.push('$');
		regex_str
	}

	/// Canonical form: parameter names are erased and literals folded per
	/// the matching options, so two patterns with the same key match the
	/// same set of paths.
	pub(crate) fn canonical_key(&self) -> String {
		let mut key = String::with_capacity(self.pattern.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) if self.options.sensitive => key.push_str(text),
				Segment::Literal(text) => key.push_str(&text.to_lowercase()),
				Segment::Param(_) => key.push_str("{}"),
				Segment::Wildcard(_) => key.push_str("{*}"),
			}
		}
		if !self.options.strict && key.len() > 1 && key.ends_with('/') {
			key.pop();
		}
		key
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns the matching options this pattern was compiled with.
	pub fn options(&self) -> MatchOptions {
		self.options
	}

	/// Returns whether this pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Matches `path`, returning percent-decoded parameters on success.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		self.regex.captures(path).map(|caps| {
			self.param_names
				.iter()
				.filter_map(|name| {
					caps.name(name).map(|m| {
						let raw = m.as_str();
						let value = urlencoding::decode(raw)
							.map(|v| v.into_owned())
							.unwrap_or_else(|_| raw.to_string());
						(name.clone(), value)
					})
				})
				.collect()
		})
	}

	/// Returns whether `path` matches this pattern.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Builds a concrete path from this pattern, percent-encoding values.
	///
	/// Wildcard values keep their `/` separators.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MissingParameter`] naming the first parameter
	/// absent from `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, RouterError> {
		let mut result = String::with_capacity(self.pattern.len());

		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => result.push_str(text),
				Segment::Param(name) => {
					let value = params
						.get(name)
						.ok_or_else(|| RouterError::MissingParameter(name.clone()))?;
					result.push_str(&urlencoding::encode(value));
				}
				Segment::Wildcard(name) => {
					let value = params
						.get(name)
						.ok_or_else(|| RouterError::MissingParameter(name.clone()))?;
					let encoded: Vec<_> = value.split('/').map(urlencoding::encode).collect();
					result.push_str(&encoded.join("/"));
				}
			}
		}

		Ok(result)
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.options == other.options
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
