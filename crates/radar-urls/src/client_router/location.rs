//! Base path handling and app-relative locations.

use std::fmt;

/// Deployment prefix under which the application is served.
///
/// Normalized to start with `/` and carry no trailing slash, except for the
/// root base `/` itself.
///
/// ```
/// use radar_urls::client_router::BasePath;
///
/// let base = BasePath::new("radar/");
/// assert_eq!(base.as_str(), "/radar");
/// assert_eq!(base.join("/demandas"), "/radar/demandas");
/// assert_eq!(base.strip("/radar/demandas"), Some("/demandas"));
/// assert_eq!(base.strip("/outro"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
	/// Normalizes `base` into a base path.
	pub fn new(base: &str) -> Self {
		let trimmed = base.trim().trim_matches('/');
		if trimmed.is_empty() {
			Self("/".to_string())
		} else {
			Self(format!("/{}", trimmed))
		}
	}

	/// The root base `/`.
	pub fn root() -> Self {
		Self("/".to_string())
	}

	/// Returns the normalized base.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns whether this is the root base.
	pub fn is_root(&self) -> bool {
		self.0 == "/"
	}

	/// Prefixes an app-relative path with the base.
	pub fn join(&self, path: &str) -> String {
		let path = if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};
		if self.is_root() {
			path
		} else if path == "/" {
			format!("{}/", self.0)
		} else {
			format!("{}{}", self.0, path)
		}
	}

	/// Removes the base from a host URL path.
	///
	/// Returns `None` when the URL lies outside the base. The remainder
	/// starts with `/`, `?` or `#`.
	pub fn strip<'a>(&self, url: &'a str) -> Option<&'a str> {
		if self.is_root() {
			return Some(url);
		}
		let rest = url.strip_prefix(self.0.as_str())?;
		match rest {
			"" => Some("/"),
			_ if rest.starts_with(['/', '?', '#']) => Some(rest),
			_ => None,
		}
	}
}

impl Default for BasePath {
	fn default() -> Self {
		Self::root()
	}
}

impl fmt::Display for BasePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// An app-relative location split into path, query and hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
	/// Path component, always starting with `/`.
	pub path: String,
	/// Decoded query string pairs in order of appearance.
	pub query: Vec<(String, String)>,
	/// Fragment without the leading `#`.
	pub hash: Option<String>,
}

impl Location {
	/// Parses an app-relative URL such as `/demandas?municipio=1400100#mapa`.
	///
	/// Undecodable query strings are dropped rather than rejected.
	pub fn parse(url: &str) -> Self {
		let (rest, hash) = match url.split_once('#') {
			Some((rest, hash)) => (rest, Some(hash.to_string())),
			None => (url, None),
		};
		let (path, query) = match rest.split_once('?') {
			Some((path, query)) => (
				path,
				serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_default(),
			),
			None => (rest, Vec::new()),
		};
		let path = if path.is_empty() {
			"/".to_string()
		} else if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};

		Self { path, query, hash }
	}

	/// Returns the first query value for `key`.
	pub fn query_param(&self, key: &str) -> Option<&str> {
		self.query
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Reassembles the location into an app-relative URL.
	pub fn to_url(&self) -> String {
		let mut url = self.path.clone();
		if !self.query.is_empty() {
			url.push('?');
			url.push_str(&serde_urlencoded::to_string(&self.query).unwrap_or_default());
		}
		if let Some(hash) = &self.hash {
			url.push('#');
			url.push_str(hash);
		}
		url
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_url())
	}
}
