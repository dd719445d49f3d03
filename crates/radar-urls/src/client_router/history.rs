//! Host navigation history.
//!
//! The [`History`] trait abstracts the host's session history: the browser
//! History API on `wasm32` ([`BrowserHistory`]) or an in-memory stack
//! ([`MemoryHistory`]) for native hosts and tests. URLs handed to a history
//! are full host paths, base path included.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State stored alongside each history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	/// App-relative path of the entry.
	pub path: String,
	/// Name of the matched route, if any.
	pub route_name: Option<String>,
	/// Path parameters extracted for the entry.
	#[serde(default)]
	pub params: HashMap<String, String>,
}

impl HistoryState {
	/// Creates a state for `path`.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			route_name: None,
			params: HashMap::new(),
		}
	}

	/// Sets the matched route name.
	pub fn with_route_name(mut self, name: Option<&str>) -> Self {
		self.route_name = name.map(str::to_string);
		self
	}

	/// Sets the path parameters.
	pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
		self.params = params;
		self
	}
}

/// Kind of navigation that produced a location change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new history entry was pushed.
	Push,
	/// The current entry was replaced.
	Replace,
	/// The host traversed existing entries (back/forward).
	Pop,
}

/// Host session history.
pub trait History {
	/// Returns the current host URL (path, query and hash).
	fn location(&self) -> String;

	/// Returns the state attached to the current entry.
	fn state(&self) -> Option<HistoryState>;

	/// Pushes a new entry, discarding any forward entries.
	///
	/// # Errors
	///
	/// Returns a description of the host failure.
	fn push(&mut self, url: &str, state: &HistoryState) -> Result<(), String>;

	/// Replaces the current entry.
	fn replace(&mut self, url: &str, state: &HistoryState) -> Result<(), String>;

	/// Moves `delta` entries through the history.
	///
	/// Returns `false` (and stays put) when the target is out of range.
	fn go(&mut self, delta: isize) -> bool;

	/// Returns whether [`go`](Self::go) has already moved to the new entry
	/// when it returns.
	///
	/// Hosts that finish the traversal later report it through their own
	/// pop event instead.
	fn traverses_synchronously(&self) -> bool {
		true
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
	url: String,
	state: Option<HistoryState>,
}

/// In-memory session history.
///
/// ```
/// use radar_urls::client_router::{History, HistoryState, MemoryHistory};
///
/// let mut history = MemoryHistory::new("/");
/// history.push("/interrupcoes", &HistoryState::new("/interrupcoes")).unwrap();
/// assert!(history.go(-1));
/// assert_eq!(history.location(), "/");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	entries: Vec<Entry>,
	index: usize,
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial_url`.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			entries: vec![Entry {
				url: initial_url.into(),
				state: None,
			}],
			index: 0,
		}
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false: a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the position of the current entry.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns every entry URL, oldest first.
	pub fn urls(&self) -> Vec<&str> {
		self.entries.iter().map(|e| e.url.as_str()).collect()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl History for MemoryHistory {
	fn location(&self) -> String {
		self.entries[self.index].url.clone()
	}

	fn state(&self) -> Option<HistoryState> {
		self.entries[self.index].state.clone()
	}

	fn push(&mut self, url: &str, state: &HistoryState) -> Result<(), String> {
		self.entries.truncate(self.index + 1);
		self.entries.push(Entry {
			url: url.to_string(),
			state: Some(state.clone()),
		});
		self.index = self.entries.len() - 1;
		Ok(())
	}

	fn replace(&mut self, url: &str, state: &HistoryState) -> Result<(), String> {
		self.entries[self.index] = Entry {
			url: url.to_string(),
			state: Some(state.clone()),
		};
		Ok(())
	}

	fn go(&mut self, delta: isize) -> bool {
		match self.index.checked_add_signed(delta) {
			Some(target) if target < self.entries.len() => {
				self.index = target;
				true
			}
			_ => false,
		}
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{History, HistoryState};
	use wasm_bindgen::JsValue;

	/// Session history backed by `window.history`.
	///
	/// Entry state is stored as a JSON string. `go` only schedules the
	/// traversal; the host fires `popstate` once it completes, and the
	/// navigation context resolves the new location from that event.
	#[derive(Debug, Default)]
	pub struct BrowserHistory;

	impl BrowserHistory {
		/// Creates a browser history handle.
		pub fn new() -> Self {
			Self
		}

		fn window() -> Result<web_sys::Window, String> {
			web_sys::window().ok_or_else(|| "window is not available".to_string())
		}
	}

	impl History for BrowserHistory {
		fn location(&self) -> String {
			let Ok(window) = Self::window() else {
				return "/".to_string();
			};
			let location = window.location();
			let path = location.pathname().unwrap_or_else(|_| "/".to_string());
			let search = location.search().unwrap_or_default();
			let hash = location.hash().unwrap_or_default();
			format!("{}{}{}", path, search, hash)
		}

		fn state(&self) -> Option<HistoryState> {
			let history = Self::window().ok()?.history().ok()?;
			let raw = history.state().ok()?.as_string()?;
			serde_json::from_str(&raw).ok()
		}

		fn push(&mut self, url: &str, state: &HistoryState) -> Result<(), String> {
			let history = Self::window()?
				.history()
				.map_err(|e| format!("{:?}", e))?;
			let data = serde_json::to_string(state).map_err(|e| e.to_string())?;
			history
				.push_state_with_url(&JsValue::from_str(&data), "", Some(url))
				.map_err(|e| format!("{:?}", e))
		}

		fn replace(&mut self, url: &str, state: &HistoryState) -> Result<(), String> {
			let history = Self::window()?
				.history()
				.map_err(|e| format!("{:?}", e))?;
			let data = serde_json::to_string(state).map_err(|e| e.to_string())?;
			history
				.replace_state_with_url(&JsValue::from_str(&data), "", Some(url))
				.map_err(|e| format!("{:?}", e))
		}

		fn go(&mut self, delta: isize) -> bool {
			let Ok(window) = Self::window() else {
				return false;
			};
			match window.history() {
				Ok(history) => history.go_with_delta(delta as i32).is_ok(),
				Err(_) => false,
			}
		}

		fn traverses_synchronously(&self) -> bool {
			false
		}
	}
}
