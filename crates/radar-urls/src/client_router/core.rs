//! The navigation context.
//!
//! [`Router`] owns the route table, the host history and the reactive state
//! the renderer reads: the current location, the current route and the
//! [`OutletState`]. It is created once at startup and passed explicitly to
//! whatever needs to navigate; clones are handles onto the same context.
//!
//! Every navigation returns a [`Navigation`]. Eager views and lazy views
//! already loaded this session mount synchronously and the navigation is
//! settled on return. A lazy view that still has to be fetched leaves the
//! outlet in [`OutletState::Loading`] until [`Navigation::settle`] completes
//! the load. If another navigation happens first, the stale load still runs
//! to completion and is memoized, but its result is not displayed.

use super::error::{LoadError, RouterError};
use super::history::{History, HistoryState, NavigationType};
use super::lazy::{LazyView, RouteView, ViewFactory};
use super::location::{BasePath, Location};
use super::table::{RouteMatch, RouteTable};
use radar_core::reactive::Signal;
use radar_core::Page;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// The route currently selected by the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentRoute {
	/// Route name, if the route is named.
	pub name: Option<String>,
	/// Route pattern as written.
	pub pattern: String,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

impl From<&RouteMatch> for CurrentRoute {
	fn from(matched: &RouteMatch) -> Self {
		Self {
			name: matched.name().map(str::to_string),
			pattern: matched.route.pattern().pattern().to_string(),
			params: matched.params.clone(),
		}
	}
}

/// What the renderer should show at the application root.
#[derive(Debug, Clone, Default)]
pub enum OutletState {
	/// Nothing has been navigated to yet.
	#[default]
	Empty,
	/// A lazy view is being fetched.
	Loading {
		/// Label of the route being loaded.
		route: String,
	},
	/// A view is mounted.
	Mounted {
		/// Name of the mounted route.
		route: Option<String>,
		/// The mounted view.
		view: ViewFactory,
	},
	/// No route matched the location.
	Unmatched {
		/// The unmatched path.
		path: String,
		/// The table's not-found view, when one is configured.
		fallback: Option<ViewFactory>,
	},
	/// The lazy view failed to load.
	Failed {
		/// Label of the route whose view failed.
		route: String,
		/// Loader failure.
		error: LoadError,
	},
}

impl OutletState {
	/// Returns whether a lazy view is being fetched.
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading { .. })
	}

	/// Returns whether a route view is mounted.
	pub fn is_mounted(&self) -> bool {
		matches!(self, Self::Mounted { .. })
	}

	/// Returns the mounted route's name.
	pub fn mounted_route(&self) -> Option<&str> {
		match self {
			Self::Mounted { route, .. } => route.as_deref(),
			_ => None,
		}
	}

	/// Renders the mounted view, or the not-found fallback.
	pub fn render(&self) -> Option<Page> {
		match self {
			Self::Mounted { view, .. } => Some(view.render()),
			Self::Unmatched {
				fallback: Some(view),
				..
			} => Some(view.render()),
			_ => None,
		}
	}
}

/// Final result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The route's view is mounted.
	Mounted {
		/// Name of the mounted route.
		route: Option<String>,
	},
	/// No route matched.
	Unmatched {
		/// The unmatched path.
		path: String,
	},
	/// A later navigation replaced this one before its view loaded.
	Superseded,
}

struct PendingLoad {
	route: Option<String>,
	label: String,
	view: LazyView,
	generation: u64,
	current: Rc<Cell<u64>>,
	outlet: Signal<OutletState>,
}

enum NavigationState {
	Settled(NavigationOutcome),
	Pending(PendingLoad),
}

/// Handle to a navigation that may still be waiting on a lazy view.
#[must_use = "a pending navigation only completes when settled"]
pub struct Navigation {
	state: NavigationState,
}

impl Navigation {
	fn settled(outcome: NavigationOutcome) -> Self {
		Self {
			state: NavigationState::Settled(outcome),
		}
	}

	/// Returns whether a lazy view still has to load.
	pub fn is_pending(&self) -> bool {
		matches!(self.state, NavigationState::Pending(_))
	}

	/// Returns the outcome if the navigation is already settled.
	pub fn outcome(&self) -> Option<&NavigationOutcome> {
		match &self.state {
			NavigationState::Settled(outcome) => Some(outcome),
			NavigationState::Pending(_) => None,
		}
	}

	/// Completes the navigation, loading the route's view if needed.
	///
	/// # Errors
	///
	/// Returns [`RouterError::LoadFailed`] when the view fails to load and
	/// this navigation is still the current one. The outlet then shows
	/// [`OutletState::Failed`] and the next visit retries the load.
	pub async fn settle(self) -> Result<NavigationOutcome, RouterError> {
		let pending = match self.state {
			NavigationState::Settled(outcome) => return Ok(outcome),
			NavigationState::Pending(pending) => pending,
		};

		let result = pending.view.load().await;

		if pending.current.get() != pending.generation {
			tracing::warn!(
				route = %pending.label,
				loaded = result.is_ok(),
				"Discarding lazy view result for superseded navigation"
			);
			return Ok(NavigationOutcome::Superseded);
		}

		match result {
			Ok(view) => {
				tracing::info!(route = %pending.label, "Lazy view loaded");
				pending.outlet.set(OutletState::Mounted {
					route: pending.route.clone(),
					view,
				});
				Ok(NavigationOutcome::Mounted {
					route: pending.route,
				})
			}
			Err(source) => {
				tracing::error!(route = %pending.label, error = %source, "Lazy view failed to load");
				pending.outlet.set(OutletState::Failed {
					route: pending.label.clone(),
					error: source.clone(),
				});
				Err(RouterError::LoadFailed {
					route: pending.label,
					source,
				})
			}
		}
	}
}

impl fmt::Debug for Navigation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.state {
			NavigationState::Settled(outcome) => {
				f.debug_tuple("Navigation::Settled").field(outcome).finish()
			}
			NavigationState::Pending(pending) => f
				.debug_struct("Navigation::Pending")
				.field("route", &pending.label)
				.field("generation", &pending.generation)
				.finish(),
		}
	}
}

/// The navigation context.
///
/// # Examples
///
/// ```
/// use radar_core::Page;
/// use radar_urls::client_router::{MemoryHistory, RouteTable, Router, ViewFactory};
///
/// let table = RouteTable::builder()
///     .named_route("home", "/", || Page::text("Início"))
///     .named_lazy_route("demandas", "/demandas", || async {
///         Ok(ViewFactory::new(|| Page::text("Demandas")))
///     })
///     .build()
///     .unwrap();
/// let router = Router::new(table, MemoryHistory::new("/"));
///
/// let start = router.start().unwrap();
/// assert!(!start.is_pending());
/// assert_eq!(router.outlet().get().mounted_route(), Some("home"));
///
/// let nav = router.push_named("demandas", &[]).unwrap();
/// assert!(nav.is_pending());
/// assert!(router.outlet().get().is_loading());
/// ```
#[derive(Clone)]
pub struct Router {
	table: Arc<RouteTable>,
	history: Rc<RefCell<Box<dyn History>>>,
	base: BasePath,
	current_location: Signal<Location>,
	current_route: Signal<Option<CurrentRoute>>,
	outlet: Signal<OutletState>,
	generation: Rc<Cell<u64>>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("base", &self.base)
			.field("routes_count", &self.table.route_count())
			.field("location", &self.current_location.get().to_url())
			.field("generation", &self.generation.get())
			.finish()
	}
}

impl Router {
	/// Creates a context at the root base path.
	pub fn new(table: RouteTable, history: impl History + 'static) -> Self {
		let history: Box<dyn History> = Box::new(history);
		Self {
			table: Arc::new(table),
			history: Rc::new(RefCell::new(history)),
			base: BasePath::root(),
			current_location: Signal::new(Location::parse("/")),
			current_route: Signal::new(None),
			outlet: Signal::new(OutletState::Empty),
			generation: Rc::new(Cell::new(0)),
		}
	}

	/// Sets the base path the application is served under.
	pub fn with_base(mut self, base: BasePath) -> Self {
		self.base = base;
		self
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	/// Returns the base path.
	pub fn base(&self) -> &BasePath {
		&self.base
	}

	/// Returns the current location signal.
	pub fn current_location(&self) -> &Signal<Location> {
		&self.current_location
	}

	/// Returns the current route signal.
	pub fn current_route(&self) -> &Signal<Option<CurrentRoute>> {
		&self.current_route
	}

	/// Returns the outlet signal.
	pub fn outlet(&self) -> &Signal<OutletState> {
		&self.outlet
	}

	/// Performs the initial navigation from the host's current URL.
	///
	/// The current history entry is replaced so it carries route state.
	pub fn start(&self) -> Result<Navigation, RouterError> {
		let host_url = self.history.borrow().location();
		match self.base.strip(&host_url) {
			Some(url) => {
				let url = url.to_string();
				tracing::debug!(url = %host_url, base = %self.base, "Starting router");
				self.navigate(&url, NavigationType::Replace)
			}
			None => Ok(self.outside_base(&host_url)),
		}
	}

	/// Navigates to an app-relative URL, pushing a history entry.
	pub fn push(&self, url: &str) -> Result<Navigation, RouterError> {
		self.navigate(url, NavigationType::Push)
	}

	/// Navigates to an app-relative URL, replacing the current entry.
	pub fn replace(&self, url: &str) -> Result<Navigation, RouterError> {
		self.navigate(url, NavigationType::Replace)
	}

	/// Navigates to a named route, pushing a history entry.
	pub fn push_named(
		&self,
		name: &str,
		params: &[(&str, &str)],
	) -> Result<Navigation, RouterError> {
		let path = self.table.reverse(name, params)?;
		self.push(&path)
	}

	/// Navigates to a named route, replacing the current entry.
	pub fn replace_named(
		&self,
		name: &str,
		params: &[(&str, &str)],
	) -> Result<Navigation, RouterError> {
		let path = self.table.reverse(name, params)?;
		self.replace(&path)
	}

	/// Goes one entry back.
	pub fn back(&self) -> Option<Navigation> {
		self.go(-1)
	}

	/// Goes one entry forward.
	pub fn forward(&self) -> Option<Navigation> {
		self.go(1)
	}

	/// Traverses `delta` history entries and resolves the landed-on location.
	///
	/// Returns `None` when the target is out of range or the host finishes
	/// the traversal asynchronously; in the latter case the host's pop event
	/// drives [`handle_pop`](Self::handle_pop).
	pub fn go(&self, delta: isize) -> Option<Navigation> {
		let (moved, synchronous) = {
			let mut history = self.history.borrow_mut();
			(history.go(delta), history.traverses_synchronously())
		};
		if !moved {
			tracing::debug!(delta, "History traversal out of range");
			return None;
		}
		synchronous.then(|| self.handle_pop())
	}

	/// Resolves the host's current URL after it changed on its own.
	pub fn handle_pop(&self) -> Navigation {
		let host_url = self.history.borrow().location();
		match self.base.strip(&host_url) {
			Some(url) => self.commit(Location::parse(url), NavigationType::Pop),
			None => self.outside_base(&host_url),
		}
	}

	/// Resolves an app-relative path without navigating.
	pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
		self.table.resolve(&Location::parse(path).path)
	}

	/// Builds the app-relative path of a named route.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		self.table.reverse(name, params)
	}

	/// Prefixes an app-relative URL with the base path.
	pub fn href(&self, url: &str) -> String {
		self.base.join(url)
	}

	/// Builds the host URL of a named route.
	pub fn href_named(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		Ok(self.href(&self.reverse(name, params)?))
	}

	/// Fetches a named route's lazy view ahead of navigation.
	///
	/// Eager routes and views already loaded return immediately.
	pub async fn preload(&self, name: &str) -> Result<(), RouterError> {
		let route = self
			.table
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		route
			.view()
			.resolve()
			.await
			.map(|_| ())
			.map_err(|source| RouterError::LoadFailed {
				route: name.to_string(),
				source,
			})
	}

	/// Renders what the outlet currently shows.
	///
	/// Returns `None` while loading, after a failure, or when nothing is
	/// mounted.
	pub fn render_current(&self) -> Option<Page> {
		self.outlet.with(OutletState::render)
	}

	fn navigate(&self, url: &str, nav_type: NavigationType) -> Result<Navigation, RouterError> {
		let location = Location::parse(url);
		let matched = self.table.resolve(&location.path);

		let state = HistoryState::new(location.path.clone())
			.with_route_name(matched.as_ref().and_then(RouteMatch::name))
			.with_params(
				matched
					.as_ref()
					.map(|m| m.params.clone())
					.unwrap_or_default(),
			);
		let host_url = self.base.join(&location.to_url());

		{
			let mut history = self.history.borrow_mut();
			let result = match nav_type {
				NavigationType::Push => history.push(&host_url, &state),
				NavigationType::Replace => history.replace(&host_url, &state),
				NavigationType::Pop => Ok(()),
			};
			result.map_err(RouterError::NavigationFailed)?;
		}

		Ok(self.apply(location, matched, nav_type))
	}

	fn commit(&self, location: Location, nav_type: NavigationType) -> Navigation {
		let matched = self.table.resolve(&location.path);
		self.apply(location, matched, nav_type)
	}

	fn outside_base(&self, host_url: &str) -> Navigation {
		tracing::warn!(url = %host_url, base = %self.base, "URL is outside the base path");
		self.apply(Location::parse(host_url), None, NavigationType::Pop)
	}

	fn apply(
		&self,
		location: Location,
		matched: Option<RouteMatch>,
		nav_type: NavigationType,
	) -> Navigation {
		let generation = self.generation.get() + 1;
		self.generation.set(generation);

		let path = location.path.clone();
		self.current_location.set(location);
		self.current_route.set(matched.as_ref().map(CurrentRoute::from));

		let Some(matched) = matched else {
			tracing::debug!(%path, ?nav_type, "No route matched");
			self.outlet.set(OutletState::Unmatched {
				path: path.clone(),
				fallback: self.table.not_found_view().cloned(),
			});
			return Navigation::settled(NavigationOutcome::Unmatched { path });
		};

		let route = matched.name().map(str::to_string);
		let label = matched.route.label().to_string();
		let ready = match matched.route.view() {
			RouteView::Eager(view) => Ok(view.clone()),
			RouteView::Lazy(lazy) => lazy.get_if_loaded().ok_or(lazy),
		};

		match ready {
			Ok(view) => {
				tracing::debug!(route = %label, %path, ?nav_type, "Mounting view");
				self.outlet.set(OutletState::Mounted {
					route: route.clone(),
					view,
				});
				Navigation::settled(NavigationOutcome::Mounted { route })
			}
			Err(lazy) => {
				tracing::debug!(route = %label, %path, ?nav_type, "Loading lazy view");
				self.outlet.set(OutletState::Loading {
					route: label.clone(),
				});
				Navigation {
					state: NavigationState::Pending(PendingLoad {
						route,
						label,
						view: lazy.clone(),
						generation,
						current: Rc::clone(&self.generation),
						outlet: self.outlet.clone(),
					}),
				}
			}
		}
	}
}
