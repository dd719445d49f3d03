//! The route table.
//!
//! A [`RouteTable`] is an ordered, immutable list of [`Route`]s built once at
//! startup through [`RouteTableBuilder`]. Resolution walks the routes in
//! order and returns the first match.

use super::error::{LoadError, RouterError};
use super::lazy::{RouteView, ViewFactory};
use super::pattern::{MatchOptions, PathPattern};
use radar_core::Page;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::Arc;

/// A single route definition.
#[derive(Debug, Clone)]
pub struct Route {
	pattern: PathPattern,
	name: Option<String>,
	view: RouteView,
}

impl Route {
	/// Returns the compiled path pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the route's view.
	pub fn view(&self) -> &RouteView {
		&self.view
	}

	/// Returns whether the route's view is deferred.
	pub fn is_lazy(&self) -> bool {
		self.view.is_lazy()
	}

	/// Name used in logs and errors: the route name, or its pattern.
	pub fn label(&self) -> &str {
		self.name.as_deref().unwrap_or_else(|| self.pattern.pattern())
	}
}

/// A resolved route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	pub route: Arc<Route>,
	/// Percent-decoded path parameters.
	pub params: HashMap<String, String>,
}

impl RouteMatch {
	/// Returns the matched route's name.
	pub fn name(&self) -> Option<&str> {
		self.route.name()
	}

	/// Returns a path parameter.
	pub fn param(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}
}

struct PendingRoute {
	pattern: String,
	name: Option<String>,
	view: RouteView,
}

/// Builder for [`RouteTable`].
#[derive(Default)]
pub struct RouteTableBuilder {
	routes: Vec<PendingRoute>,
	not_found: Option<ViewFactory>,
	options: MatchOptions,
}

impl RouteTableBuilder {
	/// Adds an anonymous eager route.
	pub fn route<F>(self, pattern: &str, view: F) -> Self
	where
		F: Fn() -> Page + Send + Sync + 'static,
	{
		self.add(None, pattern, RouteView::eager(view))
	}

	/// Adds a named eager route.
	pub fn named_route<F>(self, name: &str, pattern: &str, view: F) -> Self
	where
		F: Fn() -> Page + Send + Sync + 'static,
	{
		self.add(Some(name), pattern, RouteView::eager(view))
	}

	/// Adds an anonymous lazy route.
	pub fn lazy_route<F, Fut>(self, pattern: &str, loader: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<ViewFactory, LoadError>> + Send + 'static,
	{
		self.add(None, pattern, RouteView::lazy(loader))
	}

	/// Adds a named lazy route.
	pub fn named_lazy_route<F, Fut>(self, name: &str, pattern: &str, loader: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<ViewFactory, LoadError>> + Send + 'static,
	{
		self.add(Some(name), pattern, RouteView::lazy(loader))
	}

	/// Adds a route with an explicit view.
	pub fn add(mut self, name: Option<&str>, pattern: &str, view: RouteView) -> Self {
		self.routes.push(PendingRoute {
			pattern: pattern.to_string(),
			name: name.map(str::to_string),
			view,
		});
		self
	}

	/// Sets the view mounted when no route matches.
	pub fn not_found<F>(mut self, view: F) -> Self
	where
		F: Fn() -> Page + Send + Sync + 'static,
	{
		self.not_found = Some(ViewFactory::new(view));
		self
	}

	/// Sets the matching options applied to every pattern.
	pub fn options(mut self, options: MatchOptions) -> Self {
		self.options = options;
		self
	}

	/// Validates the routes and builds the table.
	///
	/// # Errors
	///
	/// - [`RouterError::InvalidPattern`] when a pattern fails to compile
	/// - [`RouterError::InvalidRouteName`] when a name is blank
	/// - [`RouterError::DuplicatePath`] when two patterns match the same paths
	/// - [`RouterError::DuplicateName`] when two routes share a name
	pub fn build(self) -> Result<RouteTable, RouterError> {
		let mut routes = Vec::with_capacity(self.routes.len());
		let mut names = HashMap::new();
		let mut paths = HashMap::new();

		for (index, pending) in self.routes.into_iter().enumerate() {
			let pattern = PathPattern::with_options(&pending.pattern, self.options).map_err(
				|source| RouterError::InvalidPattern {
					pattern: pending.pattern.clone(),
					source,
				},
			)?;

			if paths.insert(pattern.canonical_key(), index).is_some() {
				return Err(RouterError::DuplicatePath(pending.pattern));
			}

			if let Some(name) = &pending.name {
				if name.trim().is_empty() {
					return Err(RouterError::InvalidRouteName(name.clone()));
				}
				match names.entry(name.clone()) {
					Entry::Occupied(_) => return Err(RouterError::DuplicateName(name.clone())),
					Entry::Vacant(slot) => {
						slot.insert(index);
					}
				}
			}

			routes.push(Arc::new(Route {
				pattern,
				name: pending.name,
				view: pending.view,
			}));
		}

		Ok(RouteTable {
			routes,
			names,
			not_found: self.not_found,
			options: self.options,
		})
	}
}

/// An ordered, immutable set of routes.
///
/// # Examples
///
/// ```
/// use radar_core::Page;
/// use radar_urls::client_router::{RouteTable, ViewFactory};
///
/// let table = RouteTable::builder()
///     .named_route("home", "/", || Page::text("Início"))
///     .named_lazy_route("demandas", "/demandas", || async {
///         Ok(ViewFactory::new(|| Page::text("Demandas")))
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(table.resolve("/demandas").unwrap().name(), Some("demandas"));
/// assert_eq!(table.reverse("home", &[]).unwrap(), "/");
/// assert!(table.resolve("/unknown").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
	routes: Vec<Arc<Route>>,
	names: HashMap<String, usize>,
	not_found: Option<ViewFactory>,
	options: MatchOptions,
}

impl RouteTable {
	/// Starts building a table.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Resolves an app-relative path to the first matching route.
	pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
		self.routes.iter().find_map(|route| {
			route.pattern.matches(path).map(|params| RouteMatch {
				route: Arc::clone(route),
				params,
			})
		})
	}

	/// Returns the route registered under `name`.
	pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
		self.names.get(name).map(|&index| &self.routes[index])
	}

	/// Builds the app-relative path of a named route.
	///
	/// # Errors
	///
	/// [`RouterError::InvalidRouteName`] for an unknown name,
	/// [`RouterError::MissingParameter`] when a pattern parameter is absent.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		self.reverse_with(name, &params_map)
	}

	/// Same as [`reverse`](Self::reverse) with an owned parameter map.
	pub fn reverse_with(
		&self,
		name: &str,
		params: &HashMap<String, String>,
	) -> Result<String, RouterError> {
		let route = self
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		route.pattern.reverse(params)
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.names.contains_key(name)
	}

	/// Returns the number of routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Iterates over the routes in resolution order.
	pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
		self.routes.iter()
	}

	/// Returns the fallback view for unmatched paths.
	pub fn not_found_view(&self) -> Option<&ViewFactory> {
		self.not_found.as_ref()
	}

	/// Returns the matching options.
	pub fn options(&self) -> MatchOptions {
		self.options
	}
}
