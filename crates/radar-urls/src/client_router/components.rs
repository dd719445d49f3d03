//! Router components for navigation.
//!
//! [`Link`] renders an anchor the host intercepts for client-side
//! navigation; [`RouterOutlet`] renders whatever the navigation context
//! currently shows.

use super::core::{OutletState, Router};
use super::error::RouterError;
use radar_core::{Component, IntoPage, Page, PageElement};

/// A link that navigates without a full page reload.
///
/// The `href` is already prefixed with the base path. Links carry a
/// `data-link` marker so the host's click handler can intercept them.
#[derive(Debug, Clone)]
pub struct Link {
	href: String,
	content: String,
	class: Option<String>,
	replace: bool,
	active: bool,
}

impl Link {
	/// Creates a link to an app-relative URL.
	pub fn new(router: &Router, to: &str, content: impl Into<String>) -> Self {
		Self {
			href: router.href(to),
			content: content.into(),
			class: None,
			replace: false,
			active: false,
		}
	}

	/// Creates a link to a named route.
	///
	/// The link is marked active when the route is the current one.
	///
	/// # Errors
	///
	/// Fails like [`Router::reverse`] for unknown names or missing
	/// parameters.
	pub fn named(
		router: &Router,
		name: &str,
		params: &[(&str, &str)],
		content: impl Into<String>,
	) -> Result<Self, RouterError> {
		let href = router.href_named(name, params)?;
		let active = router
			.current_route()
			.with(|current| current.as_ref().and_then(|r| r.name.as_deref()) == Some(name));
		Ok(Self {
			href,
			content: content.into(),
			class: None,
			replace: false,
			active,
		})
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Returns the base-prefixed destination.
	pub fn href(&self) -> &str {
		&self.href
	}

	/// Returns whether the link points at the current route.
	pub fn is_active(&self) -> bool {
		self.active
	}
}

impl Component for Link {
	fn render(&self) -> Page {
		let mut el = PageElement::new("a")
			.attr("href", self.href.clone())
			.attr("data-link", "true");

		if let Some(ref class) = self.class {
			el = el.attr("class", class.clone());
		}
		if self.replace {
			el = el.attr("data-replace", "true");
		}
		if self.active {
			el = el.attr("aria-current", "page");
		}

		el.child(self.content.clone()).into_page()
	}

	fn name() -> &'static str {
		"Link"
	}
}

/// Renders the outlet state of a navigation context.
#[derive(Debug, Clone)]
pub struct RouterOutlet {
	state: OutletState,
	id: Option<String>,
	loading_text: String,
	error_text: String,
}

impl RouterOutlet {
	/// Snapshots the context's current outlet state.
	pub fn new(router: &Router) -> Self {
		Self::from_state(router.outlet().get())
	}

	/// Creates an outlet for an explicit state.
	pub fn from_state(state: OutletState) -> Self {
		Self {
			state,
			id: None,
			loading_text: "Loading…".to_string(),
			error_text: "This page could not be loaded.".to_string(),
		}
	}

	/// Sets the ID attribute.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the text shown while a lazy view loads.
	pub fn loading_text(mut self, text: impl Into<String>) -> Self {
		self.loading_text = text.into();
		self
	}

	/// Sets the text shown when a lazy view fails to load.
	pub fn error_text(mut self, text: impl Into<String>) -> Self {
		self.error_text = text.into();
		self
	}
}

impl Component for RouterOutlet {
	fn render(&self) -> Page {
		let mut el = PageElement::new("div").attr("data-router-outlet", "true");

		if let Some(ref id) = self.id {
			el = el.attr("id", id.clone());
		}

		let content = match &self.state {
			OutletState::Empty => Page::Empty,
			OutletState::Loading { route } => PageElement::new("div")
				.attr("class", "route-loading")
				.attr("aria-busy", "true")
				.attr("data-route", route.clone())
				.child(self.loading_text.clone())
				.into_page(),
			OutletState::Mounted { route, view } => {
				if let Some(route) = route {
					el = el.attr("data-route", route.clone());
				}
				view.render()
			}
			OutletState::Unmatched { fallback, .. } => {
				fallback.as_ref().map(|v| v.render()).unwrap_or(Page::Empty)
			}
			OutletState::Failed { route, .. } => PageElement::new("div")
				.attr("class", "route-error")
				.attr("role", "alert")
				.attr("data-route", route.clone())
				.child(self.error_text.clone())
				.into_page(),
		};

		el.child(content).into_page()
	}

	fn name() -> &'static str {
		"RouterOutlet"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::client_router::{
		BasePath, LoadError, MemoryHistory, RouteTable, ViewFactory,
	};
	use rstest::{fixture, rstest};

	#[fixture]
	fn router() -> Router {
		let table = RouteTable::builder()
			.named_route("home", "/", || Page::text("Início"))
			.named_lazy_route("demandas", "/demandas", || async {
				Ok(ViewFactory::new(|| Page::text("Demandas")))
			})
			.build()
			.unwrap();
		Router::new(table, MemoryHistory::new("/radar/")).with_base(BasePath::new("/radar"))
	}

	#[rstest]
	fn test_link_is_base_prefixed(router: Router) {
		let html = Link::new(&router, "/demandas", "Demandas")
			.render()
			.render_to_string();
		assert_eq!(
			html,
			"<a href=\"/radar/demandas\" data-link=\"true\">Demandas</a>"
		);
	}

	#[rstest]
	fn test_named_link_marks_current_route(router: Router) {
		router.start().unwrap();

		let home = Link::named(&router, "home", &[], "Início").unwrap();
		let demandas = Link::named(&router, "demandas", &[], "Demandas").unwrap();

		assert!(home.is_active());
		assert!(!demandas.is_active());
		assert!(home.render().render_to_string().contains("aria-current=\"page\""));
	}

	#[rstest]
	fn test_named_link_unknown_route(router: Router) {
		let err = Link::named(&router, "relatorios", &[], "Relatórios").unwrap_err();
		assert_eq!(err, RouterError::InvalidRouteName("relatorios".to_string()));
	}

	#[rstest]
	fn test_outlet_renders_mounted_view(router: Router) {
		router.start().unwrap();
		let html = RouterOutlet::new(&router).render().render_to_string();
		assert_eq!(
			html,
			"<div data-router-outlet=\"true\" data-route=\"home\">Início</div>"
		);
	}

	#[rstest]
	fn test_outlet_renders_loading_placeholder(router: Router) {
		let _pending = router.push("/demandas").unwrap();
		let html = RouterOutlet::new(&router)
			.loading_text("Carregando…")
			.render()
			.render_to_string();
		assert!(html.contains("class=\"route-loading\""));
		assert!(html.contains("aria-busy=\"true\""));
		assert!(html.contains("Carregando…"));
	}

	#[rstest]
	fn test_outlet_renders_failure() {
		let state = OutletState::Failed {
			route: "demandas".to_string(),
			error: LoadError::new("offline"),
		};
		let html = RouterOutlet::from_state(state).render().render_to_string();
		assert!(html.contains("role=\"alert\""));
		assert!(!html.contains("offline"));
	}

	#[rstest]
	fn test_outlet_empty_when_unmatched(router: Router) {
		let _ = router.push("/unknown").unwrap();
		let html = RouterOutlet::new(&router).id("app-outlet").render().render_to_string();
		assert_eq!(
			html,
			"<div data-router-outlet=\"true\" id=\"app-outlet\"></div>"
		);
	}
}
