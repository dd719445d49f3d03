//! Application shell: header, navigation and the route outlet.

use crate::routes::{DEMANDAS, HOME, INTERRUPCOES};
use radar_conf::FrontendSettings;
use radar_core::{Component, IntoPage, Page, PageElement};
use radar_urls::client_router::{Link, Router, RouterOutlet};

/// Navigation entries, in display order.
pub const NAV_ITEMS: &[(&str, &str)] = &[
	(HOME, "Início"),
	(INTERRUPCOES, "Interrupções"),
	(DEMANDAS, "Demandas"),
];

/// Id of the outlet container.
pub const OUTLET_ID: &str = "radar-outlet";

/// Page shell rendered around the routed view.
#[derive(Debug, Clone)]
pub struct AppShell {
	router: Router,
	app_name: String,
}

impl AppShell {
	/// Creates the shell for a navigation context.
	pub fn new(router: &Router, settings: &FrontendSettings) -> Self {
		Self {
			router: router.clone(),
			app_name: settings.app_name.clone(),
		}
	}

	fn nav(&self) -> PageElement {
		let links = NAV_ITEMS.iter().filter_map(|(name, label)| {
			match Link::named(&self.router, name, &[], *label) {
				Ok(link) => Some(link.class("nav-link").render()),
				Err(error) => {
					tracing::warn!(route = *name, %error, "Skipping navigation entry");
					None
				}
			}
		});
		PageElement::new("nav")
			.attr("class", "main-nav")
			.attr("aria-label", "Principal")
			.children(links)
	}
}

impl Component for AppShell {
	fn render(&self) -> Page {
		let header = PageElement::new("header")
			.attr("class", "app-header")
			.child(
				PageElement::new("span")
					.attr("class", "app-name")
					.child(self.app_name.clone()),
			)
			.child(self.nav());

		let outlet = RouterOutlet::new(&self.router)
			.id(OUTLET_ID)
			.loading_text("Carregando…")
			.error_text("Não foi possível carregar esta página. Tente novamente.");

		PageElement::new("div")
			.attr("class", "app-shell")
			.child(header)
			.child(outlet.render())
			.into_page()
	}

	fn name() -> &'static str {
		"AppShell"
	}
}
