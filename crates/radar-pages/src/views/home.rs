//! Landing page.

use super::page_header;
use radar_core::{Component, IntoPage, Page, PageElement};

/// Dashboard landing page, bundled with the shell.
#[derive(Debug, Clone, Default)]
pub struct HomeView;

impl HomeView {
	/// Creates the view.
	pub fn new() -> Self {
		Self
	}
}

fn card(title: &'static str, body: &'static str) -> PageElement {
	PageElement::new("section")
		.attr("class", "card")
		.child(PageElement::new("h2").child(title))
		.child(PageElement::new("p").child(body))
}

impl Component for HomeView {
	fn render(&self) -> Page {
		PageElement::new("main")
			.attr("class", "view view-home")
			.child(page_header(
				"RADAR",
				"Painel regulatório da Roraima Energia",
			))
			.child(
				PageElement::new("div")
					.attr("class", "cards")
					.child(card(
						"Interrupções",
						"Interrupções programadas e não programadas por município, \
						 conforme o Ofício Circular 14/2025-SFE/ANEEL.",
					))
					.child(card(
						"Demandas Diversas",
						"Acompanhamento das demandas encaminhadas à ANEEL.",
					)),
			)
			.into_page()
	}

	fn name() -> &'static str {
		"HomeView"
	}
}

/// Renders the landing page.
pub fn render() -> Page {
	HomeView::new().render()
}
