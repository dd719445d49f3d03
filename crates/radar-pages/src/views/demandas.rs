//! Miscellaneous regulatory demands.
//!
//! The module is a placeholder until the ANEEL reporting deadline.

use super::page_header;
use radar_core::{Component, IntoPage, Page, PageElement};
use radar_urls::client_router::{LoadError, ViewFactory};

/// Deadline shown on the placeholder.
pub const PRAZO_ANEEL: &str = "Maio/2026";

/// Demands view.
#[derive(Debug, Clone, Default)]
pub struct DemandasView;

impl DemandasView {
	/// Creates the view.
	pub fn new() -> Self {
		Self
	}
}

impl Component for DemandasView {
	fn render(&self) -> Page {
		PageElement::new("main")
			.attr("class", "view view-demandas")
			.child(page_header("Demandas Diversas", "Demandas regulatórias em acompanhamento"))
			.child(
				PageElement::new("section")
					.attr("class", "placeholder")
					.attr("role", "status")
					.child(PageElement::new("p").child("Módulo em desenvolvimento."))
					.child(
						PageElement::new("p")
							.child("Prazo ANEEL: ")
							.child(PageElement::new("strong").child(PRAZO_ANEEL)),
					),
			)
			.into_page()
	}

	fn name() -> &'static str {
		"DemandasView"
	}
}

/// Renders the demands view.
pub fn render() -> Page {
	DemandasView::new().render()
}

/// Loads the demands view.
pub async fn load() -> Result<ViewFactory, LoadError> {
	tracing::debug!(view = DemandasView::name(), "Loading view");
	Ok(ViewFactory::new(render))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_placeholder_shows_deadline() {
		let html = render().render_to_string();
		assert!(html.contains("<strong>Maio/2026</strong>"));
		assert!(html.contains("role=\"status\""));
	}
}
