//! Outage dashboard.
//!
//! Loaded on first visit to `/interrupcoes`. Outages are split between
//! scheduled (`PROGRAMADA`) and unscheduled (`NAO_PROGRAMADA`) and grouped
//! by municipality (IBGE code).

use super::page_header;
use radar_core::{Component, IntoPage, Page, PageElement};
use radar_urls::client_router::{LoadError, ViewFactory};

/// Outage classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoInterrupcao {
	/// Scheduled outage.
	Programada,
	/// Unscheduled outage.
	NaoProgramada,
}

impl TipoInterrupcao {
	/// Returns the wire code.
	pub fn code(self) -> &'static str {
		match self {
			Self::Programada => "PROGRAMADA",
			Self::NaoProgramada => "NAO_PROGRAMADA",
		}
	}

	/// Returns the display label.
	pub fn label(self) -> &'static str {
		match self {
			Self::Programada => "Programada",
			Self::NaoProgramada => "Não programada",
		}
	}
}

/// Outage dashboard view.
#[derive(Debug, Clone, Default)]
pub struct InterrupcoesView;

impl InterrupcoesView {
	/// Creates the view.
	pub fn new() -> Self {
		Self
	}

	fn summary(tipo: TipoInterrupcao) -> PageElement {
		PageElement::new("article")
			.attr("class", "resumo-interrupcao")
			.attr("data-tipo", tipo.code())
			.child(PageElement::new("h2").child(tipo.label()))
			.child(
				PageElement::new("dl")
					.child(PageElement::new("dt").child("Interrupções ativas"))
					.child(PageElement::new("dd").attr("data-field", "ativas").child("—"))
					.child(PageElement::new("dt").child("UCs afetadas"))
					.child(PageElement::new("dd").attr("data-field", "ucs").child("—")),
			)
	}
}

impl Component for InterrupcoesView {
	fn render(&self) -> Page {
		let columns = ["Município", "Conjunto elétrico", "Tipo", "UCs afetadas"];

		PageElement::new("main")
			.attr("class", "view view-interrupcoes")
			.child(page_header(
				"Interrupções",
				"Situação por município conforme o Ofício Circular 14/2025-SFE/ANEEL",
			))
			.child(
				PageElement::new("div")
					.attr("class", "resumos")
					.child(Self::summary(TipoInterrupcao::Programada))
					.child(Self::summary(TipoInterrupcao::NaoProgramada)),
			)
			.child(
				PageElement::new("table")
					.attr("class", "interrupcoes-por-municipio")
					.child(
						PageElement::new("thead").child(
							PageElement::new("tr").children(
								columns
									.into_iter()
									.map(|c| PageElement::new("th").attr("scope", "col").child(c)),
							),
						),
					)
					.child(PageElement::new("tbody")),
			)
			.into_page()
	}

	fn name() -> &'static str {
		"InterrupcoesView"
	}
}

/// Renders the outage dashboard.
pub fn render() -> Page {
	InterrupcoesView::new().render()
}

/// Loads the outage dashboard.
pub async fn load() -> Result<ViewFactory, LoadError> {
	tracing::debug!(view = InterrupcoesView::name(), "Loading view");
	Ok(ViewFactory::new(render))
}
