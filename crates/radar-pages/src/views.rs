//! RADAR views.
//!
//! `home` is bundled with the shell; `interrupcoes` and `demandas` are
//! fetched on first navigation through their `load` functions.

pub mod demandas;
pub mod home;
pub mod interrupcoes;

pub use demandas::DemandasView;
pub use home::HomeView;
pub use interrupcoes::InterrupcoesView;

use radar_core::{IntoPage, Page, PageElement};

/// Standard page header shared by every view.
pub(crate) fn page_header(title: &'static str, subtitle: &'static str) -> Page {
	PageElement::new("header")
		.attr("class", "page-header")
		.child(PageElement::new("h1").child(title))
		.child(PageElement::new("p").attr("class", "subtitle").child(subtitle))
		.into_page()
}
