//! The RADAR route table.
//!
//! | Name           | Path            | Loading |
//! |----------------|-----------------|---------|
//! | `home`         | `/`             | eager   |
//! | `interrupcoes` | `/interrupcoes` | lazy    |
//! | `demandas`     | `/demandas`     | lazy    |
//!
//! Unknown paths mount nothing.

use crate::views::{demandas, home, interrupcoes};
use radar_urls::client_router::{RouteTable, RouterError};

/// Name of the landing route.
pub const HOME: &str = "home";
/// Name of the outage dashboard route.
pub const INTERRUPCOES: &str = "interrupcoes";
/// Name of the demands route.
pub const DEMANDAS: &str = "demandas";

/// Builds the application's route table.
///
/// Each call returns a fresh table whose lazy views have not been loaded.
pub fn app_routes() -> Result<RouteTable, RouterError> {
	RouteTable::builder()
		.named_route(HOME, "/", home::render)
		.named_lazy_route(INTERRUPCOES, "/interrupcoes", interrupcoes::load)
		.named_lazy_route(DEMANDAS, "/demandas", demandas::load)
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_table_shape() {
		let table = app_routes().unwrap();
		assert_eq!(table.route_count(), 3);
		assert!(table.not_found_view().is_none());

		let lazy: Vec<_> = table
			.routes()
			.map(|r| (r.name().unwrap_or_default().to_string(), r.is_lazy()))
			.collect();
		assert_eq!(
			lazy,
			vec![
				(HOME.to_string(), false),
				(INTERRUPCOES.to_string(), true),
				(DEMANDAS.to_string(), true),
			]
		);
	}

	#[rstest]
	#[case(HOME, "/")]
	#[case(INTERRUPCOES, "/interrupcoes")]
	#[case(DEMANDAS, "/demandas")]
	fn test_reverse(#[case] name: &str, #[case] path: &str) {
		assert_eq!(app_routes().unwrap().reverse(name, &[]).unwrap(), path);
	}
}
