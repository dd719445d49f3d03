//! Client-side routing for the RADAR frontend.
//!
//! This crate provides the route table, path pattern matching, deferred view
//! loading and the navigation context the application shell renders from.
//! See [`client_router`] for an overview.

#![warn(missing_docs)]

pub mod client_router;

/// Commonly used routing types.
pub mod prelude {
	pub use crate::client_router::{
		BasePath, History, Link, MemoryHistory, Navigation, NavigationOutcome, OutletState,
		RouteTable, Router, RouterError, RouterOutlet, ViewFactory,
	};
}
