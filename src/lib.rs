//! # RADAR
//!
//! Client-side routing and views for RADAR, the regulatory dashboard of
//! Roraima Energia.
//!
//! The application has three routes:
//!
//! - `/` (`home`): the landing page, bundled with the shell
//! - `/interrupcoes`: the outage dashboard, loaded on first visit
//! - `/demandas`: miscellaneous demands, loaded on first visit
//!
//! Lazy views are loaded at most once per navigation context. The base
//! path the app is served under comes from `RADAR_BASE_URL`.
//!
//! ## Feature Flags
//!
//! - `minimal`: routing primitives and the RADAR views
//! - `full` (default): `minimal` plus layered settings
//! - `pages`, `conf`: individual crates
//!
//! ## Quick Example
//!
//! ```
//! use radar::prelude::*;
//!
//! let launched = radar::pages::launch(&FrontendSettings::default(), MemoryHistory::new("/")).unwrap();
//! assert_eq!(launched.router.outlet().get().mounted_route(), Some("home"));
//! ```

#![warn(missing_docs)]

#[cfg(feature = "conf")]
pub mod conf;
pub mod core;
#[cfg(feature = "pages")]
pub mod pages;
pub mod urls;

pub use radar_core::{Component, IntoPage, Page, PageElement, Signal};
pub use radar_urls::client_router::{
	BasePath, Link, MemoryHistory, Navigation, NavigationOutcome, OutletState, RouteTable, Router,
	RouterError, RouterOutlet,
};

#[cfg(feature = "conf")]
pub use radar_conf::{FrontendSettings, SettingsError, SettingsLoader};

/// Common imports.
pub mod prelude {
	pub use radar_core::{Component, IntoPage, Page, PageElement, Signal};
	pub use radar_urls::prelude::*;

	#[cfg(feature = "conf")]
	pub use radar_conf::FrontendSettings;

	#[cfg(feature = "pages")]
	pub use radar_pages::{AppShell, Launched, app_routes};
}
