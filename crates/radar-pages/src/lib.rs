//! The RADAR single-page application.
//!
//! This crate assembles the dashboard on top of the routing primitives in
//! `radar-urls`:
//!
//! - [`routes`]: the application route table (`/`, `/interrupcoes`, `/demandas`)
//! - [`views`]: the views mounted by those routes
//! - [`layout`]: the page shell with navigation links and the route outlet
//! - [`launcher`]: startup against an in-memory history or, on `wasm32`,
//!   the browser
//! - [`logging`]: `tracing` subscriber setup
//!
//! ```
//! use radar_conf::FrontendSettings;
//! use radar_pages::launcher::launch;
//! use radar_urls::client_router::MemoryHistory;
//!
//! let settings = FrontendSettings::default();
//! let launched = launch(&settings, MemoryHistory::new("/")).unwrap();
//! assert_eq!(launched.router.outlet().get().mounted_route(), Some("home"));
//! ```

#![warn(missing_docs)]

pub mod launcher;
pub mod layout;
pub mod logging;
pub mod routes;
pub mod views;

pub use launcher::{LaunchError, Launched, launch, launch_from_env};
pub use layout::AppShell;
pub use logging::init_logging;
pub use routes::app_routes;
