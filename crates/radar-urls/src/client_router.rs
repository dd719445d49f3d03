//! Client-side routing.
//!
//! ```text
//! RouteTable ──▶ Router ──▶ OutletState ──▶ RouterOutlet
//!                  ▲
//!        History (MemoryHistory / BrowserHistory)
//! ```
//!
//! A [`RouteTable`] maps path patterns to eager or lazy views. A [`Router`]
//! is the navigation context: it consults the table on every navigation,
//! keeps the host [`History`] in sync and publishes what to display through
//! its outlet signal.

mod components;
mod core;
mod error;
mod history;
mod lazy;
mod location;
mod pattern;
mod table;

pub use components::{Link, RouterOutlet};
pub use self::core::{CurrentRoute, Navigation, NavigationOutcome, OutletState, Router};
pub use error::{LoadError, PatternError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryState, MemoryHistory, NavigationType};
pub use lazy::{LazyView, LoadFuture, RouteView, ViewFactory};
pub use location::{BasePath, Location};
pub use pattern::{MatchOptions, PathPattern};
pub use table::{Route, RouteMatch, RouteTable, RouteTableBuilder};
