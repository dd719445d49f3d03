//! # RADAR frontend configuration
//!
//! Settings are merged from layered sources in priority order: built-in
//! defaults, an optional TOML file, then `RADAR_`-prefixed environment
//! variables.
//!
//! ## Module Organization
//!
//! - [`settings`]: sources, boolean parsing and [`FrontendSettings`]

pub mod settings;

pub use settings::{FrontendSettings, SettingsError, SettingsLoader};
