//! Frontend settings.

pub mod env;
mod frontend;
pub mod sources;

pub use env::{EnvError, parse_bool};
pub use frontend::{ENV_PREFIX, FrontendSettings, SettingsError, SettingsLoader};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
