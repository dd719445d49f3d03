//! Layered frontend settings.

pub use radar_conf::settings::*;
