//! The RADAR application: routes, views, shell and startup.

pub use radar_pages::*;
