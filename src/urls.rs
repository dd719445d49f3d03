//! Route table and navigation context.
//!
//! See [`radar_urls::client_router`] for details.

pub use radar_urls::client_router::*;
