//! Reactive state shared between the navigation context and the host renderer.

mod signal;

pub use signal::{Signal, SubscriptionId};
