//! Page tree and reactive primitives.

pub use radar_core::page::*;
pub use radar_core::reactive::*;
