//! Core types for the RADAR frontend.
//!
//! - [`page`]: the renderable [`Page`](page::Page) tree produced by views
//! - [`reactive`]: [`Signal`](reactive::Signal), the observable cell used for
//!   navigation state

#![warn(missing_docs)]

pub mod page;
pub mod reactive;

pub use page::{Component, IntoPage, Page, PageElement};
pub use reactive::Signal;
