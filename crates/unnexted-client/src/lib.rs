//! Unnexted client
//!
//! Picks up a server-rendered document and makes it interactive: reads the
//! embedded page data and route descriptors, finds the page module that owns
//! the current pathname, and hands it to a [`Hydrator`] together with the
//! props the server rendered with. Server data is never fetched again here.
//!
//! The DOM, the module loader and the hydrating UI library are all traits, so
//! the bootstrap runs the same in the browser (`web` feature) and in tests.

mod bootstrap;
mod error;
mod host;

#[cfg(feature = "web")]
pub mod web;

pub use bootstrap::{default_source_ref, Bootstrap, BootstrapOptions, HydrationOutcome};
pub use error::{DecodeError, ModuleLoadError};
pub use host::{ClientModules, HostDocument, Hydrator, ReadyState};
pub use unnexted_router::{PageData, Props};

/// Message rendered in place of a page whose module failed to load
pub const FALLBACK_MESSAGE: &str = "Failed to load page";
