//! Runtime-pluggable component registry.
//!
//! A family of interchangeable implementations shares one capability trait.
//! Each implementation exposes a [`Registration`] token; the host collects
//! the tokens into a [`Registry`] during startup and later constructs
//! implementations by their string id without naming concrete types.

mod registration;
mod registry;

pub use registration::Registration;
pub use registry::{Constructor, Registry};
