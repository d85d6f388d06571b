//! Light module
//!
//! Light source data, stable handles, and the per-kind candidate registry.

mod light_source;
mod light_registry;

pub use light_source::{LightArena, LightKey, LightKind, LightSource};
pub use light_registry::LightRegistry;
