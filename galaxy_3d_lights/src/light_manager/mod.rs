//! Light manager module
//!
//! The context object tying registry, selection, scheduling and slot
//! buffers together behind one `tick` entry point.

mod light_manager;

pub use light_manager::{LightBinding, LightManager, TickReport};
