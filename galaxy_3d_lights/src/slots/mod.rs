//! Light slot module
//!
//! GPU descriptor layouts and the fixed-capacity slot buffers they are
//! uploaded through.

mod gpu_light;
mod light_slot_buffer;

pub use gpu_light::{GpuLight, GpuPointLight, GpuSpotLight};
pub use light_slot_buffer::LightSlotBuffer;
