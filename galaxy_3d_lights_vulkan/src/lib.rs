/*!
# Galaxy 3D Lights - Vulkan Backend

Vulkan implementation of the `galaxy_3d_lights` graphics device traits.

Uses Ash for the Vulkan bindings and gpu-allocator for host-visible buffer
memory. The device is headless: it creates the light storage buffers the
renderer binds, and nothing else.
*/

// Vulkan implementation modules
mod vulkan;
mod vulkan_buffer;
mod vulkan_context;
mod vulkan_debug;

pub mod galaxy3d {
    pub use crate::vulkan::{VulkanDeviceConfig, VulkanGraphicsDevice};
    pub use crate::vulkan_buffer::Buffer as VulkanBuffer;
    pub use crate::vulkan_debug::{reset_validation_stats, validation_stats, ValidationStats};
}
