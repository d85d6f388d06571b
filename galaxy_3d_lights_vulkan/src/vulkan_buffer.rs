/// Buffer - Vulkan implementation of the light Buffer trait

use galaxy_3d_lights::galaxy3d::{
    Result,
    Error,
    render::Buffer as LightBuffer,
};
use galaxy_3d_lights::{engine_bail, engine_error};
use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Host-visible Vulkan storage buffer
pub struct Buffer {
    /// Shared GPU context (device, allocator)
    ctx: Arc<GpuContext>,
    /// Debug name
    name: String,
    /// Vulkan buffer
    pub(crate) buffer: vk::Buffer,
    /// GPU memory allocation
    pub(crate) allocation: Option<Allocation>,
    /// Buffer size
    pub(crate) size: u64,
}

impl Buffer {
    /// Wrap a created and bound buffer. Counts it as live in `ctx`.
    pub fn new(
        ctx: Arc<GpuContext>,
        name: String,
        buffer: vk::Buffer,
        allocation: Allocation,
        size: u64,
    ) -> Self {
        ctx.track_buffer_created(size);
        Self {
            ctx,
            name,
            buffer,
            allocation: Some(allocation),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw handle, for binding into descriptor sets
    pub fn handle(&self) -> vk::Buffer {
        self.buffer
    }
}

impl LightBuffer for Buffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let end = offset.checked_add(data.len() as u64);
        if end.map_or(true, |end| end > self.size) {
            engine_bail!("galaxy3d::vulkan",
                "Write of {} bytes at offset {} exceeds buffer '{}' size {}",
                data.len(), offset, self.name, self.size);
        }

        let Some(allocation) = &self.allocation else {
            engine_error!("galaxy3d::vulkan", "Buffer '{}' update failed: no GPU allocation", self.name);
            return Err(Error::BackendError("Buffer has no allocation".to_string()));
        };

        let mapped_ptr = allocation
            .mapped_ptr()
            .ok_or_else(|| Error::BackendError(format!("Buffer '{}' is not CPU-accessible", self.name)))?
            .as_ptr() as *mut u8;

        unsafe {
            // Bounds checked above; CpuToGpu memory is host-coherent
            std::ptr::copy_nonoverlapping(
                data.as_ptr(),
                mapped_ptr.add(offset as usize),
                data.len(),
            );
        }
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the buffer
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            // Destroy buffer
            self.ctx.device.destroy_buffer(self.buffer, None);
        }
        self.ctx.track_buffer_destroyed(self.size);
    }
}
