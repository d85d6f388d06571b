/// GraphicsDevice trait - factory interface for GPU-visible light buffers

use std::sync::Arc;

use crate::error::Result;
use crate::graphics_device::{Buffer, BufferDesc};

/// Device statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphicsDeviceStats {
    /// Number of buffers currently alive
    pub live_buffers: u32,
    /// GPU memory used by live buffers (bytes)
    pub gpu_memory_used: u64,
}

/// Graphics device trait
///
/// Implemented by backend-specific devices (e.g., VulkanGraphicsDevice).
/// The light core only needs to create CPU-writable buffers; all draw
/// submission belongs to the renderer that consumes the bindings.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;

    /// Get statistics about the device
    fn stats(&self) -> GraphicsDeviceStats;
}
