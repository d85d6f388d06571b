/// GpuContext - Shared GPU resources for all Vulkan light buffers
///
/// Contains everything a buffer needs to free itself:
/// - Device for Vulkan API calls
/// - Allocator for memory management
/// - Live buffer / memory counters reported by `GraphicsDevice::stats`

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use std::mem::ManuallyDrop;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Shared GPU context for all Vulkan buffers.
///
/// Shared (via `Arc`) by every buffer so each one can free its allocation
/// on drop without going back through the device.
///
/// Note: device and instance destruction is handled by
/// `VulkanGraphicsDevice::drop()`.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator (shared, requires mutex for thread safety)
    /// Wrapped in ManuallyDrop so it is dropped BEFORE the device is destroyed
    pub allocator: ManuallyDrop<Arc<Mutex<Allocator>>>,

    /// Queue used for wait-idle
    pub queue: vk::Queue,

    /// Queue family index of `queue`
    pub queue_family: u32,

    /// Debug utils loader (validation only)
    pub(crate) debug_utils_loader: Option<ash::ext::debug_utils::Instance>,

    /// Debug messenger handle (validation only)
    pub(crate) debug_messenger: Option<vk::DebugUtilsMessengerEXT>,

    live_buffers: AtomicU32,
    gpu_memory_used: AtomicU64,
}

impl GpuContext {
    pub fn new(
        device: ash::Device,
        allocator: Arc<Mutex<Allocator>>,
        queue: vk::Queue,
        queue_family: u32,
        debug_utils_loader: Option<ash::ext::debug_utils::Instance>,
        debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
    ) -> Self {
        Self {
            device,
            allocator: ManuallyDrop::new(allocator),
            queue,
            queue_family,
            debug_utils_loader,
            debug_messenger,
            live_buffers: AtomicU32::new(0),
            gpu_memory_used: AtomicU64::new(0),
        }
    }

    pub(crate) fn track_buffer_created(&self, size: u64) {
        self.live_buffers.fetch_add(1, Ordering::Relaxed);
        self.gpu_memory_used.fetch_add(size, Ordering::Relaxed);
    }

    pub(crate) fn track_buffer_destroyed(&self, size: u64) {
        self.live_buffers.fetch_sub(1, Ordering::Relaxed);
        self.gpu_memory_used.fetch_sub(size, Ordering::Relaxed);
    }

    pub fn live_buffers(&self) -> u32 {
        self.live_buffers.load(Ordering::Relaxed)
    }

    pub fn gpu_memory_used(&self) -> u64 {
        self.gpu_memory_used.load(Ordering::Relaxed)
    }
}
