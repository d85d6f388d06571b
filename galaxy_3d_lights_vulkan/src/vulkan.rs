/// VulkanGraphicsDevice - headless Vulkan implementation of GraphicsDevice
///
/// Creates an instance, picks the first physical device exposing a graphics
/// or compute queue, and allocates host-visible storage buffers through
/// gpu-allocator. No surface or swapchain: the renderer that consumes the
/// light bindings owns presentation.

use galaxy_3d_lights::galaxy3d::{Result, Error};
use galaxy_3d_lights::galaxy3d::render::{
    Buffer as LightBuffer, BufferDesc, BufferUsage, GraphicsDevice, GraphicsDeviceStats,
};
use ash::vk;
use std::ffi::CString;
use std::mem::ManuallyDrop;
use std::sync::{Arc, Mutex};
use gpu_allocator::vulkan::{Allocator, AllocatorCreateDesc};
use galaxy_3d_lights::{engine_error, engine_info, engine_warn, engine_err};

use crate::vulkan_buffer::Buffer;
use crate::vulkan_context::GpuContext;

/// Device creation options
#[derive(Debug, Clone)]
pub struct VulkanDeviceConfig {
    /// Application name reported to the driver
    pub application_name: String,
    /// Enable VK_LAYER_KHRONOS_validation and route its messages to the engine logger
    pub enable_validation: bool,
}

impl Default for VulkanDeviceConfig {
    fn default() -> Self {
        Self {
            application_name: "Galaxy3D Lights".to_string(),
            enable_validation: false,
        }
    }
}

/// Vulkan device implementation
pub struct VulkanGraphicsDevice {
    /// Vulkan entry (keeps the loader alive)
    _entry: ash::Entry,
    /// Vulkan instance
    instance: ash::Instance,
    /// Physical device
    physical_device: vk::PhysicalDevice,
    /// Shared GPU context for all buffers
    gpu_context: Arc<GpuContext>,
}

fn init_failed(what: &str, e: impl std::fmt::Debug) -> Error {
    engine_error!("galaxy3d::vulkan", "{}: {:?}", what, e);
    Error::InitializationFailed(format!("{}: {:?}", what, e))
}

impl VulkanGraphicsDevice {
    pub fn new(config: VulkanDeviceConfig) -> Result<Self> {
        unsafe {
            // Create Vulkan Entry
            let entry = ash::Entry::load()
                .map_err(|e| init_failed("Failed to load Vulkan library", e))?;

            let app_name = CString::new(config.application_name.clone())
                .map_err(|e| init_failed("Invalid application name", e))?;

            // Application Info
            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, 1, 0, 0))
                .engine_name(c"Galaxy3D")
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_2);

            // Validation layers
            let (layer_names, extension_names) = if config.enable_validation {
                (
                    vec![c"VK_LAYER_KHRONOS_validation".as_ptr()],
                    vec![ash::ext::debug_utils::NAME.as_ptr()],
                )
            } else {
                (vec![], vec![])
            };

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_names);

            let instance = entry
                .create_instance(&create_info, None)
                .map_err(|e| init_failed("Failed to create Vulkan instance", e))?;

            // Setup debug messenger if validation is enabled
            let (debug_utils_loader, debug_messenger) = if config.enable_validation {
                let debug_utils = ash::ext::debug_utils::Instance::new(&entry, &instance);
                match debug_utils.create_debug_utils_messenger(&crate::vulkan_debug::messenger_create_info(), None) {
                    Ok(messenger) => (Some(debug_utils), Some(messenger)),
                    Err(e) => {
                        instance.destroy_instance(None);
                        return Err(init_failed("Failed to create debug messenger", e));
                    }
                }
            } else {
                (None, None)
            };

            // Everything created past this point is torn down by this guard on error
            let cleanup_instance = |instance: &ash::Instance| {
                if let (Some(debug_utils), Some(messenger)) = (&debug_utils_loader, debug_messenger) {
                    debug_utils.destroy_debug_utils_messenger(messenger, None);
                }
                instance.destroy_instance(None);
            };

            // Pick Physical Device + queue family
            let selected = match Self::pick_physical_device(&instance) {
                Ok(selected) => selected,
                Err(e) => {
                    cleanup_instance(&instance);
                    return Err(e);
                }
            };
            let (physical_device, queue_family) = selected;

            let properties = instance.get_physical_device_properties(physical_device);
            let device_name = properties
                .device_name_as_c_str()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|_| "Unknown".to_string());

            // Create Logical Device
            let queue_priorities = [1.0];
            let queue_create_infos = [vk::DeviceQueueCreateInfo::default()
                .queue_family_index(queue_family)
                .queue_priorities(&queue_priorities)];

            let device_create_info = vk::DeviceCreateInfo::default()
                .queue_create_infos(&queue_create_infos);

            let device = match instance.create_device(physical_device, &device_create_info, None) {
                Ok(device) => device,
                Err(e) => {
                    cleanup_instance(&instance);
                    return Err(init_failed("Failed to create logical device", e));
                }
            };

            let queue = device.get_device_queue(queue_family, 0);

            // Create GPU allocator
            let allocator = match Allocator::new(&AllocatorCreateDesc {
                instance: instance.clone(),
                device: device.clone(),
                physical_device,
                debug_settings: Default::default(),
                buffer_device_address: false,
                allocation_sizes: Default::default(),
            }) {
                Ok(allocator) => allocator,
                Err(e) => {
                    device.destroy_device(None);
                    cleanup_instance(&instance);
                    return Err(init_failed("Failed to create GPU allocator", e));
                }
            };

            let gpu_context = Arc::new(GpuContext::new(
                device,
                Arc::new(Mutex::new(allocator)),
                queue,
                queue_family,
                debug_utils_loader.clone(),
                debug_messenger,
            ));

            engine_info!("galaxy3d::vulkan", "Vulkan device ready: {} (queue family {}, validation {})",
                device_name, queue_family, if config.enable_validation { "on" } else { "off" });

            Ok(Self {
                _entry: entry,
                instance,
                physical_device,
                gpu_context,
            })
        }
    }

    /// First physical device with a graphics or compute queue family
    unsafe fn pick_physical_device(instance: &ash::Instance) -> Result<(vk::PhysicalDevice, u32)> {
        let physical_devices = instance
            .enumerate_physical_devices()
            .map_err(|e| init_failed("Failed to enumerate physical devices", e))?;

        physical_devices
            .into_iter()
            .find_map(|physical_device| {
                instance
                    .get_physical_device_queue_family_properties(physical_device)
                    .iter()
                    .position(|qf| {
                        qf.queue_flags.intersects(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE)
                    })
                    .map(|index| (physical_device, index as u32))
            })
            .ok_or_else(|| {
                engine_error!("galaxy3d::vulkan", "No Vulkan-capable GPU found");
                Error::InitializationFailed("No Vulkan-capable GPU found".to_string())
            })
    }

    /// Physical device the logical device was created on
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// Queue family used by the device
    pub fn queue_family(&self) -> u32 {
        self.gpu_context.queue_family
    }
}

impl GraphicsDevice for VulkanGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn LightBuffer>> {
        if desc.size == 0 {
            return Err(Error::InvalidResource(format!("Buffer '{}' has zero size", desc.name)));
        }

        let usage = match desc.usage {
            BufferUsage::Uniform => vk::BufferUsageFlags::UNIFORM_BUFFER,
            BufferUsage::Storage => vk::BufferUsageFlags::STORAGE_BUFFER,
        };

        let device = &self.gpu_context.device;

        unsafe {
            // Create buffer
            let buffer_create_info = vk::BufferCreateInfo::default()
                .size(desc.size)
                .usage(usage)
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            let buffer = device.create_buffer(&buffer_create_info, None)
                .map_err(|e| engine_err!("galaxy3d::vulkan", "Failed to create buffer '{}' of size {} bytes: {:?}", desc.name, desc.size, e))?;

            // Allocate memory
            let requirements = device.get_buffer_memory_requirements(buffer);

            let allocation = {
                let Ok(mut allocator) = self.gpu_context.allocator.lock() else {
                    device.destroy_buffer(buffer, None);
                    return Err(engine_err!("galaxy3d::vulkan", "GPU allocator lock poisoned"));
                };
                allocator.allocate(&gpu_allocator::vulkan::AllocationCreateDesc {
                    name: &desc.name,
                    requirements,
                    location: gpu_allocator::MemoryLocation::CpuToGpu,
                    linear: true,
                    allocation_scheme: gpu_allocator::vulkan::AllocationScheme::GpuAllocatorManaged,
                })
            };
            let allocation = match allocation {
                Ok(allocation) => allocation,
                Err(_e) => {
                    device.destroy_buffer(buffer, None);
                    let size_kb = requirements.size as f64 / 1024.0;
                    engine_error!("galaxy3d::vulkan", "Out of GPU memory for buffer '{}' (required: {:.2} KB)", desc.name, size_kb);
                    return Err(Error::OutOfMemory);
                }
            };

            // From here the wrapper owns both handles and frees them on any error
            let wrapped = Buffer::new(
                Arc::clone(&self.gpu_context),
                desc.name.clone(),
                buffer,
                allocation,
                desc.size,
            );

            // Bind memory
            let bound = match &wrapped.allocation {
                Some(allocation) => device.bind_buffer_memory(buffer, allocation.memory(), allocation.offset()),
                None => Err(vk::Result::ERROR_UNKNOWN),
            };
            bound.map_err(|e| engine_err!("galaxy3d::vulkan", "Failed to bind memory of buffer '{}': {:?}", desc.name, e))?;

            Ok(Arc::new(wrapped))
        }
    }

    fn wait_idle(&self) -> Result<()> {
        unsafe {
            self.gpu_context.device
                .device_wait_idle()
                .map_err(|e| engine_err!("galaxy3d::vulkan", "Failed to wait idle: {:?}", e))
        }
    }

    fn stats(&self) -> GraphicsDeviceStats {
        GraphicsDeviceStats {
            live_buffers: self.gpu_context.live_buffers(),
            gpu_memory_used: self.gpu_context.gpu_memory_used(),
        }
    }
}

impl Drop for VulkanGraphicsDevice {
    fn drop(&mut self) {
        unsafe {
            // Wait for device to finish
            self.gpu_context.device.device_wait_idle().ok();

            // 1. Drop allocator: free VkDeviceMemory pages BEFORE destroying device.
            //    Only possible once every buffer has released its Arc<GpuContext>.
            match Arc::get_mut(&mut self.gpu_context) {
                Some(ctx) => ManuallyDrop::drop(&mut ctx.allocator),
                None => engine_warn!("galaxy3d::vulkan",
                    "Device dropped with {} live buffers; allocator leaked",
                    self.gpu_context.live_buffers()),
            }

            // 2. Destroy debug messenger BEFORE device and instance
            if let (Some(debug_utils), Some(messenger)) = (
                &self.gpu_context.debug_utils_loader,
                &self.gpu_context.debug_messenger,
            ) {
                debug_utils.destroy_debug_utils_messenger(*messenger, None);
            }

            // 3. Destroy device and instance
            self.gpu_context.device.destroy_device(None);
            self.instance.destroy_instance(None);
        }
    }
}
