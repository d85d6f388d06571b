/*!
# Galaxy 3D Lights

Light slot streaming for the Galaxy 3D engine.

Keeps two bounded, GPU-visible arrays of light descriptors (point lights and
spot lights) up to date for a real-time renderer: each scheduled tick culls
the registered lights against the viewer, ranks the survivors nearest first,
and uploads the winners before publishing the new active counts.

## Architecture

- **LightRegistry**: per-kind handles into the scene's `LightArena`
- **LightCuller / LightRanker**: distance and frustum culling, nearest-first ranking
- **LightSlotBuffer**: fixed-capacity descriptor storage mirrored to a GPU buffer
- **AdaptiveScheduler**: motion-sensitive update interval
- **LightManager**: context object driving all of the above from `tick`
- **GraphicsDevice / Buffer**: backend traits (Vulkan lives in `galaxy_3d_lights_vulkan`)
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod config;
pub mod graphics_device;
pub mod light;
pub mod light_manager;
pub mod scheduler;
pub mod selection;
pub mod slots;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging entry point)
    pub use crate::engine::Engine;

    // Light manager
    pub use crate::light_manager::{LightBinding, LightManager, TickReport};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Viewer sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Configuration sub-module
    pub mod config {
        pub use crate::config::*;
    }

    // GPU device sub-module
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Light data, selection and slot buffers
    pub mod light {
        pub use crate::light::*;
        pub use crate::selection::*;
        pub use crate::slots::*;
        pub use crate::scheduler::*;
    }
}

// Re-export math library at crate root
pub use glam;
