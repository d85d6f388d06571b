//! Camera module - view providers for light culling.
//!
//! The light core does NOT own cameras. The caller hands a `ViewProvider`
//! to every tick; `Camera` is the matrix-based implementation provided
//! for convenience.

mod camera;
mod view_provider;

pub use camera::Camera;
pub use view_provider::ViewProvider;

// Identity-projection view for tests
#[cfg(test)]
pub mod stub_view;
