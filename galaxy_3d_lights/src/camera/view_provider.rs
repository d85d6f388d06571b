/// ViewProvider - what the light pipeline needs to know about the viewer.

use glam::Vec3;

/// Camera state consumed by culling, ranking and scheduling.
///
/// Viewport convention for `world_to_viewport`:
/// - x, y: normalized screen coordinates, `[0, 1]` covers the visible area
/// - z: depth in front of the camera in world units (`> 0` means visible side)
pub trait ViewProvider {
    /// Camera position in world space
    fn position(&self) -> Vec3;

    /// Project a world-space point into viewport space
    fn world_to_viewport(&self, point: Vec3) -> Vec3;

    /// Camera-local right axis in world space (unit length)
    fn right(&self) -> Vec3;

    /// Camera-local up axis in world space (unit length)
    fn up(&self) -> Vec3;
}
