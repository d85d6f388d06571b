/// Camera - low-level passive data container.
///
/// The caller (game engine) computes and sets the view and projection
/// matrices. The camera derives its world position and basis from the
/// inverse view matrix when they change, nothing else.

use glam::{Mat4, Vec3};
use super::view_provider::ViewProvider;

/// Low-level camera built from view + projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
    world_matrix: Mat4,
}

impl Camera {
    /// Create a new camera from a view matrix (world → view, right-handed,
    /// looking down -Z) and a projection matrix.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            view_projection_matrix: projection * view,
            world_matrix: view.inverse(),
        }
    }

    /// Convenience constructor: perspective camera at `eye` looking at `target`.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(
            Mat4::look_at_rh(eye, target, Vec3::Y),
            Mat4::perspective_rh(fov_y_radians, aspect, near, far),
        )
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    /// Camera forward axis in world space.
    pub fn forward(&self) -> Vec3 {
        -self.world_matrix.z_axis.truncate().normalize_or_zero()
    }

    // ===== SETTERS (store, derive basis) =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.world_matrix = matrix.inverse();
        self.view_projection_matrix = self.projection_matrix * matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.view_projection_matrix = matrix * self.view_matrix;
    }
}

impl ViewProvider for Camera {
    fn position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    fn world_to_viewport(&self, point: Vec3) -> Vec3 {
        let clip = self.view_projection_matrix * point.extend(1.0);
        let depth = -self.view_matrix.transform_point3(point).z;

        // Point on the camera plane: no meaningful screen position
        if clip.w.abs() <= f32::EPSILON {
            return Vec3::new(0.5, 0.5, depth);
        }

        let ndc = clip.truncate() / clip.w;
        Vec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, depth)
    }

    fn right(&self) -> Vec3 {
        self.world_matrix.x_axis.truncate().normalize_or_zero()
    }

    fn up(&self) -> Vec3 {
        self.world_matrix.y_axis.truncate().normalize_or_zero()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
