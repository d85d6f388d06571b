/// Identity-projection ViewProvider for unit tests.
///
/// `world_to_viewport` returns the world point unchanged, so a test can place
/// a light directly at the viewport coordinates it wants to check.

use glam::Vec3;
use super::ViewProvider;

#[derive(Debug, Clone, Copy)]
pub struct StubView {
    pub position: Vec3,
}

impl StubView {
    pub fn at(position: Vec3) -> Self {
        Self { position }
    }
}

impl Default for StubView {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl ViewProvider for StubView {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn world_to_viewport(&self, point: Vec3) -> Vec3 {
        point
    }

    fn right(&self) -> Vec3 {
        Vec3::X
    }

    fn up(&self) -> Vec3 {
        Vec3::Y
    }
}
