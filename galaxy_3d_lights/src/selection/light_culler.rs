/// Per-light inclusion test.
///
/// A candidate survives when it is enabled, of the pass's kind, inside the
/// distance cull radius and (approximately) inside the view frustum. Each
/// disabled test passes unconditionally.

use crate::camera::ViewProvider;
use crate::config::LightConfig;
use crate::light::{LightKind, LightSource};

/// Lower bound of the viewport-space tolerance radius
pub const MIN_VIEWPORT_RADIUS: f32 = 0.1;

/// Outcome of culling one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullVerdict {
    Included,
    /// `enabled == false`
    Disabled,
    /// Light registered under one kind but authored as the other
    KindMismatch,
    DistanceCulled,
    FrustumCulled,
}

/// Stateless culling evaluator
pub struct LightCuller;

impl LightCuller {
    /// Evaluate every inclusion test and report the first one that failed.
    pub fn verdict(
        light: &LightSource,
        kind: LightKind,
        view: &dyn ViewProvider,
        config: &LightConfig,
    ) -> CullVerdict {
        if !light.enabled {
            return CullVerdict::Disabled;
        }
        if light.kind != kind {
            return CullVerdict::KindMismatch;
        }

        let effective_range = light.range * config.range_multiplier(kind);

        if config.distance_cull_enabled() {
            let cull_distance = effective_range * config.distance_cull_factor();
            // A light exactly at the cull distance is outside
            if light.position.distance(view.position()) >= cull_distance {
                return CullVerdict::DistanceCulled;
            }
        }

        if config.frustum_cull_enabled()
            && !Self::in_frustum(light, effective_range, view, config.frustum_cull_tolerance())
        {
            return CullVerdict::FrustumCulled;
        }

        CullVerdict::Included
    }

    /// `true` when the light passes every enabled test
    pub fn include(
        light: &LightSource,
        kind: LightKind,
        view: &dyn ViewProvider,
        config: &LightConfig,
    ) -> bool {
        Self::verdict(light, kind, view, config) == CullVerdict::Included
    }

    /// Viewport test around the light's projected position.
    ///
    /// With zero tolerance the projected center must land in `[0, 1]` on
    /// both axes (edges included). Otherwise the accepted window grows by a
    /// viewport-space radius derived from projecting the light position
    /// offset along the camera right and up axes.
    fn in_frustum(light: &LightSource, effective_range: f32, view: &dyn ViewProvider, tolerance: f32) -> bool {
        let center = view.world_to_viewport(light.position);
        if center.z <= 0.0 {
            return false;
        }

        if tolerance <= 0.0 {
            return (0.0..=1.0).contains(&center.x) && (0.0..=1.0).contains(&center.y);
        }

        let world_radius = effective_range * tolerance.sqrt() * 2.0;
        let right = view.world_to_viewport(light.position + view.right() * world_radius);
        let up = view.world_to_viewport(light.position + view.up() * world_radius);

        let radius = (right.x - center.x).abs()
            .max((up.y - center.y).abs())
            .max(MIN_VIEWPORT_RADIUS);

        let window = -radius..=1.0 + radius;
        window.contains(&center.x) && window.contains(&center.y)
    }
}

#[cfg(test)]
#[path = "light_culler_tests.rs"]
mod tests;
