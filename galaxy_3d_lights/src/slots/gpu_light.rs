//! GPU light descriptors.
//!
//! Both layouts are `#[repr(C)]`, all-`f32` and tightly packed: the array
//! stride the shader reads with is the struct size.
//!
//! ```text
//! struct PointLight {            struct SpotLight {
//!     vec3  position;                vec3  position;
//!     float range;                   float range;
//!     vec4  color;  // a = int.      vec4  color;
//!     float falloff;                 vec3  direction;
//! };  // 36 bytes                    float spotAngle;
//!                                    float innerSpotAngle;
//!                                    float falloff;
//!                                    vec2  _padding;
//!                                };  // 64 bytes
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::config::LightConfig;
use crate::light::{LightKind, LightSource};

/// A descriptor type stored in a light slot buffer
pub trait GpuLight: Pod + Send + Sync {
    /// Kind of light this descriptor encodes
    const KIND: LightKind;
    /// Shader binding name of the descriptor array
    const BUFFER_NAME: &'static str;
    /// Shader binding name of the active count
    const COUNT_NAME: &'static str;

    /// Build the descriptor for one selected light
    fn from_light(light: &LightSource, config: &LightConfig) -> Self;

    fn position(&self) -> Vec3;

    /// Effective range (range multiplier already applied)
    fn range(&self) -> f32;
}

fn pack_color(light: &LightSource) -> [f32; 4] {
    [light.color.x, light.color.y, light.color.z, light.intensity]
}

// ===== POINT =====

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 3],
    pub range: f32,
    /// rgb + intensity
    pub color: [f32; 4],
    pub falloff: f32,
}

impl GpuLight for GpuPointLight {
    const KIND: LightKind = LightKind::Point;
    const BUFFER_NAME: &'static str = "_PointLights";
    const COUNT_NAME: &'static str = "_PointLightCount";

    fn from_light(light: &LightSource, config: &LightConfig) -> Self {
        Self {
            position: light.position.to_array(),
            range: light.range * config.range_multiplier(LightKind::Point),
            color: pack_color(light),
            falloff: config.falloff_exponent(LightKind::Point),
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    fn range(&self) -> f32 {
        self.range
    }
}

// ===== SPOT =====

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSpotLight {
    pub position: [f32; 3],
    pub range: f32,
    /// rgb + intensity
    pub color: [f32; 4],
    /// Normalized
    pub direction: [f32; 3],
    /// Full cone angle, degrees
    pub spot_angle: f32,
    pub inner_spot_angle: f32,
    pub falloff: f32,
    pub _padding: [f32; 2],
}

impl GpuLight for GpuSpotLight {
    const KIND: LightKind = LightKind::Spot;
    const BUFFER_NAME: &'static str = "_SpotLights";
    const COUNT_NAME: &'static str = "_SpotLightCount";

    fn from_light(light: &LightSource, config: &LightConfig) -> Self {
        Self {
            position: light.position.to_array(),
            range: light.range * config.range_multiplier(LightKind::Spot),
            color: pack_color(light),
            direction: light.direction.normalize_or_zero().to_array(),
            spot_angle: light.spot_angle,
            inner_spot_angle: light.inner_spot_angle,
            falloff: config.falloff_exponent(LightKind::Spot),
            _padding: [0.0; 2],
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    fn range(&self) -> f32 {
        self.range
    }
}

#[cfg(test)]
#[path = "gpu_light_tests.rs"]
mod tests;
