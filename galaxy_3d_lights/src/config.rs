//! Light streaming configuration
//!
//! `LightConfigDesc` is the plain, serializable descriptor (what a settings
//! file or an editor panel produces). `LightConfig` is the validated form the
//! pipeline reads: every numeric field is clamped to its valid range when it
//! is assigned, so out-of-range input never reaches a tick.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::engine_warn;
use crate::light::LightKind;

// ===== VALID RANGES =====

pub const POINT_CAPACITY_RANGE: (usize, usize) = (1, 32);
pub const SPOT_CAPACITY_RANGE: (usize, usize) = (1, 2);
pub const UPDATE_FREQUENCY_RANGE: (f32, f32) = (1.0, 60.0);
pub const DISTANCE_CULL_FACTOR_RANGE: (f32, f32) = (1.0, 50.0);
pub const FRUSTUM_CULL_TOLERANCE_RANGE: (f32, f32) = (0.0, 1.0);
pub const RANGE_MULTIPLIER_RANGE: (f32, f32) = (0.1, 3.0);
pub const POINT_FALLOFF_RANGE: (f32, f32) = (0.5, 8.0);
pub const SPOT_FALLOFF_RANGE: (f32, f32) = (0.1, 2.0);
pub const SPEED_THRESHOLD_RANGE: (f32, f32) = (0.1, 100.0);

fn clamp_f32(value: f32, (min, max): (f32, f32)) -> f32 {
    // NaN collapses to the lower bound
    if value.is_nan() { min } else { value.clamp(min, max) }
}

fn clamp_usize(value: usize, (min, max): (usize, usize)) -> usize {
    value.clamp(min, max)
}

// ===== CONFIG DESC =====

/// Serializable configuration descriptor (unvalidated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfigDesc {
    pub point_capacity: usize,
    pub spot_capacity: usize,
    pub update_frequency_hz: f32,
    pub distance_cull_enabled: bool,
    pub distance_cull_factor: f32,
    pub frustum_cull_enabled: bool,
    pub frustum_cull_tolerance: f32,
    pub point_range_multiplier: f32,
    pub spot_range_multiplier: f32,
    pub point_falloff_exponent: f32,
    pub spot_falloff_exponent: f32,
    pub speed_threshold: f32,
}

impl Default for LightConfigDesc {
    fn default() -> Self {
        Self {
            point_capacity: 16,
            spot_capacity: 2,
            update_frequency_hz: 30.0,
            distance_cull_enabled: true,
            distance_cull_factor: 5.0,
            frustum_cull_enabled: true,
            frustum_cull_tolerance: 0.3,
            point_range_multiplier: 1.0,
            spot_range_multiplier: 1.0,
            point_falloff_exponent: 2.0,
            spot_falloff_exponent: 1.0,
            speed_threshold: 5.0,
        }
    }
}

impl LightConfigDesc {
    /// Parse a descriptor from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidResource(format!("Light config JSON: {}", e)))
    }

    /// Serialize the descriptor to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::InvalidResource(format!("Light config JSON: {}", e)))
    }
}

// ===== CONFIG =====

/// Validated light streaming configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LightConfig {
    point_capacity: usize,
    spot_capacity: usize,
    update_frequency_hz: f32,
    distance_cull_enabled: bool,
    distance_cull_factor: f32,
    frustum_cull_enabled: bool,
    frustum_cull_tolerance: f32,
    point_range_multiplier: f32,
    spot_range_multiplier: f32,
    point_falloff_exponent: f32,
    spot_falloff_exponent: f32,
    speed_threshold: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self::from_desc(LightConfigDesc::default())
    }
}

impl LightConfig {
    /// Build a validated config, clamping every field into its valid range.
    pub fn from_desc(desc: LightConfigDesc) -> Self {
        let mut config = Self {
            point_capacity: POINT_CAPACITY_RANGE.0,
            spot_capacity: SPOT_CAPACITY_RANGE.0,
            update_frequency_hz: UPDATE_FREQUENCY_RANGE.0,
            distance_cull_enabled: desc.distance_cull_enabled,
            distance_cull_factor: DISTANCE_CULL_FACTOR_RANGE.0,
            frustum_cull_enabled: desc.frustum_cull_enabled,
            frustum_cull_tolerance: FRUSTUM_CULL_TOLERANCE_RANGE.0,
            point_range_multiplier: RANGE_MULTIPLIER_RANGE.0,
            spot_range_multiplier: RANGE_MULTIPLIER_RANGE.0,
            point_falloff_exponent: POINT_FALLOFF_RANGE.0,
            spot_falloff_exponent: SPOT_FALLOFF_RANGE.0,
            speed_threshold: SPEED_THRESHOLD_RANGE.0,
        };
        config.set_capacity(LightKind::Point, desc.point_capacity);
        config.set_capacity(LightKind::Spot, desc.spot_capacity);
        config.set_update_frequency_hz(desc.update_frequency_hz);
        config.set_distance_cull_factor(desc.distance_cull_factor);
        config.set_frustum_cull_tolerance(desc.frustum_cull_tolerance);
        config.set_range_multiplier(LightKind::Point, desc.point_range_multiplier);
        config.set_range_multiplier(LightKind::Spot, desc.spot_range_multiplier);
        config.set_falloff_exponent(LightKind::Point, desc.point_falloff_exponent);
        config.set_falloff_exponent(LightKind::Spot, desc.spot_falloff_exponent);
        config.set_speed_threshold(desc.speed_threshold);
        config
    }

    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_desc(LightConfigDesc::from_json(json)?))
    }

    /// Back to a plain descriptor (already clamped)
    pub fn to_desc(&self) -> LightConfigDesc {
        LightConfigDesc {
            point_capacity: self.point_capacity,
            spot_capacity: self.spot_capacity,
            update_frequency_hz: self.update_frequency_hz,
            distance_cull_enabled: self.distance_cull_enabled,
            distance_cull_factor: self.distance_cull_factor,
            frustum_cull_enabled: self.frustum_cull_enabled,
            frustum_cull_tolerance: self.frustum_cull_tolerance,
            point_range_multiplier: self.point_range_multiplier,
            spot_range_multiplier: self.spot_range_multiplier,
            point_falloff_exponent: self.point_falloff_exponent,
            spot_falloff_exponent: self.spot_falloff_exponent,
            speed_threshold: self.speed_threshold,
        }
    }

    // ===== GETTERS =====

    pub fn capacity(&self, kind: LightKind) -> usize {
        match kind {
            LightKind::Point => self.point_capacity,
            LightKind::Spot => self.spot_capacity,
        }
    }

    pub fn update_frequency_hz(&self) -> f32 { self.update_frequency_hz }

    /// Base re-evaluation interval in seconds (`1 / update_frequency_hz`)
    pub fn base_interval(&self) -> f32 { 1.0 / self.update_frequency_hz }

    pub fn distance_cull_enabled(&self) -> bool { self.distance_cull_enabled }

    pub fn distance_cull_factor(&self) -> f32 { self.distance_cull_factor }

    pub fn frustum_cull_enabled(&self) -> bool { self.frustum_cull_enabled }

    pub fn frustum_cull_tolerance(&self) -> f32 { self.frustum_cull_tolerance }

    pub fn range_multiplier(&self, kind: LightKind) -> f32 {
        match kind {
            LightKind::Point => self.point_range_multiplier,
            LightKind::Spot => self.spot_range_multiplier,
        }
    }

    pub fn falloff_exponent(&self, kind: LightKind) -> f32 {
        match kind {
            LightKind::Point => self.point_falloff_exponent,
            LightKind::Spot => self.spot_falloff_exponent,
        }
    }

    pub fn speed_threshold(&self) -> f32 { self.speed_threshold }

    // ===== CLAMPING SETTERS =====

    pub fn set_capacity(&mut self, kind: LightKind, capacity: usize) {
        let range = match kind {
            LightKind::Point => POINT_CAPACITY_RANGE,
            LightKind::Spot => SPOT_CAPACITY_RANGE,
        };
        let clamped = clamp_usize(capacity, range);
        if clamped != capacity {
            engine_warn!("galaxy3d::lights::LightConfig",
                "{} capacity {} clamped to {}", kind.name(), capacity, clamped);
        }
        match kind {
            LightKind::Point => self.point_capacity = clamped,
            LightKind::Spot => self.spot_capacity = clamped,
        }
    }

    pub fn set_update_frequency_hz(&mut self, hz: f32) {
        self.update_frequency_hz = clamp_f32(hz, UPDATE_FREQUENCY_RANGE);
    }

    pub fn set_distance_cull_enabled(&mut self, enabled: bool) {
        self.distance_cull_enabled = enabled;
    }

    pub fn set_distance_cull_factor(&mut self, factor: f32) {
        self.distance_cull_factor = clamp_f32(factor, DISTANCE_CULL_FACTOR_RANGE);
    }

    pub fn set_frustum_cull_enabled(&mut self, enabled: bool) {
        self.frustum_cull_enabled = enabled;
    }

    pub fn set_frustum_cull_tolerance(&mut self, tolerance: f32) {
        self.frustum_cull_tolerance = clamp_f32(tolerance, FRUSTUM_CULL_TOLERANCE_RANGE);
    }

    pub fn set_range_multiplier(&mut self, kind: LightKind, multiplier: f32) {
        let clamped = clamp_f32(multiplier, RANGE_MULTIPLIER_RANGE);
        match kind {
            LightKind::Point => self.point_range_multiplier = clamped,
            LightKind::Spot => self.spot_range_multiplier = clamped,
        }
    }

    pub fn set_falloff_exponent(&mut self, kind: LightKind, exponent: f32) {
        match kind {
            LightKind::Point => self.point_falloff_exponent = clamp_f32(exponent, POINT_FALLOFF_RANGE),
            LightKind::Spot => self.spot_falloff_exponent = clamp_f32(exponent, SPOT_FALLOFF_RANGE),
        }
    }

    pub fn set_speed_threshold(&mut self, threshold: f32) {
        self.speed_threshold = clamp_f32(threshold, SPEED_THRESHOLD_RANGE);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
