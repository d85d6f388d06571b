/// Light source types observed by the streaming core.
///
/// Light sources are owned by the scene through a `LightArena`. The core
/// only keeps `LightKey` handles and reads the sources at tick time.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a LightSource within a LightArena.
    ///
    /// Keys remain valid even after other lights are removed.
    /// A key becomes invalid only when its own light is removed.
    pub struct LightKey;
}

/// Arena owning the scene's light sources.
pub type LightArena = SlotMap<LightKey, LightSource>;

// ===== LIGHT KIND =====

/// Light kind, one GPU buffer per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Point,
    Spot,
}

impl LightKind {
    pub const ALL: [LightKind; 2] = [LightKind::Point, LightKind::Spot];

    /// Short lowercase name used in log messages
    pub fn name(&self) -> &'static str {
        match self {
            LightKind::Point => "point",
            LightKind::Spot => "spot",
        }
    }
}

// ===== LIGHT SOURCE =====

/// A punctual light as authored in the scene.
///
/// `direction`, `spot_angle` and `inner_spot_angle` are only meaningful for
/// spot lights. Angles are full cone angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub range: f32,
    pub color: Vec3,
    pub intensity: f32,
    pub spot_angle: f32,
    pub inner_spot_angle: f32,
    pub enabled: bool,
}

impl LightSource {
    /// Enabled point light with white color and unit intensity
    pub fn point(position: Vec3, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            direction: Vec3::NEG_Z,
            range,
            color: Vec3::ONE,
            intensity: 1.0,
            spot_angle: 0.0,
            inner_spot_angle: 0.0,
            enabled: true,
        }
    }

    /// Enabled spot light with white color and unit intensity
    pub fn spot(position: Vec3, direction: Vec3, range: f32, spot_angle: f32, inner_spot_angle: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            direction,
            range,
            color: Vec3::ONE,
            intensity: 1.0,
            spot_angle,
            inner_spot_angle,
            enabled: true,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
