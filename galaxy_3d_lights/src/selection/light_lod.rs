/// Shading-cost tier per light, from its distance normalized by range.
///
/// Informational only: tiers are reported to the renderer, they never change
/// which lights are selected.

/// Normalized distance above which a light is `LightLod::None`
pub const LOD_NONE_RATIO: f32 = 1.5;
/// Normalized distance above which a light is `LightLod::Low`
pub const LOD_LOW_RATIO: f32 = 1.0;
/// Normalized distance above which a light is `LightLod::Medium`
pub const LOD_MEDIUM_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LightLod {
    None,
    Low,
    Medium,
    High,
}

impl LightLod {
    /// Classify `distance / (range × range_multiplier)`.
    ///
    /// Thresholds are exclusive: a ratio of exactly 1.0 is `Medium`.
    pub fn classify(distance: f32, range: f32, range_multiplier: f32) -> LightLod {
        let effective_range = range * range_multiplier;
        if effective_range <= 0.0 {
            return LightLod::None;
        }

        let ratio = distance / effective_range;
        if ratio > LOD_NONE_RATIO {
            LightLod::None
        } else if ratio > LOD_LOW_RATIO {
            LightLod::Low
        } else if ratio > LOD_MEDIUM_RATIO {
            LightLod::Medium
        } else {
            LightLod::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_by_ratio() {
        assert_eq!(LightLod::classify(0.0, 10.0, 1.0), LightLod::High);
        assert_eq!(LightLod::classify(5.0, 10.0, 1.0), LightLod::High);
        assert_eq!(LightLod::classify(7.0, 10.0, 1.0), LightLod::Medium);
        assert_eq!(LightLod::classify(10.0, 10.0, 1.0), LightLod::Medium);
        assert_eq!(LightLod::classify(12.0, 10.0, 1.0), LightLod::Low);
        assert_eq!(LightLod::classify(15.0, 10.0, 1.0), LightLod::Low);
        assert_eq!(LightLod::classify(16.0, 10.0, 1.0), LightLod::None);
    }

    #[test]
    fn test_range_multiplier_applies() {
        assert_eq!(LightLod::classify(16.0, 10.0, 2.0), LightLod::Medium);
    }

    #[test]
    fn test_zero_range_is_none() {
        assert_eq!(LightLod::classify(0.0, 0.0, 1.0), LightLod::None);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(LightLod::High > LightLod::Medium);
        assert!(LightLod::Low > LightLod::None);
    }
}
