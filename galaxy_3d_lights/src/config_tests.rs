use super::*;

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_default_config() {
    let config = LightConfig::default();
    assert_eq!(config.capacity(LightKind::Point), 16);
    assert_eq!(config.capacity(LightKind::Spot), 2);
    assert_eq!(config.update_frequency_hz(), 30.0);
    assert!(config.distance_cull_enabled());
    assert_eq!(config.distance_cull_factor(), 5.0);
    assert!(config.frustum_cull_enabled());
    assert_eq!(config.frustum_cull_tolerance(), 0.3);
    assert_eq!(config.range_multiplier(LightKind::Point), 1.0);
    assert_eq!(config.falloff_exponent(LightKind::Point), 2.0);
    assert_eq!(config.falloff_exponent(LightKind::Spot), 1.0);
    assert_eq!(config.speed_threshold(), 5.0);
}

#[test]
fn test_base_interval() {
    let mut config = LightConfig::default();
    config.set_update_frequency_hz(20.0);
    assert!((config.base_interval() - 0.05).abs() < 1e-6);
}

// ============================================================================
// Clamping at assignment
// ============================================================================

#[test]
fn test_capacity_clamped() {
    let mut config = LightConfig::default();
    config.set_capacity(LightKind::Point, 100);
    config.set_capacity(LightKind::Spot, 0);
    assert_eq!(config.capacity(LightKind::Point), 32);
    assert_eq!(config.capacity(LightKind::Spot), 1);

    config.set_capacity(LightKind::Spot, 5);
    assert_eq!(config.capacity(LightKind::Spot), 2);
}

#[test]
fn test_float_fields_clamped() {
    let mut config = LightConfig::default();

    config.set_update_frequency_hz(0.0);
    assert_eq!(config.update_frequency_hz(), 1.0);
    config.set_update_frequency_hz(240.0);
    assert_eq!(config.update_frequency_hz(), 60.0);

    config.set_distance_cull_factor(0.5);
    assert_eq!(config.distance_cull_factor(), 1.0);
    config.set_distance_cull_factor(99.0);
    assert_eq!(config.distance_cull_factor(), 50.0);

    config.set_frustum_cull_tolerance(-1.0);
    assert_eq!(config.frustum_cull_tolerance(), 0.0);
    config.set_frustum_cull_tolerance(2.0);
    assert_eq!(config.frustum_cull_tolerance(), 1.0);

    config.set_range_multiplier(LightKind::Spot, 10.0);
    assert_eq!(config.range_multiplier(LightKind::Spot), 3.0);
    config.set_range_multiplier(LightKind::Point, 0.0);
    assert_eq!(config.range_multiplier(LightKind::Point), 0.1);
}

#[test]
fn test_falloff_ranges_differ_per_kind() {
    let mut config = LightConfig::default();
    config.set_falloff_exponent(LightKind::Point, 0.1);
    config.set_falloff_exponent(LightKind::Spot, 5.0);
    assert_eq!(config.falloff_exponent(LightKind::Point), 0.5);
    assert_eq!(config.falloff_exponent(LightKind::Spot), 2.0);
}

#[test]
fn test_nan_clamps_to_lower_bound() {
    let mut config = LightConfig::default();
    config.set_distance_cull_factor(f32::NAN);
    assert_eq!(config.distance_cull_factor(), 1.0);
}

#[test]
fn test_from_desc_clamps_everything() {
    let desc = LightConfigDesc {
        point_capacity: 0,
        spot_capacity: 9,
        update_frequency_hz: 1000.0,
        distance_cull_factor: 0.0,
        frustum_cull_tolerance: 3.0,
        speed_threshold: 0.0,
        ..LightConfigDesc::default()
    };
    let config = LightConfig::from_desc(desc);
    assert_eq!(config.capacity(LightKind::Point), 1);
    assert_eq!(config.capacity(LightKind::Spot), 2);
    assert_eq!(config.update_frequency_hz(), 60.0);
    assert_eq!(config.distance_cull_factor(), 1.0);
    assert_eq!(config.frustum_cull_tolerance(), 1.0);
    assert_eq!(config.speed_threshold(), 0.1);
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_from_json_partial_document_uses_defaults() {
    let config = LightConfig::from_json(r#"{ "point_capacity": 8, "frustum_cull_enabled": false }"#).unwrap();
    assert_eq!(config.capacity(LightKind::Point), 8);
    assert!(!config.frustum_cull_enabled());
    assert_eq!(config.capacity(LightKind::Spot), 2);
}

#[test]
fn test_from_json_clamps() {
    let config = LightConfig::from_json(r#"{ "spot_capacity": 4, "distance_cull_factor": 75.0 }"#).unwrap();
    assert_eq!(config.capacity(LightKind::Spot), 2);
    assert_eq!(config.distance_cull_factor(), 50.0);
}

#[test]
fn test_from_json_invalid_document() {
    let result = LightConfig::from_json("{ not json");
    assert!(matches!(result, Err(Error::InvalidResource(_))));
}

#[test]
fn test_desc_json_round_trip() {
    let desc = LightConfig::default().to_desc();
    let json = desc.to_json().unwrap();
    assert_eq!(LightConfigDesc::from_json(&json).unwrap(), desc);
}
