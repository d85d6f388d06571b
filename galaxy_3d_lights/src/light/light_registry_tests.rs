use glam::Vec3;
use super::*;
use crate::light::LightSource;

fn arena_with_points(count: usize) -> (LightArena, Vec<LightKey>) {
    let mut arena = LightArena::with_key();
    let keys = (0..count)
        .map(|i| arena.insert(LightSource::point(Vec3::new(i as f32, 0.0, 0.0), 5.0)))
        .collect();
    (arena, keys)
}

// ============================================================================
// Add / remove
// ============================================================================

#[test]
fn test_new_is_empty() {
    let registry = LightRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(LightKind::Point), 0);
    assert_eq!(registry.len(LightKind::Spot), 0);
}

#[test]
fn test_add_keeps_registration_order() {
    let (_arena, keys) = arena_with_points(3);
    let mut registry = LightRegistry::new();
    for key in &keys {
        assert!(registry.add(LightKind::Point, *key));
    }
    assert_eq!(registry.handles(LightKind::Point), keys.as_slice());
    assert!(registry.handles(LightKind::Spot).is_empty());
}

#[test]
fn test_add_duplicate_is_rejected() {
    let (_arena, keys) = arena_with_points(1);
    let mut registry = LightRegistry::new();
    assert!(registry.add(LightKind::Point, keys[0]));
    assert!(!registry.add(LightKind::Point, keys[0]));
    assert!(!registry.add(LightKind::Spot, keys[0]));
    assert_eq!(registry.len(LightKind::Point), 1);
    assert_eq!(registry.len(LightKind::Spot), 0);
}

#[test]
fn test_remove_preserves_order_of_others() {
    let (_arena, keys) = arena_with_points(4);
    let mut registry = LightRegistry::new();
    for key in &keys {
        registry.add(LightKind::Point, *key);
    }

    assert!(registry.remove(keys[1]));
    assert!(!registry.remove(keys[1]));
    assert!(!registry.contains(keys[1]));
    assert_eq!(registry.handles(LightKind::Point), &[keys[0], keys[2], keys[3]]);
}

#[test]
fn test_clear() {
    let (_arena, keys) = arena_with_points(2);
    let mut registry = LightRegistry::new();
    registry.add(LightKind::Point, keys[0]);
    registry.add(LightKind::Spot, keys[1]);

    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.handles(LightKind::Spot).is_empty());
}

// ============================================================================
// Invalid handles
// ============================================================================

#[test]
fn test_handles_survive_light_destruction_until_pruned() {
    let (mut arena, keys) = arena_with_points(3);
    let mut registry = LightRegistry::new();
    for key in &keys {
        registry.add(LightKind::Point, *key);
    }

    arena.remove(keys[0]);
    assert_eq!(registry.len(LightKind::Point), 3);

    assert_eq!(registry.prune(&arena), 1);
    assert_eq!(registry.handles(LightKind::Point), &[keys[1], keys[2]]);
    assert!(!registry.contains(keys[0]));
}
