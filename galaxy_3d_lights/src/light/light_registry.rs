/// LightRegistry - per-kind lists of candidate light handles.
///
/// The registry never owns light sources. It stores `LightKey` handles in
/// registration order (the order used to break distance ties) and lets the
/// selection pass resolve them against the scene's `LightArena` each tick.
/// Handles whose light was destroyed stay registered until removed or
/// pruned; the selection pass skips them.

use rustc_hash::FxHashSet;
use super::light_source::{LightArena, LightKey, LightKind};

#[derive(Debug, Default)]
pub struct LightRegistry {
    point_lights: Vec<LightKey>,
    spot_lights: Vec<LightKey>,
    members: FxHashSet<LightKey>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(&self, kind: LightKind) -> &Vec<LightKey> {
        match kind {
            LightKind::Point => &self.point_lights,
            LightKind::Spot => &self.spot_lights,
        }
    }

    fn list_mut(&mut self, kind: LightKind) -> &mut Vec<LightKey> {
        match kind {
            LightKind::Point => &mut self.point_lights,
            LightKind::Spot => &mut self.spot_lights,
        }
    }

    /// Register a handle under `kind`. Returns false if it is already registered.
    pub fn add(&mut self, kind: LightKind, key: LightKey) -> bool {
        if !self.members.insert(key) {
            return false;
        }
        self.list_mut(kind).push(key);
        true
    }

    /// Unregister a handle. Returns false if it was not registered.
    ///
    /// Preserves the registration order of the remaining handles.
    pub fn remove(&mut self, key: LightKey) -> bool {
        if !self.members.remove(&key) {
            return false;
        }
        self.point_lights.retain(|k| *k != key);
        self.spot_lights.retain(|k| *k != key);
        true
    }

    /// Whether a handle is registered (under any kind)
    pub fn contains(&self, key: LightKey) -> bool {
        self.members.contains(&key)
    }

    /// Registered handles for one kind, in registration order
    pub fn handles(&self, kind: LightKind) -> &[LightKey] {
        self.list(kind)
    }

    /// Number of registered handles for one kind
    pub fn len(&self, kind: LightKind) -> usize {
        self.list(kind).len()
    }

    /// Whether no handle is registered at all
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Unregister every handle
    pub fn clear(&mut self) {
        self.point_lights.clear();
        self.spot_lights.clear();
        self.members.clear();
    }

    /// Drop handles whose light no longer exists in the arena.
    ///
    /// Returns the number of handles removed.
    pub fn prune(&mut self, arena: &LightArena) -> usize {
        let before = self.members.len();
        self.point_lights.retain(|k| arena.contains_key(*k));
        self.spot_lights.retain(|k| arena.contains_key(*k));
        self.members.retain(|k| arena.contains_key(*k));
        before - self.members.len()
    }
}

#[cfg(test)]
#[path = "light_registry_tests.rs"]
mod tests;
