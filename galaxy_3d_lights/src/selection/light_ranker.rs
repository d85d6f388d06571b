/// Selection pass: resolve, cull, rank and truncate one kind's candidates.
///
/// Every registered handle produces exactly one outcome: it is either
/// ranked or skipped with a reason. Nothing in the pass can fail; invalid
/// handles are logged and skipped.

use crate::camera::ViewProvider;
use crate::config::LightConfig;
use crate::engine_warn;
use crate::light::{LightArena, LightKey, LightKind};
use super::light_culler::{CullVerdict, LightCuller};

/// Why a candidate did not make it into the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The handle no longer resolves to a light in the arena
    InvalidHandle,
    /// Rejected by the culler (never `CullVerdict::Included`)
    Culled(CullVerdict),
}

/// A surviving candidate and its distance to the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLight {
    pub key: LightKey,
    pub distance: f32,
}

/// Per-kind counters of one selection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Registered handles examined
    pub candidates: usize,
    /// Lights that received a slot
    pub selected: usize,
    pub disabled: usize,
    pub distance_culled: usize,
    pub frustum_culled: usize,
    /// Destroyed lights and kind mismatches
    pub invalid: usize,
    /// Survivors ranked past the capacity
    pub dropped_over_capacity: usize,
}

/// Result of a selection pass
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Nearest first, at most `capacity` entries
    pub ranked: Vec<RankedLight>,
    pub skipped: Vec<(LightKey, SkipReason)>,
    pub dropped_over_capacity: usize,
}

impl Selection {
    /// Handles in slot order
    pub fn keys(&self) -> impl Iterator<Item = LightKey> + '_ {
        self.ranked.iter().map(|r| r.key)
    }

    pub fn stats(&self) -> PassStats {
        let mut stats = PassStats {
            candidates: self.ranked.len() + self.skipped.len() + self.dropped_over_capacity,
            selected: self.ranked.len(),
            dropped_over_capacity: self.dropped_over_capacity,
            ..PassStats::default()
        };
        for (_, reason) in &self.skipped {
            match reason {
                SkipReason::InvalidHandle
                | SkipReason::Culled(CullVerdict::KindMismatch) => stats.invalid += 1,
                SkipReason::Culled(CullVerdict::Disabled) => stats.disabled += 1,
                SkipReason::Culled(CullVerdict::DistanceCulled) => stats.distance_culled += 1,
                SkipReason::Culled(CullVerdict::FrustumCulled) => stats.frustum_culled += 1,
                SkipReason::Culled(CullVerdict::Included) => {}
            }
        }
        stats
    }
}

/// Nearest-first ranking of culled candidates
pub struct LightRanker;

impl LightRanker {
    /// Run the full pass for one kind.
    ///
    /// Handles are visited in registration order, so equal distances keep
    /// that order after the (stable) sort.
    pub fn select(
        kind: LightKind,
        handles: &[LightKey],
        arena: &LightArena,
        view: &dyn ViewProvider,
        config: &LightConfig,
    ) -> Selection {
        let mut selection = Selection::default();
        let viewer = view.position();

        for &key in handles {
            let Some(light) = arena.get(key) else {
                engine_warn!("galaxy3d::lights::LightRanker",
                    "Skipping {} light {:?}: handle no longer valid", kind.name(), key);
                selection.skipped.push((key, SkipReason::InvalidHandle));
                continue;
            };

            match LightCuller::verdict(light, kind, view, config) {
                CullVerdict::Included => selection.ranked.push(RankedLight {
                    key,
                    distance: light.position.distance(viewer),
                }),
                CullVerdict::KindMismatch => {
                    engine_warn!("galaxy3d::lights::LightRanker",
                        "Skipping light {:?}: registered as {} but is a {} light",
                        key, kind.name(), light.kind.name());
                    selection.skipped.push((key, SkipReason::Culled(CullVerdict::KindMismatch)));
                }
                verdict => selection.skipped.push((key, SkipReason::Culled(verdict))),
            }
        }

        selection.dropped_over_capacity = Self::rank(&mut selection.ranked, config.capacity(kind));
        selection
    }

    /// Sort ascending by distance (stable) and truncate to `capacity`.
    ///
    /// Returns how many survivors were cut.
    pub fn rank(survivors: &mut Vec<RankedLight>, capacity: usize) -> usize {
        survivors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        let dropped = survivors.len().saturating_sub(capacity);
        survivors.truncate(capacity);
        dropped
    }
}

#[cfg(test)]
#[path = "light_ranker_tests.rs"]
mod tests;
