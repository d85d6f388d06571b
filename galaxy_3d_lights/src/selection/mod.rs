//! Light selection module
//!
//! Turns one kind's registered handles into the ordered list of lights that
//! will occupy the GPU slots: culling, nearest-first ranking, truncation,
//! and the informational LOD tier.

mod light_culler;
mod light_ranker;
mod light_lod;

pub use light_culler::{CullVerdict, LightCuller, MIN_VIEWPORT_RADIUS};
pub use light_ranker::{LightRanker, PassStats, RankedLight, Selection, SkipReason};
pub use light_lod::{LightLod, LOD_LOW_RATIO, LOD_MEDIUM_RATIO, LOD_NONE_RATIO};
