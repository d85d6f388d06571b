//! Scheduler module
//!
//! Decides when the light pipeline re-evaluates, from camera motion and
//! buffer load.

mod motion_tracker;
mod adaptive_scheduler;

pub use motion_tracker::MotionTracker;
pub use adaptive_scheduler::{
    AdaptiveScheduler, ACCELERATION_THRESHOLD, MAX_INTERVAL_FACTOR, MIN_INTERVAL_FACTOR,
};
