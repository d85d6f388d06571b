/// AdaptiveScheduler - motion-sensitive gate in front of the light pipeline.
///
/// The pipeline runs at most once per interval. The interval starts from
/// `1 / update_frequency_hz` and is scaled by a factor that shrinks while
/// the camera moves fast or accelerates and grows while it is at rest.
/// Buffer load nudges the factor too: nearly full buffers refresh a bit
/// more often, nearly empty ones a bit less.

use crate::camera::ViewProvider;
use crate::config::LightConfig;
use super::motion_tracker::MotionTracker;

pub const MIN_INTERVAL_FACTOR: f32 = 0.1;
pub const MAX_INTERVAL_FACTOR: f32 = 3.0;
/// Acceleration magnitude (units/s²) above which updates speed up
pub const ACCELERATION_THRESHOLD: f32 = 5.0;

const SLOW_SPEED_RATIO: f32 = 0.1;
const AT_REST_FACTOR: f32 = 2.0;
const ACCELERATION_FACTOR: f32 = 0.7;
const HIGH_LOAD_RATIO: f32 = 0.7;
const HIGH_LOAD_FACTOR: f32 = 1.2;
const LOW_LOAD_RATIO: f32 = 0.3;
const LOW_LOAD_FACTOR: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct AdaptiveScheduler {
    motion: MotionTracker,
    /// Time of the last pipeline run; `None` until the first run
    last_run: Option<f64>,
    interval: f32,
    factor: f32,
}

impl Default for AdaptiveScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveScheduler {
    pub fn new() -> Self {
        Self {
            motion: MotionTracker::new(),
            last_run: None,
            interval: 0.0,
            factor: 1.0,
        }
    }

    /// Interval scale for the given motion and buffer load.
    ///
    /// `load_ratio` is `active_count / capacity`.
    pub fn compute_factor(speed: f32, acceleration: f32, load_ratio: f32, speed_threshold: f32) -> f32 {
        let mut factor = 1.0;

        if speed > speed_threshold {
            factor *= (speed_threshold / speed).clamp(MIN_INTERVAL_FACTOR, 1.0);
        } else if speed < SLOW_SPEED_RATIO * speed_threshold {
            factor *= AT_REST_FACTOR;
        }

        if acceleration > ACCELERATION_THRESHOLD {
            factor *= ACCELERATION_FACTOR;
        }

        if load_ratio > HIGH_LOAD_RATIO {
            factor *= HIGH_LOAD_FACTOR;
        } else if load_ratio < LOW_LOAD_RATIO {
            factor *= LOW_LOAD_FACTOR;
        }

        factor.clamp(MIN_INTERVAL_FACTOR, MAX_INTERVAL_FACTOR)
    }

    /// `active_count / capacity`, 0 for a zero capacity
    pub fn load_ratio(active_count: usize, capacity: usize) -> f32 {
        if capacity == 0 {
            0.0
        } else {
            active_count as f32 / capacity as f32
        }
    }

    /// Update the motion estimate and recompute the interval (seconds).
    pub fn compute_interval(
        &mut self,
        view: &dyn ViewProvider,
        delta_time: f32,
        active_count: usize,
        capacity: usize,
        config: &LightConfig,
    ) -> f32 {
        self.motion.update(view.position(), delta_time);
        self.factor = Self::compute_factor(
            self.motion.speed(),
            self.motion.acceleration().length(),
            Self::load_ratio(active_count, capacity),
            config.speed_threshold(),
        );
        self.interval = config.base_interval() * self.factor;
        self.interval
    }

    /// Whether the pipeline is due at `now` (seconds)
    pub fn should_run(&self, now: f64) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now - last >= self.interval as f64,
        }
    }

    /// Record a pipeline run at `now`
    pub fn mark_run(&mut self, now: f64) {
        self.last_run = Some(now);
    }

    /// Make the next `should_run` return true
    pub fn force(&mut self) {
        self.last_run = None;
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn motion(&self) -> &MotionTracker {
        &self.motion
    }
}

#[cfg(test)]
#[path = "adaptive_scheduler_tests.rs"]
mod tests;
