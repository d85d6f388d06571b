/// Finite-difference camera motion estimate across scheduler evaluations.

use glam::Vec3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionTracker {
    last_position: Option<Vec3>,
    velocity: Vec3,
    acceleration: Vec3,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the position observed `delta_time` seconds after the previous one.
    ///
    /// The first sample, and any sample with `delta_time <= 0`, yields zero
    /// velocity and acceleration.
    pub fn update(&mut self, position: Vec3, delta_time: f32) {
        let last_velocity = self.velocity;
        match self.last_position {
            Some(last) if delta_time > 0.0 => {
                self.velocity = (position - last) / delta_time;
                self.acceleration = (self.velocity - last_velocity) / delta_time;
            }
            _ => {
                self.velocity = Vec3::ZERO;
                self.acceleration = Vec3::ZERO;
            }
        }
        self.last_position = Some(position);
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Forget all history
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_at_rest() {
        let mut tracker = MotionTracker::new();
        tracker.update(Vec3::new(10.0, 0.0, 0.0), 0.1);
        assert_eq!(tracker.velocity(), Vec3::ZERO);
        assert_eq!(tracker.acceleration(), Vec3::ZERO);
    }

    #[test]
    fn test_velocity_and_acceleration() {
        let mut tracker = MotionTracker::new();
        tracker.update(Vec3::ZERO, 0.5);
        tracker.update(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert_eq!(tracker.velocity(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tracker.acceleration(), Vec3::new(4.0, 0.0, 0.0));

        tracker.update(Vec3::new(2.0, 0.0, 0.0), 0.5);
        assert_eq!(tracker.velocity(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(tracker.acceleration(), Vec3::ZERO);
        assert_eq!(tracker.speed(), 2.0);
    }

    #[test]
    fn test_non_positive_delta_is_at_rest() {
        let mut tracker = MotionTracker::new();
        tracker.update(Vec3::ZERO, 0.1);
        tracker.update(Vec3::new(5.0, 0.0, 0.0), 0.0);
        assert_eq!(tracker.velocity(), Vec3::ZERO);

        // Position was still cached
        tracker.update(Vec3::new(6.0, 0.0, 0.0), 1.0);
        assert_eq!(tracker.velocity(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut tracker = MotionTracker::new();
        tracker.update(Vec3::ZERO, 1.0);
        tracker.update(Vec3::ONE, 1.0);
        tracker.reset();
        assert_eq!(tracker, MotionTracker::new());
    }
}
