//! Fixed-duration interpolations for items snapping back into the dock.

use std::time::Duration;

use glam::DVec2;
use keyframe::functions::Linear;
use keyframe::EasingFunction;

/// Linear movement between two points over a fixed duration, no physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAnimation {
    from: DVec2,
    to: DVec2,
    start_time: Duration,
    duration: Duration,
}

impl PointAnimation {
    pub fn new(from: DVec2, to: DVec2, start_time: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
        }
    }

    pub fn from(&self) -> DVec2 {
        self.from
    }

    pub fn to(&self) -> DVec2 {
        self.to
    }

    /// Progress in `0..=1`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.;
        }

        let passed = now.saturating_sub(self.start_time);
        (passed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0., 1.)
    }

    pub fn value(&self, now: Duration) -> DVec2 {
        let eased = Linear.y(self.progress(now));
        self.from.lerp(self.to, eased)
    }

    pub fn is_done(&self, now: Duration) -> bool {
        now >= self.start_time + self.duration
    }

    pub fn end_time(&self) -> Duration {
        self.start_time + self.duration
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn interpolates_linearly() {
        let anim = PointAnimation::new(
            DVec2::new(100., 0.),
            DVec2::new(0., 50.),
            Duration::from_millis(1000),
            Duration::from_millis(300),
        );

        let start = anim.value(Duration::from_millis(1000));
        assert_abs_diff_eq!(start.x, 100., epsilon = 1e-9);

        let mid = anim.value(Duration::from_millis(1150));
        assert_abs_diff_eq!(mid.x, 50., epsilon = 1e-9);
        assert_abs_diff_eq!(mid.y, 25., epsilon = 1e-9);

        assert!(!anim.is_done(Duration::from_millis(1299)));
        assert!(anim.is_done(Duration::from_millis(1300)));
        assert_eq!(anim.value(Duration::from_millis(5000)), anim.to());
    }

    #[test]
    fn zero_duration_is_done_immediately() {
        let anim = PointAnimation::new(DVec2::ZERO, DVec2::ONE, Duration::ZERO, Duration::ZERO);
        assert_eq!(anim.value(Duration::ZERO), DVec2::ONE);
        assert!(anim.is_done(Duration::ZERO));
    }
}
