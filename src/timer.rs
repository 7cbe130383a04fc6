use std::time::Duration;

/// Single-shot timer measured against a [`Clock`](crate::clock::Clock) time.
///
/// Re-arming replaces the pending deadline, so a timer never fires twice for overlapping starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    interval: Duration,
    deadline: Option<Duration>,
}

impl Timer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn start(&mut self, now: Duration) {
        self.deadline = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarms the timer and returns `true` if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_once() {
        let mut timer = Timer::new(200 * MS);
        timer.start(Duration::ZERO);
        assert!(!timer.fire_if_due(199 * MS));
        assert!(timer.fire_if_due(200 * MS));
        assert!(!timer.fire_if_due(300 * MS));
        assert!(!timer.is_active());
    }

    #[test]
    fn restart_replaces_deadline() {
        let mut timer = Timer::new(200 * MS);
        timer.start(Duration::ZERO);
        timer.start(150 * MS);
        assert!(!timer.fire_if_due(200 * MS));
        assert_eq!(timer.deadline(), Some(350 * MS));
    }
}
