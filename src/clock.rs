use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shared monotonic clock.
///
/// Cloning gives another handle to the same clock. A clock either follows real time from its
/// creation, or is driven manually with [`Clock::set_time`] (tests and trace replay).
#[derive(Debug, Clone)]
pub struct Clock {
    inner: Rc<ClockInner>,
}

#[derive(Debug)]
struct ClockInner {
    start: Instant,
    manual: Cell<Option<Duration>>,
}

impl Clock {
    /// Creates a clock that follows real time.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ClockInner {
                start: Instant::now(),
                manual: Cell::new(None),
            }),
        }
    }

    /// Creates a manually driven clock starting at `time`.
    pub fn with_time(time: Duration) -> Self {
        let clock = Self::new();
        clock.set_time(time);
        clock
    }

    pub fn now(&self) -> Duration {
        match self.inner.manual.get() {
            Some(time) => time,
            None => self.inner.start.elapsed(),
        }
    }

    /// Switches the clock to manual mode and sets the current time.
    ///
    /// Going back in time is clamped to the current time.
    pub fn set_time(&self, time: Duration) {
        let current = self.inner.manual.get().unwrap_or_default();
        self.inner.manual.set(Some(time.max(current)));
    }

    pub fn advance(&self, delta: Duration) {
        self.set_time(self.now() + delta);
    }

    pub fn is_manual(&self) -> bool {
        self.inner.manual.get().is_some()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = Clock::with_time(Duration::from_millis(10));
        let other = clock.clone();
        clock.advance(Duration::from_millis(5));
        assert_eq!(other.now(), Duration::from_millis(15));
        assert_eq!(clock, other);
    }

    #[test]
    fn manual_time_is_monotonic() {
        let clock = Clock::with_time(Duration::from_millis(100));
        clock.set_time(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(100));
    }
}
