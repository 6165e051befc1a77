use std::time::{Duration, Instant};

/// Trailing-edge debouncer.
///
/// Holds at most one pending value. Scheduling replaces the pending value
/// and restarts the timer, so a burst of changes yields one value once the
/// burst has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_coalesces_into_one_trailing_value() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(1000));
        d.schedule(1, start);
        d.schedule(2, start + Duration::from_millis(400));
        d.schedule(3, start + Duration::from_millis(800));
        // the first deadline would have been start+1000; restarted since
        assert_eq!(d.poll(start + Duration::from_millis(1200)), None);
        assert_eq!(d.deadline(), Some(start + Duration::from_millis(1800)));
        assert_eq!(d.poll(start + Duration::from_millis(1800)), Some(3));
        assert!(!d.is_pending());
        assert_eq!(d.poll(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn flush_and_cancel_ignore_the_deadline() {
        let now = Instant::now();
        let mut d = Debouncer::new(Duration::from_secs(60));
        d.schedule("a", now);
        assert_eq!(d.flush(), Some("a"));
        d.schedule("b", now);
        d.cancel();
        assert_eq!(d.flush(), None);
    }
}
