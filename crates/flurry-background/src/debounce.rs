//! Collapse bursts of events into a single delayed delivery.

use std::time::{Duration, Instant};

/// Quiet period required after the last resize before the surface and mask
/// are rebuilt.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the latest value of an event stream until it has been quiet for
/// `delay`.
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

    /// Record an event at `now`, replacing any pending value and restarting
    /// the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((_, deadline)) if *deadline <= now);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before [`poll`](Self::poll) would deliver, if anything is
    /// pending.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_delivers_once_with_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(RESIZE_DEBOUNCE);

        // Twenty events 10ms apart, each inside the previous window.
        for i in 0..20u16 {
            let now = start + Duration::from_millis(10 * i as u64);
            debouncer.push((80 + i, 24), now);
            assert_eq!(debouncer.poll(now), None);
        }

        let last = start + Duration::from_millis(190);
        assert_eq!(debouncer.poll(last + Duration::from_millis(249)), None);
        assert_eq!(
            debouncer.poll(last + Duration::from_millis(250)),
            Some((99, 24))
        );
        assert_eq!(debouncer.poll(last + Duration::from_secs(5)), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_time_until_ready() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert_eq!(debouncer.time_until_ready(start), None);
        debouncer.push(1, start);
        assert_eq!(
            debouncer.time_until_ready(start + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
