use std::time::Duration;

use tokio::time::Instant;

/// Holds the latest value of a bursty input until it has been quiet for
/// `delay`. Pushing a new value replaces the pending one and restarts the
/// quiet period.
#[derive(Debug)]
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

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Releases the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_value_wins_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push("m", start);
        debouncer.push("me", start + Duration::from_millis(100));
        debouncer.push("mes", start + Duration::from_millis(200));

        assert_eq!(debouncer.take_due(start + Duration::from_millis(400)), None);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(500)));
        assert_eq!(debouncer.take_due(start + Duration::from_millis(500)), Some("mes"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn flush_and_cancel_clear_the_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.push(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.push(2, start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take_due(start + Duration::from_secs(1)), None);
    }
}
