//! Request-scoped deadline handed to discovery sources.
//!
//! The dispatcher never enforces it; a discovery source is expected to check
//! `remaining()` or `is_expired()` while it works.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    timeout: Duration,
    /// `None` when the timeout reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self {
            timeout,
            expires_at: Instant::now().checked_add(timeout),
        }
    }

    /// A deadline from a request timeout in seconds.
    ///
    /// Zero, negative and NaN values give an already expired deadline;
    /// values too large for a `Duration` saturate to `Duration::MAX`.
    pub fn from_secs_f64(seconds: f64) -> Self {
        let timeout = if seconds.is_nan() || seconds <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
        };
        Self::after(timeout)
    }

    /// The full timeout this deadline was created with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Time left, zero once expired.
    pub fn remaining(&self) -> Duration {
        match self.expires_at {
            Some(at) => at.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Deadline;

    #[test]
    fn deadline_from_request_seconds() {
        let deadline = Deadline::from_secs_f64(2.0);
        assert_eq!(deadline.timeout(), Duration::from_secs(2));
        assert!(!deadline.is_expired());
        assert!(deadline.remaining() <= Duration::from_secs(2));
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let deadline = Deadline::from_secs_f64(0.25);
        assert_eq!(deadline.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn invalid_timeouts_are_already_expired() {
        for seconds in [-1.0, f64::NAN, 0.0, f64::NEG_INFINITY] {
            let deadline = Deadline::from_secs_f64(seconds);
            assert_eq!(deadline.timeout(), Duration::ZERO);
            assert!(deadline.is_expired());
            assert_eq!(deadline.remaining(), Duration::ZERO);
        }
    }

    #[test]
    fn huge_timeouts_saturate_instead_of_expiring() {
        for seconds in [1e300, f64::INFINITY] {
            let deadline = Deadline::from_secs_f64(seconds);
            assert_eq!(deadline.timeout(), Duration::MAX);
            assert!(!deadline.is_expired());
            assert!(deadline.remaining() > Duration::from_secs(3600));
        }
    }
}
