use chrono::{DateTime, Utc};

/// Source of wall-clock time for per-question timers.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Milliseconds between two instants, clamped at zero if the clock went backwards.
pub fn elapsed_millis(since: DateTime<Utc>, until: DateTime<Utc>) -> u64 {
    (until - since).num_milliseconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn elapsed_millis_is_never_negative() {
        let start = Utc::now();

        assert_eq!(elapsed_millis(start, start + Duration::milliseconds(1500)), 1500);
        assert_eq!(elapsed_millis(start, start - Duration::seconds(3)), 0);
    }
}
