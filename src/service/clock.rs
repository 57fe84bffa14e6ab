use chrono::{DateTime, Utc};

/**
 * Source of the current time for ticket timestamps.
 */
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/**
 * Wall clock.
 */
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
