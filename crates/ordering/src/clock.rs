//! Time source abstraction.
//!
//! Idle-cart eviction, discount eligibility, and delivery-time validation
//! all read the current time through [`Clock`] instead of calling the
//! system clock directly, so tests can supply fixed timestamps.

use chrono::{Local, NaiveDateTime};

/// Supplies the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
