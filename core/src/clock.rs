use chrono::{Local, NaiveDateTime};

/// Current local wall-clock time, without a zone.
///
/// History timestamps are naive local times, so this is the only place the
/// system clock is read.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
