//! Manually entered exit timestamps.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid date/time: {day:02}/{month:02}/{year} {hour:02}:{minute:02}:{second:02}"
)]
pub struct InvalidDateError {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Exit time entered field by field by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualExitTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ManualExitTime {
    /// Compose the fields into a timestamp, rejecting impossible calendar
    /// dates (e.g. 31 April) and out-of-range clock values.
    pub fn compose(self) -> Result<NaiveDateTime, InvalidDateError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or(InvalidDateError {
                year: self.year,
                month: self.month,
                day: self.day,
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            })
    }
}

/// Where the exit time of a checkout comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitTime {
    /// The current wall-clock time.
    #[default]
    Now,
    /// Fields typed in by the operator.
    Manual(ManualExitTime),
}

impl ExitTime {
    pub fn resolve(self, now: NaiveDateTime) -> Result<NaiveDateTime, InvalidDateError> {
        match self {
            Self::Now => Ok(now),
            Self::Manual(fields) => fields.compose(),
        }
    }
}
