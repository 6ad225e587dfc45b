//! Fee calculation.
//!
//! Parking is charged per started hour: a flat fee for the first hour and a
//! flat rate for every hour after it. Everything here is pure.

use chrono::TimeDelta;

use parkir_types::{Amount, TariffTable, VehicleClass};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Fee for `whole_hours` of parking.
///
/// `whole_hours` of 0 is charged like 1.
#[must_use]
pub fn compute_fee(tariffs: &TariffTable, class: VehicleClass, whole_hours: u32) -> Amount {
    let tariff = tariffs.for_class(class);
    if whole_hours <= 1 {
        return tariff.first_hour;
    }
    tariff
        .first_hour
        .saturating_add(tariff.additional_hour.saturating_mul(u64::from(whole_hours - 1)))
}

/// Started hours in `elapsed`, never less than one.
///
/// Any fraction of an hour, down to a nanosecond, starts a new hour.
/// Negative durations are treated as zero.
#[must_use]
pub fn whole_hours(elapsed: TimeDelta) -> u32 {
    if elapsed <= TimeDelta::zero() {
        return 1;
    }
    let seconds = elapsed.num_seconds();
    let mut hours = seconds / SECONDS_PER_HOUR;
    if seconds % SECONDS_PER_HOUR != 0 || elapsed.subsec_nanos() > 0 {
        hours += 1;
    }
    u32::try_from(hours.max(1)).unwrap_or(u32::MAX)
}

/// Elapsed time split for display. Not used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl DurationBreakdown {
    #[must_use]
    pub fn from_elapsed(elapsed: TimeDelta) -> Self {
        let total = elapsed.num_seconds().max(0);
        let days = total / SECONDS_PER_DAY;
        let rest = total % SECONDS_PER_DAY;
        Self {
            days,
            hours: rest / SECONDS_PER_HOUR,
            minutes: (rest % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }
}
