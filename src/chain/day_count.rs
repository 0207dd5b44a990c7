//! Time-to-expiration conventions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// How elapsed time until expiration is turned into years.
///
/// All conventions measure calendar time to midnight UTC of the expiration date;
/// they differ only in the annualization denominator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCount {
    /// Calendar days over 252 trading days.
    #[default]
    CalendarOver252,
    /// Calendar days over 365.
    Actual365,
    /// Calendar days over 365.25.
    Actual36525,
}

impl DayCount {
    /// Days per year used by the convention.
    #[must_use]
    pub fn days_per_year(&self) -> f64 {
        match self {
            DayCount::CalendarOver252 => 252.0,
            DayCount::Actual365 => 365.0,
            DayCount::Actual36525 => 365.25,
        }
    }

    /// Years from `now` until midnight UTC on `expiration`.
    ///
    /// Expirations already reached give `0.0`.
    #[must_use]
    pub fn year_fraction(&self, now: DateTime<Utc>, expiration: NaiveDate) -> f64 {
        let expires_at = expiration.and_time(NaiveTime::MIN).and_utc();
        let hours = (expires_at - now).num_milliseconds() as f64 / 3_600_000.0;
        (hours / 24.0 / self.days_per_year()).max(0.0)
    }
}
