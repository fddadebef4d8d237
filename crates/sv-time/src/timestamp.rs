//! `Timestamp` type.
//!
//! Repository entries are indexed by milliseconds since the Unix epoch
//! (1970-01-01T00:00:00Z).
//!
//! # Epoch convention
//! * Millisecond 0 doubles as the "no date" instant: undated writes and
//!   immutable-without-dates entries are stored there.
//! * Ordering is plain integer ordering, so `today + 1ms` is already in the
//!   future.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use sv_core::errors::{Error, Result};
use sv_core::{Millis, Value};

/// A point in time with millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(Millis);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Timestamp {
    /// The Unix epoch, also the "no date" instant.
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Milliseconds in one calendar day.
    pub const MILLIS_PER_DAY: Millis = 86_400_000;

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a timestamp from raw milliseconds.
    pub const fn from_millis(millis: Millis) -> Self {
        Timestamp(millis)
    }

    /// Midnight (UTC) of year, month (1 to 12) and day of month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::InvalidArgument(format!("invalid date {year:04}-{month:02}-{day:02}"))
        })?;
        Ok(Self::from(date))
    }

    /// A UTC date and time of day.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> Result<Self> {
        let dt = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid date-time {year:04}-{month:02}-{day:02} {h:02}:{m:02}:{s:02}"
                ))
            })?;
        Ok(Self::from(dt))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Milliseconds since the Unix epoch.
    pub fn millis(&self) -> Millis {
        self.0
    }

    /// Return `true` if this is the epoch ("no date").
    pub fn is_epoch(&self) -> bool {
        self.0 == 0
    }

    /// Convert to a chrono date-time, `None` outside chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.naive_utc())
    }

    /// Return `true` if the time-of-day part is zero.
    pub fn is_start_of_day(&self) -> bool {
        self.0.rem_euclid(Self::MILLIS_PER_DAY) == 0
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Strip the time-of-day part (UTC), saturating at the representable
    /// range.
    pub fn start_of_day(self) -> Self {
        Timestamp(self.0.saturating_sub(self.0.rem_euclid(Self::MILLIS_PER_DAY)))
    }

    /// Advance by `n` milliseconds, saturating at the representable range.
    pub fn add_millis(self, n: Millis) -> Self {
        Timestamp(self.0.saturating_add(n))
    }

    /// Advance by `n` calendar days, saturating at the representable range.
    pub fn add_days(self, n: i64) -> Self {
        self.add_millis(n.saturating_mul(Self::MILLIS_PER_DAY))
    }

    /// Whole days from `self` to `other`.  Positive if `other > self`.
    pub fn days_between(self, other: Timestamp) -> i64 {
        other.start_of_day().0.div_euclid(Self::MILLIS_PER_DAY)
            - self.start_of_day().0.div_euclid(Self::MILLIS_PER_DAY)
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self::from(NaiveDateTime::new(date, chrono::NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp(dt.and_utc().timestamp_millis())
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts.millis())
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_naive() {
            None => write!(f, "{}ms", self.0),
            Some(dt) if self.is_start_of_day() => write!(f, "{}", dt.format("%Y-%m-%d")),
            Some(dt) if dt.nanosecond() == 0 => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
        }
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timestamp({self})")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = Timestamp::from_ymd(1970, 1, 1).unwrap();
        assert_eq!(d, Timestamp::EPOCH);
        assert!(d.is_epoch());
        assert_eq!(d.to_string(), "1970-01-01");
    }

    #[test]
    fn test_from_ymd() {
        let d = Timestamp::from_ymd(2022, 12, 25).unwrap();
        assert_eq!(d.millis(), 1_671_926_400_000);
        assert_eq!(d.to_string(), "2022-12-25");
        assert!(Timestamp::from_ymd(2023, 2, 29).is_err());
        assert!(Timestamp::from_ymd(2024, 13, 1).is_err());
    }

    #[test]
    fn test_start_of_day() {
        let d = Timestamp::from_ymd_hms(2024, 1, 2, 13, 45, 10).unwrap();
        assert!(!d.is_start_of_day());
        assert_eq!(d.start_of_day(), Timestamp::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(d.to_string(), "2024-01-02T13:45:10Z");

        // before the epoch the remainder is still taken towards -inf
        let before = Timestamp::from_millis(-1);
        assert_eq!(before.start_of_day(), Timestamp::from_ymd(1969, 12, 31).unwrap());
    }

    #[test]
    fn test_start_of_day_at_range_limits() {
        let min = Timestamp::from_millis(i64::MIN);
        assert_eq!(min.start_of_day().millis(), i64::MIN);
        assert_eq!(min.days_between(min), 0);
        let max = Timestamp::from_millis(i64::MAX);
        assert!(max.start_of_day() <= max);
        assert!(min.days_between(max) > 0);
    }

    #[test]
    fn test_arithmetic() {
        let d = Timestamp::from_ymd(2023, 1, 1).unwrap();
        let d2 = d.add_days(31);
        assert_eq!(d2, Timestamp::from_ymd(2023, 2, 1).unwrap());
        assert_eq!(d.days_between(d2), 31);
        assert_eq!(d2.days_between(d), -31);
        assert_eq!(d.add_millis(1).millis(), d.millis() + 1);
        assert_eq!(d.add_millis(1).to_string(), "2023-01-01T00:00:00.001Z");
        assert_eq!(Timestamp::from_millis(i64::MAX).add_days(1).millis(), i64::MAX);
    }

    #[test]
    fn test_ordering() {
        let a = Timestamp::from_ymd(2022, 12, 25).unwrap();
        let b = Timestamp::from_ymd(2023, 2, 25).unwrap();
        assert!(a < b);
        assert!(a < a.add_millis(1));
    }

    #[test]
    fn test_into_value() {
        let d = Timestamp::from_ymd(2024, 1, 2).unwrap();
        assert_eq!(Value::from(d).as_timestamp_millis(), Some(d.millis()));
    }
}
