//! # Temporal Types — UTC Timestamps and Day-Bucketed Incident Dates
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision, and `IncidentDate`, a timestamp canonicalized to the start
//! of its UTC day.
//!
//! ## Day Bucketing
//!
//! An incident reported at any moment of a UTC day is attributed to that
//! whole day: the reporting flow derives the incident date by rounding
//! the report timestamp **down** to `00:00:00Z`. Every lookup key in the
//! governance registries uses the bucketed form, so two values that name
//! the same day always compare equal.
//!
//! Non-UTC inputs are **rejected at parse** — there is no silent
//! conversion that could shift a timestamp across a day boundary.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Seconds in one UTC day.
pub const SECS_PER_DAY: i64 = 86_400;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::from_epoch_secs()`] — from a Unix timestamp.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CoreError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| CoreError::InvalidTimestamp {
            reason: format!("Unix timestamp out of range: {secs}"),
        })?;
        Ok(Self(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix
    /// are accepted — even `+00:00`, which is semantically equivalent,
    /// is refused. Cycle keys derived from timestamps must never depend
    /// on how an offset happened to be spelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !s.ends_with('Z') {
            return Err(CoreError::InvalidTimestamp {
                reason: format!("timestamp must use Z suffix (UTC only), got: {s:?}"),
            });
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| CoreError::InvalidTimestamp {
            reason: format!("invalid RFC 3339 timestamp {s:?}: {e}"),
        })?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Round down to the start of the UTC day (`00:00:00Z`).
    pub fn day_start(&self) -> Self {
        Self(self.0.date_naive().and_time(NaiveTime::MIN).and_utc())
    }

    /// Signed duration elapsed since `earlier` (negative if `self` is
    /// the earlier instant).
    pub fn duration_since(&self, earlier: Timestamp) -> Duration {
        self.0.signed_duration_since(earlier.0)
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

/// A timestamp canonicalized to the start of its UTC day.
///
/// This is the temporal half of every cycle key in the governance
/// registries: a report, its dispute, and its resolution all share one
/// `IncidentDate`. The type guarantees alignment — a value that is not
/// exactly `00:00:00Z` cannot exist.
///
/// # Construction
///
/// - [`IncidentDate::bucket()`] — canonicalize an arbitrary timestamp
///   (the reporting path).
/// - [`IncidentDate::from_timestamp()`] — adopt an already-aligned
///   timestamp, rejecting misaligned input (the lookup path).
/// - [`IncidentDate::parse()`] — from a `YYYY-MM-DD` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IncidentDate(Timestamp);

impl IncidentDate {
    /// Canonicalize a timestamp by rounding down to its UTC day start.
    pub fn bucket(ts: Timestamp) -> Self {
        Self(ts.day_start())
    }

    /// Adopt a timestamp that must already be day-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedIncidentDate`] if the timestamp is
    /// not exactly `00:00:00Z` of its day.
    pub fn from_timestamp(ts: Timestamp) -> Result<Self, CoreError> {
        if ts != ts.day_start() {
            return Err(CoreError::MalformedIncidentDate {
                reason: format!("{ts} is not aligned to a UTC day start"),
            });
        }
        Ok(Self(ts))
    }

    /// Parse an incident date from a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
            CoreError::MalformedIncidentDate {
                reason: format!("invalid date {s:?}: {e}"),
            }
        })?;
        Ok(Self(Timestamp::from_utc(
            date.and_time(NaiveTime::MIN).and_utc(),
        )))
    }

    /// The underlying day-start timestamp.
    pub fn as_timestamp(&self) -> Timestamp {
        self.0
    }

    /// Unix epoch seconds of the day start.
    pub fn epoch_secs(&self) -> i64 {
        self.0.epoch_secs()
    }
}

impl std::fmt::Display for IncidentDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.as_datetime().format("%Y-%m-%d").to_string())
    }
}
