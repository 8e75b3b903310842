//! ISO Week Key Derivation
//!
//! Pure derivation of the calendar-week bucket used to namespace weekly
//! page-view counters. ISO 8601 rules: weeks start Monday, week 1 is the
//! week containing the year's first Thursday. The key is stable within a
//! week and changes exactly at Monday 00:00 UTC.

use chrono::{DateTime, Datelike, Utc};

/// Week key for the given instant: `stats:pages:week:{year}-W{week:02}`.
///
/// The week-numbering year can differ from the calendar year around
/// January 1st, which is exactly what keeps the buckets boundary-correct.
pub fn week_key_at(at: DateTime<Utc>) -> String {
    let iso = at.iso_week();
    format!("stats:pages:week:{}-W{:02}", iso.year(), iso.week())
}

/// Week key for the current instant
pub fn current_week_key() -> String {
    week_key_at(Utc::now())
}
