//! # Store Timezone
//!
//! All timestamps are persisted as UTC; the store operates in a single
//! fixed timezone (Asia/Kolkata). Date filters on the sales report and the
//! dates printed on receipts are expressed in store-local days, so this
//! module converts between local calendar dates and UTC instants.
//!
//! Pure functions only, per the crate's no-I/O rule.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The fixed store timezone.
pub const STORE_TZ: Tz = chrono_tz::Asia::Kolkata;

/// Returns the half-open UTC interval `[start, end)` covering one
/// store-local calendar day.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use dukaan_core::tz::day_bounds_utc;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let (start, end) = day_bounds_utc(date);
/// // IST is UTC+5:30, so the local day starts at 18:30 UTC the evening before
/// assert_eq!(start.to_rfc3339(), "2024-02-29T18:30:00+00:00");
/// assert_eq!(end - start, chrono::Duration::days(1));
/// ```
pub fn day_bounds_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight_utc(date);
    (start, start + Duration::days(1))
}

/// Returns the half-open UTC interval covering an inclusive local day range.
pub fn range_bounds_utc(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = local_midnight_utc(from);
    let end = local_midnight_utc(to) + Duration::days(1);
    (start, end)
}

/// Store-local calendar date of a UTC instant.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&STORE_TZ).date_naive()
}

/// Formats an instant the way it appears on receipts and the report,
/// e.g. `01-03-2024 05:45 PM`.
pub fn format_local(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&STORE_TZ)
        .format("%d-%m-%Y %I:%M %p")
        .to_string()
}

fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    // IST has no DST, so local midnight is never ambiguous; the fallback
    // keeps this total for any timezone.
    STORE_TZ
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_are_one_day_apart() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = day_bounds_utc(date);
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn test_day_bounds_offset() {
        // Local midnight in IST is 18:30 UTC the previous evening
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, _) = day_bounds_utc(date);
        assert_eq!(start.to_rfc3339(), "2024-06-14T18:30:00+00:00");
    }

    #[test]
    fn test_instant_falls_inside_its_local_day() {
        // 2024-06-14 20:00 UTC is 2024-06-15 01:30 in the store
        let instant = Utc
            .with_ymd_and_hms(2024, 6, 14, 20, 0, 0)
            .single()
            .unwrap();
        assert_eq!(
            local_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );

        let (start, end) = day_bounds_utc(local_date(instant));
        assert!(instant >= start && instant < end);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let (start, end) = range_bounds_utc(from, to);
        assert_eq!(end - start, Duration::days(3));
    }

    #[test]
    fn test_format_local() {
        let instant = Utc
            .with_ymd_and_hms(2024, 6, 14, 20, 0, 0)
            .single()
            .unwrap();
        assert_eq!(format_local(instant), "15-06-2024 01:30 AM");
    }
}
