//! Local calendar helpers.
//!
//! Day boundaries are computed in the caller's time zone and returned as
//! UTC instants, which is how sale dates are stored.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// First instant of `date` in `tz`.
///
/// When local midnight does not exist (DST gap), the first valid instant of the day is used.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Last millisecond of `date` in `tz` (23:59:59.999 local).
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    start_of_day(next_day(date), tz) - Duration::milliseconds(1)
}

/// Half-open `[start, next start)` window covering `date`.
pub fn day_window<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(date, tz), start_of_day(next_day(date), tz))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

pub fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

pub fn days_in_year(date: NaiveDate) -> u32 {
    if date.leap_year() { 366 } else { 365 }
}

/// Storage key fragment for a day bucket (`YYYY-MM-DD`).
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Seed derived from the date digits, e.g. 2026-10-17 -> 20261017.
pub fn day_seed(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day())
}

/// Today's date in `tz` for the instant `now`.
pub fn local_date<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds_in_utc() {
        let d = date(2026, 10, 17);
        assert_eq!(
            start_of_day(d, &Utc),
            Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
        );
        assert_eq!(
            end_of_day(d, &Utc),
            Utc.with_ymd_and_hms(2026, 10, 17, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_day_bounds_follow_offset() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        let (start, end) = day_window(date(2026, 10, 17), &sao_paulo);

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 17, 3, 0, 0).unwrap());
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn test_month_and_year_helpers() {
        assert_eq!(first_of_month(date(2026, 2, 17)), date(2026, 2, 1));
        assert_eq!(last_of_month(date(2026, 2, 17)), date(2026, 2, 28));
        assert_eq!(last_of_month(date(2028, 2, 3)), date(2028, 2, 29));
        assert_eq!(last_of_month(date(2026, 12, 31)), date(2026, 12, 31));
        assert_eq!(first_of_year(date(2026, 10, 17)), date(2026, 1, 1));
        assert_eq!(days_in_month(date(2026, 4, 30)), 30);
        assert_eq!(days_in_year(date(2028, 6, 1)), 366);
    }

    #[test]
    fn test_key_and_seed() {
        let d = date(2026, 3, 5);
        assert_eq!(day_key(d), "2026-03-05");
        assert_eq!(day_seed(d), 20260305);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 1, 30, 0).unwrap();
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();

        assert_eq!(local_date(now, &Utc), date(2026, 10, 18));
        assert_eq!(local_date(now, &sao_paulo), date(2026, 10, 17));
    }
}
