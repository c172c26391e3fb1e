//! Period selection and filtering of the master sales list.

use crate::domain::calendar::{
    end_of_day, first_of_month, first_of_year, last_of_month, local_date, start_of_day,
};
use crate::domain::errors::PeriodParseError;
use crate::domain::sales::Sale;
use chrono::{DateTime, Days, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Window lengths that are not calendar-aligned
const LAST_N_DAYS: u64 = 6;
const ALL_TIME_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodFilter {
    Today,
    Yesterday,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[default]
    ThisMonth,
    LastMonth,
    ThisYear,
    AllTime,
    Custom,
}

impl PeriodFilter {
    pub const ALL: [PeriodFilter; 8] = [
        PeriodFilter::Today,
        PeriodFilter::Yesterday,
        PeriodFilter::Last7Days,
        PeriodFilter::ThisMonth,
        PeriodFilter::LastMonth,
        PeriodFilter::ThisYear,
        PeriodFilter::AllTime,
        PeriodFilter::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodFilter::Today => "today",
            PeriodFilter::Yesterday => "yesterday",
            PeriodFilter::Last7Days => "last-7-days",
            PeriodFilter::ThisMonth => "this-month",
            PeriodFilter::LastMonth => "last-month",
            PeriodFilter::ThisYear => "this-year",
            PeriodFilter::AllTime => "all-time",
            PeriodFilter::Custom => "custom",
        }
    }

    /// Human readable name for menus and report headers
    pub fn label(&self) -> &'static str {
        match self {
            PeriodFilter::Today => "Today",
            PeriodFilter::Yesterday => "Yesterday",
            PeriodFilter::Last7Days => "Last 7 days",
            PeriodFilter::ThisMonth => "This month",
            PeriodFilter::LastMonth => "Last month",
            PeriodFilter::ThisYear => "This year",
            PeriodFilter::AllTime => "All time",
            PeriodFilter::Custom => "Custom",
        }
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodFilter {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PeriodFilter::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

/// Raw, unvalidated bounds for [`PeriodFilter::Custom`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl CustomRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }
}

/// Closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Resolves a period into concrete bounds relative to `now`.
///
/// Open-ended periods stop at `now`, so future-dated synthetic sales of the
/// current day are never shown. Custom bounds that are missing or do not
/// parse fall back to the start of the month and `now`.
pub fn resolve<Tz: TimeZone>(
    period: PeriodFilter,
    now: DateTime<Utc>,
    custom: &CustomRange,
    tz: &Tz,
) -> DateRange {
    let today = local_date(now, tz);

    let (start, end) = match period {
        PeriodFilter::Today => (start_of_day(today, tz), now),
        PeriodFilter::Yesterday => {
            let yesterday = days_before(today, 1);
            (start_of_day(yesterday, tz), end_of_day(yesterday, tz))
        }
        PeriodFilter::Last7Days => (start_of_day(days_before(today, LAST_N_DAYS), tz), now),
        PeriodFilter::ThisMonth => (start_of_day(first_of_month(today), tz), now),
        PeriodFilter::LastMonth => {
            let previous = first_of_month(today)
                .checked_sub_months(Months::new(1))
                .unwrap_or(today);
            (
                start_of_day(first_of_month(previous), tz),
                end_of_day(last_of_month(previous), tz),
            )
        }
        PeriodFilter::ThisYear => (start_of_day(first_of_year(today), tz), now),
        PeriodFilter::AllTime => (now - Duration::days(ALL_TIME_DAYS), now),
        PeriodFilter::Custom => {
            let start = custom
                .from
                .as_deref()
                .and_then(|raw| parse_day(raw, tz))
                .map(|d| start_of_day(d, tz))
                .unwrap_or_else(|| start_of_day(first_of_month(today), tz));
            let end = custom
                .to
                .as_deref()
                .and_then(|raw| parse_day(raw, tz))
                .map(|d| end_of_day(d, tz))
                .unwrap_or(now);
            (start, end)
        }
    };

    DateRange { start, end }
}

/// Keeps sales inside `range` (both bounds inclusive), preserving order.
pub fn filter(sales: &[Sale], range: &DateRange) -> Vec<Sale> {
    sales
        .iter()
        .filter(|s| range.contains(s.date))
        .cloned()
        .collect()
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_day<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| local_date(dt.with_timezone(&Utc), tz))
    })
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::{PaymentMethod, Platform, SaleStatus};
    use chrono::FixedOffset;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn sale_at(date: DateTime<Utc>) -> Sale {
        Sale {
            id: date.timestamp_millis().to_string(),
            value: dec!(200),
            date,
            payment_method: PaymentMethod::CreditCard,
            ad_account: "Account 01".to_string(),
            platform: Platform::Organic,
            source: "Organic".to_string(),
            status: SaleStatus::Paid,
        }
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for period in PeriodFilter::ALL {
            assert_eq!(period.as_str().parse::<PeriodFilter>().unwrap(), period);
        }
        assert_eq!(" This-Month ".parse::<PeriodFilter>().unwrap(), PeriodFilter::ThisMonth);
        assert!("fortnight".parse::<PeriodFilter>().is_err());
        assert_eq!(PeriodFilter::default(), PeriodFilter::ThisMonth);
    }

    #[test]
    fn test_serde_uses_kebab_names() {
        let json = serde_json::to_string(&PeriodFilter::Last7Days).unwrap();
        assert_eq!(json, "\"last-7-days\"");
        let parsed: PeriodFilter = serde_json::from_str("\"all-time\"").unwrap();
        assert_eq!(parsed, PeriodFilter::AllTime);
    }

    #[test]
    fn test_open_ended_periods_cap_at_now() {
        let none = CustomRange::default();
        for period in [
            PeriodFilter::Today,
            PeriodFilter::Last7Days,
            PeriodFilter::ThisMonth,
            PeriodFilter::ThisYear,
            PeriodFilter::AllTime,
        ] {
            assert_eq!(resolve(period, now(), &none, &Utc).end, now());
        }
    }

    #[test]
    fn test_fixed_periods() {
        let none = CustomRange::default();

        let today = resolve(PeriodFilter::Today, now(), &none, &Utc);
        assert_eq!(today.start, utc(2026, 10, 17, 0, 0, 0));

        let yesterday = resolve(PeriodFilter::Yesterday, now(), &none, &Utc);
        assert_eq!(yesterday.start, utc(2026, 10, 16, 0, 0, 0));
        assert_eq!(yesterday.end, utc(2026, 10, 16, 23, 59, 59) + Duration::milliseconds(999));

        let week = resolve(PeriodFilter::Last7Days, now(), &none, &Utc);
        assert_eq!(week.start, utc(2026, 10, 11, 0, 0, 0));

        let month = resolve(PeriodFilter::ThisMonth, now(), &none, &Utc);
        assert_eq!(month.start, utc(2026, 10, 1, 0, 0, 0));

        let last_month = resolve(PeriodFilter::LastMonth, now(), &none, &Utc);
        assert_eq!(last_month.start, utc(2026, 9, 1, 0, 0, 0));
        assert_eq!(last_month.end, utc(2026, 9, 30, 23, 59, 59) + Duration::milliseconds(999));

        let year = resolve(PeriodFilter::ThisYear, now(), &none, &Utc);
        assert_eq!(year.start, utc(2026, 1, 1, 0, 0, 0));

        let all = resolve(PeriodFilter::AllTime, now(), &none, &Utc);
        assert_eq!(all.start, now() - Duration::days(365));
    }

    #[test]
    fn test_last_month_across_year_boundary() {
        let january = utc(2027, 1, 10, 9, 0, 0);
        let range = resolve(PeriodFilter::LastMonth, january, &CustomRange::default(), &Utc);
        assert_eq!(range.start, utc(2026, 12, 1, 0, 0, 0));
        assert_eq!(range.end, utc(2026, 12, 31, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_custom_range_parses_dates() {
        let custom = CustomRange::new(Some("2026-09-10".into()), Some("2026-09-12".into()));
        let range = resolve(PeriodFilter::Custom, now(), &custom, &Utc);

        assert_eq!(range.start, utc(2026, 9, 10, 0, 0, 0));
        assert_eq!(range.end, utc(2026, 9, 12, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_custom_range_accepts_rfc3339() {
        let custom = CustomRange::new(Some("2026-09-10T18:00:00Z".into()), None);
        let range = resolve(PeriodFilter::Custom, now(), &custom, &Utc);
        assert_eq!(range.start, utc(2026, 9, 10, 0, 0, 0));
        assert_eq!(range.end, now());
    }

    #[test]
    fn test_custom_range_falls_back_silently() {
        let custom = CustomRange::new(Some("not-a-date".into()), Some("".into()));
        let range = resolve(PeriodFilter::Custom, now(), &custom, &Utc);

        assert_eq!(range.start, utc(2026, 10, 1, 0, 0, 0));
        assert_eq!(range.end, now());
    }

    #[test]
    fn test_resolution_uses_local_days() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        // 01:30 UTC on the 18th is still the 17th in Sao Paulo
        let late = utc(2026, 10, 18, 1, 30, 0);
        let range = resolve(PeriodFilter::Today, late, &CustomRange::default(), &sao_paulo);
        assert_eq!(range.start, utc(2026, 10, 17, 3, 0, 0));
    }

    #[test]
    fn test_yesterday_filter_keeps_only_yesterday() {
        let sales = vec![
            sale_at(utc(2026, 10, 17, 0, 0, 0)),
            sale_at(utc(2026, 10, 16, 23, 59, 59) + Duration::milliseconds(999)),
            sale_at(utc(2026, 10, 16, 12, 0, 0)),
            sale_at(utc(2026, 10, 16, 0, 0, 0)),
            sale_at(utc(2026, 10, 15, 23, 59, 59)),
        ];
        let range = resolve(PeriodFilter::Yesterday, now(), &CustomRange::default(), &Utc);
        let kept = filter(&sales, &range);

        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|s| s.date >= range.start && s.date <= range.end));
        assert_eq!(kept[0].date, sales[1].date);
    }

    #[test]
    fn test_today_excludes_future_sales() {
        let sales = vec![
            sale_at(utc(2026, 10, 17, 22, 0, 0)),
            sale_at(utc(2026, 10, 17, 15, 30, 0)),
            sale_at(utc(2026, 10, 17, 8, 0, 0)),
        ];
        let range = resolve(PeriodFilter::Today, now(), &CustomRange::default(), &Utc);
        assert_eq!(filter(&sales, &range).len(), 2);
    }
}
