use crate::domain::calendar::{first_of_month, start_of_day};
use crate::domain::period::PeriodFilter;
use crate::domain::sales::Sale;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bucket width used when charting revenue over a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hour,
    Day,
    Month,
}

impl Granularity {
    pub fn for_period(period: PeriodFilter) -> Self {
        match period {
            PeriodFilter::Today | PeriodFilter::Yesterday => Granularity::Hour,
            PeriodFilter::ThisYear | PeriodFilter::AllTime => Granularity::Month,
            _ => Granularity::Day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub bucket_start: DateTime<Utc>,
    pub label: String,
    pub value: Decimal,
}

/// Paid revenue grouped into time buckets, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSeries {
    pub granularity: Granularity,
    pub points: Vec<RevenuePoint>,
}

impl RevenueSeries {
    /// Buckets `sales` in local time. Unpaid sales still open their bucket
    /// but add nothing to it.
    pub fn build<Tz: TimeZone>(sales: &[Sale], period: PeriodFilter, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let granularity = Granularity::for_period(period);
        let mut buckets: BTreeMap<DateTime<Utc>, RevenuePoint> = BTreeMap::new();

        for sale in sales {
            let local = sale.date.with_timezone(tz);
            let (bucket_start, label) = match granularity {
                Granularity::Hour => {
                    let day_start = start_of_day(local.date_naive(), tz);
                    let start = day_start + Duration::hours(i64::from(local.hour()));
                    (start, local.format("%H:00").to_string())
                }
                Granularity::Day => (
                    start_of_day(local.date_naive(), tz),
                    local.format("%d %b").to_string(),
                ),
                Granularity::Month => (
                    start_of_day(first_of_month(local.date_naive()), tz),
                    local.format("%b %Y").to_string(),
                ),
            };

            let point = buckets.entry(bucket_start).or_insert_with(|| RevenuePoint {
                bucket_start,
                label,
                value: Decimal::ZERO,
            });
            if sale.is_paid() {
                point.value += sale.value;
            }
        }

        Self {
            granularity,
            points: buckets.into_values().collect(),
        }
    }

    pub fn total(&self) -> Decimal {
        self.points.iter().map(|p| p.value).sum()
    }
}
