//! Query facade for the presentation layer.
//!
//! Builds the master list once per session and answers period queries
//! against it with the filtered sales and their derived figures.

use crate::application::master_list::{BuildStats, MasterListBuilder};
use crate::domain::calendar::{days_in_month, days_in_year, local_date};
use crate::domain::kpi::{KpiSnapshot, estimate_pending_sales};
use crate::domain::period::{self, CustomRange, DateRange, PeriodFilter};
use crate::domain::reporting::{PaymentBreakdown, RevenueSeries, RunRate};
use crate::domain::repositories::KeyValueStore;
use crate::domain::sales::Sale;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

/// Revenue goals used for run-rate tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueTargets {
    pub monthly: Decimal,
    pub annual: Decimal,
}

impl Default for RevenueTargets {
    fn default() -> Self {
        Self {
            monthly: dec!(90000),
            annual: dec!(1000000),
        }
    }
}

/// Everything the dashboard renders for one period selection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub period: PeriodFilter,
    pub range: DateRange,
    pub sales: Vec<Sale>,
    pub kpis: KpiSnapshot,
    pub payment_breakdown: PaymentBreakdown,
    pub revenue_series: RevenueSeries,
    /// Only for this-month and this-year
    pub run_rate: Option<RunRate>,
}

pub struct DashboardService<Tz: TimeZone> {
    tz: Tz,
    targets: RevenueTargets,
    master: Vec<Sale>,
    stats: BuildStats,
}

impl<Tz> DashboardService<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Builds (or reloads from cache) the master list for the trailing `window_days`.
    pub fn load<S: KeyValueStore>(
        builder: &MasterListBuilder<S>,
        window_days: u32,
        now: DateTime<Utc>,
        tz: Tz,
        targets: RevenueTargets,
    ) -> Self {
        let (master, stats) = builder.build_with_stats(window_days, now, &tz);
        Self {
            tz,
            targets,
            master,
            stats,
        }
    }

    pub fn master_list(&self) -> &[Sale] {
        &self.master
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Answers one period selection. `rng` only feeds the decorative pending-sales figure.
    pub fn query<R: Rng>(
        &self,
        period: PeriodFilter,
        custom: &CustomRange,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DashboardView {
        let range = period::resolve(period, now, custom, &self.tz);
        let sales = period::filter(&self.master, &range);
        debug!(
            "Period {} resolved to {} .. {} ({} sales)",
            period,
            range.start,
            range.end,
            sales.len()
        );

        let kpis =
            KpiSnapshot::compute(&sales).with_pending_sales(estimate_pending_sales(period, rng));
        let payment_breakdown = PaymentBreakdown::from_sales(&sales);
        let revenue_series = RevenueSeries::build(&sales, period, &self.tz);
        let run_rate = self.run_rate(period, kpis.gross_revenue, now);

        DashboardView {
            period,
            range,
            sales,
            kpis,
            payment_breakdown,
            revenue_series,
            run_rate,
        }
    }

    fn run_rate(&self, period: PeriodFilter, revenue: Decimal, now: DateTime<Utc>) -> Option<RunRate> {
        let today = local_date(now, &self.tz);
        match period {
            PeriodFilter::ThisMonth => Some(RunRate::new(
                revenue,
                self.targets.monthly,
                today.day(),
                days_in_month(today),
            )),
            PeriodFilter::ThisYear => Some(RunRate::new(
                revenue,
                self.targets.annual,
                today.ordinal(),
                days_in_year(today),
            )),
            _ => None,
        }
    }
}
