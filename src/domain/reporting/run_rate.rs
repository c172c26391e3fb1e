use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Revenue pace against a target over a calendar span (month or year).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRate {
    pub revenue: Decimal,
    pub target: Decimal,
    pub elapsed_days: u32,
    pub total_days: u32,
    /// Average revenue per elapsed day
    pub daily: Decimal,
    /// Revenue expected at the end of the span if the daily pace holds
    pub projected: Decimal,
    /// Target pro-rated to the elapsed days
    pub expected_to_date: Decimal,
    pub progress_pct: Decimal,
}

impl RunRate {
    pub fn new(revenue: Decimal, target: Decimal, elapsed_days: u32, total_days: u32) -> Self {
        let daily = daily(revenue, elapsed_days);
        Self {
            revenue,
            target,
            elapsed_days,
            total_days,
            daily,
            projected: projected(revenue, elapsed_days, total_days),
            expected_to_date: expected_to_date(target, elapsed_days, total_days),
            progress_pct: progress_pct(revenue, target),
        }
    }

    pub fn on_track(&self) -> bool {
        self.revenue >= self.expected_to_date
    }
}

pub fn daily(revenue: Decimal, elapsed_days: u32) -> Decimal {
    if elapsed_days == 0 {
        return Decimal::ZERO;
    }
    revenue / Decimal::from(elapsed_days)
}

/// Revenue at the end of `total_days` if the pace so far holds.
pub fn projected(revenue: Decimal, elapsed_days: u32, total_days: u32) -> Decimal {
    daily(revenue, elapsed_days)
        .checked_mul(Decimal::from(total_days))
        .unwrap_or(Decimal::ZERO)
}

/// Target pro-rated to `elapsed_days`. Zero when the span is empty or the figures overflow.
pub fn expected_to_date(target: Decimal, elapsed_days: u32, total_days: u32) -> Decimal {
    if total_days == 0 {
        return Decimal::ZERO;
    }
    let (elapsed, total) = (Decimal::from(elapsed_days), Decimal::from(total_days));
    target
        .checked_mul(elapsed)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| target.checked_div(total)?.checked_mul(elapsed))
        .unwrap_or(Decimal::ZERO)
}

pub fn progress_pct(revenue: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    revenue
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}
