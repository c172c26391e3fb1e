//! KPI snapshot derived from a filtered sales list.

use crate::domain::period::PeriodFilter;
use crate::domain::sales::{Sale, SaleStatus};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Payment processor fee on gross revenue (2.5%)
pub const FEE_RATE: Decimal = dec!(0.025);
/// Tax on gross revenue (6%)
pub const TAX_RATE: Decimal = dec!(0.06);

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub gross_revenue: Decimal,
    pub net_revenue: Decimal,
    pub profit: Decimal,
    /// Percent of net revenue kept as profit
    pub margin: Decimal,
    pub fees: Decimal,
    pub taxes: Decimal,
    /// Paid traffic is not simulated
    pub ad_spend: Decimal,
    /// Decorative estimate for the dashboard card. Not computed from the
    /// filtered sales; see [`estimate_pending_sales`].
    pub pending_sales: Decimal,
    pub arpu: Decimal,
    pub refunds: Decimal,
    pub refund_percentage: Decimal,
    pub chargebacks: Decimal,
    pub chargeback_percentage: Decimal,
    /// Number of paid sales
    pub count: usize,
}

impl KpiSnapshot {
    /// Derives revenue KPIs from `sales`. `pending_sales` is left at zero.
    pub fn compute(sales: &[Sale]) -> Self {
        let mut gross_revenue = Decimal::ZERO;
        let mut paid_count = 0usize;
        let mut refunds = Decimal::ZERO;
        let mut refund_count = 0usize;
        let mut chargebacks = Decimal::ZERO;
        let mut chargeback_count = 0usize;

        for sale in sales {
            match sale.status {
                SaleStatus::Paid => {
                    gross_revenue += sale.value;
                    paid_count += 1;
                }
                SaleStatus::Refunded => {
                    refunds += sale.value;
                    refund_count += 1;
                }
                SaleStatus::Chargeback => {
                    chargebacks += sale.value;
                    chargeback_count += 1;
                }
                SaleStatus::Pending => {}
            }
        }

        let fees = gross_revenue * FEE_RATE;
        let taxes = gross_revenue * TAX_RATE;
        let net_revenue = gross_revenue - fees - taxes;
        let ad_spend = Decimal::ZERO;
        let profit = net_revenue - ad_spend;
        let margin = if net_revenue > Decimal::ZERO {
            profit / net_revenue * HUNDRED
        } else {
            Decimal::ZERO
        };
        let arpu = if paid_count > 0 {
            gross_revenue / Decimal::from(paid_count)
        } else {
            Decimal::ZERO
        };

        Self {
            gross_revenue,
            net_revenue,
            profit,
            margin,
            fees,
            taxes,
            ad_spend,
            pending_sales: Decimal::ZERO,
            arpu,
            refunds,
            refund_percentage: share_pct(refund_count, sales.len()),
            chargebacks,
            chargeback_percentage: share_pct(chargeback_count, sales.len()),
            count: paid_count,
        }
    }

    pub fn with_pending_sales(mut self, pending_sales: Decimal) -> Self {
        self.pending_sales = pending_sales;
        self
    }
}

/// Cosmetic "pending sales" figure: a fixed base per period scaled by a
/// random factor in `[0.8, 1.2]`.
///
/// This is not analytics. It is a stand-in value for the dashboard card and
/// may change on every call.
pub fn estimate_pending_sales<R: Rng>(period: PeriodFilter, rng: &mut R) -> Decimal {
    let base = match period {
        PeriodFilter::Today => dec!(400),
        PeriodFilter::Yesterday => dec!(600),
        PeriodFilter::Last7Days => dec!(1432.24),
        PeriodFilter::ThisMonth => dec!(8653.65),
        _ => dec!(12000),
    };
    let variance = Decimal::from_f64(rng.random_range(0.8..=1.2)).unwrap_or(Decimal::ONE);
    (base * variance).round_dp(2)
}

fn share_pct(part: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) / Decimal::from(total) * HUNDRED
}
