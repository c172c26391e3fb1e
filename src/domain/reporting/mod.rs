pub mod currency;
pub mod payment_breakdown;
pub mod revenue_series;
pub mod run_rate;

pub use currency::{Currency, format_percent};
pub use payment_breakdown::{PaymentBreakdown, PaymentMethodShare};
pub use revenue_series::{Granularity, RevenuePoint, RevenueSeries};
pub use run_rate::RunRate;
