use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;

/// Generation and target settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationEnvConfig {
    pub daily_target: Decimal,
    pub window_days: u32,
    pub monthly_target: Decimal,
    pub annual_target: Decimal,
}

impl Default for SimulationEnvConfig {
    fn default() -> Self {
        Self {
            daily_target: dec!(3000),
            window_days: 365,
            monthly_target: dec!(90000),
            annual_target: dec!(1000000),
        }
    }
}

impl SimulationEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let daily_target = lookup("TRACKFY_DAILY_TARGET")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.daily_target);

        let window_days = lookup("TRACKFY_WINDOW_DAYS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.window_days);

        let monthly_target = lookup("TRACKFY_MONTHLY_TARGET")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.monthly_target);

        let annual_target = lookup("TRACKFY_ANNUAL_TARGET")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.annual_target);

        Self {
            daily_target,
            window_days,
            monthly_target,
            annual_target,
        }
    }
}
