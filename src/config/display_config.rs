use crate::domain::reporting::Currency;
use crate::domain::reporting::currency::DEFAULT_EUR_RATE;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;

/// Presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEnvConfig {
    pub currency: Currency,
    /// BRL per EUR
    pub eur_rate: Decimal,
}

impl DisplayEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currency = match lookup("TRACKFY_CURRENCY") {
            Some(raw) => raw
                .parse::<Currency>()
                .context("Failed to parse TRACKFY_CURRENCY")?,
            None => Currency::default(),
        };

        let eur_rate = lookup("TRACKFY_EUR_RATE")
            .and_then(|v| v.trim().parse::<Decimal>().ok())
            .filter(|rate| *rate > Decimal::ZERO)
            .unwrap_or(DEFAULT_EUR_RATE);

        Ok(Self { currency, eur_rate })
    }
}
