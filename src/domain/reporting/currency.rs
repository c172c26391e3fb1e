use crate::domain::errors::CurrencyParseError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// BRL per EUR used when none is configured
pub const DEFAULT_EUR_RATE: Decimal = dec!(6.00);

/// Display currency. Amounts are generated in BRL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
    Eur,
}

impl Currency {
    /// Converts a BRL amount into this currency.
    pub fn convert(&self, amount_brl: Decimal, eur_rate: Decimal) -> Decimal {
        match self {
            Currency::Brl => amount_brl,
            Currency::Eur if eur_rate > Decimal::ZERO => {
                amount_brl.checked_div(eur_rate).unwrap_or(amount_brl)
            }
            Currency::Eur => amount_brl,
        }
    }

    /// `R$ 1.234,56` for BRL, `1.234,56 €` for EUR.
    pub fn format(&self, amount: Decimal) -> String {
        let body = group_decimal(amount);
        match self {
            Currency::Brl => format!("R$ {}", body),
            Currency::Eur => format!("{} €", body),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Brl => f.write_str("BRL"),
            Currency::Eur => f.write_str("EUR"),
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "EUR" => Ok(Currency::Eur),
            _ => Err(CurrencyParseError(s.to_string())),
        }
    }
}

/// `12,34%` with two decimals.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", group_decimal(value))
}

/// Two decimals, `.` thousands separator, `,` decimal separator.
fn group_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{}", if negative { "-" } else { "" }, grouped, frac_part)
}
