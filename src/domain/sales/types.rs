use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment rail used for a sale.
///
/// Pix and Boleto are Brazilian payment rails; here they are only labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Pix,
        PaymentMethod::Boleto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Boleto => "Boleto",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Paid,
    Pending,
    Refunded,
    /// Declared for compatibility with stored data; the synthesizer never emits it.
    Chargeback,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaleStatus::Paid => "paid",
            SaleStatus::Pending => "pending",
            SaleStatus::Refunded => "refunded",
            SaleStatus::Chargeback => "chargeback",
        };
        f.write_str(s)
    }
}

/// Traffic platform a sale is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
    Google,
    Organic,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single synthetic sale. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    pub date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub ad_account: String,
    pub platform: Platform,
    pub source: String,
    pub status: SaleStatus,
}

impl Sale {
    pub fn is_paid(&self) -> bool {
        self.status == SaleStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn sample_sale() -> Sale {
        Sale {
            id: "k3j9x0a1b".to_string(),
            value: dec!(220),
            date: Utc.with_ymd_and_hms(2026, 10, 17, 14, 5, 9).unwrap()
                + chrono::Duration::milliseconds(431),
            payment_method: PaymentMethod::Pix,
            ad_account: "Account 02".to_string(),
            platform: Platform::Organic,
            source: "Organic".to_string(),
            status: SaleStatus::Paid,
        }
    }

    #[test]
    fn test_sale_json_shape() {
        let json = serde_json::to_value(sample_sale()).unwrap();

        assert_eq!(json["paymentMethod"], "pix");
        assert_eq!(json["adAccount"], "Account 02");
        assert_eq!(json["platform"], "Organic");
        assert_eq!(json["status"], "paid");
        assert_eq!(json["value"], 220.0);
        assert!(json["date"].as_str().unwrap().starts_with("2026-10-17T14:05:09.431"));
    }

    #[test]
    fn test_sale_reads_browser_style_json() {
        let raw = r#"{
            "id": "abc123xyz",
            "value": 180,
            "date": "2026-10-16T23:59:59.999Z",
            "paymentMethod": "boleto",
            "adAccount": "Account 01",
            "platform": "Organic",
            "source": "Organic",
            "status": "refunded"
        }"#;

        let sale: Sale = serde_json::from_str(raw).unwrap();
        assert_eq!(sale.value, dec!(180));
        assert_eq!(sale.payment_method, PaymentMethod::Boleto);
        assert_eq!(sale.status, SaleStatus::Refunded);
        assert_eq!(sale.date.timestamp_millis() % 1000, 999);
        assert!(!sale.is_paid());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
        assert_eq!(SaleStatus::Chargeback.to_string(), "chargeback");
        assert_eq!(Platform::Organic.to_string(), "Organic");
    }
}
