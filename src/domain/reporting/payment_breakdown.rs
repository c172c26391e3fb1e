use crate::domain::sales::{PaymentMethod, Sale};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodShare {
    pub method: PaymentMethod,
    pub count: usize,
    pub amount: Decimal,
}

/// Sales per payment method across all statuses, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PaymentBreakdown {
    pub methods: Vec<PaymentMethodShare>,
}

impl PaymentBreakdown {
    pub fn from_sales(sales: &[Sale]) -> Self {
        let methods = PaymentMethod::ALL
            .into_iter()
            .map(|method| {
                let (count, amount) = sales
                    .iter()
                    .filter(|s| s.payment_method == method)
                    .fold((0, Decimal::ZERO), |(n, sum), s| (n + 1, sum + s.value));
                PaymentMethodShare {
                    method,
                    count,
                    amount,
                }
            })
            .filter(|share| share.count > 0)
            .collect();

        Self { methods }
    }

    pub fn total_count(&self) -> usize {
        self.methods.iter().map(|m| m.count).sum()
    }
}
