//! CSV export of a filtered sales list.

use crate::domain::sales::Sale;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SaleRow<'a> {
    id: &'a str,
    date: String,
    value: String,
    status: String,
    payment_method: &'static str,
    ad_account: &'a str,
    platform: String,
    source: &'a str,
}

impl<'a> From<&'a Sale> for SaleRow<'a> {
    fn from(sale: &'a Sale) -> Self {
        Self {
            id: &sale.id,
            date: sale.date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            value: format!("{:.2}", sale.value),
            status: sale.status.to_string(),
            payment_method: sale.payment_method.label(),
            ad_account: &sale.ad_account,
            platform: sale.platform.to_string(),
            source: &sale.source,
        }
    }
}

/// Writes `sales` as CSV with a header row. Returns the number of data rows.
pub fn write_sales_csv<W: Write>(sales: &[Sale], writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for sale in sales {
        wtr.serialize(SaleRow::from(sale))
            .with_context(|| format!("Failed to serialize sale {}", sale.id))?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;

    Ok(sales.len())
}
