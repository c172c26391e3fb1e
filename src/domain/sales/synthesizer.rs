//! Target-bounded synthetic sale generation.
//!
//! Draws tickets until the running total reaches the target, a draw would
//! overshoot it by more than a random slack, or the iteration cap is hit.
//! Output is a pure function of the inputs and the RNG state at entry.

use super::rng::DeterministicRng;
use super::types::{PaymentMethod, Platform, Sale, SaleStatus};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;
const ORGANIC: &str = "Organic";

/// Tunables for a synthesis run
#[derive(Debug, Clone)]
pub struct SynthesisProfile {
    /// Ticket sizes drawn uniformly for each sale
    pub tickets: Vec<Decimal>,
    /// Upper bound of the random slack tolerated above the target
    pub overshoot: Decimal,
    /// Hard cap on loop iterations
    pub max_iterations: usize,
    /// Draws at or above this are refunded
    pub refunded_threshold: f64,
    /// Draws at or above this (and below `refunded_threshold`) are pending
    pub pending_threshold: f64,
    /// Draws at or above this are paid by boleto
    pub boleto_threshold: f64,
    /// Draws at or above this (and below `boleto_threshold`) are paid by pix
    pub pix_threshold: f64,
    /// Sales are spread over `Account 01` up to this many accounts
    pub ad_accounts: u8,
}

impl Default for SynthesisProfile {
    fn default() -> Self {
        Self {
            tickets: vec![dec!(180), dec!(200), dec!(220), dec!(240)],
            overshoot: dec!(1500),
            max_iterations: 2000,
            refunded_threshold: 0.98,
            pending_threshold: 0.95,
            boleto_threshold: 0.9,
            pix_threshold: 0.6,
            ad_accounts: 3,
        }
    }
}

pub struct SalesSynthesizer {
    profile: SynthesisProfile,
}

impl SalesSynthesizer {
    pub fn new(profile: SynthesisProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &SynthesisProfile {
        &self.profile
    }

    /// Generates sales whose values sum to roughly `target`, dated in `[start, end)`.
    ///
    /// Returns an empty list for a non-positive target or an empty window.
    pub fn synthesize(
        &self,
        target: Decimal,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        rng: &mut DeterministicRng,
    ) -> Vec<Sale> {
        let mut sales = Vec::new();
        if target <= Decimal::ZERO || start >= end {
            return sales;
        }

        let window_ms = (end - start).num_milliseconds() as f64;
        let mut total = Decimal::ZERO;
        let mut iterations = 0;

        while total < target && iterations < self.profile.max_iterations {
            iterations += 1;

            let Some(&value) = rng.pick(&self.profile.tickets) else {
                break;
            };
            let slack = Decimal::from_f64(rng.next_f64())
                .and_then(|r| r.checked_mul(self.profile.overshoot))
                .unwrap_or(Decimal::ZERO);
            // Targets near Decimal::MAX saturate; the iteration cap still bounds the loop
            let ceiling = target.checked_add(slack).unwrap_or(Decimal::MAX);
            let Some(next_total) = total.checked_add(value) else {
                break;
            };
            if next_total > ceiling {
                break;
            }

            let offset_ms = (rng.next_f64() * window_ms).floor() as i64;
            let date = start + Duration::milliseconds(offset_ms);
            let status = self.draw_status(rng);
            let payment_method = self.draw_payment_method(rng);
            let account = rng.next_int(1, i64::from(self.profile.ad_accounts) + 1);
            let id = draw_id(rng);

            sales.push(Sale {
                id,
                value,
                date,
                payment_method,
                ad_account: format!("Account {:02}", account),
                platform: Platform::Organic,
                source: ORGANIC.to_string(),
                status,
            });
            total = next_total;
        }

        sales
    }

    fn draw_status(&self, rng: &mut DeterministicRng) -> SaleStatus {
        let r = rng.next_f64();
        if r >= self.profile.refunded_threshold {
            SaleStatus::Refunded
        } else if r >= self.profile.pending_threshold {
            SaleStatus::Pending
        } else {
            SaleStatus::Paid
        }
    }

    fn draw_payment_method(&self, rng: &mut DeterministicRng) -> PaymentMethod {
        let r = rng.next_f64();
        if r >= self.profile.boleto_threshold {
            PaymentMethod::Boleto
        } else if r >= self.profile.pix_threshold {
            PaymentMethod::Pix
        } else {
            PaymentMethod::CreditCard
        }
    }
}

impl Default for SalesSynthesizer {
    fn default() -> Self {
        Self::new(SynthesisProfile::default())
    }
}

fn draw_id(rng: &mut DeterministicRng) -> String {
    (0..ID_LEN)
        .map(|_| {
            let idx = rng.next_int(0, ID_ALPHABET.len() as i64) as usize;
            ID_ALPHABET[idx] as char
        })
        .collect()
}
