//! Rolling-window assembly of the master sales list.

use crate::application::daily_cache::DailyCache;
use crate::domain::calendar::{day_seed, day_window, local_date};
use crate::domain::repositories::KeyValueStore;
use crate::domain::sales::{DeterministicRng, Sale, SalesSynthesizer};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Revenue synthesized for each day bucket unless configured otherwise
pub const DEFAULT_DAILY_TARGET: Decimal = dec!(3000);

/// Counters from one window fill
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub days: u32,
    pub cache_hits: u32,
    pub generated: u32,
    pub write_failures: u32,
}

pub struct MasterListBuilder<S> {
    cache: DailyCache<S>,
    synthesizer: SalesSynthesizer,
    daily_target: Decimal,
}

impl<S: KeyValueStore> MasterListBuilder<S> {
    pub fn new(cache: DailyCache<S>, synthesizer: SalesSynthesizer, daily_target: Decimal) -> Self {
        Self {
            cache,
            synthesizer,
            daily_target,
        }
    }

    pub fn cache(&self) -> &DailyCache<S> {
        &self.cache
    }

    pub fn daily_target(&self) -> Decimal {
        self.daily_target
    }

    /// Sales for the trailing `window_days` local days ending today, newest first.
    pub fn build<Tz: TimeZone>(&self, window_days: u32, now: DateTime<Utc>, tz: &Tz) -> Vec<Sale> {
        self.build_with_stats(window_days, now, tz).0
    }

    pub fn build_with_stats<Tz: TimeZone>(
        &self,
        window_days: u32,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> (Vec<Sale>, BuildStats) {
        let today = local_date(now, tz);
        let mut stats = BuildStats::default();
        let mut sales = Vec::new();

        for offset in 0..window_days {
            let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) else {
                break;
            };
            stats.days += 1;

            match self.cache.get(day) {
                Some(bucket) => {
                    stats.cache_hits += 1;
                    sales.extend(bucket);
                }
                None => {
                    let bucket = self.generate_day(day, tz);
                    stats.generated += 1;
                    if let Err(e) = self.cache.put(day, &bucket) {
                        stats.write_failures += 1;
                        warn!("Failed to persist sales for {}: {}", day, e);
                    }
                    sales.extend(bucket);
                }
            }
        }

        sales.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            "Master list ready: {} sales over {} days ({} cached, {} generated)",
            sales.len(),
            stats.days,
            stats.cache_hits,
            stats.generated
        );
        (sales, stats)
    }

    /// Deterministic bucket for `day`, independent of what is cached.
    pub fn generate_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<Sale> {
        let (start, end) = day_window(day, tz);
        let mut rng = DeterministicRng::new(day_seed(day));
        let bucket = self
            .synthesizer
            .synthesize(self.daily_target, start, end, &mut rng);
        debug!("Generated {} sales for {}", bucket.len(), day);
        bucket
    }
}
