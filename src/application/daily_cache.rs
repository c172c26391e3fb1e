//! Day-keyed persistence of generated sales.
//!
//! A day bucket is written once, the first time its date is requested, and
//! read back unchanged afterwards. Entries that fail to decode are reported
//! and treated as missing so the caller regenerates them.

use crate::domain::calendar::day_key;
use crate::domain::errors::CacheError;
use crate::domain::repositories::KeyValueStore;
use crate::domain::sales::Sale;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Key prefix shared with the browser build of the dashboard
pub const DEFAULT_KEY_PREFIX: &str = "trackfy_sales_";

pub struct DailyCache<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> DailyCache<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn with_default_prefix(store: S) -> Self {
        Self::new(store, DEFAULT_KEY_PREFIX)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// `<prefix><YYYY-MM-DD>`
    pub fn key_for(&self, day: NaiveDate) -> String {
        format!("{}{}", self.prefix, day_key(day))
    }

    /// Stored bucket for `day`, or `None` when absent or unreadable.
    pub fn get(&self, day: NaiveDate) -> Option<Vec<Sale>> {
        let key = self.key_for(day);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read day bucket {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Sale>>(&raw) {
            Ok(sales) => {
                debug!("Loaded {} sales from {}", sales.len(), key);
                Some(sales)
            }
            Err(e) => {
                warn!("Discarding malformed day bucket {}: {}", key, e);
                None
            }
        }
    }

    /// Stores `sales` for `day`, replacing any previous bucket.
    ///
    /// Callers check [`get`](Self::get) first; buckets are meant to be written once.
    pub fn put(&self, day: NaiveDate, sales: &[Sale]) -> Result<(), CacheError> {
        let key = self.key_for(day);
        let json = serde_json::to_string(sales).map_err(|source| CacheError::Serialization {
            key: key.clone(),
            source,
        })?;
        self.store.set(&key, &json)?;
        debug!("Stored {} sales under {}", sales.len(), key);
        Ok(())
    }

    pub fn evict(&self, day: NaiveDate) -> Result<(), CacheError> {
        self.store.remove(&self.key_for(day))?;
        Ok(())
    }

    /// Dates with a stored bucket under this prefix, oldest first.
    pub fn cached_days(&self) -> Result<Vec<NaiveDate>, CacheError> {
        let mut days: Vec<NaiveDate> = self
            .store
            .keys()?
            .iter()
            .filter_map(|key| key.strip_prefix(&self.prefix))
            .filter_map(|suffix| NaiveDate::parse_from_str(suffix, "%Y-%m-%d").ok())
            .collect();
        days.sort();
        Ok(days)
    }

    /// Every readable stored sale, regardless of window. Malformed buckets are skipped.
    pub fn all_stored(&self) -> Result<Vec<Sale>, CacheError> {
        let mut sales = Vec::new();
        for day in self.cached_days()? {
            if let Some(bucket) = self.get(day) {
                sales.extend(bucket);
            }
        }
        Ok(sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::{DeterministicRng, SalesSynthesizer};
    use crate::infrastructure::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn generated(d: u32) -> Vec<Sale> {
        let start = Utc.with_ymd_and_hms(2026, 10, d, 0, 0, 0).unwrap();
        SalesSynthesizer::default().synthesize(
            dec!(3000),
            start,
            start + Duration::days(1),
            &mut DeterministicRng::new(i64::from(d)),
        )
    }

    #[test]
    fn test_key_scheme() {
        let cache = DailyCache::with_default_prefix(InMemoryStore::new());
        assert_eq!(cache.key_for(day(7)), "trackfy_sales_2026-10-07");
    }

    #[test]
    fn test_get_absent() {
        let cache = DailyCache::with_default_prefix(InMemoryStore::new());
        assert!(cache.get(day(1)).is_none());
    }

    #[test]
    fn test_put_get_roundtrip_preserves_dates() {
        let cache = DailyCache::with_default_prefix(InMemoryStore::new());
        let sales = generated(17);
        assert!(!sales.is_empty());

        cache.put(day(17), &sales).unwrap();
        let restored = cache.get(day(17)).unwrap();

        assert_eq!(restored, sales);
        for (a, b) in restored.iter().zip(&sales) {
            assert_eq!(a.date.timestamp_millis(), b.date.timestamp_millis());
        }
    }

    #[test]
    fn test_malformed_entry_is_absent() {
        let store = InMemoryStore::new();
        store.set("trackfy_sales_2026-10-05", "{not json").unwrap();
        let cache = DailyCache::with_default_prefix(store);

        assert!(cache.get(day(5)).is_none());
    }

    #[test]
    fn test_cached_days_and_all_stored() {
        let store = InMemoryStore::new();
        store.set("other_app_2026-10-01", "[]").unwrap();
        store.set("trackfy_sales_2026-10-03", "garbage").unwrap();
        let cache = DailyCache::with_default_prefix(store);

        let a = generated(2);
        let b = generated(1);
        cache.put(day(2), &a).unwrap();
        cache.put(day(1), &b).unwrap();

        assert_eq!(cache.cached_days().unwrap(), vec![day(1), day(2), day(3)]);
        assert_eq!(cache.all_stored().unwrap().len(), a.len() + b.len());
    }

    #[test]
    fn test_evict() {
        let cache = DailyCache::with_default_prefix(InMemoryStore::new());
        cache.put(day(4), &generated(4)).unwrap();
        cache.evict(day(4)).unwrap();
        assert!(cache.get(day(4)).is_none());
    }
}
