use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed for key {key} at {path:?}: {source}")]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Errors raised while writing a day bucket to the cache
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to serialize day bucket {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Unknown period name
#[derive(Debug, Error)]
#[error("Invalid period: {0}. Must be one of today, yesterday, last-7-days, this-month, last-month, this-year, all-time, custom")]
pub struct PeriodParseError(pub String);

/// Unknown currency code
#[derive(Debug, Error)]
#[error("Invalid currency: {0}. Must be 'BRL' or 'EUR'")]
pub struct CurrencyParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_formatting() {
        let error = StoreError::InvalidKey {
            key: "../escape".to_string(),
            reason: "path separators are not allowed".to_string(),
        };

        let msg = error.to_string();
        assert!(msg.contains("../escape"));
        assert!(msg.contains("path separators"));
    }

    #[test]
    fn test_cache_error_wraps_store_error() {
        let error: CacheError = StoreError::Poisoned.into();
        assert_eq!(error.to_string(), "Storage lock poisoned");
    }

    #[test]
    fn test_parse_error_formatting() {
        let msg = PeriodParseError("fortnight".to_string()).to_string();
        assert!(msg.contains("fortnight"));
        assert!(msg.contains("last-7-days"));

        let msg = CurrencyParseError("USD".to_string()).to_string();
        assert!(msg.contains("USD"));
    }
}
