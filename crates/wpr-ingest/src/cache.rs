//! Time-bounded memoization of loaded tables.
//!
//! Avoids downloading the same remote base on every interaction. Entries are
//! read-only once stored; they leave the cache by expiring or by an explicit
//! invalidation ("clear and reload").

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Result;
use crate::table::RawTable;

/// Default time-to-live for cached tables (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

struct CachedTable {
    table: RawTable,
    fetched_at: Instant,
}

/// Tables keyed by their source, each valid for `ttl`.
pub struct TableCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedTable>>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached table for `key`, or runs `load` and caches its result.
    ///
    /// Errors from `load` are returned as-is and nothing is cached.
    pub fn get_or_load<F>(&self, key: &str, load: F) -> Result<RawTable>
    where
        F: FnOnce() -> Result<RawTable>,
    {
        if let Some(table) = self.get(key) {
            return Ok(table);
        }

        let table = load()?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            CachedTable {
                table: table.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(table)
    }

    /// Returns a fresh cached table, dropping it if it has expired.
    pub fn get(&self, key: &str) -> Option<RawTable> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let cached = entries.get(key)?;
        let age = cached.fetched_at.elapsed();
        if age < self.ttl {
            debug!(key, ?age, "using cached table");
            return Some(cached.table.clone());
        }
        debug!(key, ?age, "cached table expired");
        entries.remove(key);
        None
    }

    /// Drops one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

    use super::*;
    use crate::error::IngestError;
    use crate::table::TableFormat;

    fn table() -> RawTable {
        let columns: Vec<Column> = vec![Series::new("Data".into(), vec!["01/09/2025"]).into_column()];
        RawTable::new(DataFrame::new(columns).unwrap(), TableFormat::Csv, "mem")
    }

    #[test]
    fn loads_once_within_ttl() {
        let cache = TableCache::new(Duration::from_secs(60));
        let calls = Cell::new(0);
        for _ in 0..3 {
            cache
                .get_or_load("base", || {
                    calls.set(calls.get() + 1);
                    Ok(table())
                })
                .unwrap();
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_always_reloads() {
        let cache = TableCache::new(Duration::ZERO);
        let calls = Cell::new(0);
        for _ in 0..2 {
            cache
                .get_or_load("base", || {
                    calls.set(calls.get() + 1);
                    Ok(table())
                })
                .unwrap();
        }
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let cache = TableCache::default();
        cache.get_or_load("base", || Ok(table())).unwrap();
        assert!(cache.invalidate("base"));
        assert!(!cache.invalidate("base"));
        assert!(cache.is_empty());
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = TableCache::default();
        let result = cache.get_or_load("base", || {
            Err(IngestError::EmptyTable {
                origin: "mem".to_string(),
            })
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
