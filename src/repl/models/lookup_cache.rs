//! # Lookup Cache
//!
//! Session-lifetime map from identifier to the last fetched record.
//! Entries expire lazily: a stale entry is treated as absent on read but is
//! only removed by [`LookupCache::clear`] or by being overwritten.

use crate::repl::models::identifier::Identifier;
use crate::repl::models::result_record::ResultRecord;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a fetched record may be reused
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    record: ResultRecord,
    captured_at: Instant,
}

#[derive(Debug)]
pub struct LookupCache {
    entries: HashMap<Identifier, CacheEntry>,
    ttl: Duration,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&ResultRecord> {
        self.get_at(identifier, Instant::now())
    }

    /// Look up an entry as of `now`; entries aged `ttl` or more are absent
    pub fn get_at(&self, identifier: &Identifier, now: Instant) -> Option<&ResultRecord> {
        self.entries
            .get(identifier)
            .filter(|entry| now.saturating_duration_since(entry.captured_at) < self.ttl)
            .map(|entry| &entry.record)
    }

    pub fn put(&mut self, identifier: Identifier, record: ResultRecord) {
        self.put_at(identifier, record, Instant::now());
    }

    pub fn put_at(&mut self, identifier: Identifier, record: ResultRecord, captured_at: Instant) {
        self.entries.insert(
            identifier,
            CacheEntry {
                record,
                captured_at,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}
