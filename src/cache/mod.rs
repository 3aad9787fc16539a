use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::normalize::Row;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub collection: String,
    pub page_size: u32,
}

impl CacheKey {
    pub fn new(collection: &str, page_size: u32) -> Self {
        Self {
            collection: collection.to_string(),
            page_size,
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    rows: Vec<Row>,
    pages: u32,
    stored_at: Instant,
}

/// Whole-result cache for normalized rows, keyed by the fetch call's
/// arguments. An entry is served until its ttl elapses; a zero ttl disables
/// storage entirely. Invalidation is expiry or an explicit clear, never
/// per-record.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<(Vec<Row>, u32)> {
        let entry = self.entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        Some((entry.rows.clone(), entry.pages))
    }

    pub fn store(&mut self, key: CacheKey, rows: Vec<Row>, pages: u32) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                rows,
                pages,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
