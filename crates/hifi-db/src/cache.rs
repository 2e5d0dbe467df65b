//! Small in-memory time-to-live cache.
//!
//! Holds one computed value at a time. Readers get the value back while it is
//! younger than the TTL; afterwards the next read recomputes it.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    Miss,
    Fresh(T),
    Stale(T),
}

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// Single-slot TTL cache. A zero TTL disables caching.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn lookup(&self) -> CacheLookup<T> {
        self.lookup_at(Instant::now())
    }

    fn lookup_at(&self, now: Instant) -> CacheLookup<T> {
        let slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match slot.as_ref() {
            None => CacheLookup::Miss,
            Some(entry) if now.saturating_duration_since(entry.stored_at) < self.ttl => {
                CacheLookup::Fresh(entry.value.clone())
            }
            Some(entry) => CacheLookup::Stale(entry.value.clone()),
        }
    }

    /// Fresh value, if any.
    pub fn get(&self) -> Option<T> {
        match self.lookup() {
            CacheLookup::Fresh(value) => Some(value),
            CacheLookup::Miss | CacheLookup::Stale(_) => None,
        }
    }

    pub fn put(&self, value: T) {
        if self.ttl.is_zero() {
            return;
        }
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(Entry {
            value,
            stored_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
    }
}
