//! Time-bounded memoization of analytics responses.
//!
//! Entries are handed out as `Rc` so repeated reads within the TTL share one
//! allocation. The clock is injectable; tests drive a [`ManualClock`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{AnalyticsOverview, StatusBreakdown, Trend, Workload};

/// Default analytics lifetime.
pub const DEFAULT_ANALYTICS_TTL_SECS: u64 = 300;

/// Longer TTLs are clamped to this (about a century).
pub const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 3600;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: TimeDelta) {
        self.millis.set(self.millis.get() + by.num_milliseconds());
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(self.millis.get())
    }
}

struct Entry<V> {
    stored_at: DateTime<Utc>,
    value: Rc<V>,
}

/// Keyed cache whose entries expire `ttl` after insertion.
pub struct TtlCache<K, V> {
    ttl: TimeDelta,
    clock: Rc<dyn Clock>,
    entries: RefCell<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: TimeDelta, clock: Rc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Fresh entry for `key`; expired entries are evicted.
    pub fn get(&self, key: &K) -> Option<Rc<V>> {
        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();
        match entries.get(key) {
            Some(entry) if now - entry.stored_at < self.ttl => Some(Rc::clone(&entry.value)),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) -> Rc<V> {
        let value = Rc::new(value);
        self.entries.borrow_mut().insert(
            key,
            Entry {
                stored_at: self.clock.now(),
                value: Rc::clone(&value),
            },
        );
        value
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One cache per analytics endpoint.
pub struct AnalyticsCache {
    pub overview: TtlCache<(), AnalyticsOverview>,
    pub projects_by_status: TtlCache<(), StatusBreakdown>,
    /// Keyed by the `days` window.
    pub tasks_trend: TtlCache<u32, Trend>,
    pub workload: TtlCache<(), Vec<Workload>>,
}

impl AnalyticsCache {
    pub fn new(ttl_secs: u64, clock: Rc<dyn Clock>) -> Self {
        let secs = ttl_secs.clamp(1, MAX_TTL_SECS);
        let ttl = i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_else(|| TimeDelta::seconds(DEFAULT_ANALYTICS_TTL_SECS as i64));
        Self {
            overview: TtlCache::new(ttl, Rc::clone(&clock)),
            projects_by_status: TtlCache::new(ttl, Rc::clone(&clock)),
            tasks_trend: TtlCache::new(ttl, Rc::clone(&clock)),
            workload: TtlCache::new(ttl, clock),
        }
    }

    pub fn invalidate(&self) {
        tracing::debug!("analytics cache invalidated");
        self.overview.clear();
        self.projects_by_status.clear();
        self.tasks_trend.clear();
        self.workload.clear();
    }
}

impl Default for AnalyticsCache {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYTICS_TTL_SECS, Rc::new(SystemClock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let cache: TtlCache<&str, u32> = TtlCache::new(TimeDelta::seconds(300), Rc::new(clock.clone()));
        let stored = cache.insert("k", 7);

        clock.advance(TimeDelta::seconds(299));
        let hit = cache.get(&"k").unwrap();
        assert!(Rc::ptr_eq(&stored, &hit));

        clock.advance(TimeDelta::seconds(1));
        assert!(cache.get(&"k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let clock = ManualClock::new();
        let cache = AnalyticsCache::new(u64::MAX, Rc::new(clock.clone()));
        let stored = cache.overview.insert((), AnalyticsOverview::default());
        clock.advance(TimeDelta::days(365));
        let hit = cache.overview.get(&()).unwrap();
        assert!(Rc::ptr_eq(&stored, &hit));

        let zero = AnalyticsCache::new(0, Rc::new(clock.clone()));
        zero.workload.insert((), Vec::new());
        clock.advance(TimeDelta::seconds(1));
        assert!(zero.workload.get(&()).is_none());
    }

    #[test]
    fn test_invalidate_clears_every_endpoint() {
        let cache = AnalyticsCache::new(60, Rc::new(ManualClock::new()));
        cache.overview.insert((), AnalyticsOverview::default());
        cache.tasks_trend.insert(7, Trend::default());
        cache.invalidate();
        assert!(cache.overview.get(&()).is_none());
        assert!(cache.tasks_trend.is_empty());
    }
}
