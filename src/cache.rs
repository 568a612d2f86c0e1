//! Expiring lookup cache keyed by rounded coordinates.
//!
//! Upstream lookups (population density, place names) are slow and their
//! answers do not change within a session, so the service memoises them per
//! coordinate cell. The cache is owned by whoever constructs it; there is no
//! process-wide instance.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::types::GeoPoint;

/// Coordinates quantised to `precision` decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey {
    lat: i64,
    lon: i64,
}

impl CellKey {
    pub fn new(point: GeoPoint, precision: u32) -> Self {
        let scale = 10f64.powi(precision as i32);
        Self {
            lat: (point.lat * scale).round() as i64,
            lon: (point.lon * scale).round() as i64,
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted: Instant,
}

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<CellKey, Entry<V>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<CellKey>,
}

/// Thread-safe TTL cache with a fixed capacity.
///
/// When full, the least recently inserted entry is evicted. A TTL of zero
/// disables caching entirely.
#[derive(Debug)]
pub struct CoordinateCache<V> {
    inner: Mutex<Inner<V>>,
    ttl: Duration,
    capacity: usize,
    precision: u32,
}

impl<V: Clone> CoordinateCache<V> {
    pub fn new(ttl: Duration, capacity: usize, precision: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity.min(4096)),
                order: VecDeque::new(),
            }),
            ttl,
            capacity,
            precision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // A panic mid-insert cannot leave the map inconsistent with itself,
        // so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn key(&self, point: GeoPoint) -> CellKey {
        CellKey::new(point, self.precision)
    }

    pub fn get(&self, point: GeoPoint) -> Option<V> {
        self.get_at(point, Instant::now())
    }

    pub(crate) fn get_at(&self, point: GeoPoint, now: Instant) -> Option<V> {
        let key = self.key(point);
        let mut inner = self.lock();
        let fresh = match inner.entries.get(&key) {
            Some(entry) => now.saturating_duration_since(entry.inserted) < self.ttl,
            None => return None,
        };
        if fresh {
            inner.entries.get(&key).map(|e| e.value.clone())
        } else {
            inner.entries.remove(&key);
            inner.order.retain(|k| *k != key);
            None
        }
    }

    pub fn insert(&self, point: GeoPoint, value: V) {
        self.insert_at(point, value, Instant::now());
    }

    pub(crate) fn insert_at(&self, point: GeoPoint, value: V, now: Instant) {
        if self.capacity == 0 || self.ttl.is_zero() {
            return;
        }
        let key = self.key(point);
        let mut inner = self.lock();

        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| *k != key);
        }
        while inner.entries.len() >= self.capacity && !inner.entries.contains_key(&key) {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }

        inner.entries.insert(key, Entry { value, inserted: now });
        inner.order.push_back(key);
    }

    /// Cached value for `point`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs, so two threads missing the
    /// same cell may both compute it.
    pub fn get_or_insert_with(&self, point: GeoPoint, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(point) {
            return value;
        }
        let value = compute();
        self.insert(point, value.clone());
        value
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but errors are
    /// returned to the caller and never cached.
    pub fn get_or_try_insert_with<E>(
        &self,
        point: GeoPoint,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(point) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(point, value.clone());
        Ok(value)
    }

    /// Number of stored entries, including any that have expired but not
    /// yet been touched.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}
