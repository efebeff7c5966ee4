use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::models::Measurement;

use super::types::{AnalysisResult, KineticsError};

/// Identity of a series: changes whenever a measurement is appended or edited.
pub fn series_fingerprint(series: &[Measurement]) -> u64 {
    let mut hasher = DefaultHasher::new();
    series.len().hash(&mut hasher);
    for m in series {
        m.timestamp.hash(&mut hasher);
        m.value.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

struct CachedAnalysis {
    fingerprint: u64,
    result: AnalysisResult,
    stored_at: Instant,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub total_cached_items: usize,
    pub cache_duration_seconds: u64,
    pub capacity: usize,
    pub cached_subjects: Vec<String>,
}

/// Bounded per-subject result cache with TTL eviction.
/// An entry only matches the exact series it was computed from.
pub struct AnalysisCache {
    entries: RwLock<HashMap<String, CachedAnalysis>>,
    capacity: usize,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            ttl,
        }
    }

    fn is_fresh(&self, entry: &CachedAnalysis, now: Instant) -> bool {
        now.duration_since(entry.stored_at) < self.ttl
    }

    /// Cached result for this subject and series, if still fresh.
    pub fn get(
        &self,
        subject_id: &str,
        fingerprint: u64,
    ) -> Result<Option<AnalysisResult>, KineticsError> {
        let entries = self.entries.read().map_err(|_| KineticsError::LockFailed)?;
        let now = Instant::now();

        Ok(entries
            .get(subject_id)
            .filter(|e| e.fingerprint == fingerprint && self.is_fresh(e, now))
            .map(|e| e.result.clone()))
    }

    /// Store a result, evicting expired entries first and then the oldest
    /// entry if the cache is still full.
    pub fn insert(
        &self,
        subject_id: &str,
        fingerprint: u64,
        result: AnalysisResult,
    ) -> Result<(), KineticsError> {
        if self.capacity == 0 {
            return Ok(());
        }

        let mut entries = self.entries.write().map_err(|_| KineticsError::LockFailed)?;
        let now = Instant::now();

        entries.retain(|_, e| now.duration_since(e.stored_at) < self.ttl);

        if !entries.contains_key(subject_id) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.stored_at)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                tracing::debug!(subject_id = %key, "Evicting oldest cached analysis");
                entries.remove(&key);
            }
        }

        entries.insert(
            subject_id.to_string(),
            CachedAnalysis {
                fingerprint,
                result,
                stored_at: now,
            },
        );
        Ok(())
    }

    pub fn invalidate(&self, subject_id: &str) -> Result<(), KineticsError> {
        let mut entries = self.entries.write().map_err(|_| KineticsError::LockFailed)?;
        entries.remove(subject_id);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), KineticsError> {
        let mut entries = self.entries.write().map_err(|_| KineticsError::LockFailed)?;
        entries.clear();
        Ok(())
    }

    pub fn status(&self) -> Result<CacheStatus, KineticsError> {
        let entries = self.entries.read().map_err(|_| KineticsError::LockFailed)?;
        let mut cached_subjects: Vec<String> = entries.keys().cloned().collect();
        cached_subjects.sort();

        Ok(CacheStatus {
            total_cached_items: entries.len(),
            cache_duration_seconds: self.ttl.as_secs(),
            capacity: self.capacity,
            cached_subjects,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::kinetics::types::AnalysisFailure;

    fn result(tag: &str) -> AnalysisResult {
        AnalysisResult::Error(AnalysisFailure {
            message: tag.into(),
        })
    }

    fn series(values: &[f64]) -> Vec<Measurement> {
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Measurement::new(d0 + chrono::Duration::days(i as i64 * 30), v))
            .collect()
    }

    #[test]
    fn fingerprint_changes_on_append() {
        let a = series(&[1.0, 2.0]);
        let b = series(&[1.0, 2.0, 3.0]);
        assert_eq!(series_fingerprint(&a), series_fingerprint(&a.clone()));
        assert_ne!(series_fingerprint(&a), series_fingerprint(&b));
    }

    #[test]
    fn hit_requires_matching_fingerprint() {
        let cache = AnalysisCache::new(4, Duration::from_secs(300));
        cache.insert("p1", 7, result("a")).unwrap();
        assert_eq!(cache.get("p1", 7).unwrap(), Some(result("a")));
        assert_eq!(cache.get("p1", 8).unwrap(), None);
        assert_eq!(cache.get("p2", 7).unwrap(), None);
    }

    #[test]
    fn zero_ttl_never_hits() {
        let cache = AnalysisCache::new(4, Duration::ZERO);
        cache.insert("p1", 1, result("a")).unwrap();
        assert_eq!(cache.get("p1", 1).unwrap(), None);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let cache = AnalysisCache::new(2, Duration::from_secs(300));
        cache.insert("p1", 1, result("a")).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        cache.insert("p2", 1, result("b")).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        cache.insert("p3", 1, result("c")).unwrap();

        let status = cache.status().unwrap();
        assert_eq!(status.total_cached_items, 2);
        assert_eq!(status.cached_subjects, vec!["p2".to_string(), "p3".to_string()]);
    }

    #[test]
    fn replacing_existing_subject_does_not_evict() {
        let cache = AnalysisCache::new(2, Duration::from_secs(300));
        cache.insert("p1", 1, result("a")).unwrap();
        cache.insert("p2", 1, result("b")).unwrap();
        cache.insert("p1", 2, result("c")).unwrap();
        assert_eq!(cache.status().unwrap().total_cached_items, 2);
        assert_eq!(cache.get("p1", 2).unwrap(), Some(result("c")));
    }

    #[test]
    fn invalidate_and_clear() {
        let cache = AnalysisCache::new(4, Duration::from_secs(300));
        cache.insert("p1", 1, result("a")).unwrap();
        cache.insert("p2", 1, result("b")).unwrap();
        cache.invalidate("p1").unwrap();
        assert_eq!(cache.get("p1", 1).unwrap(), None);
        cache.clear().unwrap();
        assert_eq!(cache.status().unwrap().total_cached_items, 0);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let cache = AnalysisCache::new(0, Duration::from_secs(300));
        cache.insert("p1", 1, result("a")).unwrap();
        assert_eq!(cache.get("p1", 1).unwrap(), None);
    }
}
