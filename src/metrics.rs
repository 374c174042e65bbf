use crate::sync::{AtomicU64, Ordering};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CacheStat {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub size: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub methods: CacheStat,
    pub fields: CacheStat,
    pub inserts: u64,
    pub invalidations: u64,
    pub known_names: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Introspector Cache Statistics:")?;
        writeln!(f, "  Method Maps:    {}", self.methods)?;
        writeln!(f, "  Field Maps:     {}", self.fields)?;
        writeln!(f, "  Inserts:        {:>8}", self.inserts)?;
        writeln!(f, "  Invalidations:  {:>8}", self.invalidations)?;
        writeln!(f, "  Known Names:    {:>8}", self.known_names)?;
        Ok(())
    }
}

impl std::fmt::Display for CacheStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hits: {:>8}, misses: {:>8}, hit_rate: {:>6.2}%, size: {:>8}",
            self.hits,
            self.misses,
            self.hit_rate * 100.0,
            self.size
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheSizes {
    pub methods: usize,
    pub fields: usize,
    pub names: usize,
}

/// Cache counters.
///
/// All counters use `Ordering::Relaxed`; they are independent and only need to
/// be updated atomically.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub method_hits: AtomicU64,
    pub method_misses: AtomicU64,
    pub field_hits: AtomicU64,
    pub field_misses: AtomicU64,
    pub inserts: AtomicU64,
    pub invalidations: AtomicU64,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_method_hit(&self) {
        self.method_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_method_miss(&self) {
        self.method_misses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_field_hit(&self) {
        self.field_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_field_miss(&self) {
        self.field_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_statistics(&self, sizes: CacheSizes) -> CacheStats {
        CacheStats {
            methods: Self::stat(
                self.method_hits.load(Ordering::Relaxed),
                self.method_misses.load(Ordering::Relaxed),
                sizes.methods,
            ),
            fields: Self::stat(
                self.field_hits.load(Ordering::Relaxed),
                self.field_misses.load(Ordering::Relaxed),
                sizes.fields,
            ),
            inserts: self.inserts.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            known_names: sizes.names,
        }
    }

    fn stat(hits: u64, misses: u64, size: usize) -> CacheStat {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        CacheStat {
            hits,
            misses,
            hit_rate,
            size,
        }
    }
}
