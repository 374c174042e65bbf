use std::env;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Count hits, misses, inserts and invalidations.
    pub track_metrics: bool,
    /// Initial capacity of each identity store.
    pub initial_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            track_metrics: true,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Reads `INTROSPECT_CACHE_STATS` and `INTROSPECT_CACHE_CAPACITY`.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("INTROSPECT_CACHE_STATS").ok().as_deref(),
            env::var("INTROSPECT_CACHE_CAPACITY").ok().as_deref(),
        )
    }

    fn from_vars(stats: Option<&str>, capacity: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            track_metrics: stats
                .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false"))
                .unwrap_or(defaults.track_metrics),
            initial_capacity: capacity
                .and_then(|c| c.trim().parse().ok())
                .unwrap_or(defaults.initial_capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(CacheConfig::from_vars(None, None), CacheConfig::default());
    }

    #[test]
    fn test_parse_vars() {
        let config = CacheConfig::from_vars(Some("false"), Some("256"));
        assert!(!config.track_metrics);
        assert_eq!(config.initial_capacity, 256);
        assert!(CacheConfig::from_vars(Some("1"), None).track_metrics);
        assert!(!CacheConfig::from_vars(Some(" 0 "), None).track_metrics);
    }

    #[test]
    fn test_bad_capacity_falls_back() {
        let config = CacheConfig::from_vars(None, Some("lots"));
        assert_eq!(config.initial_capacity, DEFAULT_CAPACITY);
    }
}
