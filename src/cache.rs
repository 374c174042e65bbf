//! The introspector cache.
//!
//! Method and field maps are cached per type identity. A second store keeps the
//! qualified names of every inserted type: a lookup that misses on identity but
//! finds the name means the type was loaded again by another context, and the
//! whole cache is dumped.
use crate::{
    config::CacheConfig,
    conversion::ConversionHandler,
    error::IntrospectionError,
    log::LogSink,
    maps::{ClassFieldMapBuilder, ClassMapBuilder, FieldMapBuilder, MethodMapBuilder},
    metrics::{CacheMetrics, CacheSizes, CacheStats},
    sync::{Arc, RwLock, RwLockUpgradableReadGuard},
    types::{TypeDescription, TypeHandle},
};
use gc_arena::Collect;
use std::{
    collections::{HashMap, HashSet},
    fmt::{Debug, Formatter},
};

/// Logged on every dump so other components can recognize the event.
pub const CACHEDUMP_MSG: &str = "IntrospectorCache detected classloader change. Dumping cache.";

struct CacheState<T, M, F> {
    method_maps: HashMap<T, Arc<M>>,
    field_maps: HashMap<T, Arc<F>>,
    /// May outlive the identities that registered them.
    type_names: HashSet<String>,
}

impl<T, M, F> CacheState<T, M, F> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            method_maps: HashMap::with_capacity(capacity),
            field_maps: HashMap::with_capacity(capacity),
            type_names: HashSet::with_capacity(capacity),
        }
    }

    fn clear(&mut self) {
        self.method_maps.clear();
        self.field_maps.clear();
        self.type_names.clear();
    }
}

#[derive(Clone, Copy)]
enum MapKind {
    Methods,
    Fields,
}

/// Caches method and field maps per type identity, dumping everything when a
/// known type name shows up under a new identity.
pub struct IntrospectorCache<T = TypeDescription, MB = ClassMapBuilder, FB = ClassFieldMapBuilder>
where
    T: TypeHandle,
    MB: MethodMapBuilder<T>,
    FB: FieldMapBuilder<T>,
{
    log: Arc<dyn LogSink>,
    conversions: Arc<dyn ConversionHandler>,
    method_builder: MB,
    field_builder: FB,
    state: RwLock<CacheState<T, MB::Map, FB::Map>>,
    metrics: CacheMetrics,
    config: CacheConfig,
}

// SAFETY: the cache holds no GC pointers, only plain heap data behind a lock.
unsafe impl<T, MB, FB> Collect for IntrospectorCache<T, MB, FB>
where
    T: TypeHandle,
    MB: MethodMapBuilder<T>,
    FB: FieldMapBuilder<T>,
{
    #[inline]
    fn needs_trace() -> bool {
        false
    }
}

impl IntrospectorCache {
    /// A cache over [`TypeDescription`]s using the default class and field maps.
    pub fn new(log: Arc<dyn LogSink>, conversions: Arc<dyn ConversionHandler>) -> Self {
        Self::with_builders(log, conversions, ClassMapBuilder, ClassFieldMapBuilder)
    }
}

impl<T, MB, FB> IntrospectorCache<T, MB, FB>
where
    T: TypeHandle,
    MB: MethodMapBuilder<T>,
    FB: FieldMapBuilder<T>,
{
    /// A cache with custom map builders and the default [`CacheConfig`].
    pub fn with_builders(
        log: Arc<dyn LogSink>,
        conversions: Arc<dyn ConversionHandler>,
        method_builder: MB,
        field_builder: FB,
    ) -> Self {
        Self::with_config(
            log,
            conversions,
            method_builder,
            field_builder,
            CacheConfig::default(),
        )
    }

    /// Like [`with_builders`](Self::with_builders), sizing the stores from
    /// `config.initial_capacity`.
    pub fn with_config(
        log: Arc<dyn LogSink>,
        conversions: Arc<dyn ConversionHandler>,
        method_builder: MB,
        field_builder: FB,
        config: CacheConfig,
    ) -> Self {
        Self {
            log,
            conversions,
            method_builder,
            field_builder,
            state: RwLock::new(CacheState::with_capacity(config.initial_capacity)),
            metrics: CacheMetrics::new(),
            config,
        }
    }

    pub fn conversion_handler(&self) -> &Arc<dyn ConversionHandler> {
        &self.conversions
    }

    /// Empties every store and logs [`CACHEDUMP_MSG`].
    pub fn clear(&self) {
        self.clear_locked(&mut *self.state.write());
        self.log.debug(CACHEDUMP_MSG);
    }

    /// The caller logs the dump once the guard is released, so a sink may
    /// read the cache.
    fn clear_locked(&self, state: &mut CacheState<T, MB::Map, FB::Map>) {
        state.clear();
        if self.config.track_metrics {
            self.metrics.record_invalidation();
        }
    }

    /// Returns the cached method map for `ty`.
    ///
    /// A miss for a type whose name is already known dumps the whole cache
    /// before returning `None`. Callers repopulate through [`insert`](Self::insert).
    pub fn lookup_methods(&self, ty: &T) -> Result<Option<Arc<MB::Map>>, IntrospectionError> {
        self.lookup(ty, MapKind::Methods, |state| &state.method_maps)
    }

    /// Returns the cached field map for `ty`. Dumps the cache on a name
    /// collision exactly like [`lookup_methods`](Self::lookup_methods).
    pub fn lookup_fields(&self, ty: &T) -> Result<Option<Arc<FB::Map>>, IntrospectionError> {
        self.lookup(ty, MapKind::Fields, |state| &state.field_maps)
    }

    fn lookup<V>(
        &self,
        ty: &T,
        kind: MapKind,
        store: impl Fn(&CacheState<T, MB::Map, FB::Map>) -> &HashMap<T, Arc<V>>,
    ) -> Result<Option<Arc<V>>, IntrospectionError> {
        if ty.is_null() {
            return Err(IntrospectionError::InvalidArgument(
                "cannot look up a null type",
            ));
        }

        {
            let state = self.state.read();
            if let Some(map) = store(&*state).get(ty) {
                self.record_lookup(kind, true);
                return Ok(Some(map.clone()));
            }
        }

        // An insert for `ty` may have landed since the read lock was released.
        let state = self.state.upgradable_read();
        if let Some(map) = store(&*state).get(ty) {
            self.record_lookup(kind, true);
            return Ok(Some(map.clone()));
        }

        self.record_lookup(kind, false);
        if state.type_names.contains(ty.type_name().as_str()) {
            self.clear_locked(&mut *RwLockUpgradableReadGuard::upgrade(state));
            self.log.debug(CACHEDUMP_MSG);
        }
        Ok(None)
    }

    fn record_lookup(&self, kind: MapKind, hit: bool) {
        if !self.config.track_metrics {
            return;
        }
        match (kind, hit) {
            (MapKind::Methods, true) => self.metrics.record_method_hit(),
            (MapKind::Methods, false) => self.metrics.record_method_miss(),
            (MapKind::Fields, true) => self.metrics.record_field_hit(),
            (MapKind::Fields, false) => self.metrics.record_field_miss(),
        }
    }

    /// Builds and caches the method and field maps for `ty`, replacing any
    /// previous entry for the same identity.
    ///
    /// Builder errors are returned as-is and leave the cache untouched.
    pub fn insert(&self, ty: &T) -> Result<Arc<MB::Map>, IntrospectionError> {
        if ty.is_null() {
            return Err(IntrospectionError::InvalidArgument("cannot insert a null type"));
        }

        let method_map = Arc::new(
            self.method_builder
                .build_method_map(ty, &self.conversions)?,
        );
        let field_map = Arc::new(self.field_builder.build_field_map(ty)?);
        let type_name = ty.type_name();

        {
            let mut state = self.state.write();
            state.method_maps.insert(ty.clone(), method_map.clone());
            state.field_maps.insert(ty.clone(), field_map);
            state.type_names.insert(type_name);
        }

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
        Ok(method_map)
    }

    /// Number of cached identities.
    pub fn len(&self) -> usize {
        self.state.read().method_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_name(&self, type_name: &str) -> bool {
        self.state.read().type_names.contains(type_name)
    }

    pub fn stats(&self) -> CacheStats {
        let sizes = {
            let state = self.state.read();
            CacheSizes {
                methods: state.method_maps.len(),
                fields: state.field_maps.len(),
                names: state.type_names.len(),
            }
        };
        self.metrics.cache_statistics(sizes)
    }
}

impl<T, MB, FB> Debug for IntrospectorCache<T, MB, FB>
where
    T: TypeHandle,
    MB: MethodMapBuilder<T>,
    FB: FieldMapBuilder<T>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("IntrospectorCache")
            .field("entries", &state.method_maps.len())
            .field("known_names", &state.type_names.len())
            .field("config", &self.config)
            .finish()
    }
}
