use introspect_cache::{
    conversion::DefaultConversionHandler,
    log::TracingLog,
    sync::Arc,
    types::{FieldDefinition, MethodDefinition, TypeDefinition, TypeDescription, TypeLoader},
    IntrospectorCache,
};
use std::thread;

const THREADS: usize = 8;
const TYPES_PER_THREAD: usize = 16;
const ROUNDS: usize = 50;

fn loader_for(owner: usize) -> TypeLoader {
    TypeLoader::new((0..TYPES_PER_THREAD).map(|i| {
        TypeDefinition::new(Some(format!("t{owner}").as_str()), &format!("Type{i}"))
            .with_method(MethodDefinition::new("get", &[], "i32"))
            .with_field(FieldDefinition::new("value", "i32"))
    }))
}

fn assert_consistent(cache: &IntrospectorCache, ty: &TypeDescription) {
    if let Some(methods) = cache.lookup_methods(ty).unwrap() {
        assert_eq!(methods.type_description(), ty);
    }
    if let Some(fields) = cache.lookup_fields(ty).unwrap() {
        assert_eq!(fields.type_description(), ty);
    }
}

#[test]
fn test_concurrent_insert_lookup_clear() {
    let cache = Arc::new(IntrospectorCache::new(
        Arc::new(TracingLog),
        Arc::new(DefaultConversionHandler),
    ));
    let loaders: Vec<_> = (0..THREADS).map(|t| Arc::new(loader_for(t))).collect();

    let handles: Vec<_> = loaders
        .iter()
        .enumerate()
        .map(|(t, loader)| {
            let cache = cache.clone();
            let loader = loader.clone();
            thread::spawn(move || {
                let types = loader.types();
                for round in 0..ROUNDS {
                    for ty in &types {
                        if cache.lookup_methods(ty).unwrap().is_none() {
                            let inserted = cache.insert(ty).unwrap();
                            assert_eq!(inserted.type_description(), ty);
                        }
                        assert_consistent(&cache, ty);
                    }
                    if t == 0 && round % 10 == 9 {
                        cache.clear();
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    for loader in &loaders {
        for ty in loader.types() {
            let methods = cache.lookup_methods(&ty).unwrap();
            let fields = cache.lookup_fields(&ty).unwrap();
            assert_eq!(methods.is_some(), fields.is_some());
            assert_eq!(methods.is_some(), cache.contains_name(&ty.type_name()));
        }
    }
    let stats = cache.stats();
    assert_eq!(stats.methods.size, stats.fields.size);
    assert_eq!(stats.methods.size, stats.known_names);
}

#[test]
fn test_concurrent_reloads_never_serve_foreign_maps() {
    let cache = Arc::new(IntrospectorCache::new(
        Arc::new(TracingLog),
        Arc::new(DefaultConversionHandler),
    ));
    let base = loader_for(0);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = cache.clone();
            let loader = base.reload();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    for ty in loader.types() {
                        match cache.lookup_methods(&ty).unwrap() {
                            Some(map) => assert_eq!(map.type_description(), &ty),
                            None => {
                                let map = cache.insert(&ty).unwrap();
                                assert_eq!(map.type_description(), &ty);
                            }
                        }
                        assert_consistent(&cache, &ty);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    assert!(cache.stats().invalidations > 0);
}
