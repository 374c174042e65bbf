//! # introspect-cache
//!
//! A runtime type-introspection cache for expression and template engines that
//! repeatedly resolve member access on arbitrary objects.
//!
//! ## Core Types
//!
//! - **[`IntrospectorCache`]**: Caches method and field maps per type identity and
//!   dumps itself when a type shows up again under a different loading context.
//! - **[`TypeDescription`](types::TypeDescription)**: A type loaded by one
//!   [`LoadContext`](types::LoadContext).
//! - **[`ClassMap`](maps::ClassMap)** / **[`ClassFieldMap`](maps::ClassFieldMap)**:
//!   The default method and field maps.
//! - **[`ConversionHandler`](conversion::ConversionHandler)**: Argument conversion
//!   rules used during overload resolution.
//!
//! ## Environment Variables
//!
//! - `INTROSPECT_CACHE_STATS`: `"0"` or `"false"` disables hit/miss counters
//! - `INTROSPECT_CACHE_CAPACITY`: Initial capacity of the identity stores
pub mod cache;
pub mod config;
pub mod conversion;
pub mod error;
pub mod log;
pub mod maps;
pub mod metrics;
pub mod sync;
pub mod types;

pub use cache::{IntrospectorCache, CACHEDUMP_MSG};
pub use config::CacheConfig;
pub use error::IntrospectionError;
