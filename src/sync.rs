//! Synchronization primitives shared by the cache and the default maps.
//!
//! Everything here is re-exported so the rest of the crate has a single place
//! to pull locks and atomics from.
pub use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};
pub use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
