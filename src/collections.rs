//! Map type used by the version index and the file registry.
//!
//! With the `gxhash` feature the faster gxhash map is used; it needs AES-NI and
//! SSE2 at build time, so the std map is the portable default.

#[cfg(feature = "gxhash")]
pub use gxhash::{HashMap as GxHashMap, HashMapExt};

// The std map has inherent constructors; gxhash's come from `HashMapExt`, which
// callers import only under the feature.

#[cfg(not(feature = "gxhash"))]
use std::collections::HashMap as StdHashMap;

/// HashMap backed by gxhash when the feature is enabled
#[cfg(feature = "gxhash")]
pub type HashMap<K, V> = GxHashMap<K, V>;

/// HashMap backed by the std hasher
#[cfg(not(feature = "gxhash"))]
pub type HashMap<K, V> = StdHashMap<K, V>;
