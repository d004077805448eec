//! Hash map and set aliases.
//!
//! Lookup-only maps use hashbrown with a fixed-key aHash builder, so hashing
//! is fast and reproducible between runs. Anything whose iteration order is
//! observable (vertex and edge enumeration) uses `indexmap` instead.

use ahash::AHasher;
use std::hash::BuildHasherDefault;

/// Deterministic hasher builder.
pub type FxBuildHasher = BuildHasherDefault<AHasher>;

/// Hash map used for internal lookups.
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Hash set used for internal lookups.
pub type FxHashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;
