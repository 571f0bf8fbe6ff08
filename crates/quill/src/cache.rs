//! Per-path geometry cache.
//!
//! Entries are keyed by path handle and tagged with the path generation they
//! were built from. A generation mismatch means the path was mutated since,
//! so the entry is rebuilt. The surface-space copy is additionally keyed by
//! the matrix it was transformed with.

use crate::PathHandle;
use quill_core::alloc::HashMap;
use quill_core::profiling::profile_function;
use quill_geometry::{Path, ResolvedPath, Transform2D};
use std::sync::Arc;

/// Counters for cache behavior, mostly useful in tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Surface geometry reused as-is.
    pub hits: u64,
    /// Surface geometry rebuilt.
    pub misses: u64,
    /// Entries dropped because their path changed.
    pub invalidations: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
}

struct CacheEntry {
    generation: u64,
    last_used: u64,
    user: Arc<ResolvedPath>,
    surface: Option<(Transform2D, Arc<ResolvedPath>)>,
}

pub(crate) struct GeometryCache {
    entries: HashMap<PathHandle, CacheEntry>,
    capacity: usize,
    tick: u64,
    stats: CacheStats,
}

impl GeometryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::default(),
            capacity,
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Interpreted geometry of `path` mapped through `matrix`.
    pub fn surface_geometry(
        &mut self,
        handle: PathHandle,
        path: &Path,
        matrix: &Transform2D,
    ) -> Arc<ResolvedPath> {
        profile_function!();
        if self.capacity == 0 {
            self.stats.misses += 1;
            return Arc::new(path.resolve().transformed(matrix));
        }

        self.tick += 1;
        let tick = self.tick;
        let generation = path.generation();

        if self
            .entries
            .get(&handle)
            .is_some_and(|entry| entry.generation != generation)
        {
            self.entries.remove(&handle);
            self.stats.invalidations += 1;
            tracing::trace!(path = handle.to_bits(), generation, "geometry cache invalidated");
        }
        if !self.entries.contains_key(&handle) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let entry = self.entries.entry(handle).or_insert_with(|| CacheEntry {
            generation,
            last_used: tick,
            user: Arc::new(path.resolve()),
            surface: None,
        });
        entry.last_used = tick;

        if let Some((cached, geometry)) = &entry.surface
            && cached == matrix
        {
            self.stats.hits += 1;
            return Arc::clone(geometry);
        }
        self.stats.misses += 1;
        let geometry = Arc::new(entry.user.transformed(matrix));
        entry.surface = Some((*matrix, Arc::clone(&geometry)));
        geometry
    }

    pub fn remove(&mut self, handle: PathHandle) {
        self.entries.remove(&handle);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(handle, _)| *handle);
        if let Some(handle) = oldest {
            self.entries.remove(&handle);
            self.stats.evictions += 1;
        }
    }
}
