//! Memoized grid construction.
//!
//! Grids are expensive to build (quadrature roots, per-row tables) and
//! immutable afterwards, so one instance per spec is shared as
//! `Arc<GridLayout>`. Each key owns a `OnceCell`: concurrent callers
//! asking for the same grid block on that cell while exactly one of them
//! builds it, and callers for other keys are not held up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::layout::{Grid, GridLayout};
use crate::spec::GridSpec;

type Slot = Arc<OnceCell<Arc<GridLayout>>>;

/// Counters describing cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered by an already built grid.
    pub hits: u64,
    /// Lookups that built the grid.
    pub misses: u64,
    /// Build attempts, including failed ones.
    pub builds: u64,
    /// Keys with a built grid.
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Process-wide or scoped store of built grids keyed by [`GridSpec::cache_key`].
#[derive(Default)]
pub struct GridCache {
    slots: Mutex<HashMap<String, Slot>>,
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache and build the configured prewarm grids.
    pub fn with_config(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        let cache = Self::new();
        if config.parallel_warm {
            cache.warm_parallel(&config.prewarm)?;
        } else {
            cache.warm(&config.prewarm)?;
        }
        Ok(cache)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Insert-only map, consistent even if a holder panicked.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.lock();
        match slots.get(key) {
            Some(slot) => Arc::clone(slot),
            None => {
                let slot = Slot::default();
                slots.insert(key.to_string(), Arc::clone(&slot));
                slot
            }
        }
    }

    /// Drop the key if it still maps to this slot and nothing was built.
    fn evict_empty(&self, key: &str, slot: &Slot) {
        let mut slots = self.lock();
        if slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && current.get().is_none())
        {
            slots.remove(key);
        }
    }

    /// Shared grid for `spec`, building it on first use.
    ///
    /// A failed build removes the key; the next caller retries.
    pub fn get_or_build(&self, spec: &GridSpec) -> Result<Arc<GridLayout>> {
        let key = spec.cache_key();
        let slot = self.slot(&key);

        if let Some(grid) = slot.get() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "grid cache hit");
            return Ok(Arc::clone(grid));
        }

        let mut built_here = false;
        let grid = slot.get_or_try_init(|| {
            built_here = true;
            self.builds.fetch_add(1, Ordering::Relaxed);

            let start = Instant::now();
            let grid = spec.build()?;
            debug!(
                key = %key,
                kind = grid.kind(),
                rows = grid.rows(),
                size = grid.size(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "built grid"
            );
            Ok::<_, GridError>(Arc::new(grid))
        });
        let grid = match grid {
            Ok(grid) => grid,
            Err(e) => {
                self.evict_empty(&key, &slot);
                return Err(e);
            }
        };

        if built_here {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            // Another thread finished the build while we waited.
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(Arc::clone(grid))
    }

    /// Cached uniform lat/lon grid.
    pub fn latlon(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
        lat_step: f64,
        lon_step: f64,
    ) -> Result<Arc<GridLayout>> {
        self.get_or_build(&GridSpec::LatLon {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
            lat_step,
            lon_step,
        })
    }

    /// Cached regular Gaussian grid `F{n}`.
    pub fn regular(&self, n: usize) -> Result<Arc<GridLayout>> {
        self.get_or_build(&GridSpec::RegularGaussian { n })
    }

    /// Cached reduced Gaussian grid `N{n}`.
    pub fn reduced(&self, n: usize) -> Result<Arc<GridLayout>> {
        self.get_or_build(&GridSpec::ReducedGaussian { n })
    }

    /// Cached octahedral Gaussian grid `O{n}`.
    pub fn octahedral(&self, n: usize) -> Result<Arc<GridLayout>> {
        self.get_or_build(&GridSpec::OctahedralGaussian { n })
    }

    /// Build every spec in order, stopping at the first failure.
    pub fn warm(&self, specs: &[GridSpec]) -> Result<()> {
        for spec in specs {
            self.get_or_build(spec)?;
        }
        Ok(())
    }

    /// Build every spec on the rayon pool.
    pub fn warm_parallel(&self, specs: &[GridSpec]) -> Result<()> {
        specs
            .par_iter()
            .try_for_each(|spec| self.get_or_build(spec).map(|_| ()))
    }

    /// Whether a built grid for `spec` is present.
    pub fn contains(&self, spec: &GridSpec) -> bool {
        self.lock()
            .get(&spec.cache_key())
            .is_some_and(|slot| slot.get().is_some())
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.lock().values().filter(|slot| slot.get().is_some()).count();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            entries,
        }
    }
}
