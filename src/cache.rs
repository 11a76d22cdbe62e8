use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::domain::interpret::{Division, InexactPolicy};
use crate::domain::matrix::ValuationMatrix;
use crate::domain::solver_factory::SolverType;

/// Identifies a division request. Valuations are compared bit-for-bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    solver: SolverType,
    policy: InexactPolicy,
    agents: usize,
    resources: usize,
    bits: Vec<u64>,
}

impl CacheKey {
    pub fn new(solver: SolverType, policy: InexactPolicy, valuations: &ValuationMatrix) -> Self {
        CacheKey {
            solver,
            policy,
            agents: valuations.agents(),
            resources: valuations.resources(),
            bits: valuations
                .as_matrix()
                .as_slice()
                .iter()
                .map(|v| v.to_bits())
                .collect(),
        }
    }
}

/// Bounded LRU of finished divisions, shared across workers.
/// A capacity of zero disables caching.
pub struct DivisionCache {
    inner: Option<Mutex<LruCache<CacheKey, Division>>>,
}

impl DivisionCache {
    pub fn new(capacity: usize) -> Self {
        DivisionCache {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Division> {
        self.inner.as_ref()?.lock().get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, division: Division) {
        if let Some(inner) = &self.inner {
            inner.lock().put(key, division);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.lock().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
