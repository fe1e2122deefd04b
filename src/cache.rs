use dashmap::DashMap;

use crate::{error::ResolutionError, registry::PackageInfo};

pub type Resolution = Result<PackageInfo, ResolutionError>;

/// Memoized package lookups.
///
/// Keys are compared verbatim. Callers pass the registry's
/// [`canonical_key`](crate::registry::PackageRegistry::canonical_key) so that
/// identifiers the registry treats as equal share one entry.
///
/// Created once by the application and shared by every responder that
/// resolves a package, so each identifier hits the registry at most once per
/// process in the absence of racing first requests. Failures are cached as
/// well and are only forgotten by [`IdentityCache::clear`].
#[derive(Debug, Default)]
pub struct IdentityCache {
    entries: DashMap<String, Resolution>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resolution for `key`, running `resolve` on a miss.
    /// `resolve` runs without holding a map lock; when two callers miss
    /// together the first stored result is kept and returned to both.
    pub fn get_or_resolve<F>(&self, key: &str, resolve: F) -> Resolution
    where
        F: FnOnce() -> Resolution,
    {
        if let Some(hit) = self.entries.get(key) {
            tracing::debug!(package = %key, "Status cache hit");
            return hit.value().clone();
        }

        tracing::debug!(package = %key, "Status cache miss");
        let resolution = resolve();

        self.entries
            .entry(key.to_string())
            .or_insert(resolution)
            .value()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
