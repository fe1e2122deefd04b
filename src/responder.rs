use std::sync::Arc;

use crate::{
    cache::IdentityCache,
    error::ResolutionError,
    identity::{ApplicationIdentity, IdentitySource},
    registry::PackageRegistry,
};

/// State behind one mounted status route, injected into the handler via
/// Axum's `State` extractor.
///
/// Package sources are resolved on the first request that needs them; the
/// result lives in the shared [`IdentityCache`], not in the responder, so
/// several routes configured with the same package share one lookup.
pub struct StatusResponder {
    source:   IdentitySource,
    registry: Arc<dyn PackageRegistry>,
    cache:    Arc<IdentityCache>,
}

impl StatusResponder {
    pub fn new(
        source:   IdentitySource,
        registry: Arc<dyn PackageRegistry>,
        cache:    Arc<IdentityCache>,
    ) -> Self {
        Self { source, registry, cache }
    }

    /// Responder for explicit values. The registry is never consulted.
    pub fn explicit(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(
            IdentitySource::Explicit { name: name.into(), version: version.into() },
            Arc::new(crate::registry::InstalledPackages::new()),
            Arc::new(IdentityCache::new()),
        )
    }

    pub fn identity(&self) -> Result<ApplicationIdentity, ResolutionError> {
        match &self.source {
            IdentitySource::Explicit { name, version } => {
                Ok(ApplicationIdentity::ok(name.as_str(), version.as_str()))
            }
            IdentitySource::Package(identifier) => {
                let key = self.registry.canonical_key(identifier);
                let info = self
                    .cache
                    .get_or_resolve(&key, || {
                        let resolution = self.registry.resolve(identifier);
                        if let Ok(info) = &resolution {
                            tracing::info!(
                                package = %identifier,
                                name    = %info.name,
                                version = %info.version,
                                "Resolved package metadata"
                            );
                        }
                        resolution
                    })?;

                Ok(ApplicationIdentity::ok(info.name, info.version))
            }
        }
    }
}
