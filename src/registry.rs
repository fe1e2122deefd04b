use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::error::{RegistryError, ResolutionError};

/// Declared project name and version of an installed package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageInfo {
    pub name:    String,
    pub version: String,
}

/// Maps an installed package identifier to its metadata.
///
/// Implementations must be cheap and free of side effects: the responder calls
/// `resolve` from inside a request handler.
pub trait PackageRegistry: Send + Sync {
    fn resolve(&self, identifier: &str) -> Result<PackageInfo, ResolutionError>;

    /// Key under which a resolution of `identifier` is memoized. Identifiers
    /// with the same key must resolve to the same result.
    fn canonical_key(&self, identifier: &str) -> String {
        identifier.to_string()
    }
}

/// Canonical lookup key: lowercase, with every run of `-`, `_` or `.`
/// collapsed into a single `-`.
pub fn normalize(identifier: &str) -> String {
    let mut key = String::with_capacity(identifier.len());
    let mut in_separator = false;

    for c in identifier.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                key.push('-');
            }
            in_separator = true;
        } else {
            key.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    key
}

/// In-memory registry of the packages available to this process.
#[derive(Debug, Default, Clone)]
pub struct InstalledPackages {
    packages: HashMap<String, PackageInfo>,
}

impl InstalledPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the running crate's own Cargo metadata.
    pub fn with_current_crate() -> Self {
        Self::new().with_package(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.insert(name, version);
        self
    }

    /// Registers a package; a later entry for the same normalized name
    /// replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        let info = PackageInfo { name: name.into(), version: version.into() };
        self.packages.insert(normalize(&info.name), info);
    }

    /// Adds every entry of a JSON manifest: an array of
    /// `{"name": ..., "version": ...}` objects.
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<PackageInfo> = serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let count = entries.len();
        for info in entries {
            self.packages.insert(normalize(&info.name), info);
        }

        tracing::debug!(path = %path.display(), count, "Loaded package manifest");
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageRegistry for InstalledPackages {
    fn resolve(&self, identifier: &str) -> Result<PackageInfo, ResolutionError> {
        self.packages
            .get(&normalize(identifier))
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(identifier.to_string()))
    }

    fn canonical_key(&self, identifier: &str) -> String {
        normalize(identifier)
    }
}
