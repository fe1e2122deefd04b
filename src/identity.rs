//! The `(name, version, status)` triple reported by the status endpoint and
//! the configuration that decides where it comes from.

use serde::Serialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Failed,
}

/// Response body of the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationIdentity {
    pub name:    Option<String>,
    pub version: Option<String>,
    pub status:  Status,
}

impl ApplicationIdentity {
    pub fn ok(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name:    Some(name.into()),
            version: Some(version.into()),
            status:  Status::Ok,
        }
    }

    /// Identity reported when a package lookup failed: no name, no version.
    pub fn failed() -> Self {
        Self { name: None, version: None, status: Status::Failed }
    }
}

/// Where a mounted responder gets its identity from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// Look the identifier up in the package registry on first request.
    Package(String),
    /// Report these values verbatim.
    Explicit { name: String, version: String },
}

impl IdentitySource {
    /// Builds a source from loose route options.
    ///
    /// A package identifier takes precedence over explicit values. Explicit
    /// values are only used when both `name` and `version` are present.
    pub fn from_options(
        package: Option<String>,
        name:    Option<String>,
        version: Option<String>,
    ) -> Result<Self, ConfigError> {
        match (package, name, version) {
            (Some(package), name, version) => {
                if name.is_some() || version.is_some() {
                    tracing::warn!(%package, "Package configured, ignoring explicit name/version");
                }
                Ok(Self::Package(package))
            }
            (None, Some(name), Some(version)) => Ok(Self::Explicit { name, version }),
            _ => Err(ConfigError::NoSource),
        }
    }
}
