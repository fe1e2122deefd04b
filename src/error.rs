use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::identity::ApplicationIdentity;

/// A package identifier could not be turned into a name/version pair.
///
/// Cloneable so the memoized failure can be handed out to every request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("package `{0}` is not installed")]
    NotFound(String),
}

/// Loading package metadata into a registry failed.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read package manifest {path}: {source}")]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package manifest {path}: {source}")]
    Parse {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Either a package identifier or both name and version must be configured")]
    NoSource,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Status resolution failed: {0}")]
    Resolution(#[from] ResolutionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Resolution(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(error = %self);

        (status, Json(ApplicationIdentity::failed())).into_response()
    }
}
