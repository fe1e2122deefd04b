//! Application identity and status endpoint for axum services.
//!
//! Mount [`routes::status::router`] at a health-check path. Each request
//! answers with `{"name", "version", "status"}`, taken either from explicit
//! values or from the installed-package registry. Registry lookups are
//! memoized in an [`IdentityCache`] owned by the host application.

pub mod cache;
pub mod config;
pub mod error;
pub mod identity;
pub mod registry;
pub mod responder;
pub mod routes;

pub use cache::IdentityCache;
pub use error::{AppError, ConfigError, RegistryError, ResolutionError};
pub use identity::{ApplicationIdentity, IdentitySource, Status};
pub use registry::{InstalledPackages, PackageInfo, PackageRegistry};
pub use responder::StatusResponder;
