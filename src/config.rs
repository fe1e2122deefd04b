use std::path::PathBuf;

use clap::Parser;

use crate::identity::IdentitySource;

#[derive(Parser, Debug, Clone)]
#[command(
    name    = "app-status",
    about   = "Serves an application identity and status document",
    version
)]
pub struct Config {
    /// Host address to listen on.
    #[arg(long, env = "APP_STATUS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "APP_STATUS_PORT", default_value_t = 8888)]
    pub port: u16,

    /// Path the status endpoint is mounted at.
    #[arg(long, env = "APP_STATUS_PATH", default_value = "/status")]
    pub path: String,

    /// Installed package to report. Takes precedence over --name/--app-version.
    #[arg(long, env = "APP_STATUS_PACKAGE")]
    pub package: Option<String>,

    /// Application name reported verbatim.
    #[arg(long, env = "APP_STATUS_NAME")]
    pub name: Option<String>,

    /// Application version reported verbatim.
    #[arg(long = "app-version", env = "APP_STATUS_VERSION")]
    pub app_version: Option<String>,

    /// JSON manifest of additional installed packages:
    /// `[{"name": "...", "version": "..."}]`.
    #[arg(long, env = "APP_STATUS_PACKAGES_FILE")]
    pub packages_file: Option<PathBuf>,
}

impl Config {
    /// Checks the listener settings and returns the identity source for the
    /// status route.
    pub fn validate(&self) -> anyhow::Result<IdentitySource> {
        if self.host.trim().is_empty() {
            anyhow::bail!("APP_STATUS_HOST must not be empty");
        }
        if !self.path.starts_with('/') {
            anyhow::bail!("APP_STATUS_PATH must start with `/`, got `{}`", self.path);
        }
        self.identity_source()
    }

    /// The identity source for the status route. Fails when neither a package
    /// nor both name and version are configured.
    pub fn identity_source(&self) -> anyhow::Result<IdentitySource> {
        Ok(IdentitySource::from_options(
            self.package.clone(),
            self.name.clone(),
            self.app_version.clone(),
        )?)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
