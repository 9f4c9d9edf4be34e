//! Access-control configuration
//!
//! Layered with the `config` crate: an optional TOML file, then environment
//! variables prefixed with `BIZADMIN` (e.g. `BIZADMIN_UNAUTHORIZED_PATH`).

use std::path::Path;

use bizadmin_common::{LogLevel, LogOptions};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AccessError, Result};

/// Default redirect target for denied pages
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Access-control settings shared through the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Where denied route gates redirect when they have no fallback
    pub unauthorized_path: String,
    /// Text of the default loading placeholder
    pub loading_label: String,
    pub log_level: String,
    /// Attach the originating location to redirects
    pub carry_origin: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            unauthorized_path: DEFAULT_UNAUTHORIZED_PATH.to_string(),
            loading_label: "Loading...".to_string(),
            log_level: "info".to_string(),
            carry_origin: true,
        }
    }
}

impl AccessConfig {
    pub const ENV_PREFIX: &'static str = "BIZADMIN";

    /// Load from an optional file plus the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }
        builder = builder.add_source(Environment::with_prefix(Self::ENV_PREFIX).try_parsing(true));

        let config: AccessConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.unauthorized_path.starts_with('/') {
            return Err(AccessError::Config(format!(
                "unauthorized_path must be an absolute path, got '{}'",
                self.unauthorized_path
            )));
        }
        if self.log_level.parse::<LogLevel>().is_err() {
            return Err(AccessError::Config(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Logging options derived from `log_level`
    pub fn log_options(&self) -> Result<LogOptions> {
        let level = self
            .log_level
            .parse::<LogLevel>()
            .map_err(AccessError::Config)?;
        Ok(LogOptions::default().with_level(level))
    }
}
