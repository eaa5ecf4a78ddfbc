//! Layered gate configuration
//!
//! Values come from three places, highest precedence first: command-line
//! flags, `VMGATE_*` environment variables, and a TOML file (`vmgate.toml`).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::SuiteContext;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "vmgate.toml";

pub const ENV_RELEASE_VERSION: &str = "VMGATE_RELEASE_VERSION";
pub const ENV_GRAALVM_HOME: &str = "VMGATE_GRAALVM_HOME";

/// Contents of `vmgate.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub release_version: Option<String>,
    pub graalvm_home: Option<PathBuf>,
    pub java: Option<String>,
    #[serde(default)]
    pub components: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse gate configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Load the config file.
///
/// An explicitly requested file must exist. The default file is optional,
/// since every required value can also come from flags or the environment.
pub fn load_config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => ConfigFile::load(path).map(Some),
        None => {
            let path = cwd.join(DEFAULT_CONFIG_FILE);
            if path.exists() {
                ConfigFile::load(&path).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}

/// Values that override the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub release_version: Option<String>,
    pub graalvm_home: Option<PathBuf>,
    pub java: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Read overrides from `VMGATE_*` environment variables; empty values are ignored
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            release_version: var(ENV_RELEASE_VERSION),
            graalvm_home: var(ENV_GRAALVM_HOME).map(PathBuf::from),
            java: None,
            timeout_secs: None,
        }
    }

    /// Fill unset fields from `lower`
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            release_version: self.release_version.or(lower.release_version),
            graalvm_home: self.graalvm_home.or(lower.graalvm_home),
            java: self.java.or(lower.java),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
        }
    }

    /// Merge with the file and build the suite context
    pub fn resolve(self, file: Option<ConfigFile>) -> Result<SuiteContext> {
        let file = file.unwrap_or_default();

        let release_version = match self.release_version.or(file.release_version) {
            Some(v) if !v.is_empty() => v,
            _ => bail!(
                "No expected release version: set `release_version` in {DEFAULT_CONFIG_FILE}, \
                 {ENV_RELEASE_VERSION}, or --release-version"
            ),
        };

        let timeout_secs = self.timeout_secs.or(file.timeout_secs);
        if timeout_secs == Some(0) {
            bail!("timeout must be at least 1 second");
        }

        let mut ctx = SuiteContext::new(release_version)
            .with_timeout(timeout_secs.map(Duration::from_secs));
        if let Some(home) = self.graalvm_home.or(file.graalvm_home) {
            ctx = ctx.with_graalvm_home(home);
        }
        if let Some(java) = self.java.or(file.java) {
            ctx = ctx.with_java(java);
        }
        for component in file.components {
            ctx = ctx.with_component(component);
        }
        Ok(ctx)
    }
}
