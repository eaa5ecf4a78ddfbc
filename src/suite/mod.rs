//! Suite context: what the gate checks the image against
//!
//! The release version, the image location and the installed components are
//! collected once (see [`config`]) and passed explicitly to every check.

pub mod config;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GateError, Result};

pub use config::{load_config_file, ConfigFile, ConfigOverrides, DEFAULT_CONFIG_FILE};

#[cfg(windows)]
const JAVA_EXECUTABLE: &str = "java.exe";
#[cfg(not(windows))]
const JAVA_EXECUTABLE: &str = "java";

/// Build metadata and image layout for one gate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteContext {
    release_version: String,
    graalvm_home: Option<PathBuf>,
    java: Option<String>,
    components: BTreeSet<String>,
    timeout: Option<Duration>,
}

impl SuiteContext {
    pub fn new(release_version: impl Into<String>) -> Self {
        Self {
            release_version: release_version.into(),
            graalvm_home: None,
            java: None,
            components: BTreeSet::new(),
            timeout: None,
        }
    }

    pub fn with_graalvm_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.graalvm_home = Some(home.into());
        self
    }

    /// Use an explicit binary instead of `<graalvm_home>/bin/java`
    pub fn with_java(mut self, java: impl Into<String>) -> Self {
        self.java = Some(java.into());
        self
    }

    pub fn with_component(mut self, name: impl Into<String>) -> Self {
        self.components.insert(name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Release identifier the version banner must report
    pub fn release_version(&self) -> &str {
        &self.release_version
    }

    pub fn graalvm_home(&self) -> Option<&Path> {
        self.graalvm_home.as_deref()
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Locate the image's launcher binary.
    ///
    /// An explicit `java` wins; a bare name is looked up on `PATH`. Otherwise
    /// the launcher is `<graalvm_home>/bin/java`.
    pub fn java_binary(&self) -> Result<PathBuf> {
        if let Some(java) = &self.java {
            let path = Path::new(java);
            if path.is_absolute() || path.components().count() > 1 {
                return Ok(path.to_path_buf());
            }
            return which::which(java)
                .map_err(|e| GateError::Config(format!("Cannot find `{java}` on PATH: {e}")));
        }

        match &self.graalvm_home {
            Some(home) => Ok(home.join("bin").join(JAVA_EXECUTABLE)),
            None => Err(GateError::Config(
                "No image binary configured: set `graalvm_home` or `java`".to_string(),
            )),
        }
    }
}
