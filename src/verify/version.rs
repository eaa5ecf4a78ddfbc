//! Version banner verification

use std::path::Path;

use tracing::{debug, info};

use super::grammar::VersionGrammar;
use crate::error::{GateError, Result};
use crate::process::{render_command, ProcessRunner};
use crate::suite::SuiteContext;

/// Flag that makes the launcher print its version banner
pub const VERSION_FLAG: &str = "-version";

/// A banner that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedVersion {
    pub grammar: VersionGrammar,
    pub java_version: String,
    pub release: String,
}

/// Checks the `-version` banner against the expected release and vendor policy
#[derive(Debug, Clone)]
pub struct VersionVerifier {
    expected_release: String,
    strict_mode: bool,
}

impl VersionVerifier {
    pub fn new(suite: &SuiteContext, strict_mode: bool) -> Self {
        Self {
            expected_release: suite.release_version().to_string(),
            strict_mode,
        }
    }

    /// Launch `<java> -version` and check its merged output.
    ///
    /// The launch itself must succeed; a non-zero exit is
    /// [`GateError::ProcessFailed`].
    pub fn verify<R: ProcessRunner + ?Sized>(
        &self,
        runner: &R,
        java: &Path,
    ) -> Result<VerifiedVersion> {
        let result = runner.run(java, &[VERSION_FLAG])?;
        if !result.success() {
            return Err(GateError::ProcessFailed {
                command: render_command(java, &[VERSION_FLAG]),
                exit_code: result.exit_code,
                output: result.output,
            });
        }
        self.check_banner(&result.output)
    }

    /// Decide pass/fail for captured banner text
    pub fn check_banner(&self, text: &str) -> Result<VerifiedVersion> {
        let grammar = VersionGrammar::authoritative(self.strict_mode);
        debug!(grammar = %grammar, strict = self.strict_mode, "matching version banner");

        let Some(banner) = grammar.parse(text) else {
            // The release is not checked here: the vendor policy already failed.
            if let Some(fallback) = grammar.diagnostic_fallback() {
                if fallback.matches(text) {
                    return Err(GateError::PolicyViolation);
                }
            }
            return Err(GateError::MalformedVersionOutput {
                output: text.to_string(),
                pattern: grammar.pattern().to_string(),
            });
        };

        if banner.release != self.expected_release {
            return Err(GateError::VersionMismatch {
                found: banner.release.to_string(),
                expected: self.expected_release.clone(),
            });
        }

        info!(
            release = banner.release,
            java_version = banner.java_version,
            grammar = %grammar,
            "version banner verified"
        );
        Ok(VerifiedVersion {
            grammar,
            java_version: banner.java_version.to_string(),
            release: banner.release.to_string(),
        })
    }
}
