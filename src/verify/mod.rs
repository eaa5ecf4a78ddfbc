//! Image verification checks
//!
//! Two checks run against the image launcher, always in this order:
//!
//! 1. [`probe_capability`]: the launcher accepts `-XX:+JVMCIPrintProperties`.
//! 2. [`VersionVerifier`]: the `-version` banner has the expected shape,
//!    vendor policy and release.
//!
//! [`verify_image`] runs both and stops at the first failure.

pub mod capability;
pub mod grammar;
pub mod version;

use crate::error::Result;
use crate::process::ProcessRunner;
use crate::suite::SuiteContext;

pub use capability::{probe_capability, JVMCI_PROBE_FLAG};
pub use grammar::{BannerMatch, VersionGrammar};
pub use version::{VerifiedVersion, VersionVerifier, VERSION_FLAG};

/// Probe the capability, then verify the version banner
pub fn verify_image<R: ProcessRunner + ?Sized>(
    runner: &R,
    suite: &SuiteContext,
    strict_mode: bool,
) -> Result<VerifiedVersion> {
    let java = suite.java_binary()?;
    probe_capability(runner, &java)?;
    VersionVerifier::new(suite, strict_mode).verify(runner, &java)
}
