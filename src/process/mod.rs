//! Process launching for gate checks
//!
//! Every check launches the image binary once and needs two things back: the
//! exit status and the merged stdout/stderr text. [`ProcessRunner`] is the seam
//! the checks are written against so they can be exercised without a real
//! image; [`SystemRunner`] is the implementation backed by `std::process`.

mod system;

use std::borrow::Cow;
use std::path::Path;

use shell_escape::escape;

use crate::error::Result;

pub use system::{SystemRunner, MAX_OUTPUT_SIZE};

/// Outcome of a single launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Exit code, or `None` if the child was terminated by a signal or timeout
    pub exit_code: Option<i32>,
    /// stdout and stderr merged in the order the child wrote them
    pub output: String,
    /// Whether the child was killed after exceeding the configured timeout
    pub timed_out: bool,
}

impl ProbeResult {
    pub fn new(exit_code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            exit_code,
            output: output.into(),
            timed_out: false,
        }
    }

    /// A launch succeeded only if it exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Launches a program and captures its exit status and merged output.
///
/// A non-zero exit status is reported through [`ProbeResult::exit_code`], never
/// as an error. Errors are reserved for failing to launch or wait at all.
pub trait ProcessRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<ProbeResult>;
}

/// Render a command line for logs and diagnostics, quoting as a shell would
pub fn render_command(program: &Path, args: &[&str]) -> String {
    let mut parts = vec![escape(program.to_string_lossy()).into_owned()];
    parts.extend(args.iter().map(|a| escape(Cow::Borrowed(*a)).into_owned()));
    parts.join(" ")
}
