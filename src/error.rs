//! Error taxonomy for gate runs
//!
//! Every variant is fatal: the gate never retries or downgrades a failure to a
//! warning. The two parsing-related variants carry enough raw context to
//! diagnose the problem without rerunning the image.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    /// The capability probe exited non-zero.
    #[error(
        "The GraalVM image is not built with a JVMCI-enabled JDK, it misses `-XX:+JVMCIPrintProperties`."
    )]
    CapabilityMissing { output: String },

    /// The version banner matches neither grammar.
    #[error("Unexpected version string:\n{output}\nDoes not match:\n{pattern}")]
    MalformedVersionOutput { output: String, pattern: String },

    /// The banner is well-formed but only under the permissive grammar.
    #[error("In strict mode, the distribution must be built with the open vendor policy (OpenJDK)")]
    PolicyViolation,

    /// The banner reports a different release than the suite expects.
    #[error("Wrong GraalVM version in -version string: got '{found}', expected '{expected}'")]
    VersionMismatch { found: String, expected: String },

    /// A launch that must succeed exited non-zero.
    #[error("Command `{command}` failed with exit code {}:\n{output}", display_code(.exit_code))]
    ProcessFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// The binary could not be spawned or waited on.
    #[error("Failed to run `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
