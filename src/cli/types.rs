use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vmgate::suite::ConfigOverrides;
use vmgate::tasks::TaskSelection;

#[derive(Parser)]
#[command(name = "vmgate")]
#[command(about = "Post-build verification gate for GraalVM images", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gate against a built image
    Gate {
        /// Require OpenJDK vendor and runtime labels in the version banner
        #[arg(long)]
        strict_mode: bool,

        #[command(flatten)]
        suite: SuiteArgs,
    },

    /// List registered tasks and whether the selection runs them
    Tasks {
        #[command(flatten)]
        suite: SuiteArgs,
    },
}

#[derive(Args)]
pub struct SuiteArgs {
    /// Comma-separated task tags to run (graal, graal-js); all tasks when omitted
    #[arg(short, long, value_parser = clap_selection_parser, default_value = "")]
    pub tags: TaskSelection,

    /// Config file (default: ./vmgate.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Expected GraalVM release (overrides VMGATE_RELEASE_VERSION and config)
    #[arg(long)]
    pub release_version: Option<String>,

    /// Image root; the launcher is <home>/bin/java
    #[arg(long)]
    pub graalvm_home: Option<PathBuf>,

    /// Launcher binary to probe instead of <home>/bin/java
    #[arg(long)]
    pub java: Option<String>,

    /// Kill a launch after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl SuiteArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            release_version: self.release_version.clone(),
            graalvm_home: self.graalvm_home.clone(),
            java: self.java.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// Clap value parser for `--tags`
pub fn clap_selection_parser(s: &str) -> Result<TaskSelection, String> {
    TaskSelection::parse(s).map_err(|e| e.to_string())
}
