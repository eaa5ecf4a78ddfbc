//! `vmgate gate`: run the gate against a built image

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::gate::{run_gate, GateOptions, GateReport};
use crate::process::SystemRunner;
use crate::suite::{load_config_file, ConfigOverrides, SuiteContext};
use crate::tasks::TaskStatus;

/// Load the suite context from file, environment and flags
pub fn load_suite(config: Option<PathBuf>, cli: ConfigOverrides) -> Result<SuiteContext> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let file = load_config_file(config.as_deref(), &cwd)?;
    cli.or(ConfigOverrides::from_env()).resolve(file)
}

/// Execute the gate command
pub fn execute(config: Option<PathBuf>, overrides: ConfigOverrides, options: GateOptions) -> Result<()> {
    let suite = load_suite(config, overrides)?;
    let runner = SystemRunner::new().with_timeout(suite.timeout());

    // Resolution errors surface from the basic task, and only if it is selected.
    let image = match suite.java_binary() {
        Ok(java) => java.display().to_string(),
        Err(_) => "image".to_string(),
    };
    println!(
        "{} Verifying {} (release {}, {} mode, tasks: {})\n",
        "→".cyan().bold(),
        image,
        suite.release_version(),
        if options.strict_mode { "strict" } else { "permissive" },
        options.selection
    );

    let report = run_gate(&runner, &suite, &options).context("VM gate failed")?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &GateReport) {
    for outcome in &report.outcomes {
        match outcome.status {
            TaskStatus::Passed => println!(
                "  {} {} ({}ms)",
                "✓".green().bold(),
                outcome.title,
                outcome.duration.as_millis()
            ),
            TaskStatus::Skipped => println!(
                "  {} {} {}",
                "−".dimmed(),
                outcome.title,
                "(skipped)".dimmed()
            ),
        }
    }

    if let Some(version) = &report.version {
        println!(
            "\n  GraalVM {} on Java {} ({} banner)",
            version.release.bold(),
            version.java_version,
            version.grammar
        );
    }

    println!();
    if report.executed() == 0 {
        println!("{} No tasks selected", "!".yellow().bold());
    } else {
        println!(
            "{} Gate passed ({} run, {} skipped)",
            "✓".green().bold(),
            report.executed(),
            report.skipped()
        );
    }
}
