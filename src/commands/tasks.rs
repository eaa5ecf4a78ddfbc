//! `vmgate tasks`: list registered tasks and whether a selection runs them

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use super::gate::load_suite;
use crate::gate::registered_tasks;
use crate::suite::ConfigOverrides;
use crate::tasks::TaskSelection;

pub fn list(config: Option<PathBuf>, overrides: ConfigOverrides, selection: TaskSelection) -> Result<()> {
    let suite = load_suite(config, overrides)?;

    println!("{} (selection: {})", "Tasks:".bold(), selection);
    for spec in registered_tasks(&suite) {
        let tags: Vec<String> = spec.tags.iter().map(ToString::to_string).collect();
        let mark = if selection.enables(spec.tags) {
            "run ".green()
        } else {
            "skip".dimmed()
        };
        println!("  [{}] {} [{}]", mark, spec.title, tags.join(", "));
    }
    Ok(())
}
