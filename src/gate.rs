//! The VM gate: registered tasks and their bodies

use crate::error::Result;
use crate::process::ProcessRunner;
use crate::suite::SuiteContext;
use crate::tasks::{Task, TaskOutcome, TaskSelection, TaskStatus, TaskTag};
use crate::verify::{verify_image, VerifiedVersion};

pub const BASIC_TASK: &str = "Vm: Basic GraalVM Tests";
pub const GRAAL_JS_TASK: &str = "Vm: Graal.js tests";

/// Component that registers the Graal.js task
pub const JS_COMPONENT: &str = "js";

/// A task the gate registers for a suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub title: &'static str,
    pub tags: &'static [TaskTag],
}

/// Per-run options supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct GateOptions {
    /// Require the open vendor policy in the version banner
    pub strict_mode: bool,
    pub selection: TaskSelection,
}

/// Everything a passing gate run produced
#[derive(Debug, Clone, Default)]
pub struct GateReport {
    pub outcomes: Vec<TaskOutcome>,
    /// Set when the basic task ran
    pub version: Option<VerifiedVersion>,
}

impl GateReport {
    pub fn executed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == TaskStatus::Passed)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == TaskStatus::Skipped)
            .count()
    }
}

/// Tasks registered for `suite`, in execution order.
///
/// The Graal.js task is only registered when the `js` component is installed.
pub fn registered_tasks(suite: &SuiteContext) -> Vec<TaskSpec> {
    let mut tasks = vec![TaskSpec {
        title: BASIC_TASK,
        tags: &[TaskTag::Graal],
    }];
    if suite.has_component(JS_COMPONENT) {
        tasks.push(TaskSpec {
            title: GRAAL_JS_TASK,
            tags: &[TaskTag::GraalJs],
        });
    }
    tasks
}

/// Run the gate. The first failing task ends the run.
pub fn run_gate<R: ProcessRunner + ?Sized>(
    runner: &R,
    suite: &SuiteContext,
    options: &GateOptions,
) -> Result<GateReport> {
    let mut report = GateReport::default();

    for spec in registered_tasks(suite) {
        let task = Task::new(spec.title, spec.tags, &options.selection);
        let outcome = match spec.title {
            BASIC_TASK => task.execute(|| {
                report.version = Some(verify_image(runner, suite, options.strict_mode)?);
                Ok(())
            })?,
            // Graal.js checks live in their own suite; the task only reserves the tag.
            _ => task.execute(|| Ok(()))?,
        };
        report.outcomes.push(outcome);
    }

    Ok(report)
}
