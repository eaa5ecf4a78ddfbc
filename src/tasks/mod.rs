//! Gate task scopes
//!
//! A [`Task`] is a named, tagged unit of the gate. Whether its body runs is
//! decided once, from the [`TaskSelection`], when the task is created. A task
//! that is not selected does nothing observable: its body is never called.

mod tags;

use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::error::Result;

pub use tags::{TaskSelection, TaskTag};

/// Whether a task's body ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Passed,
    Skipped,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Passed => write!(f, "passed"),
            TaskStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Result of a task that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub title: String,
    pub status: TaskStatus,
    pub duration: Duration,
}

/// A gate task scope
#[derive(Debug, Clone)]
pub struct Task {
    title: String,
    should_run: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, tags: &[TaskTag], selection: &TaskSelection) -> Self {
        Self {
            title: title.into(),
            should_run: selection.enables(tags),
        }
    }

    /// The "should I run" signal for this scope
    pub fn should_run(&self) -> bool {
        self.should_run
    }

    /// Run `body` if the task is selected.
    ///
    /// Errors from the body are logged with the task title and returned
    /// unchanged.
    pub fn execute<F>(self, body: F) -> Result<TaskOutcome>
    where
        F: FnOnce() -> Result<()>,
    {
        if !self.should_run {
            debug!(task = %self.title, "skipping task, tags not selected");
            return Ok(TaskOutcome {
                title: self.title,
                status: TaskStatus::Skipped,
                duration: Duration::ZERO,
            });
        }

        info!(task = %self.title, "running");
        let start = Instant::now();

        if let Err(e) = body() {
            error!(task = %self.title, elapsed_ms = start.elapsed().as_millis() as u64, "task failed");
            return Err(e);
        }

        let duration = start.elapsed();
        info!(task = %self.title, elapsed_ms = duration.as_millis() as u64, "task passed");
        Ok(TaskOutcome {
            title: self.title,
            status: TaskStatus::Passed,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use std::cell::Cell;

    #[test]
    fn test_unselected_task_never_calls_body() {
        let called = Cell::new(false);
        let selection = TaskSelection::from_tags([TaskTag::GraalJs]);
        let task = Task::new("Vm: Basic GraalVM Tests", &[TaskTag::Graal], &selection);
        assert!(!task.should_run());

        let outcome = task
            .execute(|| {
                called.set(true);
                Err(GateError::PolicyViolation)
            })
            .unwrap();
        assert!(!called.get());
        assert_eq!(outcome.status, TaskStatus::Skipped);
    }

    #[test]
    fn test_selected_task_runs_body() {
        let called = Cell::new(false);
        let task = Task::new("t", &[TaskTag::Graal], &TaskSelection::all());
        let outcome = task
            .execute(|| {
                called.set(true);
                Ok(())
            })
            .unwrap();
        assert!(called.get());
        assert_eq!(outcome.status, TaskStatus::Passed);
        assert_eq!(outcome.title, "t");
    }

    #[test]
    fn test_body_error_propagates() {
        let task = Task::new("t", &[TaskTag::Graal], &TaskSelection::all());
        let err = task
            .execute(|| Err(GateError::PolicyViolation))
            .unwrap_err();
        assert!(matches!(err, GateError::PolicyViolation));
    }
}
