//! Task tags and tag selection

use anyhow::Result;
use std::collections::BTreeSet;

/// Tag a gate task is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskTag {
    /// Basic image checks (capability probe + version banner)
    Graal,
    /// Graal.js suite
    GraalJs,
}

impl TaskTag {
    pub const ALL: [TaskTag; 2] = [TaskTag::Graal, TaskTag::GraalJs];
}

impl std::fmt::Display for TaskTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskTag::Graal => write!(f, "graal"),
            TaskTag::GraalJs => write!(f, "graal-js"),
        }
    }
}

impl std::str::FromStr for TaskTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graal" => Ok(TaskTag::Graal),
            "graal-js" => Ok(TaskTag::GraalJs),
            _ => anyhow::bail!("Unknown task tag: {s}. Use: graal, graal-js"),
        }
    }
}

/// Which tags were requested for a run.
///
/// An empty selection enables every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSelection {
    tags: BTreeSet<TaskTag>,
}

impl TaskSelection {
    /// Select every task
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_tags(tags: impl IntoIterator<Item = TaskTag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
        }
    }

    /// Parse a comma-separated tag list such as `graal,graal-js`
    pub fn parse(list: &str) -> Result<Self> {
        let tags = list
            .split(',')
            .filter(|t| !t.trim().is_empty())
            .map(str::parse::<TaskTag>)
            .collect::<Result<BTreeSet<TaskTag>>>()?;
        Ok(Self { tags })
    }

    pub fn selects_everything(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether a task registered under `task_tags` should run
    pub fn enables(&self, task_tags: &[TaskTag]) -> bool {
        self.selects_everything() || task_tags.iter().any(|t| self.tags.contains(t))
    }

    pub fn tags(&self) -> impl Iterator<Item = TaskTag> + '_ {
        self.tags.iter().copied()
    }
}

impl std::fmt::Display for TaskSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.selects_everything() {
            return write!(f, "all");
        }
        let names: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(","))
    }
}
