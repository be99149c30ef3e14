use super::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    /// Allowed moves: start, finish, fail, pause (back to pending) and reopen a
    /// completed step. Failed steps stay failed.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Failed)
                | (Self::InProgress, Self::Pending)
                | (Self::Completed, Self::InProgress)
        )
    }

    const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Snapshot status of a whole workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl WorkflowStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub status: StepStatus,
    pub due_on: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkflowStep {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Pending,
            due_on: None,
            completed_at: None,
        }
    }

    pub fn with_due_on(mut self, due_on: NaiveDate) -> Self {
        self.due_on = Some(due_on);
        self
    }

    /// Map a boolean checklist component (e.g. "legal review done") onto a step.
    pub fn from_flag(name: impl Into<String>, done: bool) -> Self {
        let mut step = Self::pending(name);
        if done {
            step.status = StepStatus::Completed;
        }
        step
    }

    pub fn transition(&mut self, next: StepStatus, at: DateTime<Utc>) -> Result<(), EngineError> {
        if self.status == next {
            return Ok(());
        }

        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidTransition {
                step: self.name.clone(),
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.completed_at = match next {
            StepStatus::Completed => Some(at),
            _ => None,
        };

        Ok(())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_on.is_some_and(|due| due < today)
    }
}

pub fn percent_complete(steps: &[WorkflowStep]) -> u8 {
    if steps.is_empty() {
        return 0;
    }

    let completed = steps
        .iter()
        .filter(|step| step.status == StepStatus::Completed)
        .count();

    ((completed as f64 / steps.len() as f64) * 100.0).round() as u8
}

pub fn overall_status(steps: &[WorkflowStep]) -> WorkflowStatus {
    if steps.iter().any(|step| step.status == StepStatus::Failed) {
        return WorkflowStatus::Failed;
    }

    if steps.is_empty() || steps.iter().all(|step| step.status == StepStatus::Pending) {
        return WorkflowStatus::Pending;
    }

    if steps.iter().all(|step| step.status == StepStatus::Completed) {
        WorkflowStatus::Completed
    } else {
        WorkflowStatus::InProgress
    }
}

/// Ordered sequence of steps owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn new<I, S>(step_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            steps: step_names.into_iter().map(WorkflowStep::pending).collect(),
        }
    }

    pub fn from_steps(steps: Vec<WorkflowStep>) -> Self {
        Self { steps }
    }

    pub fn set_status(
        &mut self,
        step_name: &str,
        status: StepStatus,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.name == step_name)
            .ok_or_else(|| EngineError::StepNotFound(step_name.to_owned()))?;

        step.transition(status, at)
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    pub fn percent_complete(&self) -> u8 {
        percent_complete(&self.steps)
    }

    pub fn overall_status(&self) -> WorkflowStatus {
        overall_status(&self.steps)
    }

    pub fn overdue_steps(&self, today: NaiveDate) -> Vec<&WorkflowStep> {
        let mut overdue: Vec<&WorkflowStep> = self
            .steps
            .iter()
            .filter(|step| step.is_overdue(today))
            .collect();
        overdue.sort_by_key(|step| step.due_on);
        overdue
    }
}
