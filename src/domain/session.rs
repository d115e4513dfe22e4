use super::task::{Task, TaskId};
use chrono::{DateTime, Local, Utc};

/// Why a draft can't be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a task title.")]
    EmptyTitle,
    #[error("Please pick a deadline.")]
    MissingDeadline,
}

/// Staged values of the form, not yet sent to the server
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub title: String,
    pub deadline: Option<DateTime<Local>>,
    pub completed: bool,
}

impl Draft {
    /// Empty title, deadline at `now`
    pub fn blank(now: DateTime<Local>) -> Self {
        Self {
            title: String::new(),
            deadline: Some(now),
            completed: false,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            deadline: Some(task.deadline_local()),
            completed: task.completed,
        }
    }

    /// Trimmed title and wire deadline, or the first missing piece
    pub fn validate(&self) -> Result<(String, DateTime<Utc>), ValidationError> {
        validate_fields(&self.title, self.deadline)
    }
}

/// Title must be non-blank and a deadline must be staged
pub fn validate_fields(
    title: &str,
    deadline: Option<DateTime<Local>>,
) -> Result<(String, DateTime<Utc>), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let deadline = deadline.ok_or(ValidationError::MissingDeadline)?;
    Ok((title.to_string(), deadline.with_timezone(&Utc)))
}

/// Coarse session state, for display and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Creating,
    Editing,
}

/// In-progress create or edit
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Creating(Draft),
    Editing { target: TaskId, draft: Draft },
}

impl EditSession {
    pub fn state(&self) -> SessionState {
        match self {
            Self::Idle => SessionState::Idle,
            Self::Creating(_) => SessionState::Creating,
            Self::Editing { .. } => SessionState::Editing,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// idle -> creating. Ignored while another session is open.
    pub fn begin_create(&mut self, now: DateTime<Local>) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self::Creating(Draft::blank(now));
        true
    }

    /// idle -> editing, drafts seeded from the task's current values
    pub fn begin_edit(&mut self, task: &Task) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self::Editing {
            target: task.id.clone(),
            draft: Draft::from_task(task),
        };
        true
    }

    /// Back to idle, dropping the drafts
    pub fn close(&mut self) {
        *self = Self::Idle;
    }

    pub fn target(&self) -> Option<&TaskId> {
        match self {
            Self::Editing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Idle => None,
            Self::Creating(draft) | Self::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            Self::Idle => None,
            Self::Creating(draft) | Self::Editing { draft, .. } => Some(draft),
        }
    }
}
