use super::session::{validate_fields, Draft, EditSession, ValidationError};
use super::task::{NewTask, Task, TaskId};
use crate::api::{ApiError, TodoApi};
use chrono::{DateTime, Local};

/// Failure of a store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session points at a task that's no longer in the store
    #[error("task {0} no longer exists")]
    MissingTarget(TaskId),

    #[error("no edit in progress")]
    NotEditing,
}

/// Local mirror of the server's task list.
///
/// Only records that came back from the server (and so carry an id) are held.
/// Order is the server's order, with newly created tasks appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    // Reducers, applied once the server has answered

    /// Replace everything with a fresh server listing
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Swap in `task` at the position of the record with the same id
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(index))
    }

    // Request builders, no side effects

    /// Create body for a title/deadline pair
    pub fn prepare_create(
        title: &str,
        deadline: Option<DateTime<Local>>,
    ) -> Result<NewTask, ValidationError> {
        let (title, deadline) = validate_fields(title, deadline)?;
        Ok(NewTask::new(title, deadline))
    }

    /// Full record with completion flipped, or None if the id isn't cached
    pub fn prepare_toggle(&self, id: &TaskId) -> Option<Task> {
        self.get(id).map(Task::toggled)
    }

    /// Current record of `target` with the draft's title, deadline and completed applied.
    /// Everything else (description, unknown fields) is carried over.
    pub fn prepare_edit(&self, target: &TaskId, draft: &Draft) -> Result<Task, StoreError> {
        let (title, deadline) = draft.validate()?;
        let current = self
            .get(target)
            .ok_or_else(|| StoreError::MissingTarget(target.clone()))?;
        Ok(Task {
            title,
            deadline,
            completed: draft.completed,
            ..current.clone()
        })
    }

    // Whole operations: validate, call the API, patch on success

    /// Refresh from the server. On failure the old contents stay.
    pub async fn load(&mut self, api: &dyn TodoApi) -> Result<(), StoreError> {
        let tasks = api.list().await?;
        tracing::info!("loaded {} tasks", tasks.len());
        self.replace_all(tasks);
        Ok(())
    }

    /// Create a task and append the server's record
    pub async fn add(
        &mut self,
        api: &dyn TodoApi,
        title: &str,
        deadline: Option<DateTime<Local>>,
    ) -> Result<&Task, StoreError> {
        let body = Self::prepare_create(title, deadline)?;
        let created = api.create(&body).await?;
        tracing::info!("created task {}", created.id);
        self.append(created);
        let last = self.tasks.len() - 1;
        Ok(&self.tasks[last])
    }

    /// Flip completion. An id missing from the store is a silent no-op (`Ok(None)`).
    pub async fn toggle_completion(
        &mut self,
        api: &dyn TodoApi,
        id: &TaskId,
    ) -> Result<Option<&Task>, StoreError> {
        let Some(updated) = self.prepare_toggle(id) else {
            tracing::debug!("toggle ignored, task {} not cached", id);
            return Ok(None);
        };
        let saved = api.update(&updated).await?;
        tracing::info!("task {} completed={}", id, saved.completed);
        self.replace(saved);
        Ok(self.get(id))
    }

    /// Delete on the server, then drop the local record
    pub async fn remove(&mut self, api: &dyn TodoApi, id: &TaskId) -> Result<(), StoreError> {
        api.delete(id).await?;
        tracing::info!("deleted task {}", id);
        self.remove_by_id(id);
        Ok(())
    }

    /// Save an edit session. On success the session closes; on failure it stays open.
    pub async fn commit_edit(
        &mut self,
        api: &dyn TodoApi,
        session: &mut EditSession,
    ) -> Result<(), StoreError> {
        let EditSession::Editing { target, draft } = &*session else {
            return Err(StoreError::NotEditing);
        };
        let updated = self.prepare_edit(target, draft)?;
        let saved = api.update(&updated).await?;
        tracing::info!("saved edit of task {}", saved.id);
        self.replace(saved);
        session.close();
        Ok(())
    }
}
