use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TaskError;
use crate::models::task::{Task, UpdateTaskRequest};
use crate::storage::TaskStore;

/// Clock capability injected into the repository, so mutation timestamps are
/// deterministic under test.
pub struct Clock(Box<dyn Fn() -> DateTime<Utc> + Send>);

impl Clock {
    /// Wall-clock time.
    pub fn system() -> Self {
        Self(Box::new(Utc::now))
    }

    pub fn from_fn(f: impl Fn() -> DateTime<Utc> + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.0)()
    }
}

/// Owns the canonical in-memory task collection.
///
/// All task construction and mutation goes through here. Storage order is
/// newest first; display order is storage order. After every successful
/// mutation the full collection is written through the store. Best effort:
/// an unavailable store never rolls the mutation back.
pub struct TaskRepository {
    tasks: Vec<Task>,
    store: Box<dyn TaskStore>,
    clock: Clock,
}

impl TaskRepository {
    /// Repository bootstrapped from whatever the store holds.
    pub fn new(store: Box<dyn TaskStore>, clock: Clock) -> Self {
        let tasks = store.load();
        Self { tasks, store, clock }
    }

    /// Repository starting from a given collection, e.g. the demo seed.
    pub fn with_tasks(store: Box<dyn TaskStore>, clock: Clock, tasks: Vec<Task>) -> Self {
        Self { tasks, store, clock }
    }

    /// All tasks in storage order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Create a new task and prepend it to the collection.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::ValidationFailed);
        }

        let now = self.clock.now();
        let task = Task {
            id: format!("task_{}", Uuid::new_v4()),
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(0, task.clone());
        self.persist();
        Ok(task)
    }

    /// Flip a task's completion flag.
    pub fn toggle(&mut self, id: &str) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound)?;
        task.completed = !task.completed;
        task.updated_at = now;
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    /// Apply a partial update. The task is left untouched if the resulting
    /// title would be empty.
    pub fn update(&mut self, id: &str, changes: &UpdateTaskRequest) -> Result<Task, TaskError> {
        let now = self.clock.now();
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound)?;

        if let Some(title) = &changes.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(TaskError::ValidationFailed);
            }
            task.title = title.to_string();
        }
        if let Some(description) = &changes.description {
            task.description = description.trim().to_string();
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        task.updated_at = now;

        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    /// Remove a task and return it.
    pub fn delete(&mut self, id: &str) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Remove every completed task, preserving the relative order of the
    /// rest. Returns how many were removed (possibly 0).
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let cleared = before - self.tasks.len();
        self.persist();
        cleared
    }

    fn persist(&self) {
        self.store.save(&self.tasks);
    }
}
