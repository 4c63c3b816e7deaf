use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{error, warn};

use crate::error::TaskError;
use crate::models::task::Task;

/// File the task list is persisted under, inside the configured storage
/// directory. Plays the role of the single well-known storage key.
pub const TASKS_STORAGE_FILE: &str = "task_manager_tasks.json";

/// Best-effort key-value boundary the repository persists through.
///
/// Failures never surface to the caller: `load` falls back to an empty
/// collection and `save` logs and moves on. Durability is not guaranteed.
pub trait TaskStore: Send {
    /// Returns the persisted collection, or an empty one if nothing usable
    /// is stored.
    fn load(&self) -> Vec<Task>;

    /// Persists the full collection, replacing whatever was stored before.
    fn save(&self, tasks: &[Task]);
}

/// Stores the task list as a single JSON array on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(TASKS_STORAGE_FILE),
        }
    }

    fn try_load(&self) -> Result<Vec<Task>, TaskError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| TaskError::StorageUnavailable(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| TaskError::StorageUnavailable(e.to_string()))
    }

    fn try_save(&self, tasks: &[Task]) -> Result<(), TaskError> {
        let raw = serde_json::to_string_pretty(tasks)
            .map_err(|e| TaskError::StorageUnavailable(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| TaskError::StorageUnavailable(e.to_string()))
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("Error reading tasks from {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) {
        if let Err(e) = self.try_save(tasks) {
            error!("Error saving tasks to {}: {}", self.path.display(), e);
        }
    }
}

/// In-memory store. Cloning yields a handle onto the same saved state, which
/// is how tests observe the repository's write-after-mutation side effect.
#[derive(Clone, Default)]
pub struct MemoryStore {
    saved: Arc<Mutex<Vec<Task>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection as of the last `save`.
    pub fn snapshot(&self) -> Vec<Task> {
        self.saved.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Vec<Task> {
        self.snapshot()
    }

    fn save(&self, tasks: &[Task]) {
        if let Ok(mut saved) = self.saved.lock() {
            *saved = tasks.to_vec();
        }
    }
}

/// Store for the non-persistent demo deployments: loads nothing, keeps
/// nothing.
pub struct NoopStore;

impl TaskStore for NoopStore {
    fn load(&self) -> Vec<Task> {
        Vec::new()
    }

    fn save(&self, _tasks: &[Task]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_task(id: &str, completed: bool) -> Task {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn file_store_round_trip_preserves_content_and_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        let tasks = vec![sample_task("b", true), sample_task("a", false)];
        store.save(&tasks);

        assert_eq!(store.load(), tasks);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TASKS_STORAGE_FILE), "not json{").unwrap();

        let store = JsonFileStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_to_unwritable_path_is_swallowed() {
        let store = JsonFileStore::new("/nonexistent/task-manager-test");
        store.save(&[sample_task("a", false)]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn memory_store_shares_state_across_clones() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.save(&[sample_task("a", false)]);
        assert_eq!(handle.snapshot().len(), 1);
        assert_eq!(handle.load(), store.snapshot());
    }
}
