use std::sync::Mutex;

use crate::repository::TaskRepository;

/// Shared state for the long-lived server: one repository for the process
/// lifetime, handed to every handler behind a mutex so each request runs to
/// completion against the collection before the next mutation starts.
pub struct AppState {
    pub tasks: Mutex<TaskRepository>,
}
