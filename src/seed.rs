use crate::models::task::Task;
use crate::repository::Clock;

/// The two tasks every non-persistent demo deployment starts with.
pub fn demo_tasks(clock: &Clock) -> Vec<Task> {
    let now = clock.now();
    vec![
        Task {
            id: "demo_1".to_string(),
            title: "Welcome to Task Manager".to_string(),
            description: "This is your first task! Click the circle to mark it as complete."
                .to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        },
        Task {
            id: "demo_2".to_string(),
            title: "Try adding a new task".to_string(),
            description: "Use the form above to add your own tasks.".to_string(),
            completed: false,
            created_at: now,
            updated_at: now,
        },
    ]
}
