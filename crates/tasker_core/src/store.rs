use crate::config;
use crate::error::AppError;
use crate::model::{Ratio, Task, TaskStatus};
use crate::storage::json_store::{self, TaskDocument};
use std::path::{Path, PathBuf};
use time::{Duration, OffsetDateTime};

const RECENT_WINDOW: Duration = Duration::hours(24);

/// In-memory task collection mirrored to a JSON document.
///
/// Every mutation validates first, then rewrites the whole document, and only
/// commits to memory once the write succeeded.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    last_id: u64,
    initialized: bool,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            tasks: Vec::new(),
            last_id: 0,
            initialized: false,
        }
    }

    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::new(config::data_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn init(&mut self) -> Result<(), AppError> {
        if self.initialized {
            return Ok(());
        }

        json_store::ensure_document(&self.path)?;
        let document = json_store::load_document(&self.path)?;
        self.tasks = document.tasks;
        self.last_id = document.last_id;
        self.initialized = true;
        Ok(())
    }

    pub fn add_task(&mut self, description: &str) -> Result<Task, AppError> {
        self.ensure_initialized()?;
        let description = validate_description(description)?;

        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::invalid_data("task ID space exhausted"))?;
        let task = Task::new(id, description, OffsetDateTime::now_utc());
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next, id)?;

        tracing::info!(id = task.id, "task added");
        Ok(task)
    }

    pub fn update_task(&mut self, id: &str, description: &str) -> Result<Task, AppError> {
        self.ensure_initialized()?;
        let id = parse_id(id)?;
        let description = validate_description(description)?;
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.description = description;
        task.updated_at = Some(OffsetDateTime::now_utc());
        let updated = task.clone();
        self.commit(next, self.last_id)?;

        tracing::info!(id, "task description updated");
        Ok(updated)
    }

    pub fn update_status(&mut self, id: &str, status: &str) -> Result<Task, AppError> {
        self.ensure_initialized()?;
        let id = parse_id(id)?;
        let status: TaskStatus = status.parse()?;
        let index = self.position(id)?;

        if self.tasks[index].status == status {
            return Err(AppError::StatusConflict(status));
        }

        let now = OffsetDateTime::now_utc();
        let mut next = self.tasks.clone();
        let task = &mut next[index];
        let previous = task.status;
        task.status = status;
        task.updated_at = Some(now);
        task.completed_at = (status == TaskStatus::Done).then_some(now);
        let updated = task.clone();
        self.commit(next, self.last_id)?;

        tracing::info!(id, from = %previous, to = %status, "task status changed");
        Ok(updated)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task, AppError> {
        self.ensure_initialized()?;
        let id = parse_id(id)?;
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit(next, self.last_id)?;

        tracing::info!(id, "task deleted");
        Ok(removed)
    }

    pub fn all_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.ensure_initialized()?;
        Ok(self.tasks.clone())
    }

    pub fn tasks_by_status(&self, status: &str) -> Result<Vec<Task>, AppError> {
        self.ensure_initialized()?;
        let status: TaskStatus = status.parse()?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect())
    }

    pub fn ratio(&self) -> Result<Ratio, AppError> {
        self.ensure_initialized()?;
        let completed = self
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .count();
        Ok(Ratio::of(completed, self.tasks.len()))
    }

    pub fn completed_last_24_hours(&self) -> Result<usize, AppError> {
        self.completed_since(OffsetDateTime::now_utc() - RECENT_WINDOW)
    }

    /// Counts tasks whose completion stamp is at or after `cutoff`.
    pub fn completed_since(&self, cutoff: OffsetDateTime) -> Result<usize, AppError> {
        self.ensure_initialized()?;
        Ok(self
            .tasks
            .iter()
            .filter(|task| task.completed_at.is_some_and(|at| at >= cutoff))
            .count())
    }

    fn commit(&mut self, tasks: Vec<Task>, last_id: u64) -> Result<(), AppError> {
        let document = TaskDocument { tasks, last_id };
        json_store::save_document(&self.path, &document)?;
        self.tasks = document.tasks;
        self.last_id = document.last_id;
        Ok(())
    }

    fn position(&self, id: u64) -> Result<usize, AppError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(AppError::NotFound(id))
    }

    fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.initialized {
            Ok(())
        } else {
            Err(AppError::NotInitialized)
        }
    }
}

/// Orders tasks by status rank, then by ID within the same status.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| (task.status.rank(), task.id));
}

/// Accepts a positive decimal integer, optionally signed with `+`.
/// Fractional or exponent forms such as `5.0` and `1e1` are rejected.
pub fn parse_id(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_input("Invalid task ID")),
    }
}

fn validate_description(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Description cannot be empty"));
    }
    Ok(trimmed.to_string())
}
