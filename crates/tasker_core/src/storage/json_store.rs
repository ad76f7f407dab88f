use crate::error::AppError;
use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTasks {
    tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "is_zero")]
    last_id: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// The task collection plus the highest ID ever issued, so IDs of deleted
/// tasks are not handed out again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDocument {
    pub tasks: Vec<Task>,
    pub last_id: u64,
}

impl TaskDocument {
    pub fn new(tasks: Vec<Task>) -> Self {
        let last_id = max_id(&tasks);
        Self { tasks, last_id }
    }
}

fn max_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|task| task.id).max().unwrap_or(0)
}

/// Creates the parent directory and an empty document if `path` is missing.
pub fn ensure_document(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|err| AppError::load(format!("{}: {}", parent.display(), err)))?;
    }

    if path.exists() {
        return Ok(());
    }

    tracing::debug!(path = %path.display(), "bootstrapping empty task document");
    save_document(path, &TaskDocument::default())
}

pub fn load_document(path: &Path) -> Result<TaskDocument, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::load(format!("{}: {}", path.display(), err)))?;
    let stored: StoredTasks =
        serde_json::from_str(&content).map_err(|err| AppError::load(err.to_string()))?;

    tracing::debug!(path = %path.display(), count = stored.tasks.len(), "loaded tasks");
    let last_id = stored.last_id.max(max_id(&stored.tasks));
    Ok(TaskDocument {
        tasks: stored.tasks,
        last_id,
    })
}

/// Rewrites the whole document. The content goes to a sibling file first and
/// is renamed over `path`, so readers never observe a half-written document.
pub fn save_document(path: &Path, document: &TaskDocument) -> Result<(), AppError> {
    let stored = StoredTasks {
        tasks: document.tasks.clone(),
        last_id: document.last_id,
    };
    let content =
        serde_json::to_string_pretty(&stored).map_err(|err| AppError::save(err.to_string()))?;

    let staging = staging_path(path);
    std::fs::write(&staging, content)
        .map_err(|err| AppError::save(format!("{}: {}", staging.display(), err)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&staging, permissions)
            .map_err(|err| AppError::save(err.to_string()))?;
    }

    if let Err(err) = std::fs::rename(&staging, path) {
        std::fs::remove_file(&staging).ok();
        return Err(AppError::save(format!("{}: {}", path.display(), err)));
    }

    tracing::debug!(path = %path.display(), count = document.tasks.len(), "saved tasks");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "tasks.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
