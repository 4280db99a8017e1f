use crate::config::{Config, ConfigOverrides};
use crate::error::AppError;
use crate::model::Task;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = "revit_tasks.json";
const STORE_ENV_VAR: &str = "PLANNER_STORE_PATH";

/// The JSON file holding every task, read and rewritten in full per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    path: PathBuf,
}

/// A `store_path` given on the command line beats the environment, which
/// beats the config file.
pub fn store_path(config: &Config, overrides: &ConfigOverrides) -> PathBuf {
    if let Some(path) = overrides.store_path.as_deref()
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    if let Some(path) = config.store_path.as_deref()
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    PathBuf::from(STORE_FILE_NAME)
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Task>, AppError> {
        if !self.path.exists() {
            log::debug!("no store at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|err| {
            AppError::corrupt_store(format!(
                "task store {} is not valid JSON ({}); fix or remove the file",
                self.path.display(),
                err
            ))
        })?;

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            let problem = match task.check_stored() {
                Err(problem) => Some(problem),
                Ok(()) if !seen.insert(task.id) => {
                    Some(format!("task_id {} is duplicated", task.id))
                }
                Ok(()) => None,
            };
            if let Some(problem) = problem {
                return Err(AppError::corrupt_store(format!(
                    "task store {} is invalid ({}); fix or remove the file",
                    self.path.display(),
                    problem
                )));
            }
        }

        log::debug!("loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    pub fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|err| AppError::io(format!("{}: {}", parent.display(), err)))?;
        }

        let content = serde_json::to_string_pretty(tasks)
            .map_err(|err| AppError::io(err.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        log::debug!("saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
