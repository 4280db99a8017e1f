use crate::error::AppError;
use crate::model::task::{parse_due_date, validate_priority, validate_title};
use crate::model::{Task, TaskStatus};
use crate::storage::json_store::TaskStore;
use std::cmp::Ordering;
use time::{Date, OffsetDateTime, UtcOffset};

/// Read-modify-write operations over a [`TaskStore`].
///
/// Nothing is cached between calls. Two processes mutating the same store
/// race, and the last write wins.
#[derive(Debug, Clone)]
pub struct TaskPlanner {
    store: TaskStore,
}

impl TaskPlanner {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn add(
        &self,
        title: &str,
        priority: i64,
        due_date: Option<&str>,
    ) -> Result<Task, AppError> {
        validate_title(title)?;
        validate_priority(priority)?;
        if let Some(raw) = due_date {
            parse_due_date(raw)?;
        }

        let mut tasks = self.store.load()?;
        let task = Task::new(next_task_id(&tasks)?, title, priority, due_date)?;
        tasks.push(task.clone());
        self.store.save(&tasks)?;

        log::debug!("added task {} with priority {}", task.id, task.priority);
        Ok(task)
    }

    pub fn list(&self) -> Result<Vec<Task>, AppError> {
        self.store.load()
    }

    pub fn complete(&self, task_id: u64) -> Result<Task, AppError> {
        let mut tasks = self.store.load()?;
        let task = find_task_mut(&mut tasks, task_id)?;
        task.mark_done();
        let updated = task.clone();
        self.store.save(&tasks)?;

        log::debug!("completed task {task_id}");
        Ok(updated)
    }

    pub fn prioritize(&self, task_id: u64, priority: i64) -> Result<Task, AppError> {
        let mut tasks = self.store.load()?;
        let task = find_task_mut(&mut tasks, task_id)?;
        let priority = validate_priority(priority)?;
        task.set_priority(priority);
        let updated = task.clone();
        self.store.save(&tasks)?;

        log::debug!("task {task_id} priority set to {priority}");
        Ok(updated)
    }
}

fn find_task_mut(tasks: &mut [Task], task_id: u64) -> Result<&mut Task, AppError> {
    tasks
        .iter_mut()
        .find(|task| task.id == task_id)
        .ok_or_else(|| AppError::not_found(format!("task {task_id} not found")))
}

pub fn next_task_id(tasks: &[Task]) -> Result<u64, AppError> {
    match tasks.iter().map(|task| task.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| AppError::corrupt_store("task id space exhausted")),
    }
}

/// Ordering key for list views: overdue first, then open before done, then
/// earliest due date (missing or unparseable last), then priority, then id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    overdue_rank: u8,
    status: TaskStatus,
    due_date: Date,
    priority: u32,
    id: u64,
}

pub fn sort_key(task: &Task, today: Date) -> SortKey {
    SortKey {
        overdue_rank: if task.is_overdue(today) { 0 } else { 1 },
        status: task.status,
        due_date: task.due_date_as_date().unwrap_or(Date::MAX),
        priority: task.priority,
        id: task.id,
    }
}

pub fn compare_tasks(a: &Task, b: &Task, today: Date) -> Ordering {
    sort_key(a, today).cmp(&sort_key(b, today))
}

pub fn sort_tasks(tasks: &mut [Task], today: Date) {
    tasks.sort_by_cached_key(|task| sort_key(task, today));
}

pub fn today_local() -> Date {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetDateTime::now_utc().to_offset(offset).date()
}
