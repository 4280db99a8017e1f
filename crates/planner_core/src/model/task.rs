use crate::error::AppError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub const DEFAULT_PRIORITY: u32 = 3;

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    pub id: u64,
    pub title: String,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    Done,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
        }
    }
}

impl Task {
    /// Builds an open task, rejecting a blank title, a non-positive priority
    /// or a due date that is not a `YYYY-MM-DD` calendar date.
    pub fn new(
        id: u64,
        title: &str,
        priority: i64,
        due_date: Option<&str>,
    ) -> Result<Self, AppError> {
        let title = validate_title(title)?;
        let priority = validate_priority(priority)?;
        let due_date = due_date.map(parse_due_date).transpose()?;

        Ok(Self {
            id,
            title,
            priority,
            status: TaskStatus::Open,
            due_date: due_date.map(format_due_date),
        })
    }

    pub fn mark_done(&mut self) {
        self.status = TaskStatus::Done;
    }

    pub fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    /// Stored due dates are parsed leniently: anything unparseable counts as
    /// no due date at all.
    pub fn due_date_as_date(&self) -> Option<Date> {
        let raw = self.due_date.as_deref()?;
        match Date::parse(raw, DUE_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                log::debug!("task {} has unparseable due date {raw:?}", self.id);
                None
            }
        }
    }

    /// Checks the invariants a stored record must hold to be loaded.
    pub fn check_stored(&self) -> Result<(), String> {
        if self.id == 0 {
            return Err("task_id must be positive".to_string());
        }
        if self.title.trim().is_empty() {
            return Err(format!("task {} has a blank title", self.id));
        }
        if self.priority == 0 {
            return Err(format!("task {} has priority 0", self.id));
        }
        Ok(())
    }

    pub fn is_overdue(&self, today: Date) -> bool {
        if self.status == TaskStatus::Done {
            return false;
        }
        match self.due_date_as_date() {
            Some(due) => due < today,
            None => false,
        }
    }
}

pub fn validate_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_priority(priority: i64) -> Result<u32, AppError> {
    if priority <= 0 {
        return Err(AppError::invalid_input("priority must be a positive integer"));
    }
    u32::try_from(priority).map_err(|_| AppError::invalid_input("priority is too large"))
}

pub fn parse_due_date(raw: &str) -> Result<Date, AppError> {
    let trimmed = raw.trim();
    let invalid = || AppError::invalid_input("due date must be in YYYY-MM-DD format");
    if !has_iso_date_shape(trimmed) {
        return Err(invalid());
    }

    let date = Date::parse(trimmed, DUE_DATE_FORMAT).map_err(|_| invalid())?;
    if date.year() < 1 {
        return Err(invalid());
    }
    Ok(date)
}

// Exactly `dddd-dd-dd`; the `[year]` component alone would also take a sign.
fn has_iso_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

pub fn format_due_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
