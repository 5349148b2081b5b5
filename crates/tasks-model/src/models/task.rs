//! Task model.
//!
//! This module defines the [`Task`] struct and its status and priority types.
//! A task is the payload carried by a task node in a
//! [`ListItemTree`](crate::ListItemTree); its place in the hierarchy lives in
//! the tree, not in the task.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::serializer;
use crate::settings::Settings;

/// A task parsed from a markdown checkbox line.
///
/// Tasks are immutable values: every `with_*` method returns a [`Cow`] that
/// borrows the original when nothing changes, so callers can detect no-op
/// edits with [`std::ptr::eq`] instead of a deep comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// The checkbox status.
    pub status: Status,

    /// The description with the list marker, checkbox and trailing fields removed.
    pub description: String,

    /// Whitespace and blockquote markers before the list marker.
    #[serde(default)]
    pub indentation: String,

    /// The list marker (`-`, `*`, `+`, `1.`, `1)`).
    pub list_marker: String,

    /// Task priority.
    #[serde(default)]
    pub priority: Priority,

    /// When the task was created (`➕`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,

    /// When work on the task may start (`🛫`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// When the task is planned (`⏳`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,

    /// When the task is due (`📅`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// When the task was completed (`✅`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_date: Option<NaiveDate>,

    /// When the task was cancelled (`❌`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_date: Option<NaiveDate>,

    /// Identity of the task (`🆔`), empty when absent.
    #[serde(default)]
    pub id: String,

    /// Ids of the tasks this task depends on (`⛔`), in line order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Tags found in the description, including the leading `#`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// The line this task was read from.
    #[serde(default)]
    pub original_markdown: String,
}

impl Task {
    /// Creates a to-do task with the given description and a `-` marker.
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        let tags = serializer::extract_tags(&description);
        Self {
            status: Status::TODO,
            description,
            indentation: String::new(),
            list_marker: "-".to_string(),
            priority: Priority::None,
            created_date: None,
            start_date: None,
            scheduled_date: None,
            due_date: None,
            done_date: None,
            cancelled_date: None,
            id: String::new(),
            depends_on: Vec::new(),
            tags,
            original_markdown: String::new(),
        }
    }

    /// Parses a task from one markdown line using default settings.
    ///
    /// Returns `None` if the line is not a checkbox list item.
    ///
    /// # Example
    ///
    /// ```
    /// use tasks_model_rs::Task;
    ///
    /// let task = Task::from_line("- [ ] write report 🆔 abc ⛔️ x,y").unwrap();
    /// assert_eq!(task.description, "write report");
    /// assert_eq!(task.id, "abc");
    /// assert_eq!(task.depends_on, vec!["x", "y"]);
    ///
    /// assert!(Task::from_line("- just a list item").is_none());
    /// ```
    pub fn from_line(line: &str) -> Option<Self> {
        serializer::parse_task_line(line, &Settings::default())
    }

    /// Parses a task from one markdown line, honouring the global filter.
    pub fn from_line_with(line: &str, settings: &Settings) -> Option<Self> {
        serializer::parse_task_line(line, settings)
    }

    /// Renders the task back to a markdown line.
    pub fn to_file_line_string(&self) -> String {
        serializer::serialize_task(self, &Settings::default())
    }

    /// Renders the task back to a markdown line, re-adding a removed global filter.
    pub fn to_file_line_string_with(&self, settings: &Settings) -> String {
        serializer::serialize_task(self, settings)
    }

    /// Returns true if this task has an id.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns true if the status counts as finished (done or cancelled).
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns a task depending on `depends_on`, borrowing `self` if unchanged.
    pub fn with_depends_on(&self, depends_on: Vec<String>) -> Cow<'_, Task> {
        if self.depends_on == depends_on {
            return Cow::Borrowed(self);
        }
        Cow::Owned(Task {
            depends_on,
            ..self.clone()
        })
    }

    /// Returns a task with the given id, borrowing `self` if unchanged.
    pub fn with_id(&self, id: impl Into<String>) -> Cow<'_, Task> {
        let id = id.into();
        if self.id == id {
            return Cow::Borrowed(self);
        }
        Cow::Owned(Task { id, ..self.clone() })
    }

    /// Returns a task with the given status, borrowing `self` if unchanged.
    pub fn with_status(&self, status: Status) -> Cow<'_, Task> {
        if self.status == status {
            return Cow::Borrowed(self);
        }
        Cow::Owned(Task {
            status,
            ..self.clone()
        })
    }
}

/// Checkbox status of a task: the raw symbol plus its meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    /// The character between the checkbox brackets.
    pub symbol: char,
    /// What the symbol means.
    pub kind: StatusType,
}

impl Status {
    /// `[ ]`
    pub const TODO: Status = Status {
        symbol: ' ',
        kind: StatusType::Todo,
    };
    /// `[/]`
    pub const IN_PROGRESS: Status = Status {
        symbol: '/',
        kind: StatusType::InProgress,
    };
    /// `[x]`
    pub const DONE: Status = Status {
        symbol: 'x',
        kind: StatusType::Done,
    };
    /// `[-]`
    pub const CANCELLED: Status = Status {
        symbol: '-',
        kind: StatusType::Cancelled,
    };

    /// Maps a checkbox symbol to a status. Unknown symbols are to-do.
    pub fn from_symbol(symbol: char) -> Self {
        let kind = match symbol {
            'x' | 'X' => StatusType::Done,
            '-' => StatusType::Cancelled,
            '/' => StatusType::InProgress,
            _ => StatusType::Todo,
        };
        Self { symbol, kind }
    }

    /// Returns true for done and cancelled tasks.
    pub fn is_completed(&self) -> bool {
        matches!(self.kind, StatusType::Done | StatusType::Cancelled)
    }
}

/// The meaning of a checkbox symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    /// Not started.
    Todo,
    /// Started but not finished.
    InProgress,
    /// Finished.
    Done,
    /// Abandoned.
    Cancelled,
}

/// Task priority, from highest to lowest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// `🔺`
    Highest,
    /// `⏫`
    High,
    /// `🔼`
    Medium,
    /// No priority marker.
    #[default]
    None,
    /// `🔽`
    Low,
    /// `⏬`
    Lowest,
}

impl Priority {
    /// Returns the emoji marker for this priority, if it has one.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Priority::Highest => Some("🔺"),
            Priority::High => Some("⏫"),
            Priority::Medium => Some("🔼"),
            Priority::None => None,
            Priority::Low => Some("🔽"),
            Priority::Lowest => Some("⏬"),
        }
    }

    /// Maps an emoji marker to a priority.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "🔺" => Some(Priority::Highest),
            "⏫" => Some(Priority::High),
            "🔼" => Some(Priority::Medium),
            "🔽" => Some(Priority::Low),
            "⏬" => Some(Priority::Lowest),
            _ => None,
        }
    }

    /// Parses a priority name as used in queries (`high`, `none`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "highest" => Some(Priority::Highest),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "lowest" => Some(Priority::Lowest),
            _ => None,
        }
    }
}
