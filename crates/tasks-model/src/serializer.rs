//! Reading and writing task lines in the emoji field format.
//!
//! A task line is a list item with a checkbox, followed by a description and
//! any number of trailing fields:
//!
//! ```text
//! - [ ] write report #work 🆔 abc ⛔️ x,y ⏫ 📅 2024-05-01
//! ```
//!
//! Fields are peeled off the end of the line one by one, in any order. Tags
//! interleaved with fields stay part of the description.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{Priority, Status, Task};
use crate::settings::Settings;

/// Upper bound on the number of fields peeled from one line.
const MAX_FIELD_PASSES: usize = 20;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `⛔` followed by the emoji variation selector, as written on output.
const DEPENDS_ON_SYMBOL: &str = "\u{26D4}\u{FE0F}";
const ID_SYMBOL: &str = "🆔";

static TASK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\s\t>]*)([-*+]|[0-9]+[.)]) +\[(.)\] *(.*)$").unwrap());

static PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([🔺⏫🔼🔽⏬])\x{FE0F}?$").unwrap());
static CREATED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"➕ *(\d{4}-\d{2}-\d{2})$").unwrap());
static START_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"🛫 *(\d{4}-\d{2}-\d{2})$").unwrap());
static SCHEDULED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[⏳⌛] *(\d{4}-\d{2}-\d{2})$").unwrap());
static DUE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[📅📆🗓]\x{FE0F}? *(\d{4}-\d{2}-\d{2})$").unwrap());
static DONE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"✅ *(\d{4}-\d{2}-\d{2})$").unwrap());
static CANCELLED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"❌ *(\d{4}-\d{2}-\d{2})$").unwrap());
static ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"🆔\x{FE0F}? *([a-zA-Z0-9\-_]+)$").unwrap());
static DEPENDS_ON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"⛔\x{FE0F}? *([a-zA-Z0-9\-_]+(?: *, *[a-zA-Z0-9\-_]+ *)*)$").unwrap()
});

static TRAILING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)#[^ !@\#$%\^\&*(),.?":{}|<>]+$"#).unwrap());
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)(#[^ !@\#$%\^\&*(),.?":{}|<>\s]+)"#).unwrap());

/// Parses one markdown line into a task.
///
/// Returns `None` when the line has no checkbox, or when a global filter is
/// configured and the description does not contain it.
pub(crate) fn parse_task_line(line: &str, settings: &Settings) -> Option<Task> {
    let captures = TASK_LINE.captures(line)?;
    let indentation = captures.get(1).map_or("", |m| m.as_str());
    let list_marker = captures.get(2).map_or("", |m| m.as_str());
    let symbol = captures.get(3)?.as_str().chars().next()?;
    let body = captures.get(4).map_or("", |m| m.as_str()).trim();

    let global_filter = settings.global_filter();
    if let Some(filter) = global_filter {
        if !body.contains(filter) {
            tracing::trace!(line, "skipping checkbox line without global filter");
            return None;
        }
    }

    let mut task = Task::new("");
    task.status = Status::from_symbol(symbol);
    task.indentation = indentation.to_string();
    task.list_marker = list_marker.to_string();
    task.original_markdown = line.to_string();

    let mut remaining = body.to_string();
    let mut trailing_tags = String::new();
    for _ in 0..MAX_FIELD_PASSES {
        let mut matched = false;

        if let Some(symbol) = take_suffix(&PRIORITY, &mut remaining) {
            task.priority = Priority::from_symbol(&symbol).unwrap_or_default();
            matched = true;
        }
        for (pattern, slot) in [
            (&*CREATED_DATE, &mut task.created_date),
            (&*START_DATE, &mut task.start_date),
            (&*SCHEDULED_DATE, &mut task.scheduled_date),
            (&*DUE_DATE, &mut task.due_date),
            (&*DONE_DATE, &mut task.done_date),
            (&*CANCELLED_DATE, &mut task.cancelled_date),
        ] {
            if let Some(value) = take_suffix(pattern, &mut remaining) {
                *slot = parse_date(&value, line);
                matched = true;
            }
        }
        if let Some(id) = take_suffix(&ID, &mut remaining) {
            task.id = id;
            matched = true;
        }
        if let Some(ids) = take_suffix(&DEPENDS_ON, &mut remaining) {
            task.depends_on = ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            matched = true;
        }

        // Tags mixed in between fields belong to the description.
        if let Some(found) = TRAILING_TAG.find(&remaining) {
            let tag = found.as_str().trim().to_string();
            let start = found.start();
            remaining.truncate(start);
            remaining.truncate(remaining.trim_end().len());
            trailing_tags = if trailing_tags.is_empty() {
                tag
            } else {
                format!("{tag} {trailing_tags}")
            };
            matched = true;
        }

        if !matched {
            break;
        }
    }

    if !trailing_tags.is_empty() {
        if remaining.is_empty() {
            remaining = trailing_tags;
        } else {
            remaining = format!("{remaining} {trailing_tags}");
        }
    }

    if let Some(filter) = global_filter.filter(|_| settings.remove_global_filter) {
        remaining = remove_global_filter(&remaining, filter);
    }

    task.tags = extract_tags(&remaining);
    task.description = remaining;
    Some(task)
}

/// Renders a task as a markdown line.
pub(crate) fn serialize_task(task: &Task, settings: &Settings) -> String {
    let mut components: Vec<String> = Vec::new();

    let description = match settings.global_filter() {
        Some(filter) if settings.remove_global_filter && !task.description.contains(filter) => {
            if task.description.is_empty() {
                filter.to_string()
            } else {
                format!("{filter} {}", task.description)
            }
        }
        _ => task.description.clone(),
    };
    if !description.is_empty() {
        components.push(description);
    }

    if task.has_id() {
        components.push(format!("{ID_SYMBOL} {}", task.id));
    }
    if !task.depends_on.is_empty() {
        components.push(format!("{DEPENDS_ON_SYMBOL} {}", task.depends_on.join(",")));
    }
    if let Some(symbol) = task.priority.symbol() {
        components.push(symbol.to_string());
    }
    for (symbol, date) in [
        ("➕", task.created_date),
        ("🛫", task.start_date),
        ("⏳", task.scheduled_date),
        ("📅", task.due_date),
        ("❌", task.cancelled_date),
        ("✅", task.done_date),
    ] {
        if let Some(date) = date {
            components.push(format!("{symbol} {}", date.format(DATE_FORMAT)));
        }
    }

    format!(
        "{}{} [{}] {}",
        task.indentation,
        task.list_marker,
        task.status.symbol,
        components.join(" ")
    )
}

/// Collects the `#tags` in a description, in order of appearance.
pub(crate) fn extract_tags(description: &str) -> Vec<String> {
    TAG.captures_iter(description)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Removes a suffix matched by `pattern` from `text`, returning capture group 1.
fn take_suffix(pattern: &Regex, text: &mut String) -> Option<String> {
    let captures = pattern.captures(text.as_str())?;
    let whole = captures.get(0)?;
    let value = captures.get(1)?.as_str().to_string();
    let start = whole.start();
    text.truncate(start);
    text.truncate(text.trim_end().len());
    Some(value)
}

fn parse_date(value: &str, line: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(value, line, error = %e, "ignoring invalid date in task line");
            None
        }
    }
}

fn remove_global_filter(description: &str, filter: &str) -> String {
    description
        .split_whitespace()
        .filter(|word| *word != filter)
        .collect::<Vec<_>>()
        .join(" ")
}
