//! Copy-on-write edits of task relationships.
//!
//! Editing never mutates a task. Each function returns [`Cow::Borrowed`]
//! with the original reference when the edit changes nothing, and
//! [`Cow::Owned`] with a fresh copy otherwise.
//!
//! # Example
//!
//! ```
//! use std::borrow::Cow;
//! use tasks_model_rs::edit::set_dependencies;
//! use tasks_model_rs::Task;
//!
//! let first = Task::from_line("- [ ] first 🆔 12345").unwrap();
//! let second = Task::from_line("- [ ] second 🆔 67890").unwrap();
//! let third = Task::from_line("- [ ] third ⛔️ 12345,67890").unwrap();
//! let all = [first.clone(), second.clone(), third.clone()];
//!
//! let unchanged = set_dependencies(&third, &all, &[&first, &second], &[]);
//! assert!(matches!(unchanged, Cow::Borrowed(_)));
//!
//! let edited = set_dependencies(&third, &all, &[&first], &[]);
//! assert_eq!(edited.to_file_line_string(), "- [ ] third ⛔️ 12345");
//! ```

use std::borrow::Cow;

use crate::models::Task;

/// Rewrites the ids `task` depends on from a list of task references.
///
/// `all_tasks` is the task universe the references were drawn from and
/// `depended_upon` the tasks that should depend on `task`; neither changes
/// the returned task (see [`set_depended_upon`] for the reverse edges).
///
/// A task that currently has no dependencies is returned unchanged. The new
/// id list keeps the order of `depends_on`; if it equals the current list
/// the original task is returned.
pub fn set_dependencies<'a>(
    task: &'a Task,
    all_tasks: &[Task],
    depends_on: &[&Task],
    depended_upon: &[&Task],
) -> Cow<'a, Task> {
    if task.depends_on.is_empty() {
        return Cow::Borrowed(task);
    }

    let new_depends_on: Vec<String> = depends_on.iter().map(|dep| dep.id.clone()).collect();
    let edited = task.with_depends_on(new_depends_on);
    if let Cow::Owned(ref new_task) = edited {
        tracing::debug!(
            universe = all_tasks.len(),
            dependents = depended_upon.len(),
            from = ?task.depends_on,
            to = ?new_task.depends_on,
            "rewrote task dependencies"
        );
    }
    edited
}

/// Makes exactly the tasks in `depended_upon` depend on `task`.
///
/// Returns one entry per task in `all_tasks`, in the same order. Entries
/// that need no change borrow from `all_tasks`. `task` itself is never
/// edited, and a task without an id cannot be depended upon, so every entry
/// is borrowed in that case.
pub fn set_depended_upon<'a>(
    task: &Task,
    all_tasks: &'a [Task],
    depended_upon: &[&Task],
) -> Vec<Cow<'a, Task>> {
    if !task.has_id() {
        return all_tasks.iter().map(Cow::Borrowed).collect();
    }

    all_tasks
        .iter()
        .map(|other| {
            if std::ptr::eq(other, task) {
                return Cow::Borrowed(other);
            }

            let wanted = depended_upon
                .iter()
                .any(|dependent| std::ptr::eq(*dependent, other) || *dependent == other);
            let present = other.depends_on.iter().any(|id| *id == task.id);

            match (wanted, present) {
                (true, false) => {
                    let mut ids = other.depends_on.clone();
                    ids.push(task.id.clone());
                    other.with_depends_on(ids)
                }
                (false, true) => {
                    let ids = other
                        .depends_on
                        .iter()
                        .filter(|id| **id != task.id)
                        .cloned()
                        .collect();
                    other.with_depends_on(ids)
                }
                _ => Cow::Borrowed(other),
            }
        })
        .collect()
}
