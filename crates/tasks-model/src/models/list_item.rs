//! One markdown list line and its place in the hierarchy.

use std::sync::LazyLock;

use regex::Regex;

use super::task::Task;
use crate::tree::ItemId;

/// Indentation or blockquote run, list marker, then at most one space.
static LIST_ITEM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\s\t>]*)([-*+]|[0-9]+[.)]) ?").unwrap());

/// What kind of list line a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A list line without a checkbox (or one the settings do not treat as a task).
    Plain,
    /// A task line.
    Task(Box<Task>),
}

/// A node in a [`ListItemTree`](crate::ListItemTree).
///
/// The parent link is set when the node is created and never changes; the
/// children grow as later nodes name this one as their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    original_markdown: String,
    description: String,
    parent: Option<ItemId>,
    children: Vec<ItemId>,
    kind: ItemKind,
}

impl ListItem {
    pub(crate) fn plain(line: &str, parent: Option<ItemId>) -> Self {
        Self {
            original_markdown: line.to_string(),
            description: parse_description(line),
            parent,
            children: Vec::new(),
            kind: ItemKind::Plain,
        }
    }

    pub(crate) fn task(task: Task, parent: Option<ItemId>) -> Self {
        Self {
            original_markdown: task.original_markdown.clone(),
            description: task.description.clone(),
            parent,
            children: Vec::new(),
            kind: ItemKind::Task(Box::new(task)),
        }
    }

    pub(crate) fn push_child(&mut self, child: ItemId) {
        self.children.push(child);
    }

    /// The line this item was read from.
    pub fn original_markdown(&self) -> &str {
        &self.original_markdown
    }

    /// The text after the list marker. For tasks, the task description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The owning item, if any.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Child items in document order.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Returns true if this item has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The kind of line held by this item.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Returns the task carried by this item, if it is a task.
    pub fn as_task(&self) -> Option<&Task> {
        match &self.kind {
            ItemKind::Task(task) => Some(task.as_ref()),
            ItemKind::Plain => None,
        }
    }

    /// Returns true if this item is a task.
    pub fn is_task(&self) -> bool {
        matches!(self.kind, ItemKind::Task(_))
    }
}

/// Strips the list prefix from a line and trims what is left.
pub(crate) fn parse_description(line: &str) -> String {
    let rest = LIST_ITEM_PREFIX
        .find(line)
        .map_or(line, |prefix| &line[prefix.end()..]);
    rest.trim().to_string()
}
