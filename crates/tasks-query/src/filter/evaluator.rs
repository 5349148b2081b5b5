//! Filter evaluation against a tree of list items.
//!
//! This module provides the [`FilterEvaluator`] for evaluating parsed filters
//! against the task nodes of a [`ListItemTree`]. Dependency filters need to
//! see every task, so evaluation always happens within a [`FilterContext`].
//!
//! # Example
//!
//! ```
//! use tasks_model_rs::ListItemTree;
//! use tasks_query_rs::filter::{FilterContext, FilterEvaluator, FilterParser};
//!
//! let tree = ListItemTree::from_markdown(
//!     "- [ ] write draft 🆔 draft
//! - [ ] review ⛔️ draft",
//! );
//!
//! let filter = FilterParser::parse_leaf("is blocked").unwrap();
//! let context = FilterContext::new(&tree);
//! let evaluator = FilterEvaluator::new(&filter, &context);
//!
//! let blocked: Vec<_> = evaluator.filter_tasks().iter().map(|n| n.description()).collect();
//! assert_eq!(blocked, vec!["review"]);
//! ```

use std::collections::{HashMap, HashSet};

use tasks_model_rs::{ListItemTree, NodeRef, Task};

use super::ast::Filter;

/// Context for filter evaluation.
///
/// Indexes the tasks of one tree by id, and records which ids unfinished
/// tasks wait on.
#[derive(Debug, Clone)]
pub struct FilterContext<'a> {
    tree: &'a ListItemTree,
    tasks_by_id: HashMap<&'a str, &'a Task>,
    awaited_ids: HashSet<&'a str>,
}

impl<'a> FilterContext<'a> {
    /// Creates a new filter context over every task in `tree`.
    ///
    /// When several tasks share an id, the first in document order wins.
    pub fn new(tree: &'a ListItemTree) -> Self {
        let mut tasks_by_id = HashMap::new();
        let mut awaited_ids = HashSet::new();

        for task in tree.task_values() {
            if task.has_id() {
                tasks_by_id.entry(task.id.as_str()).or_insert(task);
            }
            if !task.is_completed() {
                awaited_ids.extend(task.depends_on.iter().map(String::as_str));
            }
        }

        Self {
            tree,
            tasks_by_id,
            awaited_ids,
        }
    }

    /// The tree being filtered.
    pub fn tree(&self) -> &'a ListItemTree {
        self.tree
    }

    /// Finds a task by id.
    pub fn find_task_by_id(&self, id: &str) -> Option<&'a Task> {
        self.tasks_by_id.get(id).copied()
    }

    /// Returns true if some unfinished task depends on `id`.
    pub fn is_awaited(&self, id: &str) -> bool {
        self.awaited_ids.contains(id)
    }
}

/// Evaluates a parsed filter against task nodes.
///
/// The evaluator takes a reference to a parsed [`Filter`] and a [`FilterContext`],
/// then can test whether nodes match the filter criteria. Plain list items
/// never match.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    filter: &'a Filter,
    context: &'a FilterContext<'a>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(filter: &'a Filter, context: &'a FilterContext<'a>) -> Self {
        Self { filter, context }
    }

    /// Returns true if the node is a task that matches the filter.
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        match node.as_task() {
            Some(task) => self.evaluate_filter(self.filter, node, task),
            None => false,
        }
    }

    /// Returns the matching task nodes in document order.
    pub fn filter_tasks(&self) -> Vec<NodeRef<'a>> {
        self.context
            .tree()
            .tasks()
            .filter(|node| self.matches(*node))
            .collect()
    }

    /// Evaluates a filter expression against a task node.
    fn evaluate_filter(&self, filter: &Filter, node: NodeRef<'_>, task: &Task) -> bool {
        match filter {
            // Status filters
            Filter::Done => task.is_completed(),
            Filter::NotDone => !task.is_completed(),

            // Description filters
            Filter::DescriptionIncludes(text) => task.description.to_lowercase().contains(text),
            Filter::DescriptionDoesNotInclude(text) => {
                !task.description.to_lowercase().contains(text)
            }

            // Dependency filters
            Filter::HasId => task.has_id(),
            Filter::NoId => !task.has_id(),
            Filter::IdIncludes(text) => task.id.to_lowercase().contains(text),
            Filter::HasDependsOn => !task.depends_on.is_empty(),
            Filter::NoDependsOn => task.depends_on.is_empty(),
            Filter::IsBlocked => self.is_blocked(task),
            Filter::IsNotBlocked => !self.is_blocked(task),
            Filter::IsBlocking => self.is_blocking(task),
            Filter::IsNotBlocking => !self.is_blocking(task),

            // Date filters
            Filter::HasDueDate => task.due_date.is_some(),
            Filter::NoDueDate => task.due_date.is_none(),
            Filter::DueBefore(date) => task.due_date.is_some_and(|due| due < *date),
            Filter::DueAfter(date) => task.due_date.is_some_and(|due| due > *date),
            Filter::DueOn(date) => task.due_date == Some(*date),

            // Priority filter
            Filter::PriorityIs(priority) => task.priority == *priority,

            // Tag filters
            Filter::HasTags => !task.tags.is_empty(),
            Filter::NoTags => task.tags.is_empty(),
            Filter::TagsInclude(tag) => self.has_tag(task, tag),
            Filter::TagsDoNotInclude(tag) => !self.has_tag(task, tag),

            // Hierarchy filters
            Filter::IsParentTask => self.is_parent_task(node),
            Filter::IsNotParentTask => !self.is_parent_task(node),
            Filter::IsRootTask => node.is_root(),

            // Boolean operators
            Filter::And(left, right) => {
                self.evaluate_filter(left, node, task) && self.evaluate_filter(right, node, task)
            }
            Filter::Or(left, right) => {
                self.evaluate_filter(left, node, task) || self.evaluate_filter(right, node, task)
            }
            Filter::Xor(left, right) => {
                self.evaluate_filter(left, node, task) != self.evaluate_filter(right, node, task)
            }
            Filter::Not(inner) => !self.evaluate_filter(inner, node, task),
        }
    }

    /// Checks if an unfinished task depends on an unfinished task that exists.
    fn is_blocked(&self, task: &Task) -> bool {
        if task.is_completed() {
            return false;
        }

        task.depends_on.iter().any(|id| {
            self.context
                .find_task_by_id(id)
                .is_some_and(|dependency| !dependency.is_completed())
        })
    }

    /// Checks if an unfinished task is depended on by an unfinished task.
    fn is_blocking(&self, task: &Task) -> bool {
        !task.is_completed() && task.has_id() && self.context.is_awaited(&task.id)
    }

    /// Checks if any tag contains `tag`, ignoring case and the leading `#`.
    fn has_tag(&self, task: &Task, tag: &str) -> bool {
        task.tags
            .iter()
            .any(|t| t.trim_start_matches('#').to_lowercase().contains(tag))
    }

    /// Checks if at least one direct child is a task.
    fn is_parent_task(&self, node: NodeRef<'_>) -> bool {
        node.children().any(|child| child.is_task())
    }
}
