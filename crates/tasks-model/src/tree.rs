//! Arena-backed hierarchy of list items and tasks.
//!
//! Every node lives in a single [`ListItemTree`] and is addressed by an
//! [`ItemId`]. Creating a node with a parent appends it to that parent's
//! children; there is no other way to add an edge, so parent links never
//! change after creation and the tree cannot contain cycles.
//!
//! # Example
//!
//! ```
//! use tasks_model_rs::ListItemTree;
//!
//! let mut tree = ListItemTree::new();
//! let parent = tree.push_line("- shopping", None);
//! let child = tree.push_line("    - [ ] buy milk", Some(parent));
//!
//! assert_eq!(tree[parent].children(), &[child]);
//! assert_eq!(tree.node(child).parent(), Some(tree.node(parent)));
//! assert!(tree.node(child).as_task().is_some());
//! assert_eq!(tree.node(child).root(), tree.node(parent));
//! ```

use std::fmt;
use std::ops::Index;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ListItem, Task};
use crate::settings::Settings;

/// A list line: indentation or blockquote run, a marker, then whitespace or end of line.
static LIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\s\t>]*)([-*+]|[0-9]+[.)])(?:\s|$)").unwrap());

/// Width of a tab when comparing indentation.
const TAB_WIDTH: usize = 4;

/// Handle to a node in a [`ListItemTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    /// Position of the node in document order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every list item and task of one document.
#[derive(Debug, Clone, Default)]
pub struct ListItemTree {
    items: Vec<ListItem>,
    settings: Settings,
}

impl ListItemTree {
    /// Creates an empty tree with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree that recognises tasks using `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            items: Vec::new(),
            settings,
        }
    }

    /// Reads every list line of a markdown document, nesting items by indentation.
    pub fn from_markdown(text: &str) -> Self {
        Self::from_markdown_with(text, Settings::default())
    }

    /// Like [`from_markdown`](Self::from_markdown), with explicit settings.
    ///
    /// An item is nested under the closest preceding item with the same
    /// blockquote depth and a smaller indentation width. Blank lines and
    /// indented continuation text keep the current list open; any other
    /// non-list line ends it. Lines inside fenced code blocks are ignored.
    pub fn from_markdown_with(text: &str, settings: Settings) -> Self {
        let mut tree = Self::with_settings(settings);
        let mut open: Vec<(NestingLevel, ItemId)> = Vec::new();
        let mut in_code_block = false;

        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_code_block = !in_code_block;
                open.clear();
                continue;
            }
            if in_code_block {
                continue;
            }

            let Some(captures) = LIST_LINE.captures(line) else {
                if !(line.trim().is_empty() || line.starts_with([' ', '\t'])) {
                    open.clear();
                }
                continue;
            };

            let level = NestingLevel::from_prefix(captures.get(1).map_or("", |m| m.as_str()));
            while open.last().is_some_and(|(open_level, _)| !open_level.contains(level)) {
                open.pop();
            }
            let parent = open.last().map(|(_, id)| *id);
            let id = tree.push_line(line, parent);
            open.push((level, id));
        }

        tracing::debug!(
            items = tree.len(),
            tasks = tree.tasks().count(),
            "read list items from markdown"
        );
        tree
    }

    /// The settings used to recognise tasks.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Adds a plain list item, regardless of whether the line has a checkbox.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push_item(&mut self, line: &str, parent: Option<ItemId>) -> ItemId {
        self.insert(ListItem::plain(line, parent))
    }

    /// Adds an already-built task.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push_task(&mut self, task: Task, parent: Option<ItemId>) -> ItemId {
        self.insert(ListItem::task(task, parent))
    }

    /// Adds a line as a task if it parses as one, otherwise as a plain item.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn push_line(&mut self, line: &str, parent: Option<ItemId>) -> ItemId {
        match Task::from_line_with(line, &self.settings) {
            Some(task) => self.push_task(task, parent),
            None => self.push_item(line, parent),
        }
    }

    fn insert(&mut self, item: ListItem) -> ItemId {
        let id = ItemId(self.items.len());
        if let Some(parent) = item.parent() {
            assert!(
                parent.0 < self.items.len(),
                "parent {parent:?} does not belong to this tree"
            );
            self.items[parent.0].push_child(id);
        }
        tracing::trace!(?id, parent = ?item.parent(), "added list item");
        self.items.push(item);
        id
    }

    /// Returns the item for `id`, if it belongs to this tree.
    pub fn get(&self, id: ItemId) -> Option<&ListItem> {
        self.items.get(id.0)
    }

    /// Returns a navigable view of the node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: ItemId) -> NodeRef<'_> {
        assert!(id.0 < self.items.len(), "{id:?} does not belong to this tree");
        NodeRef { tree: self, id }
    }

    /// Returns the topmost ancestor of `id` (itself if it has no parent).
    pub fn root(&self, id: ItemId) -> ItemId {
        let mut current = id;
        while let Some(parent) = self.items[current.0].parent() {
            current = parent;
        }
        current
    }

    /// Number of items in the tree.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All nodes in document order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.items.len()).map(move |index| NodeRef {
            tree: self,
            id: ItemId(index),
        })
    }

    /// Nodes without a parent, in document order.
    pub fn roots(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.iter().filter(|node| node.is_root())
    }

    /// Task nodes in document order.
    pub fn tasks(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.iter().filter(|node| node.is_task())
    }

    /// The tasks themselves, in document order.
    pub fn task_values(&self) -> impl Iterator<Item = &Task> {
        self.items.iter().filter_map(ListItem::as_task)
    }

    /// Finds the first task whose id is `id`. Empty ids never match.
    pub fn find_task_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        if id.is_empty() {
            return None;
        }
        self.tasks()
            .find(|node| node.as_task().is_some_and(|task| task.id == id))
    }
}

impl Index<ItemId> for ListItemTree {
    type Output = ListItem;

    fn index(&self, id: ItemId) -> &ListItem {
        &self.items[id.0]
    }
}

/// A borrowed view of one node that can walk the hierarchy.
///
/// Two views are equal when they point at the same node of the same tree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ListItemTree,
    id: ItemId,
}

impl<'a> NodeRef<'a> {
    /// The node handle.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The tree this node belongs to.
    pub fn tree(&self) -> &'a ListItemTree {
        self.tree
    }

    /// The underlying item.
    pub fn item(&self) -> &'a ListItem {
        &self.tree.items[self.id.0]
    }

    /// The line this node was read from.
    pub fn original_markdown(&self) -> &'a str {
        self.item().original_markdown()
    }

    /// The text after the list prefix, or the task description.
    pub fn description(&self) -> &'a str {
        self.item().description()
    }

    /// The owning node, if any.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let tree = self.tree;
        self.item().parent().map(|id| NodeRef { tree, id })
    }

    /// Child nodes in document order.
    pub fn children(
        &self,
    ) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.item()
            .children()
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Parent, grandparent and so on, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// The topmost ancestor, or this node if it has no parent.
    pub fn root(&self) -> NodeRef<'a> {
        NodeRef {
            tree: self.tree,
            id: self.tree.root(self.id),
        }
    }

    /// Returns true if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.item().is_root()
    }

    /// The task carried by this node, if it is a task.
    pub fn as_task(&self) -> Option<&'a Task> {
        self.item().as_task()
    }

    /// Returns true if this node is a task.
    pub fn is_task(&self) -> bool {
        self.item().is_task()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("original_markdown", &self.original_markdown())
            .finish()
    }
}

/// How deeply a list line is nested: blockquote depth and indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NestingLevel {
    quote_depth: usize,
    indent: usize,
}

impl NestingLevel {
    fn from_prefix(prefix: &str) -> Self {
        let quote_depth = prefix.matches('>').count();
        let after_quotes = prefix.rsplit('>').next().unwrap_or(prefix);
        let indent = after_quotes
            .chars()
            .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
            .sum();
        Self {
            quote_depth,
            indent,
        }
    }

    /// Returns true if a line at `other` continues a list item at `self`.
    fn contains(&self, other: NestingLevel) -> bool {
        self.quote_depth == other.quote_depth && self.indent < other.indent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_no_parent_or_children() {
        let mut tree = ListItemTree::new();
        let id = tree.push_item("", None);

        assert!(tree[id].children().is_empty());
        assert_eq!(tree[id].parent(), None);
        assert!(tree.node(id).is_root());
    }

    #[test]
    fn test_children_in_construction_order() {
        let mut tree = ListItemTree::new();
        let parent = tree.push_item("", None);
        let first = tree.push_item("", Some(parent));
        let second = tree.push_item("", Some(parent));

        assert_eq!(tree[parent].children(), &[first, second]);
        assert_eq!(tree[first].parent(), Some(parent));
        assert_eq!(tree[second].parent(), Some(parent));
    }

    #[test]
    fn test_root_of_chain() {
        let mut tree = ListItemTree::new();
        let grand_parent = tree.push_item("- grand parent", None);
        let parent = tree.push_item("- parent", Some(grand_parent));
        let child = tree.push_item("- child", Some(parent));

        for id in [grand_parent, parent, child] {
            assert_eq!(tree.node(id).root().original_markdown(), "- grand parent");
            assert_eq!(tree.root(id), grand_parent);
        }
        assert!(tree.node(grand_parent).is_root());
        assert!(!tree.node(parent).is_root());
        assert!(!tree.node(child).is_root());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut tree = ListItemTree::new();
        let a = tree.push_item("- a", None);
        let b = tree.push_item("- b", Some(a));
        let c = tree.push_item("- c", Some(b));

        let ancestors: Vec<ItemId> = tree.node(c).ancestors().map(|n| n.id()).collect();
        assert_eq!(ancestors, vec![b, a]);
    }

    #[test]
    fn test_push_line_detects_tasks() {
        let mut tree = ListItemTree::new();
        let item = tree.push_line("- plain", None);
        let task = tree.push_line("- [ ] task", Some(item));

        assert!(!tree[item].is_task());
        assert!(tree[task].is_task());
        assert_eq!(tree[task].description(), "task");
        assert_eq!(tree[item].description(), "plain");
    }

    #[test]
    fn test_push_line_respects_global_filter() {
        let mut tree = ListItemTree::with_settings(Settings {
            global_filter: Some("#task".to_string()),
            remove_global_filter: false,
        });
        let plain = tree.push_line("- [ ] not a task", None);
        let task = tree.push_line("- [ ] #task a task", None);

        assert!(!tree[plain].is_task());
        assert_eq!(tree[plain].description(), "[ ] not a task");
        assert!(tree[task].is_task());
    }

    #[test]
    #[should_panic(expected = "does not belong to this tree")]
    fn test_foreign_parent_panics() {
        let mut other = ListItemTree::new();
        other.push_item("- a", None);
        let foreign = other.push_item("- b", None);

        let mut tree = ListItemTree::new();
        tree.push_item("- c", Some(foreign));
    }

    #[test]
    fn test_node_refs_compare_by_tree_and_id() {
        let mut tree = ListItemTree::new();
        let a = tree.push_item("- a", None);
        let twin = tree.clone();

        assert_eq!(tree.node(a), tree.node(a));
        assert_ne!(tree.node(a), twin.node(a));
    }

    #[test]
    fn test_nesting_level_from_prefix() {
        assert_eq!(
            NestingLevel::from_prefix(""),
            NestingLevel {
                quote_depth: 0,
                indent: 0
            }
        );
        assert_eq!(NestingLevel::from_prefix("\t").indent, TAB_WIDTH);
        let quoted = NestingLevel::from_prefix("> >   ");
        assert_eq!(quoted.quote_depth, 2);
        assert_eq!(quoted.indent, 3);
        assert!(NestingLevel::from_prefix("").contains(NestingLevel::from_prefix("  ")));
        assert!(!NestingLevel::from_prefix("    ").contains(NestingLevel::from_prefix("> ")));
        assert!(!NestingLevel::from_prefix("> ").contains(NestingLevel::from_prefix("> > ")));
    }

    #[test]
    fn test_from_markdown_nests_by_indentation() {
        let tree = ListItemTree::from_markdown(
            "- a\n    - [ ] b\n        - c\n    - d\n- [x] e\n",
        );
        assert_eq!(tree.len(), 5);

        let a = tree.node(ItemId(0));
        let children: Vec<&str> = a.children().map(|n| n.description()).collect();
        assert_eq!(children, vec!["b", "d"]);
        assert_eq!(tree.node(ItemId(2)).parent().unwrap().description(), "b");
        assert!(tree.node(ItemId(4)).is_root());
        assert_eq!(tree.roots().count(), 2);
        assert_eq!(tree.tasks().count(), 2);
    }

    #[test]
    fn test_from_markdown_paragraph_ends_list() {
        let tree = ListItemTree::from_markdown("- a\n\n    continued\n- b\nText\n    - c\n");
        assert_eq!(tree.len(), 3);
        assert!(tree.node(ItemId(1)).is_root());
        // "c" follows a paragraph, so it starts a new list.
        assert!(tree.node(ItemId(2)).is_root());
    }

    #[test]
    fn test_from_markdown_skips_code_blocks_and_rules() {
        let tree = ListItemTree::from_markdown("```\n- not an item\n```\n---\n**bold**\n- item\n");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(ItemId(0)).description(), "item");
    }

    #[test]
    fn test_find_task_by_id() {
        let tree = ListItemTree::from_markdown("- [ ] a 🆔 one\n- [ ] b 🆔 two\n- plain");
        assert_eq!(tree.find_task_by_id("two").unwrap().description(), "b");
        assert!(tree.find_task_by_id("three").is_none());
        assert!(tree.find_task_by_id("").is_none());
    }
}
