//! Abstract Syntax Tree (AST) for task queries.

use chrono::NaiveDate;
use tasks_model_rs::Priority;

/// Represents a parsed filter expression.
///
/// Leaf variants test one property of a task. Text arguments are stored
/// lowercased, and tag arguments without their leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    // ==================== Status Filters ====================
    /// Matches done and cancelled tasks.
    Done,

    /// Matches tasks that are neither done nor cancelled.
    NotDone,

    // ==================== Description Filters ====================
    /// Matches tasks whose description contains the text.
    DescriptionIncludes(String),

    /// Matches tasks whose description does not contain the text.
    DescriptionDoesNotInclude(String),

    // ==================== Dependency Filters ====================
    /// Matches tasks with an id.
    HasId,

    /// Matches tasks without an id.
    NoId,

    /// Matches tasks whose id contains the text.
    IdIncludes(String),

    /// Matches tasks that depend on at least one id.
    HasDependsOn,

    /// Matches tasks that depend on nothing.
    NoDependsOn,

    /// Matches unfinished tasks waiting on an unfinished task.
    IsBlocked,

    /// Negation of [`Filter::IsBlocked`].
    IsNotBlocked,

    /// Matches unfinished tasks that an unfinished task waits on.
    IsBlocking,

    /// Negation of [`Filter::IsBlocking`].
    IsNotBlocking,

    // ==================== Date Filters ====================
    /// Matches tasks with a due date.
    HasDueDate,

    /// Matches tasks without a due date.
    NoDueDate,

    /// Matches tasks due strictly before the date.
    DueBefore(NaiveDate),

    /// Matches tasks due strictly after the date.
    DueAfter(NaiveDate),

    /// Matches tasks due on the date.
    DueOn(NaiveDate),

    // ==================== Priority Filter ====================
    /// Matches tasks with exactly this priority.
    PriorityIs(Priority),

    // ==================== Tag Filters ====================
    /// Matches tasks with at least one tag.
    HasTags,

    /// Matches tasks without tags.
    NoTags,

    /// Matches tasks with a tag containing the text.
    TagsInclude(String),

    /// Matches tasks with no tag containing the text.
    TagsDoNotInclude(String),

    // ==================== Hierarchy Filters ====================
    /// Matches tasks with at least one task among their direct children.
    IsParentTask,

    /// Negation of [`Filter::IsParentTask`].
    IsNotParentTask,

    /// Matches tasks whose node has no parent.
    IsRootTask,

    // ==================== Boolean Operators ====================
    /// Logical AND of two filters.
    And(Box<Filter>, Box<Filter>),

    /// Logical OR of two filters.
    Or(Box<Filter>, Box<Filter>),

    /// Exactly one of two filters.
    Xor(Box<Filter>, Box<Filter>),

    /// Logical NOT of a filter.
    Not(Box<Filter>),
}

impl Filter {
    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use tasks_query_rs::filter::Filter;
    ///
    /// let filter = Filter::and(Filter::NotDone, Filter::HasId);
    /// assert!(matches!(filter, Filter::And(_, _)));
    /// ```
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(Box::new(left), Box::new(right))
    }

    /// Creates an OR filter from two filters.
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(Box::new(left), Box::new(right))
    }

    /// Creates an XOR filter from two filters.
    pub fn xor(left: Filter, right: Filter) -> Self {
        Filter::Xor(Box::new(left), Box::new(right))
    }

    /// Creates a NOT filter.
    pub fn negate(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }
}
