//! Multi-line task queries.

use std::sync::LazyLock;

use regex::Regex;
use tasks_model_rs::{ListItemTree, NodeRef};

use crate::filter::{
    BooleanDelimiters, Filter, FilterContext, FilterEvaluator, FilterParser, QueryError,
    QueryResult,
};

/// `limit 10`, `limit to 10 tasks`.
static LIMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^limit(?: to)? +(\d+)(?: +tasks?)?$").unwrap());

/// A line that opens a filter once any leading `NOT`s are stripped.
static BOOLEAN_INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    let open = BooleanDelimiters::all_supported_delimiters();
    Regex::new(&format!(r"^(?:NOT\s*)*{}", open.open_filter())).unwrap()
});

/// A parsed query: one filter per line, all of which must match.
///
/// # Example
///
/// ```
/// use tasks_model_rs::ListItemTree;
/// use tasks_query_rs::Query;
///
/// let query = Query::parse(
///     "not done
/// (is not blocked) OR (priority is high)
/// limit 1",
/// )
/// .unwrap();
///
/// let tree = ListItemTree::from_markdown(
///     "- [ ] ship 🆔 ship
/// - [ ] announce ⛔️ ship
/// - [x] plan",
/// );
/// let found: Vec<_> = query.apply(&tree).iter().map(|n| n.description()).collect();
/// assert_eq!(found, vec!["ship"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    filters: Vec<Filter>,
    limit: Option<usize>,
}

impl Query {
    /// Parses a query, one instruction per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Instruction`] naming the first line that fails
    /// to parse, with the underlying error as its source.
    pub fn parse(source: &str) -> QueryResult<Self> {
        let mut query = Query::default();

        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            query
                .parse_line(line)
                .map_err(|err| err.in_instruction(line))?;
        }

        tracing::debug!(
            filters = query.filters.len(),
            limit = ?query.limit,
            "parsed query"
        );
        Ok(query)
    }

    fn parse_line(&mut self, line: &str) -> QueryResult<()> {
        if let Some(captures) = LIMIT.captures(line) {
            let limit = captures[1]
                .parse()
                .map_err(|_| QueryError::invalid_limit(line))?;
            self.limit = Some(limit);
            return Ok(());
        }
        if line.to_lowercase().starts_with("limit") {
            return Err(QueryError::invalid_limit(line));
        }

        let filter = if Self::is_boolean_instruction(line) {
            FilterParser::parse(line)?
        } else {
            FilterParser::parse_leaf(line)?
        };
        self.filters.push(filter);
        Ok(())
    }

    /// Returns true if `line` must be parsed as a Boolean instruction.
    pub fn is_boolean_instruction(line: &str) -> bool {
        BOOLEAN_INSTRUCTION.is_match(line.trim())
    }

    /// The filters, in source order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// The maximum number of results, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the task nodes of `tree` matching every filter, in document order.
    pub fn apply<'a>(&self, tree: &'a ListItemTree) -> Vec<NodeRef<'a>> {
        let context = FilterContext::new(tree);
        let evaluators: Vec<FilterEvaluator<'_>> = self
            .filters
            .iter()
            .map(|filter| FilterEvaluator::new(filter, &context))
            .collect();

        let matches = tree
            .tasks()
            .filter(|node| evaluators.iter().all(|evaluator| evaluator.matches(*node)));
        match self.limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        }
    }
}
