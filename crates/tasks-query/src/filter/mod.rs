//! Boolean instruction parser and evaluator for task queries.
//!
//! # Supported Syntax
//!
//! ## Status
//! - `done` - Done and cancelled tasks
//! - `not done` - Everything else
//!
//! ## Description
//! - `description includes <text>`, `description does not include <text>`
//!
//! ## Dependencies
//! - `has id`, `no id`, `id includes <text>`
//! - `has depends on`, `no depends on`
//! - `is blocked`, `is not blocked`, `is blocking`, `is not blocking`
//!
//! ## Dates
//! - `has due date`, `no due date`
//! - `due before <YYYY-MM-DD>`, `due after <YYYY-MM-DD>`, `due on <YYYY-MM-DD>`
//!
//! ## Priority
//! - `priority is <highest|high|medium|none|low|lowest>`
//!
//! ## Tags
//! - `has tags`, `no tags`
//! - `tags include <tag>`, `tags do not include <tag>`
//!
//! ## Hierarchy
//! - `is parent task`, `is not parent task`, `is root task`
//!
//! ## Boolean Operators
//! - `AND`, `OR`, `XOR`, `NOT`
//! - Every filter surrounded by `(...)` or by `"..."`, one convention per line
//!
//! # Example
//!
//! ```
//! use tasks_model_rs::ListItemTree;
//! use tasks_query_rs::filter::{FilterContext, FilterEvaluator, FilterParser};
//!
//! // Parse a Boolean instruction
//! let filter = FilterParser::parse("(not done) AND NOT (has depends on)").unwrap();
//!
//! // Evaluate it against a document
//! let tree = ListItemTree::from_markdown("- [ ] a\n- [x] b\n- [ ] c ⛔️ a");
//! let context = FilterContext::new(&tree);
//! let evaluator = FilterEvaluator::new(&filter, &context);
//!
//! assert_eq!(evaluator.filter_tasks().len(), 1);
//! ```

mod ast;
mod delimiters;
mod error;
mod evaluator;
mod lexer;
mod parser;

pub use ast::Filter;
pub use delimiters::{any_of_these_chars, BooleanDelimiters};
pub use error::{QueryError, QueryResult};
pub use evaluator::{FilterContext, FilterEvaluator};
pub use lexer::BooleanToken;
pub use parser::{FilterParser, MAX_NESTING_DEPTH};

#[cfg(test)]
mod tests;
