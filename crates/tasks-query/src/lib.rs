//! Task queries: Boolean filter instructions over a tree of list items.
//!
//! # Quick Start
//!
//! ```
//! use tasks_model_rs::ListItemTree;
//! use tasks_query_rs::Query;
//!
//! let tree = ListItemTree::from_markdown(
//!     "- [ ] design #work 🆔 design
//!     - [ ] build ⛔️ design
//! - [x] lunch",
//! );
//!
//! let query = Query::parse("(not done) AND ((is blocked) XOR (tags include work))").unwrap();
//! let found: Vec<_> = query.apply(&tree).iter().map(|n| n.description()).collect();
//! assert_eq!(found, vec!["design #work", "build"]);
//! ```

pub mod filter;
mod query;

pub use filter::{
    BooleanDelimiters, Filter, FilterContext, FilterEvaluator, FilterParser, QueryError,
    QueryResult,
};
pub use query::Query;
