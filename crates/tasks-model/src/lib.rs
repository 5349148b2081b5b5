//! Markdown list items, tasks and their hierarchy.
//!
//! # Quick Start
//!
//! ```
//! use tasks_model_rs::prelude::*;
//!
//! let tree = ListItemTree::from_markdown(
//!     "- project
//!     - [ ] write draft 🆔 draft
//!     - [ ] review ⛔️ draft",
//! );
//!
//! let review = tree.tasks().nth(1).unwrap();
//! assert_eq!(review.description(), "review");
//! assert_eq!(review.parent().unwrap().description(), "project");
//! assert_eq!(review.as_task().unwrap().depends_on, vec!["draft"]);
//! ```

pub mod edit;
pub mod error;
pub mod models;
pub mod prelude;
mod serializer;
pub mod settings;
pub mod tree;

pub use error::{SettingsError, SettingsResult};
pub use models::{ItemKind, ListItem, Priority, Status, StatusType, Task};
pub use settings::Settings;
pub use tree::{ItemId, ListItemTree, NodeRef};
