//! Data models for list items and tasks.

mod list_item;
mod task;

pub use list_item::{ItemKind, ListItem};
pub use task::{Priority, Status, StatusType, Task};
