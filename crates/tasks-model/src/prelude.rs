//! Prelude module for convenient imports.
//!
//! ```
//! use tasks_model_rs::prelude::*;
//!
//! // Now you have access to:
//! // - ListItemTree, ItemId, NodeRef (hierarchy)
//! // - ListItem, ItemKind, Task, Status, StatusType, Priority (models)
//! // - Settings, SettingsError (configuration)
//! // - set_dependencies, set_depended_upon (edits)
//! ```

pub use crate::edit::{set_depended_upon, set_dependencies};
pub use crate::error::{SettingsError, SettingsResult};
pub use crate::models::{ItemKind, ListItem, Priority, Status, StatusType, Task};
pub use crate::settings::Settings;
pub use crate::tree::{ItemId, ListItemTree, NodeRef};
