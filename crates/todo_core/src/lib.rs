//! # Todo Core
//!
//! The in-memory to-do data model: lists, items, validation and mutation
//! rules. Pure and synchronous; session transport and HTTP live elsewhere.

pub mod error;
pub mod store;
pub mod structs;

// Re-exports
pub use error::{Result, StoreError};
pub use store::ListCollection;
pub use structs::{TodoItem, TodoList, NAME_MAX_LEN};
