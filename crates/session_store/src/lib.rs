//! # Session Store
//!
//! Per-client session state for the to-do service: the list collection plus
//! single-use flash message slots, behind a storage trait. Each request
//! loads its session, applies at most one mutation, and commits the state
//! back.

pub mod context;
pub mod error;
pub mod storage;
pub mod structs;

// Re-exports
pub use context::SessionContext;
pub use error::SessionError;
pub use storage::{MemorySessionStorage, SessionStorage};
pub use structs::SessionData;
