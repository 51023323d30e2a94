//! Store error types
//!
//! The `Display` strings for the validation variants are user-facing and
//! rendered verbatim in flash messages; tests pin the exact wording.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("The list name must be between 1 and 100 characters.")]
    InvalidListName,

    #[error("The list name you have chosen already exists. Please enter a new name.")]
    DuplicateListName,

    #[error("Todo must be between 1 and 100 characters.")]
    InvalidTodoName,

    #[error("The specified list was not found.")]
    ListNotFound,

    #[error("The specified todo was not found.")]
    TodoNotFound,
}

impl StoreError {
    /// True for errors recovered by re-rendering the originating form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidListName
                | StoreError::DuplicateListName
                | StoreError::InvalidTodoName
        )
    }

    /// True for errors surfaced as a flash message plus a redirect to the
    /// lists index.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::ListNotFound | StoreError::TodoNotFound)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
