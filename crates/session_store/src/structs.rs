//! Session data structures

use serde::{Deserialize, Serialize};
use todo_core::ListCollection;

/// Everything the service keeps for one client session.
///
/// The flash slots hold at most one message each; a mutating handler writes
/// them and the next rendered view consumes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    /// The client's to-do lists.
    #[serde(default)]
    pub lists: ListCollection,

    /// Single-use error message for the next rendered view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Single-use success message for the next rendered view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl SessionData {
    /// Consume the error flash, clearing the slot.
    pub fn take_error(&mut self) -> Option<String> {
        self.error.take()
    }

    /// Consume the success flash, clearing the slot.
    pub fn take_success(&mut self) -> Option<String> {
        self.success.take()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_slots_are_single_use() {
        let mut session = SessionData::default();
        session.set_success("The list has been created.");

        assert_eq!(
            session.take_success().as_deref(),
            Some("The list has been created.")
        );
        assert_eq!(session.take_success(), None);
    }

    #[test]
    fn test_default_session_is_empty() {
        let session = SessionData::default();
        assert!(session.lists.is_empty());
        assert!(session.error.is_none());
        assert!(session.success.is_none());
    }

    #[test]
    fn test_session_serde_round_trip() {
        let mut session = SessionData::default();
        session.lists.create_list("Groceries").unwrap();
        session.lists.add_todo(0, "milk").unwrap();
        session.set_error("oops");

        let json = serde_json::to_string(&session).unwrap();
        let loaded: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(session, loaded);
    }
}
