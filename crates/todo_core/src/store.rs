//! List collection and its mutation rules
//!
//! `ListCollection` is the session-carried store of to-do lists. Lists are
//! addressed by position (the index is the list's identity; deleting a list
//! shifts later addresses down by one), items by generated id. All
//! operations validate first and leave the collection untouched on failure.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::structs::{TodoItem, TodoList, NAME_MAX_LEN};

/// Ordered collection of to-do lists; display order is creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ListCollection {
    lists: Vec<TodoList>,
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lists in stored order.
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn get(&self, index: usize) -> Result<&TodoList> {
        self.lists.get(index).ok_or(StoreError::ListNotFound)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut TodoList> {
        self.lists.get_mut(index).ok_or(StoreError::ListNotFound)
    }

    /// Append a new empty list after validating the name.
    pub fn create_list(&mut self, name: &str) -> Result<()> {
        self.validate_list_name(name, None)?;
        debug!("Creating list '{}'", name);
        self.lists.push(TodoList::new(name));
        Ok(())
    }

    /// Rename the list at `index` in place. The uniqueness check excludes
    /// the list's own current name, so renaming a list to its unchanged
    /// name succeeds.
    pub fn rename_list(&mut self, index: usize, name: &str) -> Result<()> {
        self.get(index)?;
        self.validate_list_name(name, Some(index))?;
        self.lists[index].name = name.to_string();
        Ok(())
    }

    /// Remove the list at `index`; later lists shift down by one position.
    pub fn delete_list(&mut self, index: usize) -> Result<TodoList> {
        if index >= self.lists.len() {
            return Err(StoreError::ListNotFound);
        }
        let removed = self.lists.remove(index);
        debug!("Deleted list '{}'", removed.name);
        Ok(removed)
    }

    /// Append a new incomplete item with a freshly assigned id.
    pub fn add_todo(&mut self, list_index: usize, name: &str) -> Result<u64> {
        validate_todo_name(name)?;
        let list = self.get_mut(list_index)?;
        let id = list.next_todo_id();
        list.todos.push(TodoItem::new(id, name));
        Ok(id)
    }

    /// Remove the item with `todo_id` from the list at `list_index`.
    pub fn delete_todo(&mut self, list_index: usize, todo_id: u64) -> Result<TodoItem> {
        let list = self.get_mut(list_index)?;
        let position = list
            .todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(StoreError::TodoNotFound)?;
        Ok(list.todos.remove(position))
    }

    /// Set the completed flag on the item with `todo_id`.
    pub fn set_todo_completed(
        &mut self,
        list_index: usize,
        todo_id: u64,
        completed: bool,
    ) -> Result<()> {
        let list = self.get_mut(list_index)?;
        let todo = list.todo_mut(todo_id).ok_or(StoreError::TodoNotFound)?;
        todo.completed = completed;
        Ok(())
    }

    /// Mark every item in the list complete; no-op on an empty list.
    pub fn complete_all(&mut self, list_index: usize) -> Result<()> {
        let list = self.get_mut(list_index)?;
        for todo in &mut list.todos {
            todo.completed = true;
        }
        Ok(())
    }

    /// Validate a list name: length 1..=100 characters and case-sensitive
    /// uniqueness across the collection. `exclude` skips one list (the
    /// rename target) in the duplicate check.
    fn validate_list_name(&self, name: &str, exclude: Option<usize>) -> Result<()> {
        if !valid_name_length(name) {
            return Err(StoreError::InvalidListName);
        }
        let duplicate = self
            .lists
            .iter()
            .enumerate()
            .any(|(i, list)| Some(i) != exclude && list.name == name);
        if duplicate {
            return Err(StoreError::DuplicateListName);
        }
        Ok(())
    }
}

/// Validate a todo item name: length 1..=100 characters.
pub fn validate_todo_name(name: &str) -> Result<()> {
    if valid_name_length(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidTodoName)
    }
}

fn valid_name_length(name: &str) -> bool {
    (1..=NAME_MAX_LEN).contains(&name.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_with(names: &[&str]) -> ListCollection {
        let mut collection = ListCollection::new();
        for name in names {
            collection.create_list(name).unwrap();
        }
        collection
    }

    #[test]
    fn test_create_list_round_trip() {
        let collection = collection_with(&["Groceries"]);

        assert_eq!(collection.len(), 1);
        let list = collection.get(0).unwrap();
        assert_eq!(list.name, "Groceries");
        assert!(list.todos.is_empty());
    }

    #[test]
    fn test_create_list_rejects_bad_lengths() {
        let mut collection = ListCollection::new();

        assert_eq!(
            collection.create_list(""),
            Err(StoreError::InvalidListName)
        );
        assert_eq!(
            collection.create_list(&"x".repeat(101)),
            Err(StoreError::InvalidListName)
        );
        assert!(collection.is_empty());

        assert!(collection.create_list("x").is_ok());
        assert!(collection.create_list(&"y".repeat(100)).is_ok());
    }

    #[test]
    fn test_create_list_rejects_duplicates_case_sensitively() {
        let mut collection = collection_with(&["Groceries"]);

        assert_eq!(
            collection.create_list("Groceries"),
            Err(StoreError::DuplicateListName)
        );
        // Different case is a different name.
        assert!(collection.create_list("groceries").is_ok());
    }

    #[test]
    fn test_rename_list_excludes_self_from_uniqueness() {
        let mut collection = collection_with(&["Groceries", "Chores"]);

        // Renaming to the unchanged current name is allowed.
        assert!(collection.rename_list(0, "Groceries").is_ok());
        // Renaming onto another list's name is not.
        assert_eq!(
            collection.rename_list(0, "Chores"),
            Err(StoreError::DuplicateListName)
        );
        assert!(collection.rename_list(0, "Errands").is_ok());
        assert_eq!(collection.get(0).unwrap().name, "Errands");
    }

    #[test]
    fn test_rename_list_unknown_index() {
        let mut collection = collection_with(&["Groceries"]);
        assert_eq!(
            collection.rename_list(5, "Chores"),
            Err(StoreError::ListNotFound)
        );
    }

    #[test]
    fn test_delete_list_shifts_indices() {
        let mut collection = collection_with(&["A", "B", "C"]);

        let removed = collection.delete_list(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(collection.get(1).unwrap().name, "C");
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_delete_list_unknown_index() {
        let mut collection = collection_with(&["A"]);
        assert_eq!(collection.delete_list(3), Err(StoreError::ListNotFound));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_add_todo_assigns_max_plus_one() {
        let mut collection = collection_with(&["Groceries"]);

        assert_eq!(collection.add_todo(0, "milk").unwrap(), 1);
        assert_eq!(collection.add_todo(0, "eggs").unwrap(), 2);
        assert_eq!(collection.add_todo(0, "bread").unwrap(), 3);

        // Ids are never reused: after deleting id 2, the next id is still 4.
        collection.delete_todo(0, 2).unwrap();
        assert_eq!(collection.add_todo(0, "butter").unwrap(), 4);
    }

    #[test]
    fn test_add_todo_validates_name() {
        let mut collection = collection_with(&["Groceries"]);

        assert_eq!(
            collection.add_todo(0, ""),
            Err(StoreError::InvalidTodoName)
        );
        assert_eq!(
            collection.add_todo(0, &"x".repeat(101)),
            Err(StoreError::InvalidTodoName)
        );
        assert!(collection.get(0).unwrap().todos.is_empty());
    }

    #[test]
    fn test_delete_todo_unknown_id() {
        let mut collection = collection_with(&["Groceries"]);
        collection.add_todo(0, "milk").unwrap();

        assert_eq!(
            collection.delete_todo(0, 42),
            Err(StoreError::TodoNotFound)
        );
        assert_eq!(collection.delete_todo(0, 1).unwrap().name, "milk");
    }

    #[test]
    fn test_set_todo_completed() {
        let mut collection = collection_with(&["Groceries"]);
        let id = collection.add_todo(0, "milk").unwrap();

        collection.set_todo_completed(0, id, true).unwrap();
        assert!(collection.get(0).unwrap().todo(id).unwrap().completed);

        collection.set_todo_completed(0, id, false).unwrap();
        assert!(!collection.get(0).unwrap().todo(id).unwrap().completed);

        assert_eq!(
            collection.set_todo_completed(0, 42, true),
            Err(StoreError::TodoNotFound)
        );
    }

    #[test]
    fn test_complete_all() {
        let mut collection = collection_with(&["Groceries"]);
        collection.add_todo(0, "milk").unwrap();
        let eggs = collection.add_todo(0, "eggs").unwrap();
        collection.set_todo_completed(0, eggs, true).unwrap();

        collection.complete_all(0).unwrap();
        assert!(collection.get(0).unwrap().is_complete());
    }

    #[test]
    fn test_complete_all_empty_list_is_noop() {
        let mut collection = collection_with(&["Groceries"]);
        collection.complete_all(0).unwrap();
        assert!(!collection.get(0).unwrap().is_complete());
    }

    #[test]
    fn test_validation_counts_characters_not_bytes() {
        let mut collection = ListCollection::new();
        // 100 multi-byte characters are within the limit.
        assert!(collection.create_list(&"é".repeat(100)).is_ok());
    }
}
