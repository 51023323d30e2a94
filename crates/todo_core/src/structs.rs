//! To-do data structures

use serde::{Deserialize, Serialize};

/// Maximum accepted length for list and todo names, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    /// Generated id, unique within the owning list and never reused.
    pub id: u64,

    /// Display name, 1..=100 characters.
    pub name: String,

    /// Whether the item has been checked off.
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

/// A named, ordered collection of to-do items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    /// Display name, 1..=100 characters, unique across the collection.
    pub name: String,

    /// Items in insertion order.
    #[serde(default)]
    pub todos: Vec<TodoItem>,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Next id to assign: `max(existing ids) + 1`, or 1 for an empty list.
    /// Count-based ids would collide after a delete.
    pub fn next_todo_id(&self) -> u64 {
        self.todos.iter().map(|todo| todo.id).max().unwrap_or(0) + 1
    }

    pub fn todo(&self, todo_id: u64) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }

    pub fn todo_mut(&mut self, todo_id: u64) -> Option<&mut TodoItem> {
        self.todos.iter_mut().find(|todo| todo.id == todo_id)
    }

    /// True iff the list is non-empty and every item is completed. An empty
    /// list is never "done".
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    /// `(completed, total)` item counts.
    pub fn completion_counts(&self) -> (usize, usize) {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        (completed, self.todos.len())
    }

    /// Items for display: incomplete first, completed after, relative order
    /// preserved within each group.
    pub fn todos_by_completion(&self) -> Vec<&TodoItem> {
        let mut ordered: Vec<&TodoItem> = self.todos.iter().collect();
        ordered.sort_by_key(|todo| todo.completed);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, completed: bool) -> TodoItem {
        TodoItem {
            id,
            name: format!("todo {id}"),
            completed,
        }
    }

    #[test]
    fn test_next_todo_id_is_max_plus_one() {
        let mut list = TodoList::new("Chores");
        assert_eq!(list.next_todo_id(), 1);

        list.todos.push(item(1, false));
        list.todos.push(item(3, false));
        assert_eq!(list.next_todo_id(), 4);
    }

    #[test]
    fn test_is_complete() {
        let mut list = TodoList::new("Chores");
        assert!(!list.is_complete());

        list.todos.push(item(1, true));
        assert!(list.is_complete());

        list.todos.push(item(2, false));
        assert!(!list.is_complete());
    }

    #[test]
    fn test_completion_counts() {
        let mut list = TodoList::new("Chores");
        list.todos.push(item(1, true));
        list.todos.push(item(2, false));
        list.todos.push(item(3, true));

        assert_eq!(list.completion_counts(), (2, 3));
    }

    #[test]
    fn test_todos_by_completion_incomplete_first_stable() {
        let mut list = TodoList::new("Chores");
        list.todos.push(item(1, true));
        list.todos.push(item(2, false));
        list.todos.push(item(3, false));

        let ids: Vec<u64> = list.todos_by_completion().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_todo_item_serde_defaults_completed() {
        let item: TodoItem = serde_json::from_str(r#"{"id":1,"name":"milk"}"#).unwrap();
        assert!(!item.completed);
    }
}
