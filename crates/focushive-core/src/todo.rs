//! Study to-do list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::storage::{load_json, save_json, KeyValueStore};

/// Storage key for the serialized list.
pub const TODOS_KEY: &str = "focushive.todos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("expected high, medium or low, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<Todo>,
    /// Next id to hand out; ids are never reused.
    next_id: u64,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the saved list, or an empty one.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(load_json(store, TODOS_KEY)?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, TODOS_KEY, self)?;
        Ok(())
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn add(&mut self, text: &str, priority: Priority) -> Result<&Todo> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyTodo.into());
        }
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, %priority, "todo added");
        self.items.push(Todo {
            id,
            text: text.to_string(),
            completed: false,
            priority,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip completion; returns the new state.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let todo = self
            .items
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ValidationError::UnknownTodo(id))?;
        todo.completed = !todo.completed;
        Ok(todo.completed)
    }

    pub fn remove(&mut self, id: u64) -> Result<Todo> {
        let idx = self
            .items
            .iter()
            .position(|t| t.id == id)
            .ok_or(ValidationError::UnknownTodo(id))?;
        Ok(self.items.remove(idx))
    }

    pub fn stats(&self) -> TodoStats {
        let total = self.items.len();
        let completed = self.items.iter().filter(|t| t.completed).count();
        TodoStats {
            total,
            completed,
            pending: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;

    #[test]
    fn add_toggle_remove() {
        let mut list = TodoList::new();
        let id = list.add("Review Mathematics Chapter 5", Priority::High).unwrap().id;
        list.add("Complete Physics Assignment", Priority::Medium).unwrap();

        assert!(list.toggle(id).unwrap());
        assert_eq!(
            list.stats(),
            TodoStats {
                total: 2,
                completed: 1,
                pending: 1
            }
        );

        let removed = list.remove(id).unwrap();
        assert_eq!(removed.text, "Review Mathematics Chapter 5");
        assert_eq!(list.stats().total, 1);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut list = TodoList::new();
        assert!(matches!(
            list.add("   ", Priority::Low),
            Err(CoreError::Validation(ValidationError::EmptyTodo))
        ));
        assert!(list.items().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = TodoList::new();
        let first = list.add("a", Priority::Low).unwrap().id;
        list.remove(first).unwrap();
        let second = list.add("b", Priority::Low).unwrap().id;
        assert!(second > first);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut list = TodoList::new();
        assert!(list.toggle(99).is_err());
        assert!(list.remove(99).is_err());
    }

    #[test]
    fn persists_through_store() {
        let mut store = MemoryStore::new();
        let mut list = TodoList::load(&store).unwrap();
        list.add("Prepare Chemistry Lab Report", Priority::Low).unwrap();
        list.save(&mut store).unwrap();

        let loaded = TodoList::load(&store).unwrap();
        assert_eq!(loaded, list);
        assert_eq!(loaded.get(1).unwrap().priority, Priority::Low);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
