use crate::persistence::{load_record, persist_quietly, SharedStore, TASK_LIST_KEY};
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task text cannot be empty")]
    EmptyText,
    #[error("No task with id {0}")]
    NotFound(String),
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Flat, persisted list of tasks
pub struct TaskList {
    tasks: Vec<Task>,
    store: SharedStore,
}

impl TaskList {
    pub fn load(store: SharedStore) -> Self {
        let tasks: Vec<Task> = load_record(store.as_ref(), TASK_LIST_KEY);
        Self { tasks, store }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// (open, completed)
    pub fn counts(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        (self.tasks.len() - done, done)
    }

    /// Append a task; the id is the creation time in milliseconds, bumped until unique
    pub fn add(&mut self, text: &str) -> Result<&Task, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let mut stamp = Local::now().timestamp_millis();
        while self.tasks.iter().any(|t| t.id == stamp.to_string()) {
            stamp += 1;
        }

        self.tasks.push(Task {
            id: stamp.to_string(),
            text: text.to_string(),
            completed: false,
        });
        self.save();
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn toggle(&mut self, id: &str) -> Result<(), TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        self.save();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, TaskError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        let removed = self.tasks.remove(index);
        self.save();
        Ok(removed)
    }

    fn save(&self) {
        persist_quietly(self.store.as_ref(), TASK_LIST_KEY, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::memory::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut list = TaskList::load(MemoryStore::shared());
        let first = list.add("write report").unwrap().id.clone();
        let second = list.add("email Sam").unwrap().id.clone();
        let third = list.add("stretch").unwrap().id.clone();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut list = TaskList::load(MemoryStore::shared());
        assert_eq!(list.add("   ").unwrap_err(), TaskError::EmptyText);
        assert!(list.is_empty());
    }

    #[test]
    fn test_toggle_and_remove_persist() {
        let store = MemoryStore::shared();
        let mut list = TaskList::load(store.clone());
        let id = list.add("read chapter 3").unwrap().id.clone();

        list.toggle(&id).unwrap();
        assert_eq!(list.counts(), (0, 1));

        let reloaded = TaskList::load(store.clone());
        assert_eq!(reloaded.tasks(), list.tasks());

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.text, "read chapter 3");
        assert!(TaskList::load(store).is_empty());
    }

    #[test]
    fn test_unknown_id_errors() {
        let mut list = TaskList::load(MemoryStore::shared());
        assert_eq!(list.toggle("42"), Err(TaskError::NotFound("42".to_string())));
        assert!(list.remove("42").is_err());
    }

    #[test]
    fn test_malformed_record_gives_empty_list() {
        let store = MemoryStore::shared();
        store.put_raw(TASK_LIST_KEY, "[{\"id\": 1}]");
        assert!(TaskList::load(store).is_empty());
    }
}
