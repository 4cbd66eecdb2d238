//! In-memory tag store.

use std::cell::{Cell, RefCell};

use mfdeploy::core::version::TagStore;
use mfdeploy::error::{RemoteError, Result};

/// Tags as `(name, commit)` pairs with a movable head.
pub struct MemoryTags {
    tags: RefCell<Vec<(String, String)>>,
    head: RefCell<String>,
    pushed: RefCell<Vec<String>>,
    fetches: Cell<usize>,
}

impl MemoryTags {
    pub fn new() -> Self {
        Self {
            tags: RefCell::new(Vec::new()),
            head: RefCell::new("c1".to_string()),
            pushed: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
        }
    }

    /// Seed an existing tag on `commit`.
    pub fn with_tag(self, tag: &str, commit: &str) -> Self {
        self.tags
            .borrow_mut()
            .push((tag.to_string(), commit.to_string()));
        self
    }

    /// Move head to a new commit.
    pub fn checkout(&self, commit: &str) {
        *self.head.borrow_mut() = commit.to_string();
    }

    pub fn names(&self) -> Vec<String> {
        self.tags.borrow().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.borrow().clone()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl TagStore for MemoryTags {
    fn fetch(&self) -> Result<()> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(())
    }

    fn tags_at_head(&self, prefix: &str) -> Result<Vec<String>> {
        let head = self.head.borrow();
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|(t, c)| t.starts_with(prefix) && *c == *head)
            .map(|(t, _)| t.clone())
            .collect())
    }

    fn tags(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .tags
            .borrow()
            .iter()
            .filter(|(t, _)| t.starts_with(prefix))
            .map(|(t, _)| t.clone())
            .collect())
    }

    fn create(&self, tag: &str) -> Result<()> {
        if self.tags.borrow().iter().any(|(t, _)| t == tag) {
            return Err(RemoteError::Failed {
                command: format!("git tag {}", tag),
                code: Some(128),
                stderr: format!("fatal: tag '{}' already exists", tag),
            }
            .into());
        }
        let head = self.head.borrow().clone();
        self.tags.borrow_mut().push((tag.to_string(), head));
        Ok(())
    }

    fn push(&self, tag: &str) -> Result<()> {
        self.pushed.borrow_mut().push(tag.to_string());
        Ok(())
    }
}
