//! Storage backends for the character slot.
//!
//! A backend owns exactly one named slot. The browser backend lives in
//! `platform::web`; [`MemoryStorage`] is used headless and in tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;

pub trait Storage {
    /// Raw contents of the slot, `None` if it was never written or cleared.
    fn load(&self) -> Option<String>;

    fn save(&self, data: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// In-memory slot. Clones share the same slot, so a test can keep a handle
/// and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw slot contents, e.g. a record written by an older page.
    pub fn with_contents(data: &str) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(data.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.contents()
    }

    fn save(&self, data: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_slot() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.save("{}").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("{}"));
        handle.clear().unwrap();
        assert!(storage.load().is_none());
    }
}
