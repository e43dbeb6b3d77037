//! Character store: whole-record reads and writes over a [`Storage`] slot.
//!
//! There is no partial update. Callers load, mutate and save the full record;
//! the engine runs on one thread so nothing interleaves between the two.

use std::rc::Rc;

use crate::error::Result;
use crate::game::character::Character;
use crate::game::storage::Storage;

#[derive(Clone)]
pub struct CharacterStore {
    storage: Rc<dyn Storage>,
}

impl CharacterStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read the record. Never fails: a missing slot yields the default record
    /// (not written back), and so does a slot holding unparseable data.
    pub fn load(&self) -> Character {
        let Some(raw) = self.storage.load() else {
            return Character::default();
        };
        match serde_json::from_str(&raw) {
            Ok(character) => character,
            Err(e) => {
                tracing::warn!("Discarding unreadable character record: {}", e);
                Character::default()
            }
        }
    }

    /// Overwrite the stored record.
    pub fn save(&self, character: &Character) -> Result<()> {
        let json = serde_json::to_string(character)?;
        self.storage.save(&json)
    }

    /// Discard the stored record. The next `load` returns defaults.
    pub fn reset(&self) -> Result<()> {
        tracing::info!("Character record cleared");
        self.storage.clear()
    }

    /// Load, apply `f`, save. Returns whatever `f` returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut Character) -> R) -> Result<(Character, R)> {
        let mut character = self.load();
        let out = f(&mut character);
        self.save(&character)?;
        Ok((character, out))
    }
}
