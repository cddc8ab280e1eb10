// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use crate::db::Database;
use crate::error::Fallible;
use crate::types::word::WordRecord;

/// The key the confusing words are stored under.
pub const CONFUSING_KEY: &str = "confusing_words";

/// The words the user has flagged for extra review.
///
/// Every mutation is written through to the database. If the database
/// cannot be opened, read, or written, the set keeps working in memory for
/// the rest of the session.
pub struct ConfusingSet {
    words: Vec<WordRecord>,
    db: Option<Database>,
}

impl ConfusingSet {
    /// Open the database at `path` and load the stored set.
    pub fn open(path: &Path) -> Self {
        match Database::new(path) {
            Ok(db) => Self::load(db),
            Err(e) => {
                log::warn!(
                    "Could not open {}, confusing words will not be saved: {e}",
                    path.display()
                );
                Self::in_memory()
            }
        }
    }

    /// Load the stored set from an open database.
    pub fn load(db: Database) -> Self {
        match read_words(&db) {
            Ok(stored) => {
                let mut set = Self {
                    words: Vec::new(),
                    db: Some(db),
                };
                for word in stored {
                    if !set.contains(&word) {
                        set.words.push(word);
                    }
                }
                log::debug!("Loaded {} confusing words.", set.words.len());
                set
            }
            Err(e) => {
                // Don't overwrite what we couldn't read.
                log::warn!("Could not read confusing words, continuing without saving: {e}");
                Self::in_memory()
            }
        }
    }

    /// A set that is never persisted.
    pub fn in_memory() -> Self {
        Self {
            words: Vec::new(),
            db: None,
        }
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &WordRecord) -> bool {
        self.words.contains(word)
    }

    pub fn position(&self, word: &WordRecord) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    /// Whether mutations are still being written to the database.
    pub fn is_persistent(&self) -> bool {
        self.db.is_some()
    }

    /// Add a word. Returns false if an equal word is already in the set.
    pub fn add(&mut self, word: WordRecord) -> bool {
        if self.contains(&word) {
            return false;
        }
        self.words.push(word);
        self.persist();
        true
    }

    /// Remove the word at `index`. Out of range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<WordRecord> {
        if index >= self.words.len() {
            return None;
        }
        let word = self.words.remove(index);
        self.persist();
        Some(word)
    }

    fn persist(&mut self) {
        let Some(db) = self.db.as_mut() else {
            return;
        };
        if let Err(e) = write_words(db, &self.words) {
            log::warn!("Could not save confusing words, continuing in memory: {e}");
            self.db = None;
        }
    }
}

fn read_words(db: &Database) -> Fallible<Vec<WordRecord>> {
    match db.get(CONFUSING_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn write_words(db: &mut Database, words: &[WordRecord]) -> Fallible<()> {
    let json = serde_json::to_string(words)?;
    db.set(CONFUSING_KEY, &json)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut set = ConfusingSet::in_memory();
        assert!(set.add(WordRecord::new("Hund", "dog")));
        assert!(!set.add(WordRecord::new("Hund", "dog")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_is_structural() {
        let mut set = ConfusingSet::in_memory();
        set.add(WordRecord::new("Hund", "dog"));
        set.add(WordRecord::new("Hund", "hound"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.position(&WordRecord::new("Hund", "hound")), Some(1));
    }

    #[test]
    fn test_remove() {
        let mut set = ConfusingSet::in_memory();
        set.add(WordRecord::new("a", "1"));
        set.add(WordRecord::new("b", "2"));
        assert_eq!(set.remove(5), None);
        assert_eq!(set.remove(0), Some(WordRecord::new("a", "1")));
        assert_eq!(set.records(), &[WordRecord::new("b", "2")]);
    }

    #[test]
    fn test_persists_across_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.db");
        {
            let mut set = ConfusingSet::open(&path);
            assert!(set.is_persistent());
            set.add(WordRecord::new("a", "1"));
            set.add(WordRecord::new("b", "2"));
            set.add(WordRecord::new("c", "3"));
            set.remove(1);
        }
        let set = ConfusingSet::open(&path);
        assert_eq!(
            set.records(),
            &[WordRecord::new("a", "1"), WordRecord::new("c", "3")]
        );
        Ok(())
    }

    #[test]
    fn test_stored_format() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.db");
        {
            let mut set = ConfusingSet::open(&path);
            set.add(WordRecord::new("a", "1"));
        }
        let db = Database::new(&path)?;
        assert_eq!(
            db.get(CONFUSING_KEY)?,
            Some(r#"[{"front":"a","back":"1"}]"#.to_string())
        );
        Ok(())
    }

    #[test]
    fn test_duplicates_in_storage_are_dropped() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("store.db"))?;
        db.set(
            CONFUSING_KEY,
            r#"[{"front":"a","back":"1"},{"front":"a","back":"1"}]"#,
        )?;
        let set = ConfusingSet::load(db);
        assert_eq!(set.len(), 1);
        Ok(())
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_memory() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("store.db"))?;
        db.set(CONFUSING_KEY, "not json")?;
        let mut set = ConfusingSet::load(db);
        assert!(set.is_empty());
        assert!(!set.is_persistent());
        assert!(set.add(WordRecord::new("a", "1")));
        assert_eq!(set.len(), 1);
        Ok(())
    }

    #[test]
    fn test_failed_write_falls_back_to_memory() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.db");
        let mut set = ConfusingSet::open(&path);
        assert!(set.add(WordRecord::new("a", "1")));
        assert!(set.is_persistent());
        // Pull the table out from under the open set.
        rusqlite::Connection::open(&path)?.execute_batch("drop table kv;")?;
        assert!(set.add(WordRecord::new("b", "2")));
        assert!(!set.is_persistent());
        assert!(set.add(WordRecord::new("c", "3")));
        assert_eq!(set.remove(0), Some(WordRecord::new("a", "1")));
        assert_eq!(
            set.records(),
            &[WordRecord::new("b", "2"), WordRecord::new("c", "3")]
        );
        Ok(())
    }

    #[test]
    fn test_unopenable_storage_falls_back_to_memory() -> Fallible<()> {
        let dir = tempdir()?;
        // A directory can't be opened as a database.
        let mut set = ConfusingSet::open(dir.path());
        assert!(!set.is_persistent());
        assert!(set.add(WordRecord::new("a", "1")));
        Ok(())
    }
}
