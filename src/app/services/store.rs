//! The ordered note collection and its JSON file.
//!
//! Index 0 is always the note most recently returned from the editor. There
//! is no timestamp: a note being edited is taken out with [`NoteStore::take_at`]
//! and comes back through [`NoteStore::insert_front`], which is the whole
//! ordering contract.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::app::domain::note::NoteRecord;
use crate::app::infrastructure::error::{IndexError, LoadError, SaveError};
use crate::app::infrastructure::platform::default_notes_path;

#[derive(Debug)]
pub struct NoteStore {
    notes: Vec<NoteRecord>,
    file_path: PathBuf,
    pretty: bool,
}

impl NoteStore {
    /// An empty store bound to `file_path`. Nothing is read until [`load`](Self::load).
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            notes: Vec::new(),
            file_path: file_path.into(),
            pretty: false,
        }
    }

    pub fn at_default_location() -> Self {
        Self::new(default_notes_path())
    }

    /// Pretty-print the JSON on save.
    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Replace the in-memory notes with the file's contents.
    ///
    /// A missing file is a first run, not an error. On any other failure the
    /// current notes are kept as they were.
    pub fn load(&mut self) -> Result<(), LoadError> {
        let data = match fs::read(&self.file_path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No notes file at {}, starting empty", self.file_path.display());
                return Ok(());
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.file_path.clone(),
                    source,
                });
            }
        };

        let notes: Vec<NoteRecord> =
            serde_json::from_slice(&data).map_err(|source| LoadError::Json {
                path: self.file_path.clone(),
                source,
            })?;

        log::info!("Loaded {} notes from {}", notes.len(), self.file_path.display());
        self.notes = notes;
        Ok(())
    }

    /// Write every note, in order, replacing the file atomically.
    ///
    /// The JSON goes to a temporary file next to the target which is then
    /// renamed over it, so a reader sees either the old file or the new one.
    pub fn save(&self) -> Result<(), SaveError> {
        let json = if self.pretty {
            serde_json::to_vec_pretty(&self.notes)?
        } else {
            serde_json::to_vec(&self.notes)?
        };

        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| SaveError::Io {
            path: self.file_path.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;
        let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.file_path)
            .map_err(|source| SaveError::Persist {
                path: self.file_path.clone(),
                source,
            })?;

        log::info!("Saved {} notes to {}", self.notes.len(), self.file_path.display());
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.notes.len()
    }

    /// Copy the current file to `<name>.bak` next to it, returning the copy's path.
    pub fn back_up_file(&self) -> Result<PathBuf, SaveError> {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        let backup = self.file_path.with_file_name(name);

        fs::copy(&self.file_path, &backup).map_err(|source| SaveError::Io {
            path: backup.clone(),
            source,
        })?;
        log::info!("Backed up {} to {}", self.file_path.display(), backup.display());
        Ok(backup)
    }

    pub fn notes(&self) -> &[NoteRecord] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&NoteRecord> {
        self.notes.get(index)
    }

    pub fn title_at(&self, index: usize) -> Result<&str, IndexError> {
        self.check_index(index)?;
        Ok(self.notes[index].display_title())
    }

    /// Check a note out for editing. It is expected back via [`insert_front`](Self::insert_front).
    pub fn take_at(&mut self, index: usize) -> Result<NoteRecord, IndexError> {
        self.check_index(index)?;
        Ok(self.notes.remove(index))
    }

    /// Delete a note for good.
    pub fn remove_at(&mut self, index: usize) -> Result<(), IndexError> {
        self.check_index(index)?;
        let removed = self.notes.remove(index);
        log::debug!("Removed note '{}' at {}", removed.display_title(), index);
        Ok(())
    }

    pub fn insert_front(&mut self, note: NoteRecord) {
        self.notes.insert(0, note);
    }

    /// A new note for the editor. Not part of the collection until it is inserted.
    pub fn create_empty(&self) -> NoteRecord {
        NoteRecord::empty()
    }

    fn check_index(&self, index: usize) -> Result<(), IndexError> {
        if index < self.notes.len() {
            Ok(())
        } else {
            Err(IndexError {
                index,
                len: self.notes.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn note(title: &str) -> NoteRecord {
        NoteRecord::new(title, format!("{{\\rtf1 {}}}", title).into_bytes())
    }

    fn titles(store: &NoteStore) -> Vec<&str> {
        store.notes().iter().map(|n| n.display_title()).collect()
    }

    fn store_with(titles: &[&str]) -> NoteStore {
        let mut store = NoteStore::new("unused.json");
        for t in titles.iter().rev() {
            store.insert_front(note(t));
        }
        store
    }

    #[test]
    fn test_insert_front_prepends() {
        let mut store = store_with(&["B", "A"]);
        store.insert_front(note("C"));
        assert_eq!(store.count(), 3);
        assert_eq!(store.title_at(0).unwrap(), "C");
        assert_eq!(titles(&store), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_insert_front_does_not_deduplicate() {
        let mut store = store_with(&["A"]);
        store.insert_front(note("A"));
        assert_eq!(store.count(), 2);
        assert_eq!(store.get(0), store.get(1));
    }

    #[test]
    fn test_take_at_shifts_later_notes() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        let taken = store.take_at(1).unwrap();
        assert_eq!(taken.display_title(), "B");
        assert_eq!(titles(&store), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_take_then_insert_moves_to_front() {
        let mut store = store_with(&["B", "A"]);
        let mut taken = store.take_at(1).unwrap();
        assert_eq!(taken.display_title(), "A");
        assert_eq!(titles(&store), vec!["B"]);

        taken.title = Some("A2".to_string());
        store.insert_front(taken);
        assert_eq!(titles(&store), vec!["A2", "B"]);
    }

    #[test]
    fn test_out_of_range_leaves_notes_unchanged() {
        let mut store = store_with(&["A", "B"]);
        assert_eq!(store.take_at(2), Err(IndexError { index: 2, len: 2 }));
        assert_eq!(store.remove_at(5), Err(IndexError { index: 5, len: 2 }));
        assert!(store.title_at(2).is_err());
        assert_eq!(titles(&store), vec!["A", "B"]);

        let mut empty = NoteStore::new("unused.json");
        assert!(empty.take_at(0).is_err());
    }

    #[test]
    fn test_remove_at() {
        let mut store = store_with(&["A", "B", "C"]);
        store.remove_at(0).unwrap();
        assert_eq!(titles(&store), vec!["B", "C"]);
    }

    #[test]
    fn test_create_empty_is_detached() {
        let store = store_with(&["A"]);
        let fresh = store.create_empty();
        assert!(fresh.content.is_empty());
        assert_eq!(fresh.title, None);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_untitled_note_reads_as_empty_title() {
        let mut store = NoteStore::new("unused.json");
        store.insert_front(NoteRecord::empty());
        assert_eq!(store.title_at(0).unwrap(), "");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = NoteStore::new(dir.path().join("notes.json"));
        store.load().unwrap();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let mut store = store_with(&["Newest", "Middle", "Oldest"]);
        store.insert_front(NoteRecord::empty());
        store.file_path = path.clone();
        store.save().unwrap();

        let mut reloaded = NoteStore::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.notes(), store.notes());
    }

    #[test]
    fn test_load_malformed_keeps_existing_notes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "[{\"noteContents\": 42}").unwrap();

        let mut store = store_with(&["Kept"]);
        store.file_path = path;
        let err = store.load().unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert_eq!(titles(&store), vec!["Kept"]);
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut store = NoteStore::new(dir.path());
        assert!(matches!(store.load(), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_save_replaces_file_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "old contents").unwrap();

        let store = NoteStore::new(&path);
        store.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("notes.json");
        let store = store_with(&["A"]);
        let store = NoteStore { file_path: path.clone(), ..store };
        store.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_failure_keeps_notes() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();

        let mut store = store_with(&["A"]);
        store.file_path = blocker.join("notes.json");
        assert!(store.save().is_err());
        assert_eq!(titles(&store), vec!["A"]);
    }

    #[test]
    fn test_back_up_file_copies_next_to_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, "original bytes").unwrap();

        let backup = NoteStore::new(&path).back_up_file().unwrap();
        assert_eq!(backup, dir.path().join("notes.json.bak"));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "original bytes");
        assert_eq!(fs::read_to_string(&path).unwrap(), "original bytes");
    }

    #[test]
    fn test_back_up_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.back_up_file(), Err(SaveError::Io { .. })));
    }

    #[test]
    fn test_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        let store = NoteStore {
            file_path: path.clone(),
            ..store_with(&["A"])
        }
        .with_pretty_json(true);
        store.save().unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\n  {"));
    }
}
