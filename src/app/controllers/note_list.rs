use crate::app::controllers::edit_session::EditSession;
use crate::app::domain::note::NoteRecord;
use crate::app::domain::rich_text::{EditableDocument, RichTextCodec};
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::error::{IndexError, SaveError};
use crate::app::services::store::NoteStore;

/// The note list screen without its widgets.
///
/// Owns the store. Selecting a row checks the note out into an
/// [`EditSession`] that borrows the controller until it is closed, so the
/// list cannot be touched while a note is away being edited.
pub struct NoteListController<C: RichTextCodec> {
    store: NoteStore,
    codec: C,
    placeholder: String,
    unreadable_file: bool,
}

impl<C: RichTextCodec> NoteListController<C> {
    pub fn new(store: NoteStore, codec: C, settings: &AppSettings) -> Self {
        Self {
            store,
            codec,
            placeholder: settings.placeholder_text.clone(),
            unreadable_file: false,
        }
    }

    /// Build the controller and read the notes file. A file that cannot be
    /// read leaves the list empty; the app keeps working with zero notes.
    pub fn load(mut store: NoteStore, codec: C, settings: &AppSettings) -> Self {
        let failed = match store.load() {
            Ok(()) => false,
            Err(e) => {
                log::warn!("Cannot read notes file: {}", e);
                true
            }
        };
        let mut list = Self::new(store, codec, settings);
        list.unreadable_file = failed;
        list
    }

    /// True while the notes file failed to load and has not been replaced yet.
    pub fn has_unreadable_file(&self) -> bool {
        self.unreadable_file
    }

    /// The list became visible: persist everything.
    ///
    /// This also runs right after the initial load, which rewrites the file
    /// unchanged. A failure is logged and handed back for a non-blocking notice.
    ///
    /// A file that failed to load is never overwritten by an empty list. Once
    /// there are notes to keep, the old file is copied to `<name>.bak` first.
    pub fn did_appear(&mut self) -> Option<SaveError> {
        if self.unreadable_file {
            if self.store.count() == 0 {
                log::warn!(
                    "Leaving unreadable notes file {} untouched",
                    self.store.file_path().display()
                );
                return None;
            }
            if let Err(e) = self.store.back_up_file() {
                log::warn!("Not saving notes, backup of unreadable file failed: {}", e);
                return Some(e);
            }
            self.unreadable_file = false;
        }

        match self.store.save() {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Unable to save notes: {}", e);
                Some(e)
            }
        }
    }

    pub fn row_count(&self) -> usize {
        self.store.count()
    }

    pub fn row_title(&self, index: usize) -> Result<&str, IndexError> {
        self.store.title_at(index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.store.notes().iter().map(NoteRecord::display_title)
    }

    /// Read a note's document without checking it out.
    pub fn peek(&self, index: usize) -> Result<EditableDocument, IndexError> {
        let note = self.store.get(index).ok_or(IndexError {
            index,
            len: self.store.count(),
        })?;
        Ok(self
            .codec
            .decode(&note.content)
            .unwrap_or_else(|_| EditableDocument::from_plain(&self.placeholder)))
    }

    /// Open the note at `index` for editing. On close it comes back at the top.
    pub fn select_row(&mut self, index: usize) -> Result<EditSession<'_, &C>, IndexError> {
        let note = self.store.take_at(index)?;
        Ok(self.open_session(note))
    }

    /// Start a new note. It joins the list only when its session closes.
    pub fn compose(&mut self) -> EditSession<'_, &C> {
        let note = self.store.create_empty();
        self.open_session(note)
    }

    pub fn swipe_delete(&mut self, index: usize) -> Result<(), IndexError> {
        self.store.remove_at(index)
    }

    fn open_session(&mut self, note: NoteRecord) -> EditSession<'_, &C> {
        let store = &mut self.store;
        EditSession::open(note, &self.codec, &self.placeholder, move |edited| {
            store.insert_front(edited)
        })
    }
}
