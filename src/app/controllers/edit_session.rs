use crate::app::domain::note::NoteRecord;
use crate::app::domain::rich_text::{EditableDocument, RichTextCodec};

/// How an edit session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The edited note was handed back to its owner.
    Returned,
    /// The user confirmed deletion; nothing was handed back.
    Deleted,
}

/// One note checked out for editing.
///
/// The note has already been taken out of the list when the session opens.
/// Closing the session normally re-encodes the document, recomputes the
/// title and passes the note to `on_return`. A confirmed delete closes
/// without calling it, and a session dropped without [`close`](Self::close)
/// loses the edit.
pub struct EditSession<'a, C: RichTextCodec> {
    note: NoteRecord,
    document: EditableDocument,
    codec: C,
    on_return: Box<dyn FnOnce(NoteRecord) + 'a>,
    used_placeholder: bool,
    delete_confirmed: bool,
}

impl<'a, C: RichTextCodec> EditSession<'a, C> {
    /// Decode `note` for editing. Content that does not decode, including the
    /// empty content of a new note, opens as `placeholder` instead.
    pub fn open(
        note: NoteRecord,
        codec: C,
        placeholder: &str,
        on_return: impl FnOnce(NoteRecord) + 'a,
    ) -> Self {
        let (document, used_placeholder) = match codec.decode(&note.content) {
            Ok(doc) => (doc, false),
            Err(e) => {
                log::debug!(
                    "Opening '{}' with placeholder text: {}",
                    note.display_title(),
                    e
                );
                (EditableDocument::from_plain(placeholder), true)
            }
        };

        Self {
            note,
            document,
            codec,
            on_return: Box::new(on_return),
            used_placeholder,
            delete_confirmed: false,
        }
    }

    pub fn document(&self) -> &EditableDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut EditableDocument {
        &mut self.document
    }

    /// The note as it was when the session opened.
    pub fn original(&self) -> &NoteRecord {
        &self.note
    }

    /// True when the stored content could not be decoded and the placeholder is shown.
    pub fn used_placeholder(&self) -> bool {
        self.used_placeholder
    }

    /// The user confirmed the delete prompt.
    pub fn confirm_delete(&mut self) {
        self.delete_confirmed = true;
    }

    pub fn is_delete_confirmed(&self) -> bool {
        self.delete_confirmed
    }

    pub fn close(self) -> SessionOutcome {
        if self.delete_confirmed {
            log::debug!("Discarding deleted note '{}'", self.note.display_title());
            return SessionOutcome::Deleted;
        }

        let mut note = self.note;
        note.content = self.codec.encode(&self.document);
        note.title = Some(self.codec.first_line(&self.document));
        (self.on_return)(note);
        SessionOutcome::Returned
    }
}
