//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - NoteRecord, the persisted note
//! - EditableDocument and the rich-text codec interface
//! - Application settings

pub mod note;
pub mod rich_text;
pub mod settings;

pub use note::NoteRecord;
pub use rich_text::{EditableDocument, RichTextCodec, Span, TextStyle};
pub use settings::AppSettings;
