//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (NoteRecord, EditableDocument, Settings)
//! - `controllers/` - Orchestration (NoteListController, EditSession)
//! - `services/` - Business operations (note store, RTF codec)
//! - `infrastructure/` - External integrations (platform paths, errors)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-exports for convenient external access
pub use controllers::edit_session::{EditSession, SessionOutcome};
pub use controllers::note_list::NoteListController;
pub use domain::{AppSettings, EditableDocument, NoteRecord, RichTextCodec, Span, TextStyle};
pub use infrastructure::error::{AppError, DecodeError, IndexError, LoadError, SaveError};
pub use services::rtf::RtfCodec;
pub use services::store::NoteStore;
