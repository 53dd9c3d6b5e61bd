//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the presentation layer:
//! - The note list screen
//! - The editing session for a single note

pub mod edit_session;
pub mod note_list;
