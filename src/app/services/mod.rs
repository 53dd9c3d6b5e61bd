//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Note persistence and ordering
//! - RTF encoding and decoding

pub mod rtf;
pub mod store;
