//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Platform directories for the notes and settings files
//! - Error types

pub mod error;
pub mod platform;
