//! ClonePad: a rich-text notepad whose most recently edited note stays on top.

pub mod app;
