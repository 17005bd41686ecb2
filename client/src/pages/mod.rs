//! Top-level routed pages.

pub mod designer;
pub mod library;
