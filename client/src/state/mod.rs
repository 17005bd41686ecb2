//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by lifetime: `plays` is the persisted play library and the
//! operations the UI applies to it, `editor` is per-session designer state
//! (selection, view toggles, status line). Components receive both as
//! `RwSignal` contexts provided by the app root.

pub mod editor;
pub mod plays;
