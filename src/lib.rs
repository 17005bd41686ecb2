//! Canvas engine for the Touchline set-piece designer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns raw
//! pointer/wheel input into play edits: token position updates, run-waypoint
//! edits, and viewport pan/zoom. The host UI owns the play itself; the engine
//! reads it per call and hands edits back as [`engine::Action`] values, so a
//! re-render always reflects the host's latest state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Play and token types shared with the host |
//! | [`camera`] | Viewport state and screen/pitch coordinate conversions |
//! | [`input`] | Per-pointer interactions and the drag trail |
//! | [`batch`] | Frame-coalesced update batching |
//! | [`hit`] | Hit-testing tokens and waypoint handles |
//! | [`route`] | Run (path) editing operations |
//! | [`template`] | Prebuilt set-piece run shapes |
//! | [`render`] | Scene rendering |
//! | [`consts`] | Shared numeric constants (pitch size, zoom limits, etc.) |

pub mod batch;
pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod render;
pub mod route;
pub mod template;
