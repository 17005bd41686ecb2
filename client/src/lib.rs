//! # touchline-client
//!
//! Leptos + WASM frontend for the Touchline set-piece designer.
//!
//! This crate contains pages, components, application state, and the local
//! storage / export helpers. It integrates with the `touchline` engine crate
//! for imperative canvas input and rendering via the `CanvasHost` bridge
//! component.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
