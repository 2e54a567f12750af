//! Trip planner web client.
//!
//! Presenters place views into containers handed to them; views render
//! markup from their state and rebind their handlers after every redraw.
//! The page itself is reached only through the [`framework::dom::Dom`] seam.

pub mod app;
pub mod components;
pub mod config;
pub mod framework;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod presenters;
