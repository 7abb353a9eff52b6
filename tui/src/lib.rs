//! Reflow TUI - Terminal surface for the reorder console
//!
//! This crate drives a [`reflow_core::Scene`] from a terminal: it feeds
//! frame deltas from the wall clock, turns key presses into reorders and
//! draws the scene into a ratatui buffer each frame.
//!
//! # Architecture
//!
//! - **App**: event loop, frame pacing and the status bar
//! - **Render**: [`reflow_core::Renderer`] over a ratatui buffer
//! - **Sample**: the demo rows the list starts with
//! - **Theme**: the list palette

pub mod app;
pub mod render;
pub mod sample;
pub mod theme;

pub use app::App;
