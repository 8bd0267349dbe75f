//! Playback queue engine.
//!
//! `player::Player` owns the queue, the current position and all transport
//! state, and keeps the bound audio output synchronized as the listener
//! issues commands or the device reports progress. Everything here is
//! single-threaded: commands and pumped device events run to completion one
//! at a time.

mod engine;
mod types;

pub use engine::*;
pub use types::*;
