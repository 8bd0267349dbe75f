//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog,
//! browsing filters and selection state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
