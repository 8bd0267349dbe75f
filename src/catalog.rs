//! Catalog data: declared tracks and groups, plus the pure filter/sort
//! functions that turn the roster into a visible, playable order.
//!
//! The catalog is read-only to the rest of the program; the player only ever
//! reorders and references tracks, it never mutates them.

mod filters;
mod load;
mod model;

pub use filters::*;
pub use load::*;
pub use model::*;

#[cfg(test)]
mod tests;
