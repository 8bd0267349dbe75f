//! Audio output device layer.
//!
//! The player never talks to `rodio` directly: it issues commands through the
//! adapter against an [`output::AudioOutput`] and consumes the
//! [`output::DeviceEvent`]s the output reports back. The binding may be
//! absent at any time, in which case every command is silently absorbed.

pub mod adapter;
mod output;
mod sink;

pub use output::{AudioOutput, DeviceBinding, DeviceEvent};
pub use sink::RodioOutput;
