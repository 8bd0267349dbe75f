//! The output contract the player programs against, and the binding that
//! makes "no device attached" a state every call site has to handle.

/// Progress and lifecycle reports from the output, consumed by the player in
/// one dispatch function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Playback position moved (seconds).
    TimeUpdated(f64),
    /// Total duration of the loaded source became known (seconds).
    DurationKnown(f64),
    /// The output actually started producing audio.
    Started,
    /// The output stopped producing audio on request.
    Paused,
    /// The loaded source ran to completion.
    Ended,
}

/// A single audio output resource.
///
/// Commands are fire-and-forget; readiness and progress come back through
/// [`AudioOutput::poll`]. A source that fails to load simply never reports
/// `Started`.
pub trait AudioOutput {
    /// Assign a new source and load it. Does not start playback.
    fn set_source(&mut self, source: &str);
    /// The source currently assigned, if any.
    fn current_source(&self) -> Option<&str>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Jump to an absolute position (seconds).
    fn seek(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    /// Drain pending events since the last poll.
    fn poll(&mut self) -> Vec<DeviceEvent>;
}

/// Whether a concrete output is attached. The player owns one of these; the
/// unbound state is normal and reachable, not an error.
#[derive(Default)]
pub enum DeviceBinding {
    #[default]
    Unbound,
    Bound(Box<dyn AudioOutput>),
}

impl DeviceBinding {
    pub fn output_mut(&mut self) -> Option<&mut dyn AudioOutput> {
        match self {
            DeviceBinding::Unbound => None,
            DeviceBinding::Bound(out) => Some(out.as_mut()),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, DeviceBinding::Bound(_))
    }
}
