//! Small player types: repeat mode and the published state snapshot.

/// What happens when the queue runs past its last track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop at the end of the queue.
    Off,
    /// Repeat the current track when it ends.
    One,
    /// Wrap around to the start of the queue.
    All,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

impl RepeatMode {
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::One => "One",
            Self::All => "All",
        }
    }
}

/// Immutable view of player state, broadcast to subscribers after every
/// mutation. Carries just enough of the current track for observers (MPRIS,
/// status lines) without cloning the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    /// Position in the queue; `None` when the queue is empty.
    pub current_index: Option<usize>,
    pub current_id: Option<String>,
    pub current_title: Option<String>,
    pub current_group_id: Option<String>,
    pub queue_len: usize,
    pub is_playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Cached mirror of the device position (seconds); may be briefly stale.
    pub current_time: f64,
    pub duration: f64,
    pub volume: f32,
}
