use std::sync::mpsc::{self, Receiver, Sender};

use rand::RngExt;
use rand::rng;

use crate::catalog::Track;
use crate::device::{AudioOutput, DeviceBinding, DeviceEvent, adapter};

use super::types::{PlayerSnapshot, RepeatMode};

/// Elapsed seconds beyond which `prev` restarts the current track instead of
/// stepping back to the previous one.
const PREV_RESTART_THRESHOLD: f64 = 3.0;

const DEFAULT_VOLUME: f32 = 0.8;

/// The playback queue engine.
///
/// Invariants maintained across every operation:
/// - whenever the queue is non-empty, `current_index` is a valid index;
/// - whenever the queue is empty, `current_index` is 0 and playback is
///   stopped.
///
/// No operation returns an error; out-of-range commands clamp or no-op, and
/// commands issued while no device is bound update state but skip the device.
pub struct Player {
    queue: Vec<Track>,
    current_index: usize,
    is_playing: bool,
    shuffle: bool,
    repeat: RepeatMode,
    current_time: f64,
    duration: f64,
    volume: f32,
    device: DeviceBinding,
    listeners: Vec<Sender<PlayerSnapshot>>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            current_index: 0,
            is_playing: false,
            shuffle: false,
            repeat: RepeatMode::default(),
            current_time: 0.0,
            duration: 0.0,
            volume: DEFAULT_VOLUME,
            device: DeviceBinding::Unbound,
            listeners: Vec::new(),
        }
    }

    // --- device binding ---

    /// Bind an output. The engine is the source of truth for volume, so it is
    /// pushed to the device immediately; if a queue is loaded, the current
    /// track is re-loaded preserving the current play intent. Reattachment
    /// never changes the queue position.
    pub fn attach_device(&mut self, output: Box<dyn AudioOutput>) {
        self.device = DeviceBinding::Bound(output);
        if self.queue.is_empty() {
            self.notify();
            return;
        }
        adapter::set_volume(&mut self.device, self.volume);
        adapter::load(
            &mut self.device,
            &self.queue[self.current_index],
            self.is_playing,
        );
        self.notify();
    }

    pub fn detach_device(&mut self) {
        self.device = DeviceBinding::Unbound;
        self.notify();
    }

    pub fn is_bound(&self) -> bool {
        self.device.is_bound()
    }

    /// Drain pending device events and dispatch them. This is the only place
    /// device reports enter the engine; `Ended` is the only event allowed to
    /// move the queue position.
    pub fn pump(&mut self) {
        let events = match self.device.output_mut() {
            Some(out) => out.poll(),
            None => return,
        };
        for event in events {
            self.handle_device_event(event);
        }
    }

    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::TimeUpdated(t) => self.sync_current_time(t),
            DeviceEvent::DurationKnown(d) => self.set_duration(d),
            DeviceEvent::Started => self.set_is_playing(true),
            DeviceEvent::Paused => self.set_is_playing(false),
            DeviceEvent::Ended => self.handle_ended(),
        }
    }

    // --- queue operations ---

    /// Replace the queue wholesale and start playing at `start_index`
    /// (clamped). An empty `tracks` stops playback and zeroes time/duration.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        if tracks.is_empty() {
            self.queue = tracks;
            self.stop_emptied();
            return;
        }
        let start = start_index.min(tracks.len() - 1);
        self.queue = tracks;
        self.current_index = start;
        self.is_playing = true;
        self.current_time = 0.0;
        adapter::load(&mut self.device, &self.queue[start], true);
        self.notify();
    }

    /// Append to the tail. Never interrupts current playback.
    pub fn enqueue(&mut self, track: Track) {
        self.queue.push(track);
        self.notify();
    }

    /// Remove one entry. Out-of-range is a no-op. Removing the playing entry
    /// reloads whatever now sits at that position, preserving play intent.
    pub fn remove_from_queue(&mut self, index: usize) {
        if index >= self.queue.len() {
            return;
        }
        self.queue.remove(index);

        if self.queue.is_empty() {
            self.stop_emptied();
            return;
        }

        let removed_current = index == self.current_index;
        if index < self.current_index {
            self.current_index -= 1;
        } else if removed_current {
            self.current_index = self.current_index.min(self.queue.len() - 1);
        }

        if removed_current {
            adapter::load(
                &mut self.device,
                &self.queue[self.current_index],
                self.is_playing,
            );
        }
        self.notify();
    }

    /// Idempotent: empties the queue, stops playback, zeroes time/duration.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.stop_emptied();
    }

    /// Jump to a queue position (clamped) and start playing it. No-op when
    /// the queue is empty.
    pub fn play_index(&mut self, index: usize) {
        if self.queue.is_empty() {
            return;
        }
        let index = index.min(self.queue.len() - 1);
        self.current_index = index;
        self.is_playing = true;
        self.current_time = 0.0;
        adapter::load(&mut self.device, &self.queue[index], true);
        self.notify();
    }

    // --- transport ---

    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn play(&mut self) {
        self.is_playing = true;
        adapter::play(&mut self.device);
        self.notify();
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
        adapter::pause(&mut self.device);
        self.notify();
    }

    pub fn next(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.advance();
    }

    /// More than `PREV_RESTART_THRESHOLD` seconds in: restart the current
    /// track. Otherwise step back one position, floored at the first track.
    pub fn prev(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.current_time > PREV_RESTART_THRESHOLD {
            self.set_current_time(0.0);
            return;
        }
        self.play_index(self.current_index.saturating_sub(1));
    }

    /// Track completion. Repeat-one restarts in place and takes precedence
    /// over shuffle; everything else advances like `next`.
    pub fn handle_ended(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.repeat == RepeatMode::One {
            self.current_time = 0.0;
            adapter::seek(&mut self.device, 0.0);
            adapter::play(&mut self.device);
            self.notify();
            return;
        }
        self.advance();
    }

    /// Shared advance logic for `next` and `handle_ended`. Callers have
    /// already ruled out an empty queue.
    fn advance(&mut self) {
        let len = self.queue.len();
        let mut candidate = self.current_index + 1;

        if self.shuffle && len > 1 {
            let mut rng = rng();
            // Resample until we land somewhere else, so a shuffled advance
            // never repeats the same track twice in a row.
            loop {
                candidate = rng.random_range(0..len);
                if candidate != self.current_index {
                    break;
                }
            }
        }

        if candidate >= len {
            if self.repeat == RepeatMode::All {
                candidate = 0;
            } else {
                // End of the queue: stop, leave position on the last track.
                self.is_playing = false;
                adapter::pause(&mut self.device);
                self.notify();
                return;
            }
        }

        self.play_index(candidate);
    }

    // --- flags, time, volume ---

    /// Pure flag assignment; does not affect what is currently playing.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle = enabled;
        self.notify();
    }

    /// Pure flag assignment; does not affect what is currently playing.
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.notify();
    }

    /// User-initiated seek: the cached time updates optimistically and the
    /// device is told to follow, without waiting for its progress event.
    pub fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
        adapter::seek(&mut self.device, time);
        self.notify();
    }

    /// Device-event-driven mirror update.
    pub fn sync_current_time(&mut self, time: f64) {
        self.current_time = time;
        self.notify();
    }

    /// Device-event-driven mirror update.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
        self.notify();
    }

    /// Device-event-driven mirror update.
    pub fn set_is_playing(&mut self, is_playing: bool) {
        self.is_playing = is_playing;
        self.notify();
    }

    /// `volume` is expected in `[0, 1]`; callers clamp, the engine does not.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        adapter::set_volume(&mut self.device, volume);
        self.notify();
    }

    // --- observation ---

    /// Register an observer. The current snapshot is delivered immediately;
    /// receivers that go away are pruned on the next notification.
    pub fn subscribe(&mut self) -> Receiver<PlayerSnapshot> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.snapshot());
        self.listeners.push(tx);
        rx
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let current = self.current_track();
        PlayerSnapshot {
            current_index: self.current_index(),
            current_id: current.map(|t| t.id.clone()),
            current_title: current.map(|t| t.title.clone()),
            current_group_id: current.map(|t| t.group_id.clone()),
            queue_len: self.queue.len(),
            is_playing: self.is_playing,
            shuffle: self.shuffle,
            repeat: self.repeat,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume,
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.listeners
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    // --- accessors ---

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn current_index(&self) -> Option<usize> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.get(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Empty-queue terminal state: stopped, time and duration zeroed.
    fn stop_emptied(&mut self) {
        self.current_index = 0;
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
        adapter::pause(&mut self.device);
        self.notify();
    }
}
