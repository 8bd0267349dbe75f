//! `rodio`-backed output.
//!
//! Each loaded source gets a fresh `Sink`; seeking rebuilds the sink with
//! `skip_duration` into the file. Elapsed time is tracked as a start
//! `Instant` plus time accumulated across pauses, the sink itself only tells
//! us when it has drained.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::output::{AudioOutput, DeviceEvent};

/// Minimum gap between emitted `TimeUpdated` events.
const TIME_REPORT_INTERVAL: Duration = Duration::from_millis(250);

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<String>,
    paused: bool,
    volume: f32,
    started_at: Option<Instant>,
    accumulated: Duration,
    last_reported: Duration,
    ended: bool,
    pending: Vec<DeviceEvent>,
}

impl RodioOutput {
    /// Open the default output stream. Failing here is not fatal to the
    /// program; callers run with an unbound device instead.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            paused: true,
            volume: 1.0,
            started_at: None,
            accumulated: Duration::ZERO,
            last_reported: Duration::ZERO,
            ended: false,
            pending: Vec::new(),
        })
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// Decode `path` into a new paused sink starting at `start_at`. A file
    /// that fails to open or decode yields no sink; playback then simply
    /// never starts.
    fn build_sink(&self, path: &str, start_at: Duration) -> Option<Sink> {
        let file = File::open(path).ok()?;
        let source = Decoder::new(BufReader::new(file))
            .ok()?
            // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
            .skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        Some(sink)
    }
}

impl AudioOutput for RodioOutput {
    fn set_source(&mut self, source: &str) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.source = Some(source.to_string());
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.last_reported = Duration::ZERO;
        self.ended = false;
        self.sink = self.build_sink(source, Duration::ZERO);

        if self.sink.is_some() {
            if let Ok(tagged) = lofty::read_from_path(Path::new(source)) {
                let total = tagged.properties().duration();
                self.pending.push(DeviceEvent::DurationKnown(total.as_secs_f64()));
            }
        }
    }

    fn current_source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.play();
        if self.paused {
            self.paused = false;
            self.started_at = Some(Instant::now());
            self.pending.push(DeviceEvent::Started);
        }
    }

    fn pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.pause();
        if !self.paused {
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            self.paused = true;
            self.pending.push(DeviceEvent::Paused);
        }
    }

    fn seek(&mut self, seconds: f64) {
        let Some(path) = self.source.clone() else {
            return;
        };
        let target = Duration::from_secs_f64(seconds.max(0.0));
        let was_paused = self.paused;

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = self.build_sink(&path, target);
        self.accumulated = target;
        self.last_reported = target;
        self.ended = false;
        self.started_at = None;

        if let Some(sink) = self.sink.as_ref() {
            if !was_paused {
                sink.play();
                self.started_at = Some(Instant::now());
            }
        }
        self.pending.push(DeviceEvent::TimeUpdated(target.as_secs_f64()));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn poll(&mut self) -> Vec<DeviceEvent> {
        if let Some(sink) = self.sink.as_ref() {
            if !self.paused && sink.empty() && !self.ended {
                // Drained: report completion exactly once.
                self.ended = true;
                if let Some(st) = self.started_at.take() {
                    self.accumulated += st.elapsed();
                }
                self.paused = true;
                self.pending.push(DeviceEvent::Ended);
            } else if !self.paused {
                let elapsed = self.elapsed();
                if elapsed.saturating_sub(self.last_reported) >= TIME_REPORT_INTERVAL {
                    self.last_reported = elapsed;
                    self.pending.push(DeviceEvent::TimeUpdated(elapsed.as_secs_f64()));
                }
            }
        }
        std::mem::take(&mut self.pending)
    }
}
