//! Thin translation layer between player commands and the bound output.
//!
//! Every function tolerates an unbound device by doing nothing; the player's
//! own state still updates, only the device command is skipped.

use crate::catalog::Track;

use super::output::DeviceBinding;

/// Load `track`'s stream source into the output, optionally starting playback.
///
/// If the output already holds this exact source string, the source is not
/// reassigned; re-selecting the already-loaded track resumes instead of
/// restarting from zero. The comparison is textual, so a relative/absolute
/// path mismatch defeats the guard and forces a reload.
pub fn load(binding: &mut DeviceBinding, track: &Track, autoplay: bool) {
    let Some(out) = binding.output_mut() else {
        return;
    };
    if out.current_source() == Some(track.audio.stream.as_str()) {
        if autoplay {
            out.play();
        }
        return;
    }
    out.set_source(&track.audio.stream);
    if autoplay {
        out.play();
    }
}

pub fn play(binding: &mut DeviceBinding) {
    if let Some(out) = binding.output_mut() {
        out.play();
    }
}

pub fn pause(binding: &mut DeviceBinding) {
    if let Some(out) = binding.output_mut() {
        out.pause();
    }
}

/// Seek to an absolute position. No debounce; callers rate-limit if they
/// generate high-frequency input.
pub fn seek(binding: &mut DeviceBinding, seconds: f64) {
    if let Some(out) = binding.output_mut() {
        out.seek(seconds);
    }
}

pub fn set_volume(binding: &mut DeviceBinding, volume: f32) {
    if let Some(out) = binding.output_mut() {
        out.set_volume(volume);
    }
}
