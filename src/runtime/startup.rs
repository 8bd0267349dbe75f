use crate::config;
use crate::player::{Player, RepeatMode};

/// Seed the player with configured playback defaults before any queue exists.
pub fn apply_playback_defaults(player: &mut Player, settings: &config::Settings) {
    player.set_shuffle(settings.playback.shuffle);
    player.set_repeat(match settings.playback.repeat {
        config::RepeatSetting::Off => RepeatMode::Off,
        config::RepeatSetting::One => RepeatMode::One,
        config::RepeatSetting::All => RepeatMode::All,
    });
    player.set_volume(settings.playback.volume.clamp(0.0, 1.0));
}
