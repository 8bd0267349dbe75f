use crate::catalog::Catalog;
use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::player::PlayerSnapshot;

pub fn update_mpris(mpris: &MprisHandle, snapshot: &PlayerSnapshot, catalog: &Catalog) {
    let status = match snapshot.current_index {
        None => PlaybackStatus::Stopped,
        Some(_) if snapshot.is_playing => PlaybackStatus::Playing,
        Some(_) => PlaybackStatus::Paused,
    };

    let artist = snapshot
        .current_group_id
        .as_deref()
        .map(|id| catalog.group_name(id).to_string());

    mpris.set_track(snapshot.current_title.clone(), artist);
    mpris.set_playback(status);
}
