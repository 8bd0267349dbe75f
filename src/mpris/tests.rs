use super::*;
use std::sync::mpsc;

#[test]
fn set_track_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_track(Some("Chaconne".to_string()), Some("Cursed Relics".to_string()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Chaconne"));
        assert_eq!(s.artist, vec!["Cursed Relics".to_string()]);
    }

    handle.set_track(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
    }
}

#[test]
fn playback_status_maps_state_to_dbus_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Stopped;
    }
    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Playing;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Paused;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.artist = vec!["Artist".to_string()];
    }

    let map = iface.metadata();
    for k in ["xesam:title", "xesam:artist"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}
