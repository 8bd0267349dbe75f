use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::player::{Player, PlayerSnapshot};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
    /// Latest published snapshot, used for drawing and MPRIS diffing.
    latest: PlayerSnapshot,
}

/// Main terminal event loop: handles input, UI drawing, device pumping and
/// MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    snapshot_rx: &mpsc::Receiver<PlayerSnapshot>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        pending_gg: false,
        latest: player.snapshot(),
    };

    loop {
        // Drain device events (time progress, duration, track end).
        player.pump();

        // Pick up whatever the player published since the last tick. MPRIS
        // only cares about track and transport changes, not time progress.
        while let Ok(snapshot) = snapshot_rx.try_recv() {
            if snapshot.current_index != state.latest.current_index
                || snapshot.current_id != state.latest.current_id
                || snapshot.is_playing != state.latest.is_playing
            {
                update_mpris(mpris, &snapshot, &app.catalog);
            }
            state.latest = snapshot;
        }

        terminal.draw(|f| ui::draw(f, app, &state.latest, player.queue(), &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, control_tx, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Start playing the visible roster from the highlighted track.
fn play_from_view(app: &App, player: &mut Player) {
    let tracks = app.visible_tracks();
    if tracks.is_empty() {
        return;
    }
    let start = app.selected_position_in_view().unwrap_or(0);
    player.set_queue(tracks, start);
}

fn scrub(player: &mut Player, delta: f64) {
    let mut target = (player.current_time() + delta).max(0.0);
    let duration = player.duration();
    if duration > 0.0 {
        target = target.min(duration);
    }
    player.set_current_time(target);
}

fn handle_control_cmd(cmd: ControlCmd, app: &App, player: &mut Player) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if player.queue().is_empty() {
                play_from_view(app, player);
            } else {
                player.play();
            }
        }
        ControlCmd::Pause => player.pause(),
        ControlCmd::PlayPause => {
            if player.queue().is_empty() {
                play_from_view(app, player);
            } else {
                player.toggle_play();
            }
        }
        ControlCmd::Stop => {
            player.pause();
            player.set_current_time(0.0);
        }
        ControlCmd::Next => player.next(),
        ControlCmd::Prev => player.prev(),
    }
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if app.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.clear_filters(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Enter => {
                if !app.display_indices().is_empty() {
                    app.exit_filter_mode();
                    play_from_view(app, player);
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_filter_char(c);
                }
            }
            _ => {}
        }
        return false;
    }

    if app.queue_open {
        state.pending_gg = false;
        match key.code {
            KeyCode::Char('u') | KeyCode::Esc => app.toggle_queue(),
            KeyCode::Char('j') => app.queue_next(player.queue().len()),
            KeyCode::Char('k') => app.queue_prev(),
            KeyCode::Enter => {
                if !player.queue().is_empty() {
                    player.play_index(app.queue_selected);
                }
            }
            KeyCode::Char('d') => {
                player.remove_from_queue(app.queue_selected);
                app.clamp_queue_selected(player.queue().len());
            }
            KeyCode::Char('c') => {
                player.clear_queue();
                app.clamp_queue_selected(0);
            }
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_filter_mode();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            play_from_view(app, player);
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            if let Some(track) = app.selected_track().cloned() {
                player.enqueue(track);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            scrub(player, settings.controls.seek_seconds as f64);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            scrub(player, -(settings.controls.seek_seconds as f64));
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            let enabled = !player.shuffle();
            player.set_shuffle(enabled);
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            let mode = player.repeat().cycle();
            player.set_repeat(mode);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            let v = (player.volume() + settings.controls.volume_step).clamp(0.0, 1.0);
            player.set_volume(v);
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            let v = (player.volume() - settings.controls.volume_step).clamp(0.0, 1.0);
            player.set_volume(v);
        }
        KeyCode::Char('u') => {
            state.pending_gg = false;
            app.toggle_queue();
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.cycle_group();
        }
        KeyCode::Char('o') => {
            state.pending_gg = false;
            app.cycle_sort();
        }
        KeyCode::Char('t') => {
            state.pending_gg = false;
            app.toggle_selected_tag();
        }
        KeyCode::Char('c') => {
            state.pending_gg = false;
            app.clear_filters();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
