use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::load_catalog;
use crate::config;
use crate::device::RodioOutput;
use crate::mpris::ControlCmd;
use crate::player::Player;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let catalog_path = resolve_catalog_path(&settings);
    let catalog = load_catalog(&catalog_path)?;
    if catalog.is_empty() {
        eprintln!("rondo: catalog at {} has no tracks", catalog_path.display());
    }

    let mut player = Player::new();
    let snapshot_rx = player.subscribe();
    startup::apply_playback_defaults(&mut player, &settings);

    match RodioOutput::new() {
        Ok(output) => player.attach_device(Box::new(output)),
        Err(e) => {
            // The queue still works detached; transport just has no sound.
            eprintln!("rondo: audio device unavailable, running detached: {e}");
        }
    }

    let mut app = App::new(catalog);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris_sync::update_mpris(&mpris, &player.snapshot(), &app.catalog);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &mpris,
        &control_tx,
        &control_rx,
        &snapshot_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// Catalog path precedence: CLI argument, then config, then the default
/// location next to the config file.
fn resolve_catalog_path(settings: &config::Settings) -> PathBuf {
    if let Some(arg) = env::args().nth(1) {
        return PathBuf::from(arg);
    }
    if let Some(path) = &settings.catalog.path {
        return path.clone();
    }
    config::default_catalog_path().unwrap_or_else(|| PathBuf::from("catalog.toml"))
}
