//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::catalog::Track;
use crate::config::UiSettings;
use crate::player::PlayerSnapshot;

/// Render the controls help text.
fn controls_text() -> String {
    [
        "[j/k] up/down",
        "[h/l] prev/next",
        "[H/L] scrub",
        "[enter] play",
        "[a] add to queue",
        "[u] queue",
        "[space/p] play/pause",
        "[gg/G] top/bottom",
        "[/] search",
        "[tab] group",
        "[o] sort",
        "[t] tag",
        "[c] clear filters",
        "[s] shuffle",
        "[r] repeat",
        "[+/-] volume",
        "[q] quit",
    ]
    .join(" | ")
}

/// Format seconds as `MM:SS`.
fn format_mmss(seconds: f64) -> String {
    let secs = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn status_text(app: &App, snapshot: &PlayerSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    let transport = match snapshot.current_index {
        None => " Stopped".to_string(),
        Some(_) if snapshot.is_playing => " Playing".to_string(),
        Some(_) => " Paused".to_string(),
    };
    parts.push(transport);

    if let Some(title) = &snapshot.current_title {
        let time = if snapshot.duration > 0.0 {
            format!(
                "{} / {}",
                format_mmss(snapshot.current_time),
                format_mmss(snapshot.duration)
            )
        } else {
            format_mmss(snapshot.current_time)
        };
        parts.push(format!("Song: {title} [{time}]"));
    }

    parts.push(format!(
        "Shuffle: {}",
        if snapshot.shuffle { "ON" } else { "OFF" }
    ));
    parts.push(format!("Repeat: {}", snapshot.repeat.label()));
    parts.push(format!("Volume: {:.0}%", snapshot.volume * 100.0));
    parts.push(format!("Sort: {}", app.sort.label()));

    if let Some(group_id) = &app.filters.group_id {
        parts.push(format!("Group: {}", app.catalog.group_name(group_id)));
    }
    if !app.filters.tags.is_empty() {
        parts.push(format!("Tags: {}", app.filters.tags.join(", ")));
    }
    let q = app.filters.search.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("Search:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        parts.push(filter_part);
    }
    if snapshot.queue_len > 0 {
        parts.push(format!("Queue: {}", snapshot.queue_len));
    }

    parts.join(" | ")
}

/// Render the entire UI into the provided `frame` using `app` state, the
/// latest player snapshot and the live queue.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &PlayerSnapshot,
    queue: &[Track],
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rondo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app, snapshot))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Roster list
    {
        let display = app.display_indices();

        // Center the selected item when possible by creating a visible window.
        // Only build ListItems for the visible window.
        let total = display.len();
        let list_height = chunks[2].height as usize;
        let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = display[start..end]
            .iter()
            .map(|&i| {
                let track = &app.catalog.tracks[i];
                let now_playing = snapshot.current_id.as_deref() == Some(track.id.as_str());
                let marker = if now_playing { "* " } else { "  " };
                let group = app.catalog.group_name(&track.group_id);
                ListItem::new(format!("{marker}{} ({group})", track.title))
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Queue drawer popup (keeps the roster visible under it)
    if app.queue_open {
        let list_area = chunks[2];
        let popup_area = centered_rect_sized(60, 12, list_area);
        frame.render_widget(Clear, popup_area);

        draw_queue(frame, app, snapshot, queue, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

fn draw_queue(frame: &mut Frame, app: &App, snapshot: &PlayerSnapshot, queue: &[Track], area: Rect) {
    let items: Vec<ListItem> = queue
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if snapshot.current_index == Some(i) {
                "* "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", track.title))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" queue (enter play, d remove, c clear, u close) "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if !queue.is_empty() {
        state.select(Some(app.queue_selected.min(queue.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
