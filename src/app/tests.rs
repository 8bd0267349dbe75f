use super::*;
use crate::catalog::{AudioSources, Catalog, Group, SortMode, Track};

fn t(id: &str, group: &str, title: &str, tags: &[&str]) -> Track {
    Track {
        id: id.into(),
        group_id: group.into(),
        title: title.into(),
        description: String::new(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        artwork: None,
        audio: AudioSources {
            stream: format!("audio/{id}.mp3"),
            original: None,
        },
        lyrics: None,
        original_ref: None,
        release_date: None,
        downloads: None,
        order: None,
    }
}

fn g(id: &str, name: &str, order: u32) -> Group {
    Group {
        id: id.into(),
        name: name.into(),
        tagline: None,
        description: None,
        artwork: None,
        order,
    }
}

fn fixture() -> Catalog {
    Catalog {
        groups: vec![g("one", "Group One", 1), g("two", "Group Two", 2)],
        tracks: vec![
            t("a", "one", "Alpha", &["calm"]),
            t("b", "two", "Beta", &["loud"]),
            t("c", "one", "Gamma", &["calm", "loud"]),
        ],
    }
}

#[test]
fn new_app_selects_the_first_visible_track() {
    let app = App::new(fixture());
    assert_eq!(app.selected, 0);
    assert!(app.has_tracks());
    assert_eq!(app.selected_track().map(|t| t.id.as_str()), Some("a"));
}

#[test]
fn display_indices_respects_search_text() {
    let mut app = App::new(fixture());
    app.push_filter_char('b');
    app.push_filter_char('e');
    assert_eq!(app.display_indices(), vec![1]);

    app.pop_filter_char();
    app.pop_filter_char();
    assert_eq!(app.display_indices().len(), 3);
}

#[test]
fn search_moves_selection_onto_a_visible_track() {
    let mut app = App::new(fixture());
    app.enter_filter_mode();
    app.push_filter_char('b');
    app.push_filter_char('e');
    // "Alpha" fell out of view; selection snaps to the first match.
    assert_eq!(app.selected, 1);
}

#[test]
fn next_and_prev_wrap_within_the_view() {
    let mut app = App::new(fixture());
    app.toggle_tag("calm"); // only a and c visible

    assert_eq!(app.display_indices(), vec![0, 2]);
    app.next();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.prev();
    assert_eq!(app.selected, 2);
}

#[test]
fn select_first_and_last_follow_the_view() {
    let mut app = App::new(fixture());
    // Group order interleaves: both "one" tracks come before "two".
    assert_eq!(app.display_indices(), vec![0, 2, 1]);
    app.select_last();
    assert_eq!(app.selected, 1);
    app.select_first();
    assert_eq!(app.selected, 0);
}

#[test]
fn cycle_group_walks_all_groups_then_clears() {
    let mut app = App::new(fixture());
    assert_eq!(app.filters.group_id, None);

    app.cycle_group();
    assert_eq!(app.filters.group_id.as_deref(), Some("one"));
    assert_eq!(app.display_indices(), vec![0, 2]);

    app.cycle_group();
    assert_eq!(app.filters.group_id.as_deref(), Some("two"));
    assert_eq!(app.display_indices(), vec![1]);
    assert_eq!(app.selected, 1);

    app.cycle_group();
    assert_eq!(app.filters.group_id, None);
}

#[test]
fn toggle_selected_tag_uses_the_highlighted_track() {
    let mut app = App::new(fixture());
    app.toggle_selected_tag();
    assert_eq!(app.filters.tags, vec!["calm".to_string()]);

    app.toggle_selected_tag();
    assert!(app.filters.tags.is_empty());
}

#[test]
fn clear_filters_restores_the_full_roster() {
    let mut app = App::new(fixture());
    app.enter_filter_mode();
    app.push_filter_char('z');
    app.toggle_tag("loud");
    assert!(app.filters.is_active());

    app.clear_filters();
    assert!(!app.filters.is_active());
    assert!(!app.filter_mode);
    assert_eq!(app.display_indices().len(), 3);
}

#[test]
fn cycle_sort_changes_roster_order() {
    let mut app = App::new(fixture());
    assert_eq!(app.sort, SortMode::GroupOrder);
    app.cycle_sort();
    assert_eq!(app.sort, SortMode::Newest);
    app.cycle_sort();
    assert_eq!(app.sort, SortMode::Alphabetical);
    // Alpha, Beta, Gamma already alphabetical by fixture.
    assert_eq!(app.display_indices(), vec![0, 1, 2]);
}

#[test]
fn visible_tracks_clone_in_roster_order() {
    let mut app = App::new(fixture());
    app.toggle_tag("loud");
    let ids: Vec<String> = app.visible_tracks().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["c".to_string(), "b".to_string()]);
    // Selection snapped to the first visible entry when "a" fell away.
    assert_eq!(app.selected_position_in_view(), Some(0));
}

#[test]
fn queue_drawer_cursor_clamps() {
    let mut app = App::new(fixture());
    app.toggle_queue();
    assert!(app.queue_open);

    app.queue_next(3);
    app.queue_next(3);
    app.queue_next(3);
    assert_eq!(app.queue_selected, 2);

    app.clamp_queue_selected(2);
    assert_eq!(app.queue_selected, 1);
    app.queue_prev();
    app.queue_prev();
    assert_eq!(app.queue_selected, 0);
    app.clamp_queue_selected(0);
    assert_eq!(app.queue_selected, 0);
}
