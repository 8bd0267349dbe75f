use super::*;

fn catalog_toml() -> &'static str {
    r#"
        [[groups]]
        id = "cr"
        name = "Caravaggio's Revenge"
        order = 1

        [[groups]]
        id = "sa"
        name = "Saint Anthony"
        order = 2

        [[tracks]]
        id = "cr-ashen-halo"
        group_id = "cr"
        title = "Ashen Halo"
        description = "A baroque pulse with a luminous chorus."
        tags = ["baroque-pop", "dark"]
        release_date = "2025-11-04"
        order = 2
        audio = { stream = "audio/ashen-halo.mp3" }

        [[tracks]]
        id = "cr-gilded-wire"
        group_id = "cr"
        title = "Gilded Wire"
        tags = ["dark"]
        release_date = "2025-01-20"
        order = 1
        audio = { stream = "audio/gilded-wire.mp3", original = "audio/gilded-wire-orig.mp3" }

        [[tracks]]
        id = "sa-quiet-room"
        group_id = "sa"
        title = "Quiet Room"
        tags = ["ambient"]
        order = 1
        audio = { stream = "audio/quiet-room.mp3" }
    "#
}

#[test]
fn parse_catalog_reads_groups_and_tracks() {
    let catalog = parse_catalog(catalog_toml()).unwrap();
    assert_eq!(catalog.groups.len(), 2);
    assert_eq!(catalog.tracks.len(), 3);
    assert_eq!(catalog.group_name("cr"), "Caravaggio's Revenge");
    assert_eq!(catalog.group_name("missing"), "missing");

    let track = &catalog.tracks[1];
    assert_eq!(track.audio.original.as_deref(), Some("audio/gilded-wire-orig.mp3"));
    assert_eq!(track.order, Some(1));
    assert!(track.lyrics.is_none());
}

#[test]
fn parse_catalog_rejects_duplicate_track_ids() {
    let text = r#"
        [[groups]]
        id = "g"
        name = "G"

        [[tracks]]
        id = "dup"
        group_id = "g"
        title = "One"
        audio = { stream = "a.mp3" }

        [[tracks]]
        id = "dup"
        group_id = "g"
        title = "Two"
        audio = { stream = "b.mp3" }
    "#;
    assert!(matches!(
        parse_catalog(text),
        Err(CatalogError::DuplicateTrackId(id)) if id == "dup"
    ));
}

#[test]
fn parse_catalog_rejects_dangling_group_refs() {
    let text = r#"
        [[tracks]]
        id = "t"
        group_id = "nowhere"
        title = "T"
        audio = { stream = "t.mp3" }
    "#;
    assert!(matches!(
        parse_catalog(text),
        Err(CatalogError::UnknownGroup { group_id, .. }) if group_id == "nowhere"
    ));
}

#[test]
fn load_catalog_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(&path, catalog_toml()).unwrap();

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.tracks.len(), 3);

    assert!(matches!(
        load_catalog(&dir.path().join("missing.toml")),
        Err(CatalogError::Io { .. })
    ));
}

#[test]
fn all_tags_are_sorted_and_deduplicated() {
    let catalog = parse_catalog(catalog_toml()).unwrap();
    assert_eq!(
        all_tags(&catalog.tracks),
        vec!["ambient", "baroque-pop", "dark"]
    );
}

#[test]
fn filter_tracks_by_group_and_tags() {
    let catalog = parse_catalog(catalog_toml()).unwrap();

    let mut filters = FiltersState::default();
    filters.group_id = Some("cr".to_string());
    assert_eq!(filter_tracks(&catalog, &filters), vec![0, 1]);

    filters.group_id = None;
    filters.tags = vec!["ambient".to_string()];
    assert_eq!(filter_tracks(&catalog, &filters), vec![2]);

    // Any selected tag matches.
    filters.tags = vec!["ambient".to_string(), "baroque-pop".to_string()];
    assert_eq!(filter_tracks(&catalog, &filters), vec![0, 2]);
}

#[test]
fn search_matches_title_description_group_name_and_tags() {
    let catalog = parse_catalog(catalog_toml()).unwrap();
    let mut filters = FiltersState::default();

    filters.search = "halo".to_string();
    assert_eq!(filter_tracks(&catalog, &filters), vec![0]);

    filters.search = "LUMINOUS".to_string();
    assert_eq!(filter_tracks(&catalog, &filters), vec![0]);

    // Group name is part of the haystack.
    filters.search = "saint".to_string();
    assert_eq!(filter_tracks(&catalog, &filters), vec![2]);

    filters.search = "baroque-pop".to_string();
    assert_eq!(filter_tracks(&catalog, &filters), vec![0]);

    filters.search = "no such thing".to_string();
    assert!(filter_tracks(&catalog, &filters).is_empty());
}

#[test]
fn sort_modes_order_the_roster() {
    let catalog = parse_catalog(catalog_toml()).unwrap();
    let filters = FiltersState::default();

    // Group order first, then per-track order inside the group.
    assert_eq!(
        visible_indices(&catalog, &filters, SortMode::GroupOrder),
        vec![1, 0, 2]
    );

    // Newest release first; undated tracks sink to the end.
    assert_eq!(
        visible_indices(&catalog, &filters, SortMode::Newest),
        vec![0, 1, 2]
    );

    assert_eq!(
        visible_indices(&catalog, &filters, SortMode::Alphabetical),
        vec![0, 1, 2]
    );
}

#[test]
fn toggle_tag_adds_and_removes() {
    let mut filters = FiltersState::default();
    filters.toggle_tag("dark");
    assert_eq!(filters.tags, vec!["dark"]);
    filters.toggle_tag("dark");
    assert!(filters.tags.is_empty());
    assert!(!filters.is_active());
}
