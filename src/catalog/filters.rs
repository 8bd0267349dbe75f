//! Pure filter/sort predicates over the catalog.
//!
//! These are stateless: the caller holds a `FiltersState` and asks for the
//! visible track indices. Whatever order comes out of here is exactly the
//! order handed to the player as a queue.

use super::model::{Catalog, Track};

/// Active roster filters: search text, group selection, tag membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltersState {
    pub search: String,
    /// `None` means "all groups".
    pub group_id: Option<String>,
    pub tags: Vec<String>,
}

impl FiltersState {
    pub fn clear(&mut self) {
        self.search.clear();
        self.group_id = None;
        self.tags.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.group_id.is_some() || !self.tags.is_empty()
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }
}

/// How the visible roster is ordered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortMode {
    /// Groups by their `order`, tracks by their `order` within each group.
    GroupOrder,
    /// Most recent `release_date` first; undated tracks last.
    Newest,
    /// Title, case-insensitive.
    Alphabetical,
}

impl Default for SortMode {
    fn default() -> Self {
        Self::GroupOrder
    }
}

impl SortMode {
    pub fn cycle(self) -> Self {
        match self {
            Self::GroupOrder => Self::Newest,
            Self::Newest => Self::Alphabetical,
            Self::Alphabetical => Self::GroupOrder,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GroupOrder => "Groups",
            Self::Newest => "Newest",
            Self::Alphabetical => "A-Z",
        }
    }
}

/// Every tag used by any track, sorted and deduplicated.
pub fn all_tags(tracks: &[Track]) -> Vec<String> {
    let mut tags: Vec<String> = tracks
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// True when `track` passes the group, tag and search filters.
///
/// Search is a case-insensitive substring match over the title, description,
/// group name and joined tags; tags match when the track carries any of the
/// selected ones.
pub fn track_matches(catalog: &Catalog, track: &Track, filters: &FiltersState) -> bool {
    if let Some(ref group_id) = filters.group_id {
        if &track.group_id != group_id {
            return false;
        }
    }

    if !filters.tags.is_empty() && !filters.tags.iter().any(|tag| track.tags.contains(tag)) {
        return false;
    }

    let search = filters.search.trim().to_lowercase();
    if search.is_empty() {
        return true;
    }

    let haystack = format!(
        "{} {} {} {}",
        track.title,
        track.description,
        catalog.group_name(&track.group_id),
        track.tags.join(" ")
    )
    .to_lowercase();
    haystack.contains(&search)
}

/// Filter the catalog down to matching track indices, in declaration order.
pub fn filter_tracks(catalog: &Catalog, filters: &FiltersState) -> Vec<usize> {
    catalog
        .tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| track_matches(catalog, track, filters))
        .map(|(i, _)| i)
        .collect()
}

/// Order filtered indices according to `mode`. Stable, so ties keep catalog
/// declaration order.
pub fn sort_tracks(catalog: &Catalog, indices: &mut [usize], mode: SortMode) {
    match mode {
        SortMode::GroupOrder => {
            indices.sort_by_key(|&i| {
                let track = &catalog.tracks[i];
                let group_order = catalog
                    .group(&track.group_id)
                    .map(|g| g.order)
                    .unwrap_or(u32::MAX);
                (group_order, track.order.unwrap_or(0))
            });
        }
        SortMode::Newest => {
            // ISO dates compare correctly as strings; reverse for newest-first.
            indices.sort_by(|&a, &b| {
                let da = catalog.tracks[a].release_date.as_deref();
                let db = catalog.tracks[b].release_date.as_deref();
                match (da, db) {
                    (Some(a), Some(b)) => b.cmp(a),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }
        SortMode::Alphabetical => {
            indices.sort_by(|&a, &b| {
                catalog.tracks[a]
                    .title
                    .to_lowercase()
                    .cmp(&catalog.tracks[b].title.to_lowercase())
            });
        }
    }
}

/// The visible roster: filtered, then ordered per `mode`.
pub fn visible_indices(catalog: &Catalog, filters: &FiltersState, mode: SortMode) -> Vec<usize> {
    let mut indices = filter_tracks(catalog, filters);
    sort_tracks(catalog, &mut indices, mode);
    indices
}
