//! Application model types: `App` and its browsing state.
//!
//! The `App` struct holds the loaded catalog, the active filters and sort
//! mode, and the selection used by the UI and runtime.

use crate::catalog::{Catalog, FiltersState, SortMode, Track, visible_indices};

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    pub filters: FiltersState,
    pub sort: SortMode,

    /// Catalog index of the highlighted roster entry.
    pub selected: usize,

    pub filter_mode: bool,

    pub queue_open: bool,
    pub queue_selected: usize,
}

impl App {
    /// Create a new `App` over the provided catalog.
    pub fn new(catalog: Catalog) -> Self {
        let selected = visible_indices(&catalog, &FiltersState::default(), SortMode::default())
            .first()
            .copied()
            .unwrap_or(0);

        Self {
            catalog,
            filters: FiltersState::default(),
            sort: SortMode::default(),
            selected,
            filter_mode: false,
            queue_open: false,
            queue_selected: 0,
        }
    }

    /// The visible roster: catalog indices after filtering and sorting.
    pub fn display_indices(&self) -> Vec<usize> {
        visible_indices(&self.catalog, &self.filters, self.sort)
    }

    /// The tracks behind `display_indices`, cloned in roster order.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.display_indices()
            .into_iter()
            .map(|i| self.catalog.tracks[i].clone())
            .collect()
    }

    /// Position of the selection within the visible roster, if visible.
    pub fn selected_position_in_view(&self) -> Option<usize> {
        self.display_indices()
            .iter()
            .position(|&i| i == self.selected)
    }

    /// The highlighted track, if the catalog has any.
    pub fn selected_track(&self) -> Option<&Track> {
        self.catalog.tracks.get(self.selected)
    }

    pub fn has_tracks(&self) -> bool {
        !self.catalog.tracks.is_empty()
    }

    /// Move selection to the next visible track. Wraps around.
    pub fn next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible track. Wraps around.
    pub fn prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    /// Jump to the first visible track.
    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    /// Jump to the last visible track.
    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }

    /// Enter search mode: keystrokes edit the search text.
    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    /// Exit search mode, keeping the search text applied.
    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    /// Drop every filter and leave search mode.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    /// Append a character to the search text and refresh view.
    pub fn push_filter_char(&mut self, c: char) {
        self.filters.search.push(c);
        self.ensure_selected_visible();
    }

    /// Remove the last character from the search text and refresh view.
    pub fn pop_filter_char(&mut self) {
        self.filters.search.pop();
        self.ensure_selected_visible();
    }

    /// Cycle the sort mode and keep the selection visible.
    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.cycle();
        self.ensure_selected_visible();
    }

    /// Cycle the group filter: all groups, then each group in catalog order.
    pub fn cycle_group(&mut self) {
        let next = match &self.filters.group_id {
            None => self.catalog.groups.first().map(|g| g.id.clone()),
            Some(current) => {
                let pos = self.catalog.groups.iter().position(|g| &g.id == current);
                match pos {
                    Some(p) if p + 1 < self.catalog.groups.len() => {
                        Some(self.catalog.groups[p + 1].id.clone())
                    }
                    _ => None,
                }
            }
        };
        self.filters.group_id = next;
        self.ensure_selected_visible();
    }

    /// Toggle a tag filter and keep the selection visible.
    pub fn toggle_tag(&mut self, tag: &str) {
        self.filters.toggle_tag(tag);
        self.ensure_selected_visible();
    }

    /// Toggle the first tag of the highlighted track, if it has one.
    pub fn toggle_selected_tag(&mut self) {
        let tag = self
            .selected_track()
            .and_then(|t| t.tags.first())
            .cloned();
        if let Some(tag) = tag {
            self.toggle_tag(&tag);
        }
    }

    /// Show or hide the queue drawer.
    pub fn toggle_queue(&mut self) {
        self.queue_open = !self.queue_open;
        self.queue_selected = 0;
    }

    /// Move the queue drawer cursor down, clamped to `queue_len`.
    pub fn queue_next(&mut self, queue_len: usize) {
        if queue_len == 0 {
            self.queue_selected = 0;
            return;
        }
        self.queue_selected = (self.queue_selected + 1).min(queue_len - 1);
    }

    /// Move the queue drawer cursor up.
    pub fn queue_prev(&mut self) {
        self.queue_selected = self.queue_selected.saturating_sub(1);
    }

    /// Clamp the queue drawer cursor after removals.
    pub fn clamp_queue_selected(&mut self, queue_len: usize) {
        if queue_len == 0 {
            self.queue_selected = 0;
        } else if self.queue_selected >= queue_len {
            self.queue_selected = queue_len - 1;
        }
    }

    /// Ensure `selected` is part of the current view, otherwise move it to
    /// the first visible track.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }
        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }
}
