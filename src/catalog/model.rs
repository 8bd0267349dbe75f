//! Catalog model types: `Track`, `Group` and their nested value types.
//!
//! Tracks reference groups by id; identity is the `id` string, and the same
//! track may legitimately appear more than once in a play-queue.

use serde::Deserialize;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: String,
    pub group_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub artwork: Option<Artwork>,
    pub audio: AudioSources,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub original_ref: Option<OriginalRef>,
    /// ISO date string, e.g. "2025-11-04".
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub downloads: Option<Downloads>,
    /// Explicit position within the track's group.
    #[serde(default)]
    pub order: Option<u32>,
}

/// Audio sources for a track. `stream` is the file played back; `original`
/// optionally points at the reference recording.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioSources {
    pub stream: String,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artwork {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Reference to the original recording a track reinterprets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OriginalRef {
    pub year: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Downloads {
    pub allow: bool,
    #[serde(default)]
    pub filename: Option<String>,
}

/// An artist collection the tracks are grouped under.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub artwork: Option<Artwork>,
    #[serde(default)]
    pub order: u32,
}

/// The full declared roster.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Catalog {
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Group display name, falling back to the raw id for dangling refs.
    pub fn group_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.group(id).map(|g| g.name.as_str()).unwrap_or(id)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
