use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::model::Catalog;

/// Errors produced while loading or validating a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate track id {0:?}")]
    DuplicateTrackId(String),
    #[error("track {track_id:?} references unknown group {group_id:?}")]
    UnknownGroup { track_id: String, group_id: String },
}

/// Read and validate a TOML catalog file (`[[groups]]` / `[[tracks]]` tables).
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&text)
}

/// Parse a catalog from TOML text and validate referential integrity.
pub fn parse_catalog(text: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = toml::from_str(text)?;
    validate(&catalog)?;
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for track in &catalog.tracks {
        if !seen.insert(track.id.as_str()) {
            return Err(CatalogError::DuplicateTrackId(track.id.clone()));
        }
        if catalog.group(&track.group_id).is_none() {
            return Err(CatalogError::UnknownGroup {
                track_id: track.id.clone(),
                group_id: track.group_id.clone(),
            });
        }
    }
    Ok(())
}
