//! Named maps on disk: `<root>/map/<name>.json`.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tactics::{SavedMap, SavedMapError};

use crate::APP_NAME;

pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug)]
pub enum MapLibraryError {
    Io(io::Error),
    Parse(serde_json::Error),
    InvalidName(String),
    InvalidMap(SavedMapError),
    NoDataDir,
}

impl fmt::Display for MapLibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map library I/O error: {e}"),
            Self::Parse(e) => write!(f, "saved map is not valid JSON: {e}"),
            Self::InvalidName(name) => write!(
                f,
                "invalid map name {name:?}: use 1-{MAX_NAME_LEN} letters, digits, '-' or '_'"
            ),
            Self::InvalidMap(e) => write!(f, "saved map is malformed: {e}"),
            Self::NoDataDir => write!(f, "no platform data directory available"),
        }
    }
}

impl Error for MapLibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::InvalidMap(e) => Some(e),
            Self::InvalidName(_) | Self::NoDataDir => None,
        }
    }
}

impl From<io::Error> for MapLibraryError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[derive(Clone, Debug)]
pub struct MapLibrary {
    root: PathBuf,
}

impl MapLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default() -> Result<Self, MapLibraryError> {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| Self::new(proj_dirs.data_dir()))
            .ok_or(MapLibraryError::NoDataDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Trims the name and checks it against the allowed alphabet.
    pub fn normalize_name(name: &str) -> Result<String, MapLibraryError> {
        let trimmed = name.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_NAME_LEN
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid { Ok(trimmed.to_string()) } else { Err(MapLibraryError::InvalidName(name.to_string())) }
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, MapLibraryError> {
        let name = Self::normalize_name(name)?;
        Ok(self.map_dir().join(format!("{name}.json")))
    }

    pub fn save(&self, name: &str, map: &SavedMap) -> Result<PathBuf, MapLibraryError> {
        map.validate().map_err(MapLibraryError::InvalidMap)?;
        let path = self.path_for(name)?;
        write_atomic(&path, map)?;
        tracing::debug!(path = %path.display(), "map saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SavedMap, MapLibraryError> {
        load_file(&self.path_for(name)?)
    }

    /// Saved map names in sorted order. A missing library is empty.
    pub fn list(&self) -> Result<Vec<String>, MapLibraryError> {
        let entries = match fs::read_dir(self.map_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn map_dir(&self) -> PathBuf {
        self.root.join("map")
    }
}

pub fn write_atomic(path: &Path, map: &SavedMap) -> Result<(), MapLibraryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(map).map_err(MapLibraryError::Parse)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn load_file(path: &Path) -> Result<SavedMap, MapLibraryError> {
    let content = fs::read_to_string(path)?;
    let map: SavedMap = serde_json::from_str(&content).map_err(MapLibraryError::Parse)?;
    map.validate().map_err(MapLibraryError::InvalidMap)?;
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn names_are_trimmed_and_checked() {
        assert_eq!(MapLibrary::normalize_name("  valley_01 ").expect("valid"), "valley_01");
        assert!(MapLibrary::normalize_name("   ").is_err());
        assert!(MapLibrary::normalize_name("../escape").is_err());
        assert!(MapLibrary::normalize_name("a-very-long-map-name-indeed").is_err());
    }

    #[test]
    fn save_then_load_returns_same_map() {
        let dir = tempdir().expect("tempdir");
        let library = MapLibrary::new(dir.path());
        let mut map = SavedMap::blank(10, 10);
        map.layer.terrain[4][5] = Some("mountain.png".to_string());

        let path = library.save("ridge", &map).expect("save");

        assert_eq!(path, dir.path().join("map").join("ridge.json"));
        assert_eq!(library.load("ridge").expect("load"), map);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn list_is_sorted_and_empty_when_missing() {
        let dir = tempdir().expect("tempdir");
        let library = MapLibrary::new(dir.path());
        assert!(library.list().expect("list").is_empty());

        library.save("beta", &SavedMap::blank(10, 10)).expect("save");
        library.save("alpha", &SavedMap::blank(10, 10)).expect("save");

        assert_eq!(library.list().expect("list"), vec!["alpha", "beta"]);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempdir().expect("tempdir");
        let library = MapLibrary::new(dir.path());
        let path = library.path_for("broken").expect("path");
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{"size":[2,2],"layer":{"terrain":[],"object":[]}}"#).expect("write");

        assert!(matches!(library.load("broken"), Err(MapLibraryError::InvalidMap(_))));
    }
}
