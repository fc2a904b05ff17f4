use std::path::{Path, PathBuf};

/// A playable file found under the library root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Path relative to the library root, used as the search label.
    pub label: String,
}

impl Track {
    pub fn new(path: PathBuf, root: &Path) -> Self {
        let label = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .display()
            .to_string();
        Self { path, label }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.label.clone())
    }
}

/// Ordered list of tracks handed to the player.
pub type Playlist = Vec<Track>;

/// A configured music directory that could not be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning every configured music directory.
#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    pub tracks: Vec<Track>,
    pub warnings: Vec<ScanWarning>,
}
