use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Settings;

use super::model::{ScanReport, ScanWarning, Track};

/// Extension and ignore rules shared by every scan.
#[derive(Clone, Debug)]
pub struct LibraryFilter {
    extensions: Vec<String>,
    ignored_dirs: HashSet<String>,
}

impl LibraryFilter {
    pub fn new(extensions: &[String], ignored_dirs: &[String]) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        let ignored_dirs = ignored_dirs
            .iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            extensions,
            ignored_dirs,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.music_extensions, &settings.ignored_dirs)
    }

    pub fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| e == &ext)
            })
            .unwrap_or(false)
    }

    pub fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str()
            .map(|n| self.ignored_dirs.contains(n))
            .unwrap_or(false)
    }

    /// True when any normal component of `relative` is an ignored name.
    pub fn has_ignored_segment(&self, relative: &Path) -> bool {
        relative.components().any(|c| match c {
            Component::Normal(name) => self.is_ignored(name),
            _ => false,
        })
    }
}

/// Scan every configured music directory under `base_path`.
///
/// Missing directories become warnings; the remaining directories are still
/// scanned.
pub fn scan_library(settings: &Settings) -> ScanReport {
    let filter = LibraryFilter::from_settings(settings);
    let root = settings.base_path.as_path();
    let mut report = ScanReport::default();

    if !root.is_dir() {
        let warning = ScanWarning {
            path: root.to_path_buf(),
            reason: "base path does not exist".to_string(),
        };
        warn!(path = %warning.path.display(), "{}", warning.reason);
        report.warnings.push(warning);
        return report;
    }

    for name in &settings.music_directories {
        let dir = root.join(name);
        if filter.has_ignored_segment(Path::new(name)) {
            debug!(dir = %dir.display(), "music directory is ignored, skipping");
            continue;
        }
        if !dir.is_dir() {
            let warning = ScanWarning {
                path: dir,
                reason: "music directory does not exist".to_string(),
            };
            warn!(path = %warning.path.display(), "{}", warning.reason);
            report.warnings.push(warning);
            continue;
        }
        report.tracks.extend(scan_dir(&dir, root, &filter));
    }

    report.tracks.sort_by(|a, b| a.path.cmp(&b.path));
    report
}

/// Recursively collect playable files below `dir`, labelled relative to `root`.
pub fn scan_dir(dir: &Path, root: &Path, filter: &LibraryFilter) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !filter.is_ignored(e.file_name()))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
    {
        let path = entry.path();
        if entry.file_type().is_file() && filter.is_audio_file(path) {
            tracks.push(Track::new(path.to_path_buf(), root));
        }
    }

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    tracks
}

/// Immediate child directories of `dir`, sorted, without ignored names.
pub fn subdirectories(dir: &Path, filter: &LibraryFilter) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "cannot list directory");
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| !filter.is_ignored(&e.file_name()))
        .map(|e| e.path())
        .collect();
    dirs.sort();
    dirs
}

/// Playable files directly inside `dir` (no recursion), sorted.
pub fn list_audio_files(dir: &Path, filter: &LibraryFilter) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && filter.is_audio_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
