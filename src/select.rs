//! Track selection: folder browsing and flat search, both driven through the
//! launcher menu.

mod fuzzy;
mod sample;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::library::{LibraryFilter, Playlist, scan_dir, scan_library, subdirectories};
use crate::menu::Chooser;

pub use fuzzy::fuzzy_match;
pub use sample::pick_tracks;

/// How a selection ended.
#[derive(Debug)]
pub enum Selection {
    Chosen(Playlist),
    Cancelled,
    /// There was nothing to choose from.
    Empty(String),
}

pub struct Selector<'a> {
    settings: &'a Settings,
    filter: LibraryFilter,
    chooser: &'a dyn Chooser,
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

impl<'a> Selector<'a> {
    pub fn new(settings: &'a Settings, chooser: &'a dyn Chooser) -> Self {
        Self {
            settings,
            filter: LibraryFilter::from_settings(settings),
            chooser,
        }
    }

    fn track_count(&self, dir: &Path) -> usize {
        scan_dir(dir, &self.settings.base_path, &self.filter).len()
    }

    /// Browse mode: pick a music directory, drill down one level per choice
    /// until "Play", then pick how many tracks to queue.
    pub fn browse(&self) -> Result<Selection> {
        let root = &self.settings.base_path;

        let mut items = Vec::new();
        let mut dirs = Vec::new();
        for name in &self.settings.music_directories {
            let dir = root.join(name);
            if self.filter.has_ignored_segment(Path::new(name)) {
                debug!(dir = %dir.display(), "music directory is ignored, skipping");
                continue;
            }
            if !dir.is_dir() {
                warn!(path = %dir.display(), "music directory does not exist");
                continue;
            }
            let n = self.track_count(&dir);
            if n > 0 {
                items.push(format!("📁 {name} ({n} tracks)"));
                dirs.push(dir);
            }
        }

        if items.is_empty() {
            return Ok(Selection::Empty("No music directories found".to_string()));
        }

        let Some(idx) = self.chooser.choose("Select music directory:", &items)? else {
            return Ok(Selection::Cancelled);
        };

        let mut dir = dirs.swap_remove(idx);
        let tracks = loop {
            let tracks = scan_dir(&dir, root, &self.filter);

            let mut items = Vec::new();
            let mut targets: Vec<Option<PathBuf>> = Vec::new();
            if !tracks.is_empty() {
                items.push(format!("▶ Play ({} tracks)", tracks.len()));
                targets.push(None);
            }
            for sub in subdirectories(&dir, &self.filter) {
                let n = self.track_count(&sub);
                if n > 0 {
                    items.push(format!("📁 {} ({n} tracks)", dir_name(&sub)));
                    targets.push(Some(sub));
                }
            }

            if items.is_empty() {
                return Ok(Selection::Empty(format!(
                    "No music files in {}",
                    dir.display()
                )));
            }

            let prompt = format!("{}:", dir_name(&dir));
            let Some(idx) = self.chooser.choose(&prompt, &items)? else {
                return Ok(Selection::Cancelled);
            };
            match targets.swap_remove(idx) {
                Some(sub) => dir = sub,
                None => break tracks,
            }
        };

        let options = &self.settings.track_count_options;
        let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        let Some(idx) = self.chooser.choose("Number of tracks", &labels)? else {
            return Ok(Selection::Cancelled);
        };

        let count = options[idx];
        debug!(dir = %dir.display(), %count, available = tracks.len(), "building playlist");
        Ok(Selection::Chosen(pick_tracks(tracks, count)))
    }

    /// Search mode: one flat list of every track, labelled by its path
    /// relative to the library root. `query` narrows the list first; a
    /// single match is chosen without opening the menu.
    pub fn search(&self, query: Option<&str>) -> Result<Selection> {
        let mut tracks = scan_library(self.settings).tracks;
        if tracks.is_empty() {
            return Ok(Selection::Empty("No music files found".to_string()));
        }

        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            tracks.retain(|t| fuzzy_match(&t.label, query));
            match tracks.len() {
                0 => return Ok(Selection::Empty(format!("No track matches '{query}'"))),
                1 => return Ok(Selection::Chosen(tracks)),
                _ => {}
            }
        }

        let labels: Vec<String> = tracks.iter().map(|t| t.label.clone()).collect();
        let Some(idx) = self.chooser.choose("Search and select track", &labels)? else {
            return Ok(Selection::Cancelled);
        };

        Ok(Selection::Chosen(vec![tracks.swap_remove(idx)]))
    }
}
