//! File organization around the currently playing track: `pick` moves it into
//! a dated folder, `delete` removes it, `import` copies new files in with
//! tag-based names.

mod import;
mod log;
mod naming;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::library::{LibraryFilter, subdirectories};
use crate::menu::Chooser;
use crate::player::PlayerChannel;

use naming::month_folder;

pub struct Organizer<'a> {
    settings: &'a Settings,
    filter: LibraryFilter,
    chooser: &'a dyn Chooser,
    player: &'a dyn PlayerChannel,
    /// Date used for the `YYYY-MM` destination folder.
    today: NaiveDate,
}

impl<'a> Organizer<'a> {
    pub fn new(
        settings: &'a Settings,
        chooser: &'a dyn Chooser,
        player: &'a dyn PlayerChannel,
    ) -> Self {
        Self {
            settings,
            filter: LibraryFilter::from_settings(settings),
            chooser,
            player,
            today: Local::now().date_naive(),
        }
    }

    fn month(&self) -> String {
        month_folder(self.today)
    }

    fn invalid_directory(&self, name: &str) -> Error {
        Error::InvalidDirectory {
            name: name.to_string(),
            available: self.settings.music_directories.join(", "),
        }
    }

    fn current_track(&self) -> Result<PathBuf> {
        let track = self.player.current_track()?.ok_or(Error::NoActiveTrack)?;
        debug!(track = %track.display(), "current track");
        Ok(track)
    }

    /// Move the current track to `<base>/<target>/<chosen subdir>/<YYYY-MM>/`.
    ///
    /// Returns the new path, or `None` when no subdirectory was chosen.
    pub fn pick(&self, target: &str) -> Result<Option<PathBuf>> {
        if !self.settings.music_directories.iter().any(|d| d == target) {
            return Err(self.invalid_directory(target));
        }

        let current = self.current_track()?;

        let target_dir = self.settings.base_path.join(target);
        if !target_dir.is_dir() {
            return Err(Error::MissingDirectory(target_dir));
        }

        let subdirs = subdirectories(&target_dir, &self.filter);
        if subdirs.is_empty() {
            return Err(Error::NoSubdirectories(target_dir));
        }
        let names: Vec<String> = subdirs
            .iter()
            .filter_map(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        let prompt = format!("Select subdirectory in {target}");
        let Some(idx) = self.chooser.choose(&prompt, &names)? else {
            return Ok(None);
        };

        let dest_dir = subdirs[idx].join(self.month());
        let file_name = current.file_name().ok_or(Error::NoActiveTrack)?;
        let dest = dest_dir.join(file_name);
        if dest.exists() {
            return Err(Error::MoveConflict(dest));
        }

        fs::create_dir_all(&dest_dir)?;
        move_file(&current, &dest)?;
        info!(from = %current.display(), to = %dest.display(), "picked track");
        Ok(Some(dest))
    }

    /// Delete the current track after a Yes/No confirmation.
    ///
    /// Returns the deleted path, or `None` when the user declined.
    pub fn delete(&self) -> Result<Option<PathBuf>> {
        let current = self.current_track()?;

        let name = current
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| current.display().to_string());
        if !self.chooser.confirm(&format!("Delete {name}"))? {
            return Ok(None);
        }

        fs::remove_file(&current)?;
        info!(track = %current.display(), "deleted track");
        Ok(Some(current))
    }
}

/// Rename, or copy and remove when source and destination are on different
/// filesystems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!(from = %from.display(), to = %to.display(), "cross-device move");
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
