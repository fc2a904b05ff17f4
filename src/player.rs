//! Player control: starting the external player with a playlist and asking it
//! (over MPRIS) which file it is playing.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::library::Playlist;
use crate::mpris;

/// Control channel to the media player.
pub trait PlayerChannel {
    /// Replace the player's queue with `playlist` and start from its first entry.
    fn play(&self, playlist: &Playlist) -> Result<()>;

    /// The file the player is currently playing, if any.
    fn current_track(&self) -> Result<Option<PathBuf>>;
}

/// The player configured by `player_command`.
pub struct ExternalPlayer {
    program: String,
    args: Vec<String>,
    playlist_path: PathBuf,
}

impl ExternalPlayer {
    pub fn new(player_command: &str) -> Self {
        let mut parts = player_command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
            playlist_path: std::env::temp_dir().join("musictl.m3u"),
        }
    }

    /// Executable name, used to recognise the player on the session bus.
    fn name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone())
    }
}

impl PlayerChannel for ExternalPlayer {
    fn play(&self, playlist: &Playlist) -> Result<()> {
        write_m3u(&self.playlist_path, playlist)?;

        debug!(program = %self.program, playlist = %self.playlist_path.display(), "starting player");
        Command::new(&self.program)
            .args(&self.args)
            .arg(&self.playlist_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    Error::PlayerUnavailable(format!("player '{}' not found", self.program))
                }
                _ => Error::PlayerUnavailable(format!("cannot start '{}': {e}", self.program)),
            })?;

        info!(tracks = playlist.len(), player = %self.program, "playlist sent to player");
        Ok(())
    }

    fn current_track(&self) -> Result<Option<PathBuf>> {
        mpris::current_track(&self.name())
    }
}

/// Write `playlist` as an extended M3U file, one absolute path per entry.
pub fn write_m3u(path: &Path, playlist: &Playlist) -> io::Result<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    writeln!(out, "#EXTM3U")?;
    for track in playlist {
        writeln!(out, "#EXTINF:-1,{}", track.file_name())?;
        writeln!(out, "{}", track.path.display())?;
    }
    out.flush()
}
