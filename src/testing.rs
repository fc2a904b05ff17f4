//! In-process stand-ins for the launcher, the player and the tag reader.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::library::{Playlist, TagReader, TrackTags};
use crate::menu::Chooser;
use crate::player::PlayerChannel;

/// One scripted menu answer.
#[derive(Clone, Debug)]
pub enum Pick {
    /// Choose the first item starting with this text.
    Starts(&'static str),
    Cancel,
}

/// Chooser that replays scripted answers and records every menu shown.
#[derive(Default)]
pub struct ScriptedChooser {
    answers: RefCell<VecDeque<Pick>>,
    pub shown: RefCell<Vec<(String, Vec<String>)>>,
}

impl ScriptedChooser {
    pub fn new(answers: impl IntoIterator<Item = Pick>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    pub fn menus_shown(&self) -> usize {
        self.shown.borrow().len()
    }
}

impl Chooser for ScriptedChooser {
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        self.shown
            .borrow_mut()
            .push((prompt.to_string(), items.to_vec()));
        match self.answers.borrow_mut().pop_front() {
            Some(Pick::Starts(prefix)) => {
                let idx = items
                    .iter()
                    .position(|i| i.starts_with(prefix))
                    .unwrap_or_else(|| panic!("no item starting with {prefix:?} in {items:?}"));
                Ok(Some(idx))
            }
            Some(Pick::Cancel) | None => Ok(None),
        }
    }
}

/// Player that reports a fixed current track and records playlists.
#[derive(Default)]
pub struct FakePlayer {
    pub current: Option<PathBuf>,
    pub unavailable: bool,
    pub played: RefCell<Vec<Playlist>>,
}

impl FakePlayer {
    pub fn playing(path: impl Into<PathBuf>) -> Self {
        Self {
            current: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl PlayerChannel for FakePlayer {
    fn play(&self, playlist: &Playlist) -> Result<()> {
        self.played.borrow_mut().push(playlist.clone());
        Ok(())
    }

    fn current_track(&self) -> Result<Option<PathBuf>> {
        if self.unavailable {
            return Err(Error::PlayerUnavailable("fake player is not running".into()));
        }
        Ok(self.current.clone())
    }
}

/// Tag reader keyed by file name.
#[derive(Default)]
pub struct FakeTags {
    tags: HashMap<String, TrackTags>,
    broken: Vec<String>,
}

impl FakeTags {
    pub fn with(mut self, file_name: &str, tags: TrackTags) -> Self {
        self.tags.insert(file_name.to_string(), tags);
        self
    }

    pub fn broken(mut self, file_name: &str) -> Self {
        self.broken.push(file_name.to_string());
        self
    }
}

impl TagReader for FakeTags {
    fn read_tags(&self, path: &Path) -> std::result::Result<TrackTags, String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.broken.contains(&name) {
            return Err(format!("cannot read tags of {name}"));
        }
        Ok(self.tags.get(&name).cloned().unwrap_or_default())
    }
}

pub fn tags(artist: &str, album: &str, title: &str, track_number: Option<u32>) -> TrackTags {
    TrackTags {
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
        title: Some(title.to_string()),
        track_number,
    }
}

/// Shared buffer a test `fmt` subscriber writes into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber at `warn` and return what it logged.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap_or_else(|e| e.into_inner()).clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
