//! Library scanning: finding playable files under the configured root and
//! reading the tags used to rename imports.

mod model;
mod scan;
mod tags;

pub use model::{Playlist, Track};
pub use scan::{LibraryFilter, list_audio_files, scan_dir, scan_library, subdirectories};
pub use tags::{LoftyTagReader, TagReader, TrackTags};
