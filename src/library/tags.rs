use std::path::Path;

use lofty::prelude::*;

/// Tag fields used to name imported files. Each may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
}

/// Reads tag metadata from an audio file.
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> Result<TrackTags, String>;
}

/// `TagReader` backed by lofty.
pub struct LoftyTagReader;

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path) -> Result<TrackTags, String> {
        let tagged = lofty::read_from_path(path).map_err(|e| e.to_string())?;

        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(TrackTags::default());
        };

        Ok(TrackTags {
            artist: non_empty(tag.artist()),
            album: non_empty(tag.album()),
            title: non_empty(tag.title()),
            track_number: tag.track(),
        })
    }
}
