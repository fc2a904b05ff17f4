use chrono::Datelike;

use crate::library::TrackTags;

/// Stand-in for a missing artist, album or title.
pub const UNKNOWN: &str = "Unknown";
/// Stand-in for a missing track number.
pub const UNKNOWN_TRACK_NUMBER: &str = "00";

/// `YYYY-MM` folder name for `date`.
pub fn month_folder(date: impl Datelike) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Characters that cannot appear in a file name on common filesystems.
fn sanitize(field: &str) -> String {
    let cleaned: String = field
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        UNKNOWN.to_string()
    } else {
        cleaned.to_string()
    }
}

fn text_field(value: Option<&str>) -> String {
    value.map(sanitize).unwrap_or_else(|| UNKNOWN.to_string())
}

/// `Artist - Album - NN - Title.ext`, NN zero-padded to two digits.
pub fn import_file_name(tags: &TrackTags, extension: &str) -> String {
    let number = tags
        .track_number
        .map(|n| format!("{n:02}"))
        .unwrap_or_else(|| UNKNOWN_TRACK_NUMBER.to_string());

    let stem = format!(
        "{} - {} - {} - {}",
        text_field(tags.artist.as_deref()),
        text_field(tags.album.as_deref()),
        number,
        text_field(tags.title.as_deref()),
    );

    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}
