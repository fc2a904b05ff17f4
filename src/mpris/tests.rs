use super::*;
use std::path::Path;
use zvariant::ObjectPath;

fn owned(v: Value<'_>) -> OwnedValue {
    OwnedValue::try_from(v).unwrap()
}

fn metadata(track_id: &str, url: &str) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();
    map.insert(
        "mpris:trackid".to_string(),
        owned(Value::from(ObjectPath::try_from(track_id).unwrap())),
    );
    map.insert("xesam:url".to_string(), owned(Value::from(url)));
    map.insert("xesam:title".to_string(), owned(Value::from("Title")));
    map
}

#[test]
fn now_playing_reads_object_path_and_string_values() {
    let map = metadata("/org/mpd/track/3", "file:///tmp/a.mp3");
    let now = NowPlaying::from_metadata(&map);
    assert_eq!(now.track_id.as_deref(), Some("/org/mpd/track/3"));
    assert_eq!(now.url.as_deref(), Some("file:///tmp/a.mp3"));
}

#[test]
fn metadata_string_ignores_other_value_types() {
    let mut map = HashMap::new();
    map.insert("mpris:length".to_string(), owned(Value::from(42i64)));
    assert_eq!(metadata_string(&map, "mpris:length"), None);
    assert_eq!(metadata_string(&map, "missing"), None);
}

#[test]
fn matches_player_by_bus_name_case_insensitive() {
    assert!(matches_player("org.mpris.MediaPlayer2.DeaDBeeF", None, "deadbeef"));
    assert!(!matches_player("org.mpris.MediaPlayer2.vlc", None, "deadbeef"));
}

#[test]
fn matches_player_by_track_id_or_mpd() {
    assert!(matches_player(
        "org.mpris.MediaPlayer2.instance123",
        Some("/org/deadbeef/track/7"),
        "deadbeef"
    ));
    assert!(matches_player(
        "org.mpris.MediaPlayer2.mpdris2",
        Some("/org/mpd/Tracklist/1"),
        "ncmpcpp"
    ));
    assert!(!matches_player(
        "org.mpris.MediaPlayer2.firefox",
        Some("/org/mozilla/track/1"),
        "deadbeef"
    ));
}

#[test]
fn file_url_to_path_decodes_percent_escapes() {
    assert_eq!(
        file_url_to_path("file:///music/My%20Band/01%20-%20Song.flac").as_deref(),
        Some(Path::new("/music/My Band/01 - Song.flac"))
    );
    assert_eq!(file_url_to_path("https://example.com/a.mp3"), None);
    assert_eq!(file_url_to_path("not a url"), None);
}
