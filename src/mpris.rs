//! MPRIS client used to ask the running player what it is playing.

use std::collections::HashMap;
use std::path::PathBuf;

use async_io::block_on;
use tracing::debug;
use url::Url;
use zbus::{Connection, fdo::DBusProxy, proxy};
use zvariant::{OwnedValue, Value};

use crate::error::{Error, Result};

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait MediaPlayer {
    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}

/// The parts of MPRIS `Metadata` needed to locate the playing file.
#[derive(Debug, Default, PartialEq, Eq)]
struct NowPlaying {
    track_id: Option<String>,
    url: Option<String>,
}

impl NowPlaying {
    fn from_metadata(metadata: &HashMap<String, OwnedValue>) -> Self {
        Self {
            track_id: metadata_string(metadata, "mpris:trackid"),
            url: metadata_string(metadata, "xesam:url"),
        }
    }
}

fn metadata_string(metadata: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    match &**metadata.get(key)? {
        Value::Str(s) => Some(s.to_string()),
        Value::ObjectPath(p) => Some(p.to_string()),
        _ => None,
    }
}

/// A bus name belongs to our player when either the name or the track id
/// mentions it. MPD exposes tracks under `/org/mpd/` whatever the client.
fn matches_player(bus_name: &str, track_id: Option<&str>, player_name: &str) -> bool {
    let player_name = player_name.to_lowercase();
    let short_name = bus_name
        .strip_prefix(MPRIS_PREFIX)
        .unwrap_or(bus_name)
        .to_lowercase();
    if short_name.contains(&player_name) {
        return true;
    }
    match track_id {
        Some(id) => id.to_lowercase().contains(&player_name) || id.contains("/org/mpd/"),
        None => false,
    }
}

/// Convert a `file://` URL (percent-encoded) into a local path.
fn file_url_to_path(url: &str) -> Option<PathBuf> {
    let url = Url::parse(url).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

fn unavailable(e: impl std::fmt::Display) -> Error {
    Error::PlayerUnavailable(e.to_string())
}

/// Ask every MPRIS service on the session bus for its current track and
/// return the first existing file reported by a service matching `player_name`.
///
/// Fails with `PlayerUnavailable` when the bus is unreachable or no matching
/// service is running; `Ok(None)` means the player runs but plays no file.
pub fn current_track(player_name: &str) -> Result<Option<PathBuf>> {
    block_on(query_current_track(player_name))
}

async fn query_current_track(player_name: &str) -> Result<Option<PathBuf>> {
    let connection = Connection::session().await.map_err(|e| {
        Error::PlayerUnavailable(format!("cannot connect to session bus: {e}"))
    })?;

    let names = DBusProxy::new(&connection)
        .await
        .map_err(unavailable)?
        .list_names()
        .await
        .map_err(unavailable)?;

    let mut player_seen = false;
    for name in names.iter().map(|n| n.as_str()) {
        if !name.starts_with(MPRIS_PREFIX) {
            continue;
        }

        let proxy = match MediaPlayerProxy::builder(&connection).destination(name) {
            Ok(builder) => builder.build().await,
            Err(e) => Err(e),
        };
        let metadata = match proxy {
            Ok(p) => p.metadata().await,
            Err(e) => Err(e),
        };
        let metadata = match metadata {
            Ok(m) => m,
            Err(e) => {
                debug!(%name, error = %e, "MPRIS: cannot read metadata");
                continue;
            }
        };

        let now = NowPlaying::from_metadata(&metadata);
        if !matches_player(name, now.track_id.as_deref(), player_name) {
            continue;
        }
        player_seen = true;

        debug!(%name, url = ?now.url, "MPRIS: player found");
        if let Some(path) = now.url.as_deref().and_then(file_url_to_path) {
            if path.is_file() {
                return Ok(Some(path));
            }
        }
    }

    if !player_seen {
        return Err(Error::PlayerUnavailable(format!(
            "no MPRIS player matching '{player_name}' is running"
        )));
    }
    Ok(None)
}

#[cfg(test)]
mod tests;
