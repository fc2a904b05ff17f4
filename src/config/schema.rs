use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level settings loaded from `config.yml`.
///
/// File format: YAML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musictl/config.yml` or `~/.config/musictl/config.yml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICTL__`)
/// 2) Config file
/// 3) Field defaults
///
/// `base_path` has no default: a document without it is rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Root of the whole music library. `~` expands to the home directory.
    pub base_path: PathBuf,

    /// Directory names skipped anywhere below `base_path`.
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// Top-level folders under `base_path` that can be browsed, picked into
    /// and imported into, in menu order.
    #[serde(default = "default_music_directories")]
    pub music_directories: Vec<String>,

    /// Audio extensions, case-insensitive. The leading dot is optional.
    #[serde(default = "default_music_extensions")]
    pub music_extensions: Vec<String>,

    /// Player executable; it is started with an `.m3u` playlist argument and
    /// matched against MPRIS bus names when asking for the current track.
    #[serde(default = "default_player_command")]
    pub player_command: String,

    /// Choices offered after "Play", in menu order.
    #[serde(
        default = "default_track_count_options",
        deserialize_with = "one_or_many"
    )]
    pub track_count_options: Vec<TrackCount>,

    /// Append-only record of imported files.
    #[serde(default = "default_import_log_file")]
    pub import_log_file: PathBuf,

    /// Launcher argv. Items are written to its stdin one per line and the
    /// chosen line is read back from stdout. `{prompt}` is substituted.
    #[serde(default = "default_menu_command")]
    pub menu_command: Vec<String>,

    /// Optional diagnostics log (in addition to stderr).
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Default `tracing` filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("~/Dropbox"),
            ignored_dirs: default_ignored_dirs(),
            music_directories: default_music_directories(),
            music_extensions: default_music_extensions(),
            player_command: default_player_command(),
            track_count_options: default_track_count_options(),
            import_log_file: default_import_log_file(),
            menu_command: default_menu_command(),
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

fn default_ignored_dirs() -> Vec<String> {
    vec!["downloads".into(), ".git".into(), "__pycache__".into()]
}

fn default_music_directories() -> Vec<String> {
    vec!["collection".into(), "inbox".into(), "dj".into()]
}

fn default_music_extensions() -> Vec<String> {
    vec![
        ".mp3".into(),
        ".flac".into(),
        ".wav".into(),
        ".ogg".into(),
        ".m4a".into(),
    ]
}

fn default_player_command() -> String {
    "deadbeef".to_string()
}

fn default_track_count_options() -> Vec<TrackCount> {
    vec![
        TrackCount::Limit(10),
        TrackCount::Limit(50),
        TrackCount::Limit(100),
        TrackCount::All,
    ]
}

fn default_import_log_file() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~").join(".local").join("share"));
    data_dir.join("musictl").join("import.log")
}

fn default_menu_command() -> Vec<String> {
    vec![
        "wofi".into(),
        "--dmenu".into(),
        "--prompt".into(),
        "{prompt}".into(),
    ]
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Accepts a single value where a list is expected (`MUSICTL__TRACK_COUNT_OPTIONS=25`).
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

/// One entry of `track_count_options`: a finite number of tracks or `ALL`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "TrackCountRepr", into = "TrackCountRepr")]
pub enum TrackCount {
    Limit(usize),
    All,
}

impl fmt::Display for TrackCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackCount::Limit(n) => write!(f, "{n}"),
            TrackCount::All => f.write_str("ALL"),
        }
    }
}

/// YAML allows both `10` and `"10"`. Environment overrides arrive as text,
/// except a lone number, which is parsed before list splitting.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum TrackCountRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<TrackCountRepr> for TrackCount {
    type Error = String;

    fn try_from(repr: TrackCountRepr) -> Result<Self, Self::Error> {
        let n = match repr {
            TrackCountRepr::Number(n) => n,
            TrackCountRepr::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("all") {
                    return Ok(TrackCount::All);
                }
                s.parse::<u64>()
                    .map_err(|_| format!("invalid track count '{s}', expected a number or ALL"))?
            }
        };
        match usize::try_from(n) {
            Ok(0) => Err("track count must be >= 1".to_string()),
            Ok(n) => Ok(TrackCount::Limit(n)),
            Err(_) => Err(format!("track count {n} is too large")),
        }
    }
}

impl From<TrackCount> for TrackCountRepr {
    fn from(count: TrackCount) -> Self {
        match count {
            TrackCount::Limit(n) => TrackCountRepr::Number(n as u64),
            TrackCount::All => TrackCountRepr::Text("ALL".to_string()),
        }
    }
}
