use std::{
    env, fs,
    path::{Path, PathBuf},
};

use super::schema::Settings;
use crate::error::{Error, Result};

/// Keys whose environment override is a comma-separated list.
const LIST_KEYS: [&str; 5] = [
    "ignored_dirs",
    "music_directories",
    "music_extensions",
    "track_count_options",
    "menu_command",
];

/// Configuration loading helpers.
///
/// `Settings::load` reads the YAML document at the resolved config path (writing
/// the defaults there first when it does not exist yet), then applies
/// environment overrides (prefix `MUSICTL__`, list values comma-separated).
impl Settings {
    /// Load settings from the resolved config path.
    ///
    /// Also returns the path of the default document when this call had to
    /// create it, so the caller can report it once logging is up.
    pub fn load() -> Result<(Self, Option<PathBuf>)> {
        let path = resolve_config_path()
            .ok_or_else(|| Error::Config("cannot determine config path".to_string()))?;

        let written = if path.exists() {
            None
        } else {
            write_default_config(&path)?;
            Some(path.clone())
        };

        Ok((Self::load_from(&path)?, written))
    }

    /// Load settings from `path` plus environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let cfg = ::config::Config::builder()
            .add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Yaml)
                    .required(true),
            )
            .add_source(
                LIST_KEYS.iter().fold(
                    ::config::Environment::with_prefix("MUSICTL")
                        .prefix_separator("__")
                        .try_parsing(true)
                        .list_separator(","),
                    |env, key| env.with_list_parse_key(key),
                ),
            )
            .build()?;

        let mut settings: Settings = cfg.try_deserialize()?;
        settings.expand_paths();
        settings.validate().map_err(Error::Config)?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.base_path.as_os_str().is_empty() {
            return Err("base_path must not be empty".to_string());
        }
        if self.music_directories.is_empty() {
            return Err("music_directories must list at least one directory".to_string());
        }
        if self.track_count_options.is_empty() {
            return Err("track_count_options must not be empty".to_string());
        }
        if self.menu_command.is_empty() {
            return Err("menu_command must not be empty".to_string());
        }
        if self.player_command.trim().is_empty() {
            return Err("player_command must not be empty".to_string());
        }
        Ok(())
    }

    fn expand_paths(&mut self) {
        self.base_path = expand_home(&self.base_path);
        self.import_log_file = expand_home(&self.import_log_file);
        self.log_file = self.log_file.as_deref().map(expand_home);
    }
}

/// Serialize `Settings::default()` to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let doc = serde_yaml::to_string(&Settings::default())
        .map_err(|e| Error::Config(format!("cannot serialize default config: {e}")))?;
    fs::write(path, doc)?;
    Ok(())
}

/// Replace a leading `~` component with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Resolve the config path from `MUSICTL_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MUSICTL_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/musictl/config.yml`
/// or `~/.config/musictl/config.yml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("musictl").join("config.yml"))
}
