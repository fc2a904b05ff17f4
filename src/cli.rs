use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// musictl - browse, play and reorganize a personal music library
#[derive(Parser, Debug)]
#[command(name = "musictl")]
#[command(about = "Browse, play and reorganize a music library from a launcher menu", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse music directories and play a selection
    Select,
    /// Search for a single track and play it
    Search {
        /// Optional text to narrow the list before the menu opens
        query: Vec<String>,
    },
    /// Move the current track into a dated subdirectory of DIR
    Pick {
        /// One of the configured music directories
        dir: String,
    },
    /// Delete the current track
    Delete,
    /// Import tracks from SOURCE into TARGET
    Import {
        /// Destination relative to the base path, e.g. collection/indie_inbox
        target: String,
        /// Directory holding the new files (not searched recursively)
        source: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let cli = Cli::try_parse_from(["musictl", "select"]).unwrap();
        assert!(matches!(cli.command, Commands::Select));

        let cli = Cli::try_parse_from(["musictl", "search", "miles", "davis"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query } if query == &["miles", "davis"]));

        let cli = Cli::try_parse_from(["musictl", "pick", "collection"]).unwrap();
        assert!(matches!(cli.command, Commands::Pick { ref dir } if dir == "collection"));

        let cli = Cli::try_parse_from(["musictl", "delete"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete));

        let cli = Cli::try_parse_from(["musictl", "import", "collection/new", "/tmp/in"]).unwrap();
        match cli.command {
            Commands::Import { target, source } => {
                assert_eq!(target, "collection/new");
                assert_eq!(source, PathBuf::from("/tmp/in"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["musictl", "pick"]).is_err());
        assert!(Cli::try_parse_from(["musictl", "import", "collection"]).is_err());
        assert!(Cli::try_parse_from(["musictl"]).is_err());
    }
}
