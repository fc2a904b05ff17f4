use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::error::{Outcome, Result};
use crate::logging;
use crate::menu::CommandChooser;
use crate::player::ExternalPlayer;

mod commands;

/// Load settings, wire the real launcher and player, run one command.
pub fn run(cli: Cli) -> Result<Outcome> {
    let (settings, written) = Settings::load()?;
    logging::init(&settings);
    if let Some(path) = written {
        info!(path = %path.display(), "wrote default configuration");
    }

    let chooser = CommandChooser::new(settings.menu_command.clone());
    let player = ExternalPlayer::new(&settings.player_command);

    match cli.command {
        Commands::Select => commands::select(&settings, &chooser, &player),
        Commands::Search { query } => {
            let query = query.join(" ");
            let query = Some(query.as_str()).filter(|q| !q.trim().is_empty());
            commands::search(&settings, &chooser, &player, query)
        }
        Commands::Pick { dir } => commands::pick(&settings, &chooser, &player, &dir),
        Commands::Delete => commands::delete(&settings, &chooser, &player),
        Commands::Import { target, source } => commands::import(
            &settings,
            &chooser,
            &player,
            &crate::library::LoftyTagReader,
            &target,
            &source,
        ),
    }
}
