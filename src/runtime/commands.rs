//! One function per CLI command: run it against the given collaborators and
//! print what happened.

use std::path::Path;

use crate::config::Settings;
use crate::error::{Error, Outcome, Result};
use crate::library::TagReader;
use crate::menu::Chooser;
use crate::organize::Organizer;
use crate::player::PlayerChannel;
use crate::select::{Selection, Selector};

fn play(selection: Selection, player: &dyn PlayerChannel) -> Result<Outcome> {
    match selection {
        Selection::Chosen(playlist) => {
            player.play(&playlist)?;
            match playlist.as_slice() {
                [single] => println!("Playing: {}", single.file_name()),
                tracks => println!("Playing {} tracks", tracks.len()),
            }
            Ok(Outcome::Done)
        }
        Selection::Cancelled => Ok(Outcome::Cancelled),
        Selection::Empty(msg) => {
            println!("{msg}");
            Ok(Outcome::Done)
        }
    }
}

pub fn select(
    settings: &Settings,
    chooser: &dyn Chooser,
    player: &dyn PlayerChannel,
) -> Result<Outcome> {
    let selection = Selector::new(settings, chooser).browse()?;
    play(selection, player)
}

pub fn search(
    settings: &Settings,
    chooser: &dyn Chooser,
    player: &dyn PlayerChannel,
    query: Option<&str>,
) -> Result<Outcome> {
    let selection = Selector::new(settings, chooser).search(query)?;
    play(selection, player)
}

pub fn pick(
    settings: &Settings,
    chooser: &dyn Chooser,
    player: &dyn PlayerChannel,
    target: &str,
) -> Result<Outcome> {
    match Organizer::new(settings, chooser, player).pick(target)? {
        Some(dest) => {
            println!("Moved to {}", dest.display());
            Ok(Outcome::Done)
        }
        None => Ok(Outcome::Cancelled),
    }
}

pub fn delete(
    settings: &Settings,
    chooser: &dyn Chooser,
    player: &dyn PlayerChannel,
) -> Result<Outcome> {
    match Organizer::new(settings, chooser, player).delete()? {
        Some(deleted) => {
            println!("Deleted {}", deleted.display());
            Ok(Outcome::Done)
        }
        None => Ok(Outcome::Cancelled),
    }
}

pub fn import(
    settings: &Settings,
    chooser: &dyn Chooser,
    player: &dyn PlayerChannel,
    tags: &dyn TagReader,
    target: &str,
    source: &Path,
) -> Result<Outcome> {
    let report = Organizer::new(settings, chooser, player).import(target, source, tags)?;

    for (from, to) in &report.imported {
        println!("Imported {} -> {}", from.display(), to.display());
    }
    println!(
        "{} imported, {} failed",
        report.imported.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("  {}: {}", failure.source.display(), failure.error);
    }
    if !report.unlogged.is_empty() {
        eprintln!("{} imported but not logged", report.unlogged.len());
        for item in &report.unlogged {
            eprintln!("  {}: {}", item.source.display(), item.error);
        }
    }

    match report.problems() {
        0 => Ok(Outcome::Done),
        n => Err(Error::ImportFailed(n)),
    }
}
