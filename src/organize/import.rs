use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use super::Organizer;
use super::log::ImportLog;
use super::naming::import_file_name;
use crate::error::{Error, Result};
use crate::library::{TagReader, list_audio_files};

/// A file of an import batch and what went wrong with it.
#[derive(Debug)]
pub struct ImportItemFailure {
    pub source: PathBuf,
    pub error: Error,
}

/// Outcome of one `import` run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// `(source, destination)` of every copied file.
    pub imported: Vec<(PathBuf, PathBuf)>,
    pub failures: Vec<ImportItemFailure>,
    /// Files that were copied (and are in `imported`) but whose log record
    /// could not be written.
    pub unlogged: Vec<ImportItemFailure>,
}

impl ImportReport {
    /// Number of files that need attention: failed copies plus missing log records.
    pub fn problems(&self) -> usize {
        self.failures.len() + self.unlogged.len()
    }
}

impl Organizer<'_> {
    /// `target` is relative to the library root and must start with one of
    /// the configured music directories.
    fn import_dir(&self, target: &str) -> Result<PathBuf> {
        let target_path = Path::new(target);
        let mut components = target_path.components();
        let top_ok = match components.next() {
            Some(Component::Normal(top)) => self
                .settings
                .music_directories
                .iter()
                .any(|d| top.to_str() == Some(d.as_str())),
            _ => false,
        };
        let rest_ok = components.all(|c| matches!(c, Component::Normal(_)));
        if !top_ok || !rest_ok {
            return Err(self.invalid_directory(target));
        }
        Ok(self.settings.base_path.join(target_path))
    }

    /// Copy every audio file directly inside `source` into
    /// `<base>/<target>/<YYYY-MM>/`, renamed from its tags.
    ///
    /// A file that fails is recorded in the report and the batch continues;
    /// files already copied stay in place and are logged.
    pub fn import(
        &self,
        target: &str,
        source: &Path,
        tags: &dyn TagReader,
    ) -> Result<ImportReport> {
        let dest_dir = self.import_dir(target)?.join(self.month());
        if !source.is_dir() {
            return Err(Error::MissingDirectory(source.to_path_buf()));
        }

        let files = list_audio_files(source, &self.filter)?;
        let mut report = ImportReport::default();
        if files.is_empty() {
            return Ok(report);
        }

        fs::create_dir_all(&dest_dir)?;
        let mut log = ImportLog::open(&self.settings.import_log_file)?;

        for file in files {
            match import_one(&file, &dest_dir, tags) {
                Ok(dest) => {
                    info!(from = %file.display(), to = %dest.display(), "imported");
                    if let Err(e) = log.append(&file, &dest) {
                        warn!(error = %e, "cannot append to import log");
                        report.unlogged.push(ImportItemFailure {
                            source: file.clone(),
                            error: e.into(),
                        });
                    }
                    report.imported.push((file, dest));
                }
                Err(error) => {
                    warn!(file = %file.display(), %error, "import failed");
                    report.failures.push(ImportItemFailure {
                        source: file,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}

fn import_one(file: &Path, dest_dir: &Path, reader: &dyn TagReader) -> Result<PathBuf> {
    let mut tags = reader.read_tags(file).map_err(Error::Tags)?;
    // Untagged files of one batch must not all collapse onto one name.
    if tags.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        tags.title = file.file_stem().map(|s| s.to_string_lossy().into_owned());
    }
    let extension = file
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dest = dest_dir.join(import_file_name(&tags, &extension));
    if dest.exists() {
        return Err(Error::MoveConflict(dest));
    }

    fs::copy(file, &dest)?;
    Ok(dest)
}
