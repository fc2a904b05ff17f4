use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, SecondsFormat};

/// Append-only import record: one tab-separated line per imported file,
/// `timestamp<TAB>source<TAB>destination`.
pub struct ImportLog {
    file: File,
}

impl ImportLog {
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn append(&mut self, source: &Path, destination: &Path) -> io::Result<()> {
        let line = format!(
            "{}\t{}\t{}\n",
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            source.display(),
            destination.display()
        );
        self.file.write_all(line.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("import.log");

        {
            let mut log = ImportLog::open(&path).unwrap();
            log.append(Path::new("/in/a.mp3"), Path::new("/lib/A.mp3"))
                .unwrap();
        }
        {
            let mut log = ImportLog::open(&path).unwrap();
            log.append(Path::new("/in/b.mp3"), Path::new("/lib/B.mp3"))
                .unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<Vec<&str>> = text.lines().map(|l| l.split('\t').collect()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][1..], ["/in/a.mp3", "/lib/A.mp3"]);
        assert_eq!(lines[1][1..], ["/in/b.mp3", "/lib/B.mp3"]);
        assert!(chrono::DateTime::parse_from_rfc3339(lines[0][0]).is_ok());
    }
}
