//! Menu launcher integration (wofi, rofi, dmenu, fzf...).
//!
//! The launcher receives one item per line on stdin and prints the chosen
//! line on stdout. A non-zero exit status means the user dismissed the menu.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Blocking single-choice menu.
pub trait Chooser {
    /// Show `items` and return the index of the chosen one, or `None` when
    /// the user cancelled.
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;

    /// Yes/No question; anything but an explicit "Yes" is a decline.
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let items = ["Yes".to_string(), "No".to_string()];
        Ok(self.choose(prompt, &items)? == Some(0))
    }
}

/// `Chooser` that runs an external launcher process.
pub struct CommandChooser {
    argv: Vec<String>,
}

impl CommandChooser {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    fn command_line(&self, prompt: &str) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| arg.replace("{prompt}", prompt))
            .collect()
    }
}

/// Launchers are line based, so embedded newlines would split an item.
fn menu_line(item: &str) -> String {
    item.replace(['\n', '\r'], " ")
}

impl Chooser for CommandChooser {
    fn choose(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        if items.is_empty() {
            return Ok(None);
        }

        let argv = self.command_line(prompt);
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::Launcher("menu_command is empty".to_string()))?;

        let lines: Vec<String> = items.iter().map(|i| menu_line(i)).collect();

        debug!(%program, items = lines.len(), "opening menu");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Launcher(format!("cannot start '{program}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = lines.join("\n");
            match stdin.write_all(input.as_bytes()) {
                Ok(()) => {}
                // The launcher may exit without reading everything.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            debug!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "menu dismissed"
            );
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let selected = stdout.trim_end_matches(['\n', '\r']);
        Ok(lines.iter().position(|l| l == selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandChooser {
        CommandChooser::new(vec!["sh".into(), "-c".into(), script.into()])
    }

    fn items(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_line_substitutes_prompt() {
        let c = CommandChooser::new(vec![
            "wofi".into(),
            "--dmenu".into(),
            "--prompt".into(),
            "{prompt}".into(),
        ]);
        assert_eq!(
            c.command_line("Number of tracks"),
            vec!["wofi", "--dmenu", "--prompt", "Number of tracks"]
        );
    }

    #[test]
    fn choose_returns_index_of_printed_line() {
        let c = sh("head -n 2 | tail -n 1");
        let got = c.choose("pick", &items(&["alpha", "beta", "gamma"])).unwrap();
        assert_eq!(got, Some(1));
    }

    #[test]
    fn non_zero_exit_is_a_cancellation() {
        let c = sh("cat > /dev/null; exit 1");
        assert_eq!(c.choose("pick", &items(&["alpha"])).unwrap(), None);
    }

    #[test]
    fn free_text_not_in_list_is_a_cancellation() {
        let c = sh("cat > /dev/null; echo something-else");
        assert_eq!(c.choose("pick", &items(&["alpha"])).unwrap(), None);
    }

    #[test]
    fn missing_launcher_is_an_error() {
        let c = CommandChooser::new(vec!["/nonexistent/musictl-launcher".into()]);
        let err = c.choose("pick", &items(&["alpha"])).unwrap_err();
        assert!(matches!(err, Error::Launcher(_)));
    }

    #[test]
    fn empty_list_never_spawns() {
        let c = CommandChooser::new(vec!["/nonexistent/musictl-launcher".into()]);
        assert_eq!(c.choose("pick", &[]).unwrap(), None);
    }

    #[test]
    fn confirm_accepts_only_yes() {
        assert!(sh("head -n 1").confirm("Delete?").unwrap());
        assert!(!sh("tail -n 1").confirm("Delete?").unwrap());
    }
}
