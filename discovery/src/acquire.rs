//! Usage text acquisition.
//!
//! Runs `<command> --help` as a direct child process (no shell), drains its
//! standard output to EOF and only then waits for the exit status. A missing
//! executable or a non-zero exit is reported as
//! [`DiscoveryError::CommandUnavailable`] and no text is returned.
//!
//! # Example
//!
//! ```no_run
//! use docopt_completion_discovery::acquire::HelpInvocation;
//!
//! let usage = HelpInvocation::default().run("naval_fate").unwrap();
//! assert!(usage.contains("Usage:"));
//! ```

use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{DiscoveryError, Result};

/// Help flag passed to the target command.
pub const DEFAULT_HELP_FLAG: &str = "--help";

/// How to ask a command for its usage text.
#[derive(Debug, Clone)]
pub struct HelpInvocation {
    help_flag: String,
    env: Vec<(String, String)>,
}

impl Default for HelpInvocation {
    fn default() -> Self {
        Self {
            help_flag: DEFAULT_HELP_FLAG.to_string(),
            env: default_probe_env()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

impl HelpInvocation {
    /// Replaces the help flag (default `--help`).
    pub fn with_help_flag(mut self, flag: impl Into<String>) -> Self {
        self.help_flag = flag.into();
        self
    }

    /// Adds or overrides one environment variable for the child.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.env.retain(|(existing, _)| *existing != key);
        self.env.push((key, value.into()));
        self
    }

    pub fn help_flag(&self) -> &str {
        &self.help_flag
    }

    /// Arguments that will be executed for `command`.
    pub fn argv(&self, command: &str) -> Vec<String> {
        vec![command.to_string(), self.help_flag.clone()]
    }

    /// Runs the command and returns its standard output.
    pub fn run(&self, command: &str) -> Result<String> {
        if command.trim().is_empty() {
            return Err(unavailable(command, "empty command name"));
        }

        debug!(argv = ?self.argv(command), "Running help command");
        let mut child = Command::new(command)
            .arg(&self.help_flag)
            .envs(self.env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    unavailable(command, "executable not found")
                } else {
                    unavailable(command, &format!("spawn failed: {e}"))
                }
            })?;

        // Read to EOF before waiting so a full pipe buffer cannot block the
        // child forever.
        let mut buf = Vec::new();
        let read_result = match child.stdout.take() {
            Some(mut pipe) => pipe.read_to_end(&mut buf).map(|_| ()),
            None => Ok(()),
        };

        let status = child
            .wait()
            .map_err(|e| unavailable(command, &format!("wait failed: {e}")))?;
        if let Err(e) = read_result {
            return Err(unavailable(command, &format!("stdout read failed: {e}")));
        }
        if !status.success() {
            return Err(unavailable(command, &format!("help exited with {status}")));
        }

        let text = String::from_utf8_lossy(&buf).into_owned();
        debug!(command, length = text.len(), "Got help output");
        Ok(text)
    }
}

/// Runs `<command> --help` with the default probe environment.
pub fn fetch_usage(command: &str) -> Result<String> {
    HelpInvocation::default().run(command)
}

/// Reads pre-captured help text from a file, or from stdin when `path` is `-`.
pub fn read_help_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| DiscoveryError::HelpRead {
                source_name: "stdin".to_string(),
                source,
            })?;
        return Ok(text);
    }

    let bytes = std::fs::read(path).map_err(|source| DiscoveryError::HelpRead {
        source_name: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn unavailable(command: &str, reason: &str) -> DiscoveryError {
    DiscoveryError::CommandUnavailable {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

fn default_probe_env() -> Vec<(&'static str, &'static str)> {
    vec![
        // Keep help output plain: no colour, no pagers.
        ("TERM", "dumb"),
        ("NO_COLOR", "1"),
        ("PAGER", "cat"),
        ("MANPAGER", "cat"),
        ("GIT_PAGER", "cat"),
    ]
}
