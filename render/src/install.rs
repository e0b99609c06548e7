//! Rendering for a set of targets and writing the files.
//!
//! Each shell's script is rendered once and shared by every target of that
//! shell. Files are written in parallel; every path gets its own
//! [`WriteOutcome`] and a failure on one path never stops the others.

use std::fmt;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use docopt_completion_core::{CommandTree, OptionHelpMap};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::bash::BashRenderer;
use crate::shell::{CompletionRenderer, Shell};
use crate::targets::{InstallTarget, TargetKind};
use crate::zsh::ZshRenderer;

/// One renderer per shell.
#[derive(Debug, Clone, Default)]
pub struct Renderers {
    pub bash: BashRenderer,
    pub zsh: ZshRenderer,
}

impl Renderers {
    pub fn for_shell(&self, shell: Shell) -> &dyn CompletionRenderer {
        match shell {
            Shell::Bash => &self.bash,
            Shell::Zsh => &self.zsh,
        }
    }
}

/// Script text for one shell and the targets that receive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedScript {
    pub shell: Shell,
    pub content: String,
    pub targets: Vec<InstallTarget>,
}

/// Result of writing one completion file.
#[derive(Debug)]
pub enum WriteOutcome {
    Written {
        target: TargetKind,
        path: PathBuf,
    },
    /// The destination directory does not accept writes.
    Skipped {
        target: TargetKind,
        path: PathBuf,
        reason: io::Error,
    },
    /// Any other I/O failure.
    Failed {
        target: TargetKind,
        path: PathBuf,
        reason: io::Error,
    },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path, .. }
            | WriteOutcome::Skipped { path, .. }
            | WriteOutcome::Failed { path, .. } => path,
        }
    }

    pub fn target(&self) -> TargetKind {
        match self {
            WriteOutcome::Written { target, .. }
            | WriteOutcome::Skipped { target, .. }
            | WriteOutcome::Failed { target, .. } => *target,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Written { path, .. } => {
                write!(f, "Completion file written to {}", path.display())
            }
            WriteOutcome::Skipped {
                target,
                path,
                reason,
            } => write!(
                f,
                "Skipped {} ({target}): directory is not writable: {reason}",
                path.display()
            ),
            WriteOutcome::Failed {
                target,
                path,
                reason,
            } => write!(f, "Failed to write {} ({target}): {reason}", path.display()),
        }
    }
}

/// Renders one script per shell present in `targets`, in order of first
/// appearance.
pub fn render_scripts(
    renderers: &Renderers,
    root: &str,
    tree: &CommandTree,
    help: &OptionHelpMap,
    targets: &[InstallTarget],
) -> Vec<RenderedScript> {
    let mut scripts: Vec<RenderedScript> = Vec::new();
    for target in targets {
        let shell = target.shell();
        match scripts.iter_mut().find(|script| script.shell == shell) {
            Some(script) => script.targets.push(target.clone()),
            None => scripts.push(RenderedScript {
                shell,
                content: renderers.for_shell(shell).render(root, tree, help),
                targets: vec![target.clone()],
            }),
        }
    }
    scripts
}

/// Writes every script to every one of its targets.
///
/// Outcomes are grouped by script, following the order of `scripts` and of
/// each script's targets.
pub fn write_scripts(root: &str, scripts: &[RenderedScript]) -> Vec<WriteOutcome> {
    let jobs: Vec<(&InstallTarget, &str)> = scripts
        .iter()
        .flat_map(|script| {
            script
                .targets
                .iter()
                .map(move |target| (target, script.content.as_str()))
        })
        .collect();

    jobs.par_iter()
        .map(|(target, content)| write_one(root, target, content))
        .collect()
}

/// Renders and writes in one step.
///
/// Outcomes come back in the order of `targets`.
pub fn install(
    renderers: &Renderers,
    root: &str,
    tree: &CommandTree,
    help: &OptionHelpMap,
    targets: &[InstallTarget],
) -> Vec<WriteOutcome> {
    let scripts = render_scripts(renderers, root, tree, help, targets);
    let mut outcomes = write_scripts(root, &scripts);
    outcomes.sort_by_cached_key(|outcome| {
        targets
            .iter()
            .position(|target| {
                target.kind == outcome.target() && target.file_path(root) == outcome.path()
            })
            .unwrap_or(targets.len())
    });
    outcomes
}

fn write_one(root: &str, target: &InstallTarget, content: &str) -> WriteOutcome {
    let path = target.file_path(root);
    match write_file(target, &path, content) {
        Ok(()) => {
            info!(framework = %target.kind, path = %path.display(), "Wrote completion file");
            WriteOutcome::Written {
                target: target.kind,
                path,
            }
        }
        Err(reason) if is_not_writable(&reason) => {
            warn!(framework = %target.kind, path = %path.display(), error = %reason, "Skipping unwritable completion path");
            WriteOutcome::Skipped {
                target: target.kind,
                path,
                reason,
            }
        }
        Err(reason) => {
            warn!(framework = %target.kind, path = %path.display(), error = %reason, "Failed to write completion file");
            WriteOutcome::Failed {
                target: target.kind,
                path,
                reason,
            }
        }
    }
}

fn write_file(target: &InstallTarget, path: &Path, content: &str) -> io::Result<()> {
    if target.create_dir {
        fs::create_dir_all(&target.dir)?;
    }
    fs::write(path, content)
}

fn is_not_writable(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem
    )
}
