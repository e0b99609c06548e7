//! Installation target discovery.
//!
//! A fixed registry of completion frameworks is probed in order and every
//! framework whose directory exists becomes a target; there is no
//! first-match-wins. Manual targets bypass probing entirely.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::InstallError;
use crate::shell::Shell;

/// Default glob for versioned system zsh function directories.
pub const DEFAULT_ZSH_SYSTEM_GLOB: &str = "/usr/share/zsh/*/functions";

/// Default bash-completion drop-in directory.
pub const DEFAULT_BASH_COMPLETION_DIR: &str = "/etc/bash_completion.d";

/// Completion frameworks, in probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    OhMyZsh,
    Prezto,
    ZshSystem,
    Bash,
    /// A directory named explicitly by the caller.
    Manual(Shell),
}

impl TargetKind {
    /// Frameworks probed by [`detect_targets`], in order.
    pub const REGISTRY: [TargetKind; 4] = [
        TargetKind::OhMyZsh,
        TargetKind::Prezto,
        TargetKind::ZshSystem,
        TargetKind::Bash,
    ];

    pub fn shell(self) -> Shell {
        match self {
            TargetKind::OhMyZsh | TargetKind::Prezto | TargetKind::ZshSystem => Shell::Zsh,
            TargetKind::Bash => Shell::Bash,
            TargetKind::Manual(shell) => shell,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetKind::OhMyZsh => "oh-my-zsh",
            TargetKind::Prezto => "prezto",
            TargetKind::ZshSystem => "zsh-system",
            TargetKind::Bash => "bash",
            TargetKind::Manual(Shell::Zsh) => "manual-zsh",
            TargetKind::Manual(Shell::Bash) => "manual-bash",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where framework directories are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    /// Home directory for dotfile frameworks; `None` skips them.
    pub home: Option<PathBuf>,
    pub zsh_system_glob: String,
    pub bash_completion_dir: PathBuf,
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self {
            home: dirs::home_dir(),
            zsh_system_glob: DEFAULT_ZSH_SYSTEM_GLOB.to_string(),
            bash_completion_dir: PathBuf::from(DEFAULT_BASH_COMPLETION_DIR),
        }
    }
}

/// A directory that receives one completion file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub kind: TargetKind,
    pub dir: PathBuf,
    /// Create `dir` before writing when it is missing.
    pub create_dir: bool,
}

impl InstallTarget {
    pub fn shell(&self) -> Shell {
        self.kind.shell()
    }

    /// Full path of the completion file for `root`.
    pub fn file_path(&self, root: &str) -> PathBuf {
        self.dir.join(self.shell().file_name(root))
    }

    /// Target for an explicit output directory.
    pub fn manual(shell: Shell, dir: impl Into<PathBuf>) -> Self {
        Self {
            kind: TargetKind::Manual(shell),
            dir: dir.into(),
            create_dir: false,
        }
    }
}

/// Probes one framework.
pub fn probe(kind: TargetKind, env: &TargetEnv) -> Option<InstallTarget> {
    let target = match kind {
        TargetKind::OhMyZsh => {
            let base = env.home.as_ref()?.join(".oh-my-zsh");
            base.is_dir().then(|| InstallTarget {
                kind,
                dir: base.join("completions"),
                create_dir: true,
            })
        }
        TargetKind::Prezto => {
            let base = env.home.as_ref()?.join(".zprezto");
            base.is_dir().then(|| InstallTarget {
                kind,
                dir: base.join("modules/completion/external/src"),
                create_dir: false,
            })
        }
        TargetKind::ZshSystem => zsh_system_dir(&env.zsh_system_glob).map(|dir| InstallTarget {
            kind,
            dir,
            create_dir: false,
        }),
        TargetKind::Bash => env.bash_completion_dir.is_dir().then(|| InstallTarget {
            kind,
            dir: env.bash_completion_dir.clone(),
            create_dir: false,
        }),
        TargetKind::Manual(_) => None,
    };
    debug!(framework = %kind, found = target.is_some(), "Probed completion framework");
    target
}

/// Probes every registered framework and returns those present.
///
/// Fails with [`InstallError::NoCompletionPathFound`] when none are.
pub fn detect_targets(env: &TargetEnv) -> Result<Vec<InstallTarget>, InstallError> {
    let targets: Vec<InstallTarget> = TargetKind::REGISTRY
        .iter()
        .filter_map(|kind| probe(*kind, env))
        .collect();
    if targets.is_empty() {
        return Err(InstallError::NoCompletionPathFound {
            guidance: guidance(env),
        });
    }
    Ok(targets)
}

/// First directory matching `pattern`, narrowed to its `Completion`
/// subdirectory when one exists.
fn zsh_system_dir(pattern: &str) -> Option<PathBuf> {
    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(pattern, error = %err, "Invalid zsh system glob");
            return None;
        }
    };
    let dir = entries.filter_map(Result::ok).find(|path| path.is_dir())?;
    let completion = dir.join("Completion");
    Some(if completion.is_dir() { completion } else { dir })
}

fn guidance(env: &TargetEnv) -> String {
    let home = |rel: &str| match &env.home {
        Some(home) => home.join(rel).display().to_string(),
        None => format!("~/{rel}"),
    };
    [
        format!("oh-my-zsh ({})", home(".oh-my-zsh")),
        format!("prezto ({})", home(".zprezto")),
        format!("zsh ({})", env.zsh_system_glob),
        format!("bash-completion ({})", env.bash_completion_dir.display()),
    ]
    .join(", ")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn empty_env(root: &Path) -> TargetEnv {
        TargetEnv {
            home: Some(root.join("home")),
            zsh_system_glob: root.join("zsh/*/functions").display().to_string(),
            bash_completion_dir: root.join("bash_completion.d"),
        }
    }

    #[test]
    fn test_no_frameworks_is_an_error_with_guidance() {
        let tmp = tempfile::tempdir().unwrap();
        let env = empty_env(tmp.path());
        let err = detect_targets(&env).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("No completion paths found"));
        assert!(message.contains(".oh-my-zsh"));
        assert!(message.contains(".zprezto"));
        assert!(message.contains("bash_completion.d"));
    }

    #[test]
    fn test_every_present_framework_is_targeted_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let env = empty_env(tmp.path());
        let home = env.home.clone().unwrap();
        fs::create_dir_all(home.join(".oh-my-zsh")).unwrap();
        fs::create_dir_all(home.join(".zprezto")).unwrap();
        fs::create_dir_all(tmp.path().join("zsh/5.9/functions")).unwrap();
        fs::create_dir_all(&env.bash_completion_dir).unwrap();

        let targets = detect_targets(&env).unwrap();
        let kinds: Vec<TargetKind> = targets.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, TargetKind::REGISTRY.to_vec());

        assert_eq!(targets[0].file_path("git"), home.join(".oh-my-zsh/completions/_git"));
        assert!(targets[0].create_dir);
        assert_eq!(
            targets[1].file_path("git"),
            home.join(".zprezto/modules/completion/external/src/_git")
        );
        assert_eq!(targets[2].dir, tmp.path().join("zsh/5.9/functions"));
        assert_eq!(targets[3].file_path("git"), env.bash_completion_dir.join("git.sh"));
    }

    #[test]
    fn test_zsh_system_prefers_completion_subdirectory() {
        let tmp = tempfile::tempdir().unwrap();
        let env = empty_env(tmp.path());
        let completion = tmp.path().join("zsh/5.9/functions/Completion");
        fs::create_dir_all(&completion).unwrap();

        let target = probe(TargetKind::ZshSystem, &env).unwrap();
        assert_eq!(target.dir, completion);
        assert_eq!(target.shell(), Shell::Zsh);
    }

    #[test]
    fn test_missing_home_skips_dotfile_frameworks() {
        let tmp = tempfile::tempdir().unwrap();
        let mut env = empty_env(tmp.path());
        env.home = None;
        assert!(probe(TargetKind::OhMyZsh, &env).is_none());
        assert!(probe(TargetKind::Prezto, &env).is_none());
    }

    #[test]
    fn test_manual_target() {
        let target = InstallTarget::manual(Shell::Bash, "/tmp/out");
        assert_eq!(target.kind.name(), "manual-bash");
        assert_eq!(target.file_path("deploy"), PathBuf::from("/tmp/out/deploy.sh"));
        assert!(probe(target.kind, &TargetEnv::default()).is_none());
    }
}
