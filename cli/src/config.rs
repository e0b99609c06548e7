//! Generator configuration.
//!
//! Every field has a default, so an empty file (or no file at all) is valid.
//!
//! # Example YAML
//!
//! ```yaml
//! help_flag: --help
//! parse_mode: auto
//! bash:
//!   flavor: word-list
//!   joiner: dash
//!   default_fallback: false
//! home: /home/alice
//! zsh_system_glob: /usr/local/share/zsh/*/functions
//! bash_completion_dir: /usr/local/etc/bash_completion.d
//! ```

use std::path::{Path, PathBuf};

use docopt_completion_discovery::acquire::{DEFAULT_HELP_FLAG, HelpInvocation};
use docopt_completion_discovery::parser::ParseMode;
use docopt_completion_render::targets::{DEFAULT_BASH_COMPLETION_DIR, DEFAULT_ZSH_SYSTEM_GLOB};
use docopt_completion_render::{BashOptions, TargetEnv};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Flag passed to the target command to print its usage.
    pub help_flag: String,
    pub parse_mode: ParseMode,
    pub bash: BashOptions,
    /// Home directory for oh-my-zsh and prezto; defaults to the user's home.
    pub home: Option<PathBuf>,
    pub zsh_system_glob: String,
    pub bash_completion_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            help_flag: DEFAULT_HELP_FLAG.to_string(),
            parse_mode: ParseMode::Auto,
            bash: BashOptions::default(),
            home: None,
            zsh_system_glob: DEFAULT_ZSH_SYSTEM_GLOB.to_string(),
            bash_completion_dir: PathBuf::from(DEFAULT_BASH_COMPLETION_DIR),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("Failed to read config '{}': {err}", path.display()))?;
        Self::from_yaml(&raw)
            .map_err(|err| format!("Invalid config '{}': {err}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn help_invocation(&self) -> HelpInvocation {
        HelpInvocation::default().with_help_flag(self.help_flag.clone())
    }

    pub fn target_env(&self) -> TargetEnv {
        let mut env = TargetEnv {
            zsh_system_glob: self.zsh_system_glob.clone(),
            bash_completion_dir: self.bash_completion_dir.clone(),
            ..TargetEnv::default()
        };
        if let Some(home) = &self.home {
            env.home = Some(home.clone());
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use docopt_completion_core::Joiner;
    use docopt_completion_render::BashFlavor;

    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(GeneratorConfig::from_yaml("").unwrap(), GeneratorConfig::default());
        assert_eq!(GeneratorConfig::from_yaml("\n  \n").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = GeneratorConfig::from_yaml("bash:\n  flavor: word-list\n").unwrap();
        assert_eq!(config.bash.flavor, BashFlavor::WordList);
        assert_eq!(config.bash.joiner, Joiner::Underscore);
        assert!(config.bash.default_fallback);
        assert_eq!(config.help_flag, "--help");
        assert_eq!(config.parse_mode, ParseMode::Auto);
    }

    #[test]
    fn test_complete_file() {
        let yaml = "\
help_flag: -h
parse_mode: lines
bash:
  flavor: word-list
  joiner: dash
  default_fallback: false
home: /home/alice
zsh_system_glob: /opt/zsh/*/functions
bash_completion_dir: /opt/bash_completion.d
";
        let config = GeneratorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.help_flag, "-h");
        assert_eq!(config.parse_mode, ParseMode::Lines);
        assert_eq!(config.bash.joiner, Joiner::Dash);
        assert!(!config.bash.default_fallback);

        let env = config.target_env();
        assert_eq!(env.home, Some(PathBuf::from("/home/alice")));
        assert_eq!(env.zsh_system_glob, "/opt/zsh/*/functions");
        assert_eq!(env.bash_completion_dir, PathBuf::from("/opt/bash_completion.d"));
        assert_eq!(config.help_invocation().help_flag(), "-h");
    }

    #[test]
    fn test_unknown_parse_mode_is_rejected() {
        assert!(GeneratorConfig::from_yaml("parse_mode: fuzzy\n").is_err());
    }
}
