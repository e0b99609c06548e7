//! Renderer contract and shell quoting helpers.

use std::fmt;

use docopt_completion_core::{CommandTree, OptionHelpMap};
use serde::{Deserialize, Serialize};

/// Shell dialect a completion script is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// Conventional completion file name for `root` (`root.sh` or `_root`).
    ///
    /// # Examples
    ///
    /// ```
    /// use docopt_completion_render::Shell;
    ///
    /// assert_eq!(Shell::Bash.file_name("git"), "git.sh");
    /// assert_eq!(Shell::Zsh.file_name("git"), "_git");
    /// ```
    pub fn file_name(self, root: &str) -> String {
        match self {
            Shell::Bash => format!("{root}.sh"),
            Shell::Zsh => format!("_{root}"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a command tree into the text of one completion script.
///
/// Implementations are pure: identical inputs give byte-identical output,
/// and the tree is never modified.
pub trait CompletionRenderer: Send + Sync {
    /// Dialect of the generated script.
    fn shell(&self) -> Shell;

    /// Renders the whole script for `root`.
    fn render(&self, root: &str, tree: &CommandTree, help: &OptionHelpMap) -> String;
}

/// Escapes `text` for use inside a single-quoted shell word.
pub(crate) fn escape_single_quoted(text: &str) -> String {
    text.replace('\'', r"'\''")
}

/// Quotes `word` only when it contains characters the shell would treat
/// specially.
pub(crate) fn shell_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/' | '+' | ':' | '@'));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", escape_single_quoted(word))
    }
}
