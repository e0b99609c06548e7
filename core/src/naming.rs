//! Shell function naming for command tree nodes.

use serde::{Deserialize, Serialize};

/// Separator placed between path segments of a generated function name.
///
/// `Underscore` keeps the whole name inside `[A-Za-z0-9_]`, which every
/// shell accepts. `Dash` reproduces the older `_git-remote-add` style that
/// bash and zsh accept outside POSIX mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Joiner {
    #[default]
    Underscore,
    Dash,
}

impl Joiner {
    pub fn as_char(self) -> char {
        match self {
            Joiner::Underscore => '_',
            Joiner::Dash => '-',
        }
    }
}

/// Strips every character outside `[A-Za-z0-9_]`.
///
/// # Examples
///
/// ```
/// use docopt_completion_core::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("my.tool-v2"), "mytoolv2");
/// assert_eq!(sanitize_identifier("naval_fate"), "naval_fate");
/// ```
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

/// Builds the completion function name for the node at `path` below `root`.
///
/// Each segment is sanitized on its own and the segments are joined with
/// `joiner`, behind a leading underscore.
///
/// # Examples
///
/// ```
/// use docopt_completion_core::{Joiner, function_name};
///
/// assert_eq!(function_name("git", &[], Joiner::Underscore), "_git");
/// assert_eq!(function_name("git", &["remote", "add"], Joiner::Dash), "_git-remote-add");
/// assert_eq!(function_name("my.tool", &["set-url"], Joiner::Underscore), "_mytool_seturl");
/// ```
pub fn function_name(root: &str, path: &[&str], joiner: Joiner) -> String {
    let mut name = String::from("_");
    name.push_str(&sanitize_identifier(root));
    for segment in path {
        name.push(joiner.as_char());
        name.push_str(&sanitize_identifier(segment));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underscore_names_stay_in_identifier_charset() {
        let name = function_name("my.tool-v2", &["re-mote", "add!"], Joiner::Underscore);
        assert_eq!(name, "_mytoolv2_remote_add");
        assert!(
            name.chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        );
    }

    #[test]
    fn test_sanitize_drops_non_ascii() {
        assert_eq!(sanitize_identifier("café"), "caf");
    }
}
