//! Options-description parsing into an [`OptionHelpMap`].
//!
//! Each non-blank row of the options block is split at its first wide gap.
//! Rows whose left column starts with `-` declare option spellings; every
//! spelling maps to the same description. Any other left column (e.g.
//! `remote add`) is kept as a literal key for subcommand help lookup.

use docopt_completion_core::OptionHelpMap;
use tracing::debug;

use super::util::{parse_option_spellings, split_columns};

/// Builds the help lookup from an options-description block.
///
/// # Examples
///
/// ```
/// use docopt_completion_discovery::parser::parse_option_help;
///
/// let help = parse_option_help("\n  -v, --verbose  be verbose\n  --speed=<kn>  Speed [default: 10].\n");
/// assert_eq!(help.get("-v"), Some("be verbose"));
/// assert_eq!(help.get("--verbose"), Some("be verbose"));
/// assert_eq!(help.get("--speed="), Some("Speed \\[default: 10\\]."));
/// ```
pub fn parse_option_help(options_block: &str) -> OptionHelpMap {
    let mut help = OptionHelpMap::new();

    for line in options_block.lines() {
        let row = line.trim();
        if row.is_empty() {
            continue;
        }
        let Some((left, description)) = split_columns(row) else {
            continue;
        };
        let description = sanitize_help(description);

        if !left.starts_with('-') {
            help.insert(left, description);
            continue;
        }

        let spellings = parse_option_spellings(left);
        let mut keys = spellings.tree_tokens();
        for written in spellings.written {
            if !keys.contains(&written) {
                keys.push(written);
            }
        }
        debug!(keys = ?keys, "Option help row");
        for key in keys {
            help.insert(key, description.clone());
        }
    }

    help
}

/// Escapes help text for embedding inside a single-quoted shell word and
/// inside a zsh `[...]` description.
///
/// # Examples
///
/// ```
/// use docopt_completion_discovery::parser::sanitize_help;
///
/// assert_eq!(sanitize_help("  don't [x] "), "don'\\''t \\[x\\]");
/// ```
pub fn sanitize_help(text: &str) -> String {
    text.replace('\'', "'\\''")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .trim()
        .to_string()
}
