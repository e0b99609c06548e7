//! Usage-text parser.
//!
//! Converts docopt-style help text into a [`CommandTree`] plus an
//! [`OptionHelpMap`]. The text is split into a usage block and an
//! options-description block ([`UsageDocument`]); the help map always comes
//! from the options block, while the tree comes from one of two strategies:
//!
//! - **grammar** — docopt pattern parsing with a structural walk; records
//!   positional arguments and knows which options take values.
//! - **lines** — flattens each usage line into a token stream; tolerant of
//!   anything, but drops positional arguments entirely.
//!
//! [`ParseMode::Auto`] prefers the grammar strategy and falls back to the
//! line strategy when the usage grammar is malformed.
//!
//! # Example
//!
//! ```
//! use docopt_completion_discovery::parser::{ParseMode, parse_usage};
//!
//! let parsed = parse_usage("Usage:\n  git remote add <name> <url>\n  git remote -v\n");
//! assert_eq!(parsed.mode, ParseMode::Grammar);
//! let add = parsed.tree.find_path(&["remote", "add"]).unwrap();
//! assert_eq!(add.arguments, vec!["name", "url"]);
//! ```

mod help;
mod sections;
pub mod strategies;
mod util;

use docopt_completion_core::{CommandTree, OptionHelpMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GrammarError;
use strategies::TreeStrategy;
use strategies::grammar::GrammarStrategy;
use strategies::lines::LineStrategy;

pub use help::{parse_option_help, sanitize_help};
pub use sections::{OPTIONS_HEADER, USAGE_HEADER, UsageDocument};
pub use util::{OptionSpellings, parse_option_spellings, split_columns};

/// Which strategy builds the command tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Grammar strategy, falling back to lines on a grammar error.
    #[default]
    Auto,
    /// Grammar strategy only.
    Grammar,
    /// Line strategy only.
    Lines,
}

/// Result of parsing one help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUsage {
    pub tree: CommandTree,
    pub help: OptionHelpMap,
    /// Strategy that produced `tree` (never [`ParseMode::Auto`]).
    pub mode: ParseMode,
}

/// Parses help text in [`ParseMode::Auto`].
pub fn parse_usage(text: &str) -> ParsedUsage {
    let document = UsageDocument::split(text);
    let (tree, mode) = match GrammarStrategy.build_tree(&document) {
        Ok(tree) => (tree, ParseMode::Grammar),
        Err(err) => {
            warn!(
                strategy = GrammarStrategy.name(),
                fallback = LineStrategy.name(),
                error = %err,
                "Usage grammar not understood, falling back to line parsing"
            );
            (build_lines(&document), ParseMode::Lines)
        }
    };
    finish(&document, tree, mode)
}

/// Parses help text with an explicit mode.
///
/// Only [`ParseMode::Grammar`] can fail; the other modes always produce a
/// (possibly empty) tree.
pub fn parse_usage_with_mode(text: &str, mode: ParseMode) -> Result<ParsedUsage, GrammarError> {
    match mode {
        ParseMode::Auto => Ok(parse_usage(text)),
        ParseMode::Grammar => {
            let document = UsageDocument::split(text);
            let tree = GrammarStrategy.build_tree(&document)?;
            Ok(finish(&document, tree, ParseMode::Grammar))
        }
        ParseMode::Lines => {
            let document = UsageDocument::split(text);
            let tree = build_lines(&document);
            Ok(finish(&document, tree, ParseMode::Lines))
        }
    }
}

fn build_lines(document: &UsageDocument<'_>) -> CommandTree {
    // The line strategy has no failure path.
    LineStrategy
        .build_tree(document)
        .unwrap_or_default()
}

fn finish(document: &UsageDocument<'_>, tree: CommandTree, mode: ParseMode) -> ParsedUsage {
    let help = parse_option_help(document.options);
    debug!(
        ?mode,
        subcommands = tree.walk().count() - 1,
        help_entries = help.len(),
        "Parsed usage text"
    );
    ParsedUsage { tree, help, mode }
}
