//! Grammar-aware usage strategy.
//!
//! The usage section is read with docopt rules: it starts after `usage:`
//! (any case) and ends at the first blank line or the `Options:` header,
//! whichever comes first; its first word is the
//! program name and each repetition of that name starts a new alternative.
//! The resulting pattern is walked structurally, so options land on the
//! node where they appear and `<arg>` / `ARG` words become positional
//! arguments.

pub mod pattern;
pub mod walk;

use docopt_completion_core::CommandTree;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use self::pattern::{
    PatternParser, described_but_unmentioned, parse_option_specs, tokenize,
};
use self::walk::build_command_tree;
use super::TreeStrategy;
use crate::error::GrammarError;
use crate::parser::{OPTIONS_HEADER, UsageDocument};

pub struct GrammarStrategy;

impl TreeStrategy for GrammarStrategy {
    fn name(&self) -> &'static str {
        "grammar"
    }

    fn build_tree(&self, document: &UsageDocument<'_>) -> Result<CommandTree, GrammarError> {
        let tokens = formal_usage(printable_usage(document.text)?)?;
        let described = parse_option_specs(document.options);

        let mut options = described.clone();
        let pattern = PatternParser::new(tokens, &mut options).parse()?;
        debug!(?pattern, "Parsed usage pattern");

        let mut mentioned = Vec::new();
        pattern.collect_options(&mut mentioned);
        let shortcut: Vec<_> = described_but_unmentioned(&described, &mentioned)
            .into_iter()
            .cloned()
            .collect();

        let mut root = CommandTree::new();
        build_command_tree(&pattern, &mut root, &shortcut);
        Ok(root)
    }
}

/// Returns the usage section body: after `usage:` up to the first blank
/// line or the options header.
pub fn printable_usage(text: &str) -> Result<&str, GrammarError> {
    // SAFETY: compile-time constant patterns.
    static HEADER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)usage:").expect("static regex must compile"));
    static BLANK_LINE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("static regex must compile"));

    let header = HEADER_RE.find(text).ok_or(GrammarError::MissingUsage)?;
    let body = &text[header.end()..];
    let blank = BLANK_LINE_RE.find(body).map_or(body.len(), |m| m.start());
    let options = body.find(OPTIONS_HEADER).unwrap_or(body.len());
    Ok(&body[..blank.min(options)])
}

/// Rewrites the usage section as one expression with an alternative per
/// program-name occurrence, then tokenizes it.
///
/// # Examples
///
/// ```
/// use docopt_completion_discovery::parser::strategies::grammar::formal_usage;
///
/// let tokens = formal_usage("\n  prog go\n  prog stop [-f]").unwrap();
/// assert_eq!(
///     tokens,
///     vec!["(", "go", ")", "|", "(", "stop", "[", "-f", "]", ")"]
/// );
/// ```
pub fn formal_usage(section: &str) -> Result<Vec<String>, GrammarError> {
    let mut words = section.split_whitespace();
    let program = words.next().ok_or(GrammarError::EmptyUsage)?;

    let mut source = String::from("( ");
    for word in words {
        if word == program {
            source.push_str(") | ( ");
        } else {
            source.push_str(word);
            source.push(' ');
        }
    }
    source.push(')');
    Ok(tokenize(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAVAL_FATE: &str = "Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate ship shoot <x> <y>
  naval_fate mine (set|remove) <x> <y> [--moored|--drifting]
  naval_fate -h | --help
  naval_fate --version

Options:
  -h --help     Show this screen.
  --version     Show version.
  --speed=<kn>  Speed in knots [default: 10].
  --moored      Moored (anchored) mine.
  --drifting    Drifting mine.
";

    fn build(text: &str) -> Result<CommandTree, GrammarError> {
        GrammarStrategy.build_tree(&UsageDocument::split(text))
    }

    #[test]
    fn test_printable_usage_stops_at_blank_line() {
        let section = printable_usage("Prog.\n\nusage: prog a\n       prog b\n\nmore text").unwrap();
        assert_eq!(section, " prog a\n       prog b");
    }

    #[test]
    fn test_printable_usage_stops_at_options_header() {
        let section =
            printable_usage("Usage: prog run\nOptions:\n  -v, --verbose  be verbose\n").unwrap();
        assert_eq!(section, " prog run\n");
    }

    #[test]
    fn test_options_table_without_blank_line_stays_out_of_tree() {
        let tree = build("Usage: prog run\nOptions:\n  -v, --verbose  be verbose\n").unwrap();
        assert_eq!(tree.subcommand_names(), vec!["run"]);
        let run = tree.find_subcommand("run").unwrap();
        assert!(run.subcommands.is_empty());
        assert!(run.options.is_empty());
        assert!(tree.find_path(&["run", "Options:"]).is_none());
    }

    #[test]
    fn test_printable_usage_requires_header() {
        assert_eq!(printable_usage("no header"), Err(GrammarError::MissingUsage));
    }

    #[test]
    fn test_formal_usage_requires_program() {
        assert_eq!(formal_usage("  \n "), Err(GrammarError::EmptyUsage));
    }

    #[test]
    fn test_naval_fate_tree() {
        let tree = build(NAVAL_FATE).expect("naval fate parses");

        assert_eq!(tree.subcommand_names(), vec!["ship", "mine"]);
        assert_eq!(tree.options, vec!["-h", "--help", "--version"]);

        let ship = tree.find_subcommand("ship").unwrap();
        assert_eq!(ship.subcommand_names(), vec!["new", "move", "shoot"]);
        assert_eq!(ship.arguments, vec!["name"]);

        let new = ship.find_subcommand("new").unwrap();
        assert_eq!(new.arguments, vec!["name"]);

        let ship_move = ship.find_subcommand("move").unwrap();
        assert_eq!(ship_move.arguments, vec!["x", "y"]);
        assert_eq!(ship_move.options, vec!["--speed="]);

        let mine = tree.find_subcommand("mine").unwrap();
        assert_eq!(mine.subcommand_names(), vec!["set", "remove"]);
        assert_eq!(mine.arguments, vec!["x", "y"]);
        assert_eq!(mine.options, vec!["--moored", "--drifting"]);
    }

    #[test]
    fn test_options_shortcut_adds_unmentioned_described_options() {
        let text = "Usage: prog [options] run\n\nOptions:\n  -v --verbose  Talk more.\n  -q  Quiet.\n";
        let tree = build(text).unwrap();
        assert_eq!(tree.options, vec!["-v", "--verbose", "-q"]);
        assert!(tree.find_subcommand("run").unwrap().options.is_empty());
    }

    #[test]
    fn test_unbalanced_usage_is_an_error() {
        assert_eq!(
            build("Usage: prog (run\n"),
            Err(GrammarError::Unbalanced("(".to_string()))
        );
    }
}
