//! Line-based usage strategy.
//!
//! Every usage line is reduced to a flat token stream: grouping and
//! alternation characters are dropped, `<placeholder>` arguments are
//! removed and `--opt=value` collapses to `--opt=`. Walking the tokens left
//! to right, option tokens attach to the current node and every other word
//! descends into (or creates) a subcommand.

use docopt_completion_core::CommandTree;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::TreeStrategy;
use crate::error::GrammarError;
use crate::parser::UsageDocument;

pub struct LineStrategy;

// SAFETY: compile-time constant patterns.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex must compile"));
static VALUE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\S+").expect("static regex must compile"));

impl TreeStrategy for LineStrategy {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn build_tree(&self, document: &UsageDocument<'_>) -> Result<CommandTree, GrammarError> {
        let mut root = CommandTree::new();
        let mut program: Option<String> = None;

        for line in document.usage.lines() {
            let cleaned = clean_usage_line(line);
            let mut tokens = cleaned.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            match program.as_deref() {
                None => program = Some(first.to_string()),
                Some(name) if name != first => {
                    debug!(line = line.trim(), "Skipping non-usage line");
                    continue;
                }
                Some(_) => {}
            }

            let mut current = &mut root;
            for token in tokens {
                if token.starts_with('-') {
                    current.push_option(token);
                } else {
                    current = current.subcommand_entry(token);
                }
            }
        }

        Ok(root)
    }
}

/// Normalizes one usage line into whitespace-separated tokens.
///
/// # Examples
///
/// ```
/// use docopt_completion_discovery::parser::strategies::lines::clean_usage_line;
///
/// let cleaned = clean_usage_line("  prog ship <name> move <x> <y> [--speed=<kn>]  ");
/// assert_eq!(cleaned.split_whitespace().collect::<Vec<_>>(), vec!["prog", "ship", "move", "--speed="]);
/// ```
pub fn clean_usage_line(line: &str) -> String {
    let stripped: String = line
        .trim()
        .replace("[options]", " ")
        .replace("...", " ")
        .chars()
        .map(|ch| match ch {
            '(' | ')' | '[' | ']' | '|' => ' ',
            other => other,
        })
        .collect();
    let without_placeholders = PLACEHOLDER_RE.replace_all(&stripped, " ");
    VALUE_SUFFIX_RE
        .replace_all(&without_placeholders, "= ")
        .into_owned()
}
