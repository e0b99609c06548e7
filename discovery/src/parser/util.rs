//! Shared helpers for option-row handling.

use regex::Regex;
use std::sync::LazyLock;

/// Splits a trimmed row at its first run of two or more spaces (or a tab)
/// into the spellings column and the description column.
///
/// Returns `None` when the row has no such gap.
pub fn split_columns(row: &str) -> Option<(&str, &str)> {
    // SAFETY: compile-time constant pattern.
    static GAP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r" {2,}|\t+").expect("static regex must compile"));

    let gap = GAP_RE.find(row)?;
    Some((&row[..gap.start()], &row[gap.end()..]))
}

/// Option spellings declared in one options-description row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpellings {
    /// Spellings without any value suffix, e.g. `["-o", "--output"]`.
    pub names: Vec<String>,
    /// Spellings exactly as written, with `=value` collapsed to `=`.
    pub written: Vec<String>,
    /// Whether any spelling carries a value placeholder.
    pub takes_value: bool,
}

impl OptionSpellings {
    /// Spellings as they appear in the command tree: with a trailing `=`
    /// when the option consumes a value.
    pub fn tree_tokens(&self) -> Vec<String> {
        let suffix = if self.takes_value { "=" } else { "" };
        self.names
            .iter()
            .map(|name| format!("{name}{suffix}"))
            .collect()
    }
}

/// Parses the spellings column of an option row such as
/// `-o FILE, --output=FILE` or `-h --help`.
///
/// Commas and whitespace separate spellings; a token that does not start
/// with `-` is a value placeholder and marks the whole row as taking a
/// value, as does an attached `=value`.
pub fn parse_option_spellings(column: &str) -> OptionSpellings {
    let mut names = Vec::new();
    let mut written = Vec::new();
    let mut takes_value = false;

    for token in column
        .split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        if !token.starts_with('-') {
            takes_value = true;
            continue;
        }
        match token.split_once('=') {
            Some((name, _)) => {
                takes_value = true;
                names.push(name.to_string());
                written.push(format!("{name}="));
            }
            None => {
                names.push(token.to_string());
                written.push(token.to_string());
            }
        }
    }

    OptionSpellings {
        names,
        written,
        takes_value,
    }
}
