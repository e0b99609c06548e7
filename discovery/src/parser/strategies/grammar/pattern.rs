//! Docopt usage pattern parsing.
//!
//! ```text
//! expr ::= seq ( '|' seq )* ;
//! seq  ::= ( atom [ '...' ] )* ;
//! atom ::= '(' expr ')' | '[' expr ']' | 'options'
//!        | long | shorts | argument | command ;
//! ```

use crate::error::GrammarError;
use crate::parser::util::{parse_option_spellings, split_columns};

/// An option as declared in the options block or discovered in the usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub short: Option<String>,
    pub long: Option<String>,
    pub takes_value: bool,
}

impl OptionSpec {
    fn is_same(&self, other: &OptionSpec) -> bool {
        self.short == other.short && self.long == other.long
    }

    /// Tree tokens for this option, short form first.
    pub fn tree_tokens(&self) -> Vec<String> {
        let suffix = if self.takes_value { "=" } else { "" };
        self.short
            .iter()
            .chain(self.long.iter())
            .map(|name| format!("{name}{suffix}"))
            .collect()
    }
}

/// Parsed usage pattern node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    Required(Vec<Pattern>),
    Optional(Vec<Pattern>),
    Either(Vec<Pattern>),
    OneOrMore(Vec<Pattern>),
    /// `[options]`: every described option not mentioned in the usage.
    OptionsShortcut,
    Option(OptionSpec),
    Argument(String),
    Command(String),
}

impl Pattern {
    /// Collects every option spec reachable from this node.
    pub fn collect_options<'p>(&'p self, out: &mut Vec<&'p OptionSpec>) {
        match self {
            Pattern::Required(children)
            | Pattern::Optional(children)
            | Pattern::Either(children)
            | Pattern::OneOrMore(children) => {
                for child in children {
                    child.collect_options(out);
                }
            }
            Pattern::Option(spec) => out.push(spec),
            Pattern::OptionsShortcut | Pattern::Argument(_) | Pattern::Command(_) => {}
        }
    }
}

/// Parses option definitions from an options-description block.
///
/// Only rows starting with `-` define options; the spellings column ends at
/// the first wide gap (or the end of the row when there is no description).
pub fn parse_option_specs(options_block: &str) -> Vec<OptionSpec> {
    let mut specs = Vec::new();
    for line in options_block.lines() {
        let row = line.trim();
        if !row.starts_with('-') {
            continue;
        }
        let column = split_columns(row).map_or(row, |(left, _)| left);
        let spellings = parse_option_spellings(column);

        let mut spec = OptionSpec {
            short: None,
            long: None,
            takes_value: spellings.takes_value,
        };
        for name in spellings.names {
            if name.starts_with("--") {
                spec.long.get_or_insert(name);
            } else {
                spec.short.get_or_insert(name);
            }
        }
        if spec.short.is_some() || spec.long.is_some() {
            specs.push(spec);
        }
    }
    specs
}

/// Splits formal usage text into pattern tokens.
pub fn tokenize(source: &str) -> Vec<String> {
    let spaced = source
        .replace("...", " ... ")
        .replace('(', " ( ")
        .replace(')', " ) ")
        .replace('[', " [ ")
        .replace(']', " ] ")
        .replace('|', " | ");
    spaced.split_whitespace().map(str::to_string).collect()
}

/// Recursive-descent parser over usage tokens.
///
/// Options first seen in the usage are added to `options` so later
/// mentions resolve to the same definition.
pub struct PatternParser<'o> {
    tokens: Vec<String>,
    pos: usize,
    options: &'o mut Vec<OptionSpec>,
}

impl<'o> PatternParser<'o> {
    pub fn new(tokens: Vec<String>, options: &'o mut Vec<OptionSpec>) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
        }
    }

    /// Parses the whole token stream into a top-level `Required` node.
    pub fn parse(mut self) -> Result<Pattern, GrammarError> {
        let result = self.parse_expr()?;
        if let Some(token) = self.current() {
            return Err(match token {
                ")" | "]" => GrammarError::Unbalanced(token.to_string()),
                other => GrammarError::UnexpectedToken(other.to_string()),
            });
        }
        Ok(Pattern::Required(result))
    }

    fn current(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn advance(&mut self) -> Option<String> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> Result<Vec<Pattern>, GrammarError> {
        let seq = self.parse_seq()?;
        if self.current() != Some("|") {
            return Ok(seq);
        }

        let mut alternatives = vec![group_required(seq)];
        while self.current() == Some("|") {
            self.advance();
            let seq = self.parse_seq()?;
            alternatives.push(group_required(seq));
        }
        Ok(vec![Pattern::Either(alternatives)])
    }

    fn parse_seq(&mut self) -> Result<Vec<Pattern>, GrammarError> {
        let mut result = Vec::new();
        while let Some(token) = self.current() {
            if matches!(token, "]" | ")" | "|") {
                break;
            }
            let atom = self.parse_atom()?;
            if self.current() == Some("...") {
                self.advance();
                result.push(Pattern::OneOrMore(atom));
            } else {
                result.extend(atom);
            }
        }
        Ok(result)
    }

    fn parse_atom(&mut self) -> Result<Vec<Pattern>, GrammarError> {
        let Some(token) = self.advance() else {
            return Ok(Vec::new());
        };

        match token.as_str() {
            "(" | "[" => {
                let closing = if token == "(" { ")" } else { "]" };
                let inner = self.parse_expr()?;
                if self.advance().as_deref() != Some(closing) {
                    return Err(GrammarError::Unbalanced(token.clone()));
                }
                Ok(vec![if token == "(" {
                    Pattern::Required(inner)
                } else {
                    Pattern::Optional(inner)
                }])
            }
            "options" => Ok(vec![Pattern::OptionsShortcut]),
            "..." => Err(GrammarError::UnexpectedToken(token.clone())),
            "-" | "--" => Ok(vec![Pattern::Option(OptionSpec {
                short: (token == "-").then(|| token.clone()),
                long: (token == "--").then(|| token.clone()),
                takes_value: false,
            })]),
            _ if token.starts_with("--") => Ok(vec![self.parse_long(&token)]),
            _ if token.starts_with('-') => Ok(self.parse_shorts(&token)),
            _ if is_argument(&token) => Ok(vec![Pattern::Argument(argument_name(&token))]),
            _ => Ok(vec![Pattern::Command(token.clone())]),
        }
    }

    fn parse_long(&mut self, token: &str) -> Pattern {
        let (long, inline_value) = match token.split_once('=') {
            Some((long, _)) => (long.to_string(), true),
            None => (token.to_string(), false),
        };

        let known = self
            .options
            .iter()
            .find(|spec| spec.long.as_deref() == Some(long.as_str()))
            .cloned();
        let spec = match known {
            Some(spec) => spec,
            None => {
                let spec = OptionSpec {
                    short: None,
                    long: Some(long),
                    takes_value: inline_value,
                };
                self.options.push(spec.clone());
                spec
            }
        };

        if spec.takes_value && !inline_value {
            self.skip_value();
        }
        Pattern::Option(spec)
    }

    fn parse_shorts(&mut self, token: &str) -> Vec<Pattern> {
        let mut result = Vec::new();
        let mut rest = &token[1..];

        while let Some(ch) = rest.chars().next() {
            rest = &rest[ch.len_utf8()..];
            let short = format!("-{ch}");

            let known = self
                .options
                .iter()
                .find(|spec| spec.short.as_deref() == Some(short.as_str()))
                .cloned();
            let spec = match known {
                Some(spec) => spec,
                None => {
                    let spec = OptionSpec {
                        short: Some(short),
                        long: None,
                        takes_value: false,
                    };
                    self.options.push(spec.clone());
                    spec
                }
            };

            if spec.takes_value {
                // The value is either the rest of this token or the next one.
                if rest.is_empty() {
                    self.skip_value();
                }
                result.push(Pattern::Option(spec));
                break;
            }
            result.push(Pattern::Option(spec));
        }

        result
    }

    /// Consumes a separate value token such as `<kn>` after `--speed`.
    fn skip_value(&mut self) {
        if self
            .current()
            .is_some_and(|next| !matches!(next, "(" | ")" | "[" | "]" | "|" | "...") && !next.starts_with('-'))
        {
            self.advance();
        }
    }
}

fn group_required(seq: Vec<Pattern>) -> Pattern {
    if seq.len() == 1 {
        seq.into_iter()
            .next()
            .unwrap_or_else(|| Pattern::Required(Vec::new()))
    } else {
        Pattern::Required(seq)
    }
}

fn is_argument(token: &str) -> bool {
    (token.starts_with('<') && token.ends_with('>'))
        || (token.chars().any(|ch| ch.is_alphabetic())
            && token
                .chars()
                .all(|ch| !ch.is_alphabetic() || ch.is_uppercase()))
}

fn argument_name(token: &str) -> String {
    token
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .unwrap_or(token)
        .to_string()
}

/// Described options the usage never mentions, in definition order.
pub fn described_but_unmentioned<'a>(
    described: &'a [OptionSpec],
    mentioned: &[&OptionSpec],
) -> Vec<&'a OptionSpec> {
    described
        .iter()
        .filter(|spec| !mentioned.iter().any(|seen| seen.is_same(spec)))
        .collect()
}
