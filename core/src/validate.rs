//! Command tree validation.
//!
//! Catches structural problems that would produce a broken or misleading
//! completion script: duplicate subcommand keys, option tokens that do not
//! look like options, and distinct command paths whose sanitized function
//! names collide (the second definition would silently replace the first).
//!
//! # Examples
//!
//! ```
//! use docopt_completion_core::*;
//!
//! let mut tree = CommandTree::new();
//! tree.push_option("-v");
//! tree.subcommand_entry("set-url");
//! assert!(validate_tree("git", &tree, &[Joiner::Underscore]).is_empty());
//!
//! // "seturl" sanitizes to the same function name as "set-url"
//! tree.subcommand_entry("seturl");
//! let errors = validate_tree("git", &tree, &[Joiner::Underscore]);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::FunctionNameCollision { .. })));
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{CommandTree, Joiner, function_name, sanitize_identifier};

/// Command tree validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Root command name has no characters usable in a function name.
    #[error("command name cannot be used as a function name: {0:?}")]
    UnusableCommandName(String),
    /// Two children of the same node share a keyword.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A subcommand keyword is empty.
    #[error("empty subcommand name under: {0}")]
    EmptySubcommand(String),
    /// An option token does not start with `-`.
    #[error("invalid option {option:?} at: {path}")]
    InvalidOption { path: String, option: String },
    /// Two command paths map to the same generated function.
    #[error("{first} and {second} both generate function {function}")]
    FunctionNameCollision {
        function: String,
        first: String,
        second: String,
    },
}

/// Validates a command tree rooted at `root`.
///
/// Function names are checked under each of `joiners`, one per renderer
/// naming scheme. All problems are collected; an empty result means the
/// tree renders without ambiguity.
pub fn validate_tree(root: &str, tree: &CommandTree, joiners: &[Joiner]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if sanitize_identifier(root).is_empty() {
        errors.push(ValidationError::UnusableCommandName(root.to_string()));
        return errors;
    }

    let mut functions: HashMap<String, String> = HashMap::new();
    for node in tree.walk() {
        let display = std::iter::once(root)
            .chain(node.path.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        let mut seen: HashSet<&str> = HashSet::new();
        for name in node.tree.subcommand_names() {
            if name.trim().is_empty() {
                errors.push(ValidationError::EmptySubcommand(display.clone()));
            } else if !seen.insert(name) {
                errors.push(ValidationError::DuplicateSubcommand(format!("{display} {name}")));
            }
        }

        for option in &node.tree.options {
            if !option.starts_with('-') {
                errors.push(ValidationError::InvalidOption {
                    path: display.clone(),
                    option: option.clone(),
                });
            }
        }

        let mut own: Vec<String> = Vec::new();
        for joiner in joiners {
            let function = function_name(root, &node.path, *joiner);
            if own.contains(&function) {
                continue;
            }
            own.push(function.clone());
            if let Some(first) = functions.get(&function) {
                errors.push(ValidationError::FunctionNameCollision {
                    function,
                    first: first.clone(),
                    second: display.clone(),
                });
            } else {
                functions.insert(function, display.clone());
            }
        }
    }

    errors
}
