//! Command tree model for shell completion generation.
//!
//! This crate defines the data shared between the usage-text parser and the
//! completion renderers:
//!
//! - [`CommandTree`] — one node of the command grammar: the options and
//!   positional arguments valid at that point, plus nested subcommands.
//! - [`OptionHelpMap`] — option spellings (and subcommand paths) mapped to
//!   their already shell-escaped help text.
//! - [`function_name`] — the sanitized shell function name for a node.
//!
//! Validation ([`validate_tree`]) reports structural problems such as
//! duplicate subcommand keys or two command paths collapsing onto the same
//! generated function name.
//!
//! # Example
//!
//! ```
//! use docopt_completion_core::*;
//!
//! let mut tree = CommandTree::new();
//! tree.push_option("--verbose");
//! tree.subcommand_entry("remote").subcommand_entry("add").push_argument("name");
//!
//! let remote = tree.find_subcommand("remote").unwrap();
//! assert_eq!(remote.subcommand_names(), vec!["add"]);
//! assert_eq!(function_name("git", &["remote", "add"], Joiner::Underscore), "_git_remote_add");
//! assert!(validate_tree("git", &tree, &[Joiner::Underscore]).is_empty());
//! ```

mod naming;
mod types;
mod validate;

pub use naming::{Joiner, function_name, sanitize_identifier};
pub use types::*;
pub use validate::{ValidationError, validate_tree};
