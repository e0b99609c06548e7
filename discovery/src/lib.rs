//! Usage-text acquisition and parsing for completion generation.
//!
//! This crate turns a command's docopt-style `--help` output into a
//! [`CommandTree`] and an [`OptionHelpMap`]:
//!
//! - [`acquire::fetch_usage`] — run `<cmd> --help` and capture its output.
//! - [`parser::parse_usage`] — parse pre-captured help text, preferring the
//!   grammar-aware strategy and falling back to line parsing.
//! - [`discover_usage`] — both steps in one call.
//!
//! # Example
//!
//! ```
//! use docopt_completion_discovery::parser::parse_usage;
//!
//! let help = "\
//! Usage:
//!   naval_fate ship new <name>...
//!   naval_fate ship shoot <x> <y>
//!
//! Options:
//!   -h --help  Show this screen.
//! ";
//!
//! let parsed = parse_usage(help);
//! let ship = parsed.tree.find_subcommand("ship").unwrap();
//! assert_eq!(ship.subcommand_names(), vec!["new", "shoot"]);
//! assert_eq!(parsed.help.get("--help"), Some("Show this screen."));
//! ```
//!
//! [`CommandTree`]: docopt_completion_core::CommandTree
//! [`OptionHelpMap`]: docopt_completion_core::OptionHelpMap

pub mod acquire;
pub mod error;
pub mod parser;

use acquire::HelpInvocation;
use parser::{ParseMode, ParsedUsage, parse_usage_with_mode};

pub use error::{DiscoveryError, GrammarError, Result};

/// Runs the command's help and parses the output.
///
/// Fails with [`DiscoveryError::CommandUnavailable`] when the help
/// invocation fails, in which case no tree is produced.
///
/// ```no_run
/// use docopt_completion_discovery::acquire::HelpInvocation;
/// use docopt_completion_discovery::discover_usage;
/// use docopt_completion_discovery::parser::ParseMode;
///
/// let parsed = discover_usage("naval_fate", &HelpInvocation::default(), ParseMode::Auto).unwrap();
/// println!("{} top-level subcommands", parsed.tree.subcommands.len());
/// ```
pub fn discover_usage(
    command: &str,
    invocation: &HelpInvocation,
    mode: ParseMode,
) -> Result<ParsedUsage> {
    let text = invocation.run(command)?;
    Ok(parse_usage_with_mode(&text, mode)?)
}
