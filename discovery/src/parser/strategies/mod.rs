//! Tree-building strategies for the usage block.
//!
//! Two strategies exist with materially different fidelity:
//!
//! - [`grammar::GrammarStrategy`] parses the usage section as a docopt
//!   pattern and walks it structurally. It distinguishes options from
//!   positional arguments and is preferred.
//! - [`lines::LineStrategy`] flattens each usage line into a token stream.
//!   It never fails, but recovers no positional arguments.

pub mod grammar;
pub mod lines;

use docopt_completion_core::CommandTree;

use super::UsageDocument;
use crate::error::GrammarError;

/// Builds a [`CommandTree`] from a split usage document.
pub trait TreeStrategy {
    fn name(&self) -> &'static str;
    fn build_tree(&self, document: &UsageDocument<'_>) -> Result<CommandTree, GrammarError>;
}
