//! Error types for usage acquisition and parsing.

use thiserror::Error;

/// Errors raised while obtaining or parsing a command's usage text.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The executable could not be started or its help invocation failed.
    #[error("command {command:?} does not exist or its help failed: {reason}")]
    CommandUnavailable { command: String, reason: String },

    /// Help text could not be read from a file or stdin.
    #[error("failed to read help text from {source_name}: {source}")]
    HelpRead {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The grammar-aware strategy was forced and the usage could not be parsed.
    #[error("usage grammar error: {0}")]
    Grammar(#[from] GrammarError),
}

/// Structural problems in a usage section, reported by the grammar-aware
/// strategy. In automatic mode these trigger the line-based fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// No `Usage:` header was found.
    #[error("no \"usage:\" section found")]
    MissingUsage,
    /// The usage section contains no program name.
    #[error("usage section is empty")]
    EmptyUsage,
    /// A group was closed without being opened, or never closed.
    #[error("unmatched {0:?}")]
    Unbalanced(String),
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),
}

/// Convenience alias for results with [`DiscoveryError`].
pub type Result<T> = std::result::Result<T, DiscoveryError>;
