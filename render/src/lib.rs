//! Completion script rendering and installation.
//!
//! A parsed [`CommandTree`] is turned into shell code by a
//! [`CompletionRenderer`]:
//!
//! - [`BashRenderer`] — `<cmd>.sh` for bash-completion, one function per
//!   node dispatching on `COMP_WORDS`.
//! - [`ZshRenderer`] — `_<cmd>` for zsh, built on `_arguments` with help
//!   annotations and positional-argument hints.
//!
//! [`targets::detect_targets`] probes the installed completion frameworks and
//! [`install::install`] renders once per shell and writes every target.
//!
//! # Example
//!
//! ```
//! use docopt_completion_core::{CommandTree, OptionHelpMap};
//! use docopt_completion_render::{CompletionRenderer, Renderers, Shell};
//!
//! let mut tree = CommandTree::new();
//! tree.subcommand_entry("remote").push_option("-v");
//!
//! let renderers = Renderers::default();
//! let zsh = renderers.for_shell(Shell::Zsh).render("git", &tree, &OptionHelpMap::new());
//! assert!(zsh.contains("_git_remote()"));
//! ```
//!
//! [`CommandTree`]: docopt_completion_core::CommandTree

pub mod bash;
pub mod error;
pub mod install;
mod shell;
pub mod targets;
pub mod zsh;

pub use bash::{BashFlavor, BashOptions, BashRenderer};
pub use error::InstallError;
pub use install::{Renderers, RenderedScript, WriteOutcome};
pub use shell::{CompletionRenderer, Shell};
pub use targets::{InstallTarget, TargetEnv, TargetKind};
pub use zsh::ZshRenderer;
