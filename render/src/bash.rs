//! Bash completion renderer.
//!
//! Emits one function per tree node. A node without subcommands always
//! offers its candidate words; a node with subcommands offers them only
//! while the cursor sits at the node's depth and otherwise dispatches on the
//! word typed at that depth:
//!
//! ```text
//! _git_remote()
//! {
//!     local cur
//!     cur="${COMP_WORDS[COMP_CWORD]}"
//!
//!     if [ "$COMP_CWORD" -eq 2 ]; then
//!         COMPREPLY=( $(compgen -W '-v add' -- "$cur") )
//!     else
//!         case "${COMP_WORDS[2]}" in
//!             add)
//!                 _git_remote_add
//!                 ;;
//!         esac
//!     fi
//! }
//! ```
//!
//! The file ends with a `complete -F` registration of the root function.

use docopt_completion_core::{CommandTree, Joiner, OptionHelpMap, TreeNode, function_name};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shell::{CompletionRenderer, Shell, escape_single_quoted, shell_word};

/// Candidate list style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BashFlavor {
    /// Only the literal word list.
    WordList,
    /// Word list plus filename completion at nodes with positional arguments.
    #[default]
    FileAware,
}

/// Bash renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BashOptions {
    pub flavor: BashFlavor,
    pub joiner: Joiner,
    /// Register with `-o bashdefault -o default` so bash falls back to its
    /// own completion when no candidate matches.
    pub default_fallback: bool,
}

impl Default for BashOptions {
    fn default() -> Self {
        Self {
            flavor: BashFlavor::FileAware,
            joiner: Joiner::Underscore,
            default_fallback: true,
        }
    }
}

/// Renders `<cmd>.sh` scripts for bash-completion.
///
/// # Examples
///
/// ```
/// use docopt_completion_core::{CommandTree, OptionHelpMap};
/// use docopt_completion_render::{BashRenderer, CompletionRenderer};
///
/// let mut tree = CommandTree::new();
/// tree.push_option("--file=");
///
/// let script = BashRenderer::default().render("deploy", &tree, &OptionHelpMap::new());
/// assert!(script.contains("compgen -W '--file='"));
/// assert!(script.ends_with("complete -o bashdefault -o default -F _deploy deploy\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BashRenderer {
    options: BashOptions,
}

impl BashRenderer {
    pub fn new(options: BashOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BashOptions {
        &self.options
    }

    fn write_function(&self, out: &mut String, root: &str, node: &TreeNode<'_>) {
        let joiner = self.options.joiner;
        let name = function_name(root, &node.path, joiner);
        let depth = node.depth();
        let tree = node.tree;

        let file_switch = if self.options.flavor == BashFlavor::FileAware && tree.has_arguments() {
            "-f "
        } else {
            ""
        };
        let op = if tree.is_leaf() { "ge" } else { "eq" };

        out.push_str(&format!("{name}()\n{{\n"));
        out.push_str("    local cur\n");
        out.push_str("    cur=\"${COMP_WORDS[COMP_CWORD]}\"\n\n");
        out.push_str(&format!("    if [ \"$COMP_CWORD\" -{op} {depth} ]; then\n"));
        out.push_str(&format!(
            "        COMPREPLY=( $(compgen {file_switch}-W '{}' -- \"$cur\") )\n",
            candidate_words(tree)
        ));

        if !tree.is_leaf() {
            out.push_str("    else\n");
            out.push_str(&format!("        case \"${{COMP_WORDS[{depth}]}}\" in\n"));
            for sub in &tree.subcommands {
                let mut child_path = node.path.clone();
                child_path.push(sub.name.as_str());
                let child = function_name(root, &child_path, joiner);
                out.push_str(&format!("            {})\n", shell_word(&sub.name)));
                out.push_str(&format!("                {child}\n"));
                out.push_str("                ;;\n");
            }
            out.push_str("        esac\n");
        }

        out.push_str("    fi\n}\n\n");
    }
}

impl CompletionRenderer for BashRenderer {
    fn shell(&self) -> Shell {
        Shell::Bash
    }

    fn render(&self, root: &str, tree: &CommandTree, _help: &OptionHelpMap) -> String {
        let mut script = String::new();
        let mut functions = 0usize;
        for node in tree.walk() {
            self.write_function(&mut script, root, &node);
            functions += 1;
        }

        let root_function = function_name(root, &[], self.options.joiner);
        let fallback = if self.options.default_fallback {
            "-o bashdefault -o default "
        } else {
            ""
        };
        script.push_str(&format!(
            "complete {fallback}-F {root_function} {}\n",
            shell_word(root)
        ));

        debug!(root, functions, flavor = ?self.options.flavor, "Rendered bash completion");
        script
    }
}

/// Options first, then subcommand keywords, space-joined and escaped for a
/// single-quoted word.
fn candidate_words(tree: &CommandTree) -> String {
    let words: Vec<&str> = tree
        .options
        .iter()
        .map(String::as_str)
        .chain(tree.subcommand_names())
        .collect();
    escape_single_quoted(&words.join(" "))
}
