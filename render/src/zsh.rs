//! Zsh completion renderer.
//!
//! Produces a `#compdef` file with one function per tree node built on
//! `_arguments -C`. Nodes with subcommands list them through `_values` and
//! dispatch on `$line[1]`; nodes with positional arguments describe the next
//! expected argument through a shared helper defined at the top of the file.
//!
//! A node that has both positional arguments and subcommands is rendered as
//! a positional node: no subcommand dispatch is generated for it.

use docopt_completion_core::{
    CommandTree, Joiner, OptionHelpMap, TreeNode, VALUE_SENTINEL, function_name,
};
use tracing::debug;

use crate::shell::{CompletionRenderer, Shell, escape_single_quoted, shell_word};

/// Renders `_<cmd>` scripts for zsh (oh-my-zsh, prezto, or the system
/// function directory).
///
/// # Examples
///
/// ```
/// use docopt_completion_core::{CommandTree, OptionHelpMap};
/// use docopt_completion_render::{CompletionRenderer, ZshRenderer};
///
/// let mut tree = CommandTree::new();
/// tree.push_option("--file=");
/// let help: OptionHelpMap = [("--file=", "Manifest file")].into_iter().collect();
///
/// let script = ZshRenderer.render("deploy", &tree, &help);
/// assert!(script.starts_with("#compdef deploy\n"));
/// assert!(script.contains("'(--file)--file=-[Manifest file]'"));
/// assert!(script.ends_with("_deploy \"$@\"\n"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ZshRenderer;

impl ZshRenderer {
    fn helper_name(root: &str) -> String {
        format!("{}_next_positional", function_name(root, &[], Joiner::Underscore))
    }

    fn write_helper(out: &mut String, root: &str) {
        out.push_str(&format!("{}()\n{{\n", Self::helper_name(root)));
        out.push_str(
            "\tlocal current=$1
\tshift
\tlocal -a names
\twhile (( $# )) && [[ $1 != -- ]]; do
\t\tnames+=(\"$1\")
\t\tshift
\tdone
\tshift 2
\tlocal word count=0 index=1
\tfor word in \"$@\"; do
\t\t(( index > current - 2 )) && break
\t\t[[ $word == -* ]] || (( count++ ))
\t\t(( index++ ))
\tdone
\t(( count < ${#names} )) && print -r -- \"${names[count + 1]}\"
}

",
        );
    }

    fn write_function(out: &mut String, root: &str, node: &TreeNode<'_>, help: &OptionHelpMap) {
        let tree = node.tree;
        let name = function_name(root, &node.path, Joiner::Underscore);

        out.push_str(&format!("{name}()\n{{\n"));
        out.push_str("\tlocal curcontext=\"$curcontext\" state line\n");
        out.push_str("\ttypeset -A opt_args\n\n");

        let option_specs = option_menu(tree, help);
        if tree.has_arguments() {
            Self::write_positional_body(out, root, tree, &option_specs);
        } else if !tree.is_leaf() {
            Self::write_subcommand_body(out, root, node, &option_specs, help);
        } else if !option_specs.is_empty() {
            write_arguments_call(out, 1, &option_specs);
        } else {
            out.push_str("\t_message 'no more arguments'\n");
        }

        out.push_str("}\n\n");
    }

    fn write_positional_body(out: &mut String, root: &str, tree: &CommandTree, option_specs: &[String]) {
        let names: Vec<String> = tree
            .arguments
            .iter()
            .map(|arg| format!("'{}'", escape_single_quoted(arg)))
            .collect();
        let helper = Self::helper_name(root);

        let indent = if option_specs.is_empty() {
            "\t"
        } else {
            out.push_str("\tif [[ ${words[CURRENT]} == -* ]]; then\n");
            write_arguments_call(out, 2, option_specs);
            out.push_str("\telse\n");
            "\t\t"
        };

        out.push_str(&format!("{indent}local next\n"));
        out.push_str(&format!(
            "{indent}next=$({helper} $CURRENT {} -- \"${{words[@]}}\")\n",
            names.join(" ")
        ));
        out.push_str(&format!("{indent}if [[ -n $next ]]; then\n"));
        out.push_str(&format!("{indent}\t_message \"$next\"\n"));
        out.push_str(&format!("{indent}\t[[ ${{(L)next}} == *(file|path)* ]] && _files\n"));
        out.push_str(&format!("{indent}fi\n"));

        if !option_specs.is_empty() {
            out.push_str("\tfi\n");
        }
    }

    fn write_subcommand_body(
        out: &mut String,
        root: &str,
        node: &TreeNode<'_>,
        option_specs: &[String],
        help: &OptionHelpMap,
    ) {
        let tree = node.tree;
        let mut specs = Vec::with_capacity(option_specs.len() + 2);
        specs.push("':command:->command'".to_string());
        specs.extend(option_specs.iter().cloned());
        specs.push("'*::options:->options'".to_string());
        write_arguments_call(out, 1, &specs);

        let description = std::iter::once(root)
            .chain(node.path.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        out.push_str("\n\tcase $state in\n");
        out.push_str("\t\t(command)\n");
        out.push_str("\t\t\tlocal -a subcommands\n");
        out.push_str("\t\t\tsubcommands=(\n");
        for item in subcommand_menu(root, node, help) {
            out.push_str(&format!("\t\t\t\t{item}\n"));
        }
        out.push_str("\t\t\t)\n");
        out.push_str(&format!(
            "\t\t\t_values '{}' $subcommands\n",
            escape_single_quoted(&description)
        ));
        out.push_str("\t\t;;\n\n");
        out.push_str("\t\t(options)\n");
        out.push_str("\t\t\tcase $line[1] in\n");
        for sub in &tree.subcommands {
            let mut child_path = node.path.clone();
            child_path.push(sub.name.as_str());
            out.push_str(&format!("\t\t\t\t{})\n", shell_word(&sub.name)));
            out.push_str(&format!(
                "\t\t\t\t\t{}\n",
                function_name(root, &child_path, Joiner::Underscore)
            ));
            out.push_str("\t\t\t\t;;\n");
        }
        out.push_str("\t\t\tesac\n");
        out.push_str("\t\t;;\n");
        out.push_str("\tesac\n");
    }
}

impl CompletionRenderer for ZshRenderer {
    fn shell(&self) -> Shell {
        Shell::Zsh
    }

    fn render(&self, root: &str, tree: &CommandTree, help: &OptionHelpMap) -> String {
        let mut script = format!("#compdef {root}\n\n");
        Self::write_helper(&mut script, root);

        let mut functions = 0usize;
        for node in tree.walk() {
            Self::write_function(&mut script, root, &node, help);
            functions += 1;
        }

        script.push_str(&format!(
            "{} \"$@\"\n",
            function_name(root, &[], Joiner::Underscore)
        ));
        debug!(root, functions, "Rendered zsh completion");
        script
    }
}

/// `_arguments -C` followed by one spec per line, continued with ` \`.
fn write_arguments_call(out: &mut String, depth: usize, specs: &[String]) {
    let indent = "\t".repeat(depth);
    out.push_str(&format!("{indent}_arguments -C \\\n"));
    for (i, spec) in specs.iter().enumerate() {
        let continuation = if i + 1 < specs.len() { " \\" } else { "" };
        out.push_str(&format!("{indent}\t{spec}{continuation}\n"));
    }
}

/// `_arguments` specs for the options at `tree`.
///
/// Help is attached only when every option has an entry. A trailing `=`
/// becomes `=-` so zsh appends the `=` itself when completing the flag.
fn option_menu(tree: &CommandTree, help: &OptionHelpMap) -> Vec<String> {
    let show_help = help.covers(tree.options.iter().map(String::as_str));
    tree.options
        .iter()
        .map(|option| {
            let bare = option.trim_end_matches(VALUE_SENTINEL);
            let spelled = if option.ends_with(VALUE_SENTINEL) {
                format!("{option}-")
            } else {
                option.clone()
            };
            let annotation = match help.get(option) {
                Some(text) if show_help => format!("[{text}]"),
                _ => String::new(),
            };
            format!(
                "'({}){}{annotation}'",
                escape_single_quoted(bare),
                escape_single_quoted(&spelled)
            )
        })
        .collect()
}

/// `_values` items for the subcommands of `node`, annotated only when every
/// subcommand has help.
fn subcommand_menu(root: &str, node: &TreeNode<'_>, help: &OptionHelpMap) -> Vec<String> {
    let names = node.tree.subcommand_names();
    let lookups: Vec<Option<&str>> = names
        .iter()
        .map(|name| subcommand_help(root, &node.path, name, help))
        .collect();
    let show_help = lookups.iter().all(Option::is_some);

    names
        .iter()
        .zip(lookups)
        .map(|(name, text)| match text {
            Some(text) if show_help => format!("'{}[{text}]'", escape_single_quoted(name)),
            _ => format!("'{}'", escape_single_quoted(name)),
        })
        .collect()
}

/// Help for subcommand `name` under `path`, keyed with the root name first
/// (`git remote add`) and then without it (`remote add`).
fn subcommand_help<'h>(root: &str, path: &[&str], name: &str, help: &'h OptionHelpMap) -> Option<&'h str> {
    let relative: Vec<&str> = path.iter().copied().chain([name]).collect();
    let with_root = format!("{root} {}", relative.join(" "));
    help.get(&with_root).or_else(|| help.get(&relative.join(" ")))
}
