//! Structural walk from a usage [`Pattern`] to a [`CommandTree`].

use docopt_completion_core::CommandTree;

use super::pattern::{OptionSpec, Pattern};

/// Fills `node` from `pattern` and returns the node later siblings attach to.
///
/// Alternation, optional and repeated groups recurse into the current node
/// without moving it; required groups thread the current node through their
/// children; a command descends into (or creates) its child.
pub fn build_command_tree<'t>(
    pattern: &Pattern,
    node: &'t mut CommandTree,
    shortcut: &[OptionSpec],
) -> &'t mut CommandTree {
    match pattern {
        Pattern::Either(children) | Pattern::Optional(children) | Pattern::OneOrMore(children) => {
            for child in children {
                build_command_tree(child, &mut *node, shortcut);
            }
            node
        }
        Pattern::Required(children) => {
            let mut current = node;
            for child in children {
                current = build_command_tree(child, current, shortcut);
            }
            current
        }
        Pattern::Option(spec) => {
            push_spec(node, spec);
            node
        }
        Pattern::OptionsShortcut => {
            for spec in shortcut {
                push_spec(node, spec);
            }
            node
        }
        Pattern::Argument(name) => {
            node.push_argument(name.as_str());
            node
        }
        Pattern::Command(name) => node.subcommand_entry(name),
    }
}

fn push_spec(node: &mut CommandTree, spec: &OptionSpec) {
    for token in spec.tree_tokens() {
        node.push_option(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> Pattern {
        Pattern::Command(name.to_string())
    }

    #[test]
    fn test_required_threads_current_node() {
        let pattern = Pattern::Required(vec![
            command("remote"),
            command("add"),
            Pattern::Argument("name".to_string()),
        ]);
        let mut root = CommandTree::new();
        build_command_tree(&pattern, &mut root, &[]);

        let add = root.find_path(&["remote", "add"]).expect("remote add");
        assert_eq!(add.arguments, vec!["name"]);
        assert!(root.arguments.is_empty());
    }

    #[test]
    fn test_either_does_not_move_current_node() {
        let pattern = Pattern::Required(vec![
            Pattern::Either(vec![command("start"), command("stop")]),
            Pattern::Option(OptionSpec {
                short: Some("-f".to_string()),
                long: None,
                takes_value: false,
            }),
        ]);
        let mut root = CommandTree::new();
        build_command_tree(&pattern, &mut root, &[]);

        assert_eq!(root.subcommand_names(), vec!["start", "stop"]);
        assert_eq!(root.options, vec!["-f"]);
    }

    #[test]
    fn test_value_options_get_sentinel_on_both_spellings() {
        let pattern = Pattern::Optional(vec![Pattern::Option(OptionSpec {
            short: Some("-s".to_string()),
            long: Some("--speed".to_string()),
            takes_value: true,
        })]);
        let mut root = CommandTree::new();
        build_command_tree(&pattern, &mut root, &[]);
        assert_eq!(root.options, vec!["-s=", "--speed="]);
    }

    #[test]
    fn test_options_shortcut_expands_at_current_node() {
        let shortcut = vec![OptionSpec {
            short: None,
            long: Some("--debug".to_string()),
            takes_value: false,
        }];
        let pattern = Pattern::Required(vec![
            command("run"),
            Pattern::Optional(vec![Pattern::OptionsShortcut]),
        ]);
        let mut root = CommandTree::new();
        build_command_tree(&pattern, &mut root, &shortcut);
        assert_eq!(root.find_subcommand("run").unwrap().options, vec!["--debug"]);
    }
}
