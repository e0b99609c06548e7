//! Command tree type definitions.
//!
//! A [`CommandTree`] is an n-ary tree mirroring a CLI's usage grammar. Each
//! node lists the option tokens and required positional arguments valid at
//! that point and owns its nested subcommands, kept in insertion order so
//! generated scripts are stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Suffix marking an option that consumes a value (e.g. `--file=`).
pub const VALUE_SENTINEL: char = '=';

/// One node of the command grammar.
///
/// Options are de-duplicated on insertion; positional arguments are not,
/// since a repeated name still occupies a distinct position.
///
/// A node with positional arguments is terminal for subcommand branching in
/// the zsh renderer: when both are present, positional handling wins and no
/// subcommand dispatch is generated for that node.
///
/// # Examples
///
/// ```
/// use docopt_completion_core::CommandTree;
///
/// let mut tree = CommandTree::new();
/// tree.push_option("-v");
/// tree.push_option("-v");
/// tree.push_option("--file=");
/// assert_eq!(tree.options, vec!["-v", "--file="]);
/// assert!(tree.is_leaf());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandTree {
    /// Option tokens valid at this node; a trailing `=` means "takes a value".
    #[serde(default)]
    pub options: Vec<String>,
    /// Required positional argument names valid at this node.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Child nodes keyed by subcommand keyword, in insertion order.
    #[serde(default)]
    pub subcommands: Vec<Subcommand>,
}

/// A named child of a [`CommandTree`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcommand {
    /// Subcommand keyword, unique within its parent.
    pub name: String,
    #[serde(flatten)]
    pub tree: CommandTree,
}

impl CommandTree {
    /// Creates an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option token unless it is already present.
    pub fn push_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        if !self.options.iter().any(|existing| *existing == option) {
            self.options.push(option);
        }
    }

    /// Appends a positional argument name.
    pub fn push_argument(&mut self, argument: impl Into<String>) {
        self.arguments.push(argument.into());
    }

    /// Returns the child for `name`, creating it when absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use docopt_completion_core::CommandTree;
    ///
    /// let mut tree = CommandTree::new();
    /// tree.subcommand_entry("remote").push_option("-v");
    /// tree.subcommand_entry("remote").push_option("--verbose");
    /// assert_eq!(tree.subcommands.len(), 1);
    /// assert_eq!(tree.find_subcommand("remote").unwrap().options.len(), 2);
    /// ```
    pub fn subcommand_entry(&mut self, name: &str) -> &mut CommandTree {
        let index = match self.subcommands.iter().position(|sub| sub.name == name) {
            Some(index) => index,
            None => {
                self.subcommands.push(Subcommand {
                    name: name.to_string(),
                    tree: CommandTree::new(),
                });
                self.subcommands.len() - 1
            }
        };
        &mut self.subcommands[index].tree
    }

    /// Looks up a direct child by keyword.
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandTree> {
        self.subcommands
            .iter()
            .find(|sub| sub.name == name)
            .map(|sub| &sub.tree)
    }

    /// Follows a chain of subcommand keywords from this node.
    pub fn find_path(&self, path: &[&str]) -> Option<&CommandTree> {
        path.iter()
            .try_fold(self, |node, name| node.find_subcommand(name))
    }

    /// Subcommand keywords in insertion order.
    pub fn subcommand_names(&self) -> Vec<&str> {
        self.subcommands.iter().map(|sub| sub.name.as_str()).collect()
    }

    /// Returns `true` when the node has no subcommands.
    pub fn is_leaf(&self) -> bool {
        self.subcommands.is_empty()
    }

    /// Returns `true` when the node expects positional arguments.
    pub fn has_arguments(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// Returns `true` when nothing at all was recorded for this node.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.arguments.is_empty() && self.subcommands.is_empty()
    }

    /// Walks the tree depth-first in pre-order.
    ///
    /// Uses an explicit stack; each visited node is paired with the chain of
    /// subcommand keywords leading to it from this node (empty for the root).
    ///
    /// # Examples
    ///
    /// ```
    /// use docopt_completion_core::CommandTree;
    ///
    /// let mut tree = CommandTree::new();
    /// tree.subcommand_entry("remote").subcommand_entry("add");
    /// tree.subcommand_entry("status");
    ///
    /// let paths: Vec<String> = tree.walk().map(|node| node.path.join(" ")).collect();
    /// assert_eq!(paths, vec!["", "remote", "remote add", "status"]);
    /// ```
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![TreeNode {
                path: Vec::new(),
                tree: self,
            }],
        }
    }
}

/// A node visited by [`CommandTree::walk`].
#[derive(Debug, Clone)]
pub struct TreeNode<'a> {
    /// Subcommand keywords from the walk root to this node.
    pub path: Vec<&'a str>,
    pub tree: &'a CommandTree,
}

impl TreeNode<'_> {
    /// Depth of the node, 1 for the root.
    pub fn depth(&self) -> usize {
        self.path.len() + 1
    }
}

/// Pre-order iterator over a [`CommandTree`].
pub struct Walk<'a> {
    stack: Vec<TreeNode<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = TreeNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for sub in node.tree.subcommands.iter().rev() {
            let mut path = node.path.clone();
            path.push(sub.name.as_str());
            self.stack.push(TreeNode {
                path,
                tree: &sub.tree,
            });
        }
        Some(node)
    }
}

/// Help text keyed by option spelling or subcommand path.
///
/// Keys are option spellings exactly as they appear in the tree (`-v`,
/// `--file=`) or space-joined subcommand paths (`remote add`,
/// `git remote add`). Values are single-line and already escaped for
/// embedding inside single quotes.
///
/// # Examples
///
/// ```
/// use docopt_completion_core::OptionHelpMap;
///
/// let mut help = OptionHelpMap::new();
/// help.insert("--verbose", "be verbose");
/// assert_eq!(help.get("--verbose"), Some("be verbose"));
/// assert!(help.get("-q").is_none());
/// assert!(help.covers(["--verbose"]));
/// assert!(!help.covers(["--verbose", "-q"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionHelpMap {
    entries: BTreeMap<String, String>,
}

impl OptionHelpMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry; a later duplicate key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, help: impl Into<String>) {
        self.entries.insert(key.into(), help.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` when every key has an entry.
    pub fn covers<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> bool {
        keys.into_iter().all(|key| self.contains(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, help)| (key.as_str(), help.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionHelpMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, help) in iter {
            map.insert(key, help);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CommandTree {
        let mut tree = CommandTree::new();
        tree.push_option("-v");
        tree.push_option("--verbose");
        let remote = tree.subcommand_entry("remote");
        remote.push_option("-v");
        let add = remote.subcommand_entry("add");
        add.push_argument("name");
        add.push_argument("url");
        tree.subcommand_entry("status");
        tree
    }

    #[test]
    fn test_subcommand_entry_preserves_insertion_order() {
        let mut tree = CommandTree::new();
        tree.subcommand_entry("zeta");
        tree.subcommand_entry("alpha");
        tree.subcommand_entry("zeta");
        assert_eq!(tree.subcommand_names(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_arguments_keep_repeated_names() {
        let mut tree = CommandTree::new();
        tree.push_argument("file");
        tree.push_argument("file");
        assert_eq!(tree.arguments, vec!["file", "file"]);
    }

    #[test]
    fn test_find_path_follows_nested_keywords() {
        let tree = sample_tree();
        let add = tree.find_path(&["remote", "add"]).expect("remote add exists");
        assert_eq!(add.arguments, vec!["name", "url"]);
        assert!(tree.find_path(&["remote", "rm"]).is_none());
        assert_eq!(tree.find_path(&[]), Some(&tree));
    }

    #[test]
    fn test_walk_is_pre_order_with_depths() {
        let tree = sample_tree();
        let visited: Vec<(String, usize)> = tree
            .walk()
            .map(|node| (node.path.join("/"), node.depth()))
            .collect();
        assert_eq!(
            visited,
            vec![
                (String::new(), 1),
                ("remote".to_string(), 2),
                ("remote/add".to_string(), 3),
                ("status".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_tree_serializes_with_flattened_subcommands() {
        let tree = sample_tree();
        let value = serde_json::to_value(&tree).expect("tree serializes");
        assert_eq!(value["subcommands"][0]["name"], "remote");
        assert_eq!(value["subcommands"][0]["subcommands"][0]["arguments"][1], "url");

        let back: CommandTree = serde_json::from_value(value).expect("tree deserializes");
        assert_eq!(back, tree);
    }

    #[test]
    fn test_help_map_collects_from_pairs() {
        let help: OptionHelpMap = [("-v", "be verbose"), ("--verbose", "be verbose")]
            .into_iter()
            .collect();
        assert_eq!(help.len(), 2);
        assert_eq!(
            help.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec!["--verbose", "-v"]
        );
    }

    #[test]
    fn test_help_map_covers_empty_key_set() {
        let help = OptionHelpMap::new();
        assert!(help.covers(std::iter::empty::<&str>()));
    }
}
