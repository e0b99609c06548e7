use std::fs;
use std::path::PathBuf;

use docopt_completion_discovery::parser::{ParseMode, parse_usage, parse_usage_with_mode};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

#[test]
fn test_git_remote_fixture_in_both_modes() {
    let help = fixture("git-remote-help.txt");

    let grammar = parse_usage_with_mode(&help, ParseMode::Grammar).expect("grammar parses");
    let add = grammar.tree.find_path(&["remote", "add"]).expect("remote add");
    assert_eq!(add.arguments, vec!["name", "url"]);
    assert_eq!(
        grammar.tree.find_subcommand("remote").unwrap().options,
        vec!["-v", "--verbose"]
    );

    let lines = parse_usage_with_mode(&help, ParseMode::Lines).expect("lines parse");
    let add = lines.tree.find_path(&["remote", "add"]).expect("remote add");
    assert!(add.arguments.is_empty());
    assert_eq!(lines.tree.find_subcommand("remote").unwrap().options, vec!["-v"]);

    for parsed in [&grammar, &lines] {
        assert_eq!(parsed.help.get("-v"), Some("be verbose"));
        assert_eq!(parsed.help.get("--verbose"), Some("be verbose"));
    }
}

#[test]
fn test_naval_fate_fixture_records_arguments_and_values() {
    let parsed = parse_usage(&fixture("naval-fate-help.txt"));
    assert_eq!(parsed.mode, ParseMode::Grammar);

    let ship_move = parsed.tree.find_path(&["ship", "move"]).expect("ship move");
    assert_eq!(ship_move.arguments, vec!["x", "y"]);
    assert_eq!(ship_move.options, vec!["--speed="]);
    assert_eq!(parsed.help.get("--speed="), Some("Speed in knots \\[default: 10\\]."));
    assert_eq!(parsed.help.get("--moored"), Some("Moored (anchored) mine."));
}

#[test]
fn test_malformed_fixture_falls_back_to_lines() {
    let parsed = parse_usage(&fixture("deploy-help.txt"));
    assert_eq!(parsed.mode, ParseMode::Lines);

    assert_eq!(parsed.tree.subcommand_names(), vec!["push", "rollback", "status"]);
    let push = parsed.tree.find_subcommand("push").unwrap();
    assert_eq!(push.options, vec!["--file="]);
    assert!(parsed.tree.find_path(&["rollback", "staging", "production"]).is_some());

    assert_eq!(parsed.help.get("push"), Some("Push a release"));
    assert_eq!(parsed.help.get("status"), Some("Show what'\\''s deployed"));
    assert_eq!(parsed.help.get("-q"), Some("Don'\\''t print progress."));
    assert_eq!(parsed.help.get("--env="), Some("Environment name."));
    assert_eq!(parsed.help.get("-e="), Some("Environment name."));
}

#[test]
fn test_options_header_right_after_usage_in_both_modes() {
    let help = fixture("tight-options-help.txt");

    let grammar = parse_usage(&help);
    assert_eq!(grammar.mode, ParseMode::Grammar);
    let lines = parse_usage_with_mode(&help, ParseMode::Lines).expect("lines parse");

    for parsed in [&grammar, &lines] {
        assert_eq!(parsed.tree.subcommand_names(), vec!["run", "prune"]);
        assert!(parsed.tree.find_path(&["run", "Options:"]).is_none());
        for node in parsed.tree.walk() {
            assert!(
                node.tree.subcommand_names().iter().all(|name| !name.ends_with(':')),
                "header word became a subcommand at {:?}",
                node.path
            );
            assert!(!node.tree.options.iter().any(|option| option == "-,"));
        }
        assert_eq!(parsed.tree.find_subcommand("prune").unwrap().options, vec!["--keep="]);
        assert_eq!(parsed.help.get("-v"), Some("Report every file."));
        assert_eq!(parsed.help.get("--verbose"), Some("Report every file."));
        assert_eq!(parsed.help.get("--keep="), Some("Snapshots to keep."));
    }

    let run = grammar.tree.find_subcommand("run").unwrap();
    assert_eq!(run.arguments, vec!["source"]);
    assert_eq!(run.options, vec!["-v", "--verbose"]);
}

#[test]
fn test_reparsing_is_structurally_stable() {
    for name in [
        "naval-fate-help.txt",
        "git-remote-help.txt",
        "deploy-help.txt",
        "tight-options-help.txt",
    ] {
        let help = fixture(name);
        let first = parse_usage(&help);
        let second = parse_usage(&help);
        assert_eq!(first, second, "{name} parsed differently on second run");

        for node in first.tree.walk() {
            let mut names = node.tree.subcommand_names();
            let count = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), count, "{name}: duplicate subcommand keys");
        }
    }
}

#[test]
fn test_every_help_entry_is_quote_safe() {
    for name in ["naval-fate-help.txt", "deploy-help.txt"] {
        let parsed = parse_usage(&fixture(name));
        for (key, help) in parsed.help.iter() {
            let unescaped_quote = help.replace("'\\''", "").contains('\'');
            assert!(!unescaped_quote, "{name}: {key} has a bare quote: {help}");
            let bare_bracket = help
                .replace("\\[", "")
                .replace("\\]", "")
                .contains(['[', ']']);
            assert!(!bare_bracket, "{name}: {key} has a bare bracket: {help}");
        }
    }
}
