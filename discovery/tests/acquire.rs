//! Help acquisition against throwaway executables.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use docopt_completion_discovery::acquire::HelpInvocation;
use docopt_completion_discovery::parser::ParseMode;
use docopt_completion_discovery::{DiscoveryError, discover_usage};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");
    let mut perms = fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("failed to chmod script");
    path
}

// One test so the scripts are never being written while another test thread
// forks a child.
#[test]
fn test_help_invocation_outcomes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ok = write_script(
        dir.path(),
        "naval_fate",
        r#"[ "$1" = "--help" ] || exit 3
cat <<'HELP'
Usage:
  naval_fate ship new <name>...

Options:
  -h --help  Show this screen.
HELP"#,
    );
    let failing = write_script(dir.path(), "broken", "echo 'Usage: broken run'\nexit 2");
    let custom_flag = write_script(
        dir.path(),
        "short_only",
        r#"[ "$1" = "-h" ] && echo 'Usage: short_only go' && exit 0
exit 1"#,
    );

    let invocation = HelpInvocation::default();

    let parsed = discover_usage(ok.to_str().unwrap(), &invocation, ParseMode::Auto)
        .expect("help succeeds");
    assert_eq!(
        parsed.tree.find_path(&["ship", "new"]).unwrap().arguments,
        vec!["name"]
    );
    assert_eq!(parsed.help.get("-h"), Some("Show this screen."));

    let err = invocation.run(failing.to_str().unwrap()).unwrap_err();
    match err {
        DiscoveryError::CommandUnavailable { reason, .. } => {
            assert!(reason.contains("exited"), "unexpected reason: {reason}");
        }
        other => panic!("expected CommandUnavailable, got {other:?}"),
    }

    assert!(invocation.run(custom_flag.to_str().unwrap()).is_err());
    let text = invocation
        .clone()
        .with_help_flag("-h")
        .run(custom_flag.to_str().unwrap())
        .expect("-h succeeds");
    assert_eq!(text.trim(), "Usage: short_only go");
}
