use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("postdesk")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("posts"));
}

#[test]
fn test_posts_help_shows_subcommands() {
    cargo_bin_cmd!("postdesk")
        .args(["posts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_posts_new_requires_content() {
    cargo_bin_cmd!("postdesk")
        .args(["posts", "new", "--title", "A fine title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--content"));
}

#[test]
fn test_interactive_mode_needs_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
