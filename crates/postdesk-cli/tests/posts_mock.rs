//! Post commands against a mock blog API.


use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_gated_command_requires_login() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .args(["posts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[tokio::test]
async fn test_list_prints_posts_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [
                fixtures::post_json(2, "Second first", true),
                fixtures::post_json(1, "Hello World!", false)
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    let output = cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "list"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2  [x] Published  Second first"));
    assert!(lines[1].starts_with("1  [ ] Unpublished  Hello World!"));
}

#[tokio::test]
async fn test_unauthorized_ends_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "stale", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"));

    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn test_show_unescapes_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post": fixtures::post_json(1, "Hello World!", false)
        })))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World!"))
        .stdout(predicate::str::contains("By Ada Lovelace"))
        .stdout(predicate::str::contains("Some content\nwith a second line"));
}

#[tokio::test]
async fn test_publish_sends_only_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/posts/1"))
        .and(body_json(json!({"isPublished": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post": fixtures::post_json(1, "Hello World!", true)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "publish", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World!: Published"));
}

#[tokio::test]
async fn test_delete_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "delete", "3", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted post 3"));
}

#[tokio::test]
async fn test_unconfirmed_delete_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "delete", "3", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not confirmed"));
}

#[tokio::test]
async fn test_delete_declined_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "delete", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
}

#[tokio::test]
async fn test_new_post_with_invalid_input_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "new", "--title", "abc", "--content", "short"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 5 characters"))
        .stderr(predicate::str::contains("at least 10 characters"));
}

#[tokio::test]
async fn test_new_post_escapes_newlines() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts"))
        .and(body_json(json!({
            "title": "A fine title",
            "content": "line one\\nline two",
            "imageUrl": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "post": fixtures::post_json(9, "A fine title", false)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    fixtures::write_session(dir.path(), "tok-123", "Ada Lovelace");
    let content_file = dir.path().join("body.txt");
    std::fs::write(&content_file, "line one\nline two").unwrap();

    cargo_bin_cmd!("postdesk")
        .env("POSTDESK_HOME", dir.path())
        .env("POSTDESK_API_BASE_URL", server.uri())
        .args(["posts", "new", "--title", "A fine title", "--content-file"])
        .arg(&content_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created post 9"));
}
