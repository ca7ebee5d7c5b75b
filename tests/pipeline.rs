//! End-to-end pipeline tests.
//!
//! Network, git and terminal ports are served from cassettes; the
//! filesystem is a real temporary directory that doubles as the working
//! directory receiving `README.md`.

use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

use docsmith::badges::{synthesize, BadgeOptions};
use docsmith::cassette::format::{Cassette, Interaction};
use docsmith::cassette::recorder::CassetteRecorder;
use docsmith::cli::{Command, GenerateArgs};
use docsmith::commands::dispatch_with_context;
use docsmith::context::ServiceContext;
use docsmith::metadata::{aggregate, default_extractors, ProjectType};
use docsmith::prompt::{build_prompt, PromptInput};

fn write(dir: &TempDir, name: &str, contents: &str) {
    std::fs::write(dir.path().join(name), contents).unwrap();
}

fn read_readme(dir: &TempDir) -> String {
    std::fs::read_to_string(dir.path().join("README.md")).unwrap()
}

fn git_origin(url: Option<&str>) -> Interaction {
    Interaction::new("git", "remote_url", json!({}), json!({ "ok": url }))
}

fn narrative(text: &str) -> Interaction {
    Interaction::new(
        "llm",
        "complete",
        json!({}),
        json!({"ok": {"text": text, "prompt_tokens": 100, "completion_tokens": 50}}),
    )
}

fn github_record() -> Value {
    json!({
        "name": "hello",
        "full_name": "octo/hello",
        "description": "Says hello",
        "stargazers_count": 1500,
        "forks_count": 12,
        "open_issues_count": 3,
        "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"},
        "topics": ["greeting"],
        "language": "JavaScript",
        "owner": {"login": "octo"},
        "html_url": "https://github.com/octo/hello",
        "archived": false
    })
}

fn local_command(generate: GenerateArgs) -> Command {
    Command::Local { path: PathBuf::from("."), generate }
}

#[tokio::test]
async fn local_node_project_without_remote() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", r#"{"name": "x", "version": "1.0.0"}"#);
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "local-node",
        vec![git_origin(None), narrative("# x\n\nA tiny package.\n")],
    ));

    dispatch_with_context(&local_command(GenerateArgs::default()), &ctx, dir.path())
        .await
        .unwrap();

    let readme = read_readme(&dir);
    let lines: Vec<&str> = readme.lines().collect();
    assert_eq!(lines[0], "# x");
    assert_eq!(lines[1], "");
    assert!(lines[2].starts_with("[![Version](https://img.shields.io/badge/version-1.0.0-blue?style=flat)]"));
    assert_eq!(lines[3], "");
    assert!(lines[4].starts_with("[![Language](https://img.shields.io/badge/language-JavaScript-"));
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "A tiny package.");
    assert_eq!(lines.len(), 7);
}

#[tokio::test]
async fn local_project_with_origin_remote_gets_repository_badges() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", r#"{"name": "hello", "version": "2.1.0"}"#);
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "local-with-remote",
        vec![
            git_origin(Some("git@github.com:octo/hello.git")),
            Interaction::new("remote", "fetch", json!({"owner": "octo", "name": "hello"}), json!({"ok": github_record()})),
            narrative("# hello\n\nSays hello.\n"),
        ],
    ));

    dispatch_with_context(&local_command(GenerateArgs::default()), &ctx, dir.path())
        .await
        .unwrap();

    let readme = read_readme(&dir);
    let important = readme.lines().nth(2).unwrap();
    assert!(important.starts_with("[![GitHub stars](https://img.shields.io/github/stars/octo/hello?style=for-the-badge)]"));
    assert!(important.contains("[![License](https://img.shields.io/badge/license-MIT-blue?style=for-the-badge)]"));
    assert!(important.contains("[![Version]"));
    let other = readme.lines().nth(4).unwrap();
    assert!(other.starts_with("[![GitHub forks]"));
    assert!(other.contains("(https://github.com/octo/hello)"));
}

#[tokio::test]
async fn remote_failure_in_local_mode_is_soft() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Cargo.toml", "[package]\nname = \"crate-x\"\nversion = \"0.1.0\"\n");
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "local-remote-missing",
        vec![
            git_origin(Some("https://github.com/octo/gone")),
            Interaction::new("remote", "fetch", json!({}), json!({"err": {"kind": "not_found", "detail": "octo/gone"}})),
            narrative("# crate-x\n\nA crate.\n"),
        ],
    ));

    dispatch_with_context(&local_command(GenerateArgs::default()), &ctx, dir.path())
        .await
        .unwrap();

    let readme = read_readme(&dir);
    assert!(readme.starts_with("# crate-x\n\n[![Language](https://img.shields.io/badge/language-Rust-"));
    assert!(!readme.contains("GitHub stars"));
}

#[tokio::test]
async fn declined_overwrite_keeps_existing_readme() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", r#"{"name": "x", "version": "1.0.0"}"#);
    write(&dir, "README.md", "hand-written\n");
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "declined",
        vec![
            git_origin(None),
            narrative("# x\n\nGenerated.\n"),
            Interaction::new("confirm", "confirm", json!({"question": "overwrite"}), json!(false)),
        ],
    ));

    let result =
        dispatch_with_context(&local_command(GenerateArgs::default()), &ctx, dir.path()).await;
    assert!(result.is_ok());
    assert_eq!(std::fs::read(dir.path().join("README.md")).unwrap(), b"hand-written\n");
}

#[tokio::test]
async fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Makefile", "build:\n\tcc main.c\n");
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "dry-run",
        vec![git_origin(None), narrative("# project\n\nBuilds with make.\n")],
    ));
    let generate = GenerateArgs { dry_run: true, ..GenerateArgs::default() };

    dispatch_with_context(&local_command(generate), &ctx, dir.path()).await.unwrap();
    assert!(!dir.path().join("README.md").exists());
}

#[tokio::test]
async fn remote_command_replays_recorded_cassette() {
    let dir = TempDir::new().unwrap();
    let cassette_path = dir.path().join("cassettes/remote.yaml");
    let mut recorder = CassetteRecorder::new("remote-hello");
    recorder
        .record("remote", "fetch", json!({"owner": "octo", "name": "hello"}), json!({"ok": github_record()}))
        .record("llm", "complete", json!({}), json!({"ok": {"text": "# hello\n\nSays hello.", "prompt_tokens": 1, "completion_tokens": 1}}));
    recorder.finish(&cassette_path).unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let command = Command::Remote {
        url: "https://github.com/octo/hello".into(),
        generate: GenerateArgs { force: true, ..GenerateArgs::default() },
    };
    dispatch_with_context(&command, &ctx, dir.path()).await.unwrap();

    let readme = read_readme(&dir);
    assert!(readme.starts_with("# hello\n\n[![GitHub stars]"));
    assert!(readme.ends_with("Says hello.\n"));
}

#[tokio::test]
async fn remote_failure_in_remote_mode_is_fatal() {
    let dir = TempDir::new().unwrap();
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "rate-limited",
        vec![Interaction::new("remote", "fetch", json!({}), json!({"err": {"kind": "rate_limited"}}))],
    ));
    let command =
        Command::Remote { url: "octo/hello".into(), generate: GenerateArgs::default() };

    let err = dispatch_with_context(&command, &ctx, dir.path()).await.unwrap_err();
    assert!(err.contains("rate limit"), "{err}");
    assert!(!dir.path().join("README.md").exists());
}

#[tokio::test]
async fn llm_failure_is_reported_with_remediation() {
    let dir = TempDir::new().unwrap();
    write(&dir, "package.json", r#"{"name": "x"}"#);
    let ctx = ServiceContext::from_cassette(&Cassette::new(
        "bad-key",
        vec![
            git_origin(None),
            Interaction::new("llm", "complete", json!({}), json!({"err": "Anthropic API error (401): authentication_error: invalid x-api-key"})),
        ],
    ));

    let err = dispatch_with_context(&local_command(GenerateArgs::default()), &ctx, dir.path())
        .await
        .unwrap_err();
    assert!(err.contains("ANTHROPIC_API_KEY"), "{err}");
}

#[tokio::test]
async fn dockerfile_details_reach_the_prompt() {
    let dir = TempDir::new().unwrap();
    write(&dir, "Dockerfile", "FROM node:18\nEXPOSE 3000\n");
    let ctx = ServiceContext::from_cassette(&Cassette::new("docker", vec![]));

    let local = aggregate(ctx.fs.as_ref(), dir.path(), &default_extractors()).await;
    assert_eq!(local.project_type, ProjectType::Docker);
    let docker = local.docker().unwrap();
    assert_eq!(docker.base_image.as_deref(), Some("node:18"));
    assert_eq!(docker.exposed_port, Some(3000));

    let badges = synthesize(None, Some(&local), &BadgeOptions::default());
    let prompt = build_prompt(&PromptInput {
        remote: None,
        local: Some(&local),
        scan: None,
        badges: &badges,
        extra_instructions: None,
    });
    assert!(prompt.contains("Container exposes port 3000"));
    assert!(prompt.contains("Docker image based on node:18"));
}
