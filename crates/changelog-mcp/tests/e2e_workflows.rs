// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end workflow tests for changelog-mcp
//!
//! These tests drive the server the way an MCP client does, from
//! command-line configuration through tool calls.

mod test_utils;

use changelog_core::Changelog;
use clap::Parser;
use serde_json::{Map, Value, json};

use changelog_mcp::config::Config;
use changelog_mcp::handlers::{HandlerError, ToolDefaults};
use changelog_mcp::server::{ANALYZE_COMMITS, CONFIGURE_TEMPLATE, ChangelogServer, GENERATE_CHANGELOG};
use fixtures::{base_time, sample_repo};
use mcp_harness::{assert_section_contains, build_args};
use test_utils::TestGitRepo;

const DAY: i64 = 86_400;

async fn call(server: &ChangelogServer, tool: &str, args: Value) -> Result<String, HandlerError> {
    let args: Option<Map<String, Value>> = Some(build_args(args));
    server.call_tool(tool, args).await.expect("known tool")
}

// ============================================================================
// Workflow 1: Server Startup to First Changelog
// ============================================================================

/// Configure the server from the command line and generate a changelog
#[tokio::test]
async fn e2e_config_to_first_changelog() {
    let repo = sample_repo("e2e-first");

    // Step 1: Parse command-line configuration
    let config = Config::try_parse_from([
        "changelog-mcp",
        "--repository",
        &repo.path_str(),
        "--release-version",
        "0.2.0",
    ])
    .expect("valid arguments");
    config.validate().expect("valid configuration");

    // Step 2: Start the server from that configuration
    let server = ChangelogServer::from_config(&config);

    // Step 3: Generate with no arguments at all
    let out = server
        .call_tool(GENERATE_CHANGELOG, None)
        .await
        .expect("known tool")
        .expect("generate");

    assert!(out.starts_with("# Changelog (0.2.0)\n"));
    assert_section_contains(
        &out,
        "⚠️ Breaking Changes",
        "- 🐛 (auth) reject expired tokens [BREAKING]",
    );
}

/// Per-call arguments override server defaults
#[tokio::test]
async fn e2e_call_arguments_override_defaults() {
    let repo = sample_repo("e2e-override");
    let other = TestGitRepo::new("e2e-override-default");
    other.commit_as("chore: unrelated", "Dee", base_time().timestamp());

    let server = ChangelogServer::new(ToolDefaults {
        repository: Some(other.path().to_path_buf()),
        version: Some("0.0.1".to_string()),
    });

    let out = call(
        &server,
        GENERATE_CHANGELOG,
        json!({ "repository": repo.path_str(), "version": "0.3.0" }),
    )
    .await
    .expect("generate");

    assert!(out.starts_with("# Changelog (0.3.0)\n"));
    assert!(out.contains("add search endpoint"));
    assert!(!out.contains("unrelated"));
}

// ============================================================================
// Workflow 2: Release Cycle
// ============================================================================

/// Tag a release, keep committing, then build notes for the next release
#[tokio::test]
async fn e2e_release_cycle() {
    let repo = sample_repo("e2e-release");
    let last = base_time().timestamp() + 5 * DAY;
    let head = repo.commit_as("fix(cli): handle empty --json input", "Cat", last + DAY);
    repo.tag("v0.2.0", head);
    repo.commit_as("refactor(core): split renderer", "Ann", last + 2 * DAY);
    repo.commit_as("test: cover renderer edge cases", "Bob", last + 3 * DAY);

    let server = ChangelogServer::new(ToolDefaults {
        repository: Some(repo.path().to_path_buf()),
        version: None,
    });

    // Notes for v0.2.0 itself
    let v020 = call(
        &server,
        GENERATE_CHANGELOG,
        json!({ "from": "v0.1.0", "to": "v0.2.0", "version": "0.2.0", "includeStats": true }),
    )
    .await
    .expect("generate v0.2.0");
    assert!(v020.contains(" | 5 commits, 0 breaking_"));
    assert_section_contains(&v020, "🐛 Fix", "- 🐛 (cli) handle empty --json input");
    assert!(!v020.contains("split renderer"));

    // Unreleased work since v0.2.0
    let unreleased = call(&server, GENERATE_CHANGELOG, json!({ "from": "v0.2.0" }))
        .await
        .expect("generate unreleased");
    assert_section_contains(&unreleased, "♻️ Refactor", "- ♻️ (core) split renderer");
    assert_section_contains(&unreleased, "🧪 Test", "- 🧪 cover renderer edge cases");
    assert!(!unreleased.contains("handle empty --json input"));
}

/// Analyze and generate agree on the same range
#[tokio::test]
async fn e2e_analyze_matches_generate() {
    let repo = sample_repo("e2e-agree");
    let server = ChangelogServer::new(ToolDefaults {
        repository: Some(repo.path().to_path_buf()),
        version: None,
    });

    let args = json!({ "from": "v0.1.0" });
    let analysis = call(&server, ANALYZE_COMMITS, args.clone())
        .await
        .expect("analyze");
    let doc: Changelog = serde_json::from_str(&analysis).expect("JSON");

    let out = call(&server, GENERATE_CHANGELOG, args).await.expect("generate");
    for commit in doc.commits() {
        assert!(out.contains(&commit.title), "missing {}", commit.title);
    }
}

// ============================================================================
// Workflow 3: Templates Persist for the Server Lifetime
// ============================================================================

#[tokio::test]
async fn e2e_templates_persist_across_calls() {
    let server = ChangelogServer::new(ToolDefaults::default());

    call(&server, CONFIGURE_TEMPLATE, json!({ "name": "release", "template": "v1" }))
        .await
        .expect("first");
    call(&server, CONFIGURE_TEMPLATE, json!({ "name": "weekly", "template": "w" }))
        .await
        .expect("second");
    let text = call(&server, CONFIGURE_TEMPLATE, json!({ "name": "release", "template": "v2" }))
        .await
        .expect("third");

    let response: Value = serde_json::from_str(&text).expect("JSON");
    assert_eq!(response["replaced"], json!(true));
    assert_eq!(response["templates"], json!(["release", "weekly"]));

    let store = server.templates().await;
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("release"), Some("v2"));
}

// ============================================================================
// Workflow 4: Error Recovery
// ============================================================================

/// A repository without commits is reported as such
#[tokio::test]
async fn e2e_empty_repository() {
    let repo = TestGitRepo::new("e2e-empty");
    let server = ChangelogServer::new(ToolDefaults {
        repository: Some(repo.path().to_path_buf()),
        version: None,
    });

    let result = call(&server, GENERATE_CHANGELOG, json!({})).await;
    let err = result.expect_err("nothing to walk");
    assert!(err.to_string().contains("Repository has no commits"));
}

/// A failed call leaves the server usable
#[tokio::test]
async fn e2e_error_then_success() {
    let repo = sample_repo("e2e-recover");
    let server = ChangelogServer::new(ToolDefaults {
        repository: Some(repo.path().to_path_buf()),
        version: None,
    });

    let bad = call(&server, GENERATE_CHANGELOG, json!({ "format": "yaml" })).await;
    assert!(bad.is_err());

    let good = call(&server, GENERATE_CHANGELOG, json!({ "format": "text" }))
        .await
        .expect("generate");
    assert!(good.starts_with("Changelog\n"));
}

#[tokio::test]
async fn e2e_unknown_tool() {
    let server = ChangelogServer::new(ToolDefaults::default());
    assert!(server.call_tool("summarize_commits", None).await.is_none());
}
