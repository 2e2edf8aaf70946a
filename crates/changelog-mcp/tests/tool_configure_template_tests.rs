// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for the configure_template MCP tool handler


use serde_json::{Value, json};

use mcp_harness::{McpTestHarness, assert_invalid_input_error};

#[test]
fn test_configure_new_template() {
    let mut harness = McpTestHarness::without_repository();

    let response = harness
        .configure_template("release", "## {{version}}\n\n{{changes}}")
        .expect("configure");

    assert_eq!(response.name, "release");
    assert!(!response.replaced);
    assert_eq!(response.message, "Template 'release' saved");
    assert_eq!(response.templates, vec!["release".to_string()]);
    assert_eq!(
        harness.templates().get("release"),
        Some("## {{version}}\n\n{{changes}}")
    );
}

#[test]
fn test_configure_replaces_existing_template() {
    let mut harness = McpTestHarness::without_repository();
    harness.configure_template("weekly", "v1").expect("first");

    let response = harness.configure_template("weekly", "v2").expect("second");

    assert!(response.replaced);
    assert_eq!(response.message, "Template 'weekly' updated");
    assert_eq!(harness.templates().len(), 1);
    assert_eq!(harness.templates().get("weekly"), Some("v2"));
}

#[test]
fn test_configure_lists_templates_sorted() {
    let mut harness = McpTestHarness::without_repository();
    harness.configure_template("weekly", "w").expect("weekly");
    harness.configure_template("alpha", "a").expect("alpha");

    let response = harness.configure_template("release", "r").expect("release");
    assert_eq!(
        response.templates,
        vec!["alpha".to_string(), "release".to_string(), "weekly".to_string()]
    );
}

#[test]
fn test_configure_trims_name() {
    let mut harness = McpTestHarness::without_repository();
    let response = harness
        .configure_template("  release\t", "body")
        .expect("configure");

    assert_eq!(response.name, "release");
    assert_eq!(harness.templates().get("release"), Some("body"));
}

#[test]
fn test_configure_keeps_template_verbatim() {
    let mut harness = McpTestHarness::without_repository();
    let body = "  {{#each changes}}\n- {{title}}\n{{/each}}  \n";
    harness.configure_template("loop", body).expect("configure");
    assert_eq!(harness.templates().get("loop"), Some(body));
}

#[test]
fn test_configure_accepts_empty_template() {
    let mut harness = McpTestHarness::without_repository();
    let response = harness.configure_template("blank", "").expect("configure");
    assert!(!response.replaced);
    assert_eq!(harness.templates().get("blank"), Some(""));
}

#[test]
fn test_configure_empty_name() {
    let mut harness = McpTestHarness::without_repository();
    assert_invalid_input_error(harness.configure_template("   ", "body"));
    assert!(harness.templates().is_empty());
}

#[test]
fn test_configure_missing_fields() {
    let mut harness = McpTestHarness::without_repository();

    assert_invalid_input_error(harness.invoke_with_json(
        "configure_template",
        json!({ "name": "release" }),
    ));
    assert_invalid_input_error(harness.invoke_with_json(
        "configure_template",
        json!({ "template": "x" }),
    ));
    assert_invalid_input_error(harness.invoke_raw("configure_template", None));
}

#[test]
fn test_configure_wrong_types() {
    let mut harness = McpTestHarness::without_repository();
    assert_invalid_input_error(harness.invoke_with_json(
        "configure_template",
        json!({ "name": 7, "template": "x" }),
    ));
}

#[test]
fn test_configure_response_json() {
    let mut harness = McpTestHarness::without_repository();
    let text = harness
        .invoke_with_json(
            "configure_template",
            json!({ "name": "release", "template": "x" }),
        )
        .expect("configure");

    let value: Value = serde_json::from_str(&text).expect("JSON response");
    assert_eq!(value["name"], json!("release"));
    assert_eq!(value["replaced"], json!(false));
    assert_eq!(value["templates"], json!(["release"]));
}
