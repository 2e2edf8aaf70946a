// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

#![no_main]

//! Fuzz target for tool argument handling
//!
//! Structured arguments are fed to the handlers against a repository path
//! that does not exist, so every call must end in an error, never a panic.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value, json};

use changelog_mcp::handlers::{self, ToolDefaults};
use changelog_mcp::templates::TemplateStore;

#[derive(Debug, Arbitrary)]
struct ToolArgs {
    from: Option<String>,
    to: Option<String>,
    since: Option<String>,
    until: Option<String>,
    limit: Option<u32>,
    group_by: Option<String>,
    format: Option<String>,
    include_stats: Option<bool>,
    name: String,
    template: String,
}

fn to_map(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        _ => None,
    }
}

fuzz_target!(|args: ToolArgs| {
    let defaults = ToolDefaults {
        repository: Some("/nonexistent/changelog-fuzz".into()),
        version: None,
    };

    let generate = to_map(json!({
        "from": args.from,
        "to": args.to,
        "since": args.since,
        "until": args.until,
        "limit": args.limit,
        "groupBy": args.group_by,
        "format": args.format,
        "includeStats": args.include_stats,
    }));
    assert!(handlers::handle_generate(generate.clone(), &defaults).is_err());
    assert!(handlers::handle_analyze(generate, &defaults).is_err());

    let mut store = TemplateStore::new();
    let configure = to_map(json!({ "name": args.name, "template": args.template }));
    if handlers::handle_configure_template(&mut store, configure).is_ok() {
        assert_eq!(store.len(), 1);
    }
});
