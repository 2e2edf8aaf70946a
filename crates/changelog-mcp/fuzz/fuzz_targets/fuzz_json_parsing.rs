// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

#![no_main]

//! Fuzz target for JSON parsing
//!
//! This target tests that arbitrary bytes never cause panics
//! when parsed as JSON for tool arguments.

use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

use changelog_mcp::handlers::{AnalyzeInput, ConfigureTemplateInput, GenerateInput};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _: Result<Value, _> = serde_json::from_str(s);

        // Try to parse as each input type
        let _: Result<GenerateInput, _> = serde_json::from_str(s);
        let _: Result<AnalyzeInput, _> = serde_json::from_str(s);
        let _: Result<ConfigureTemplateInput, _> = serde_json::from_str(s);

        let _: Result<Map<String, Value>, _> = serde_json::from_str(s);
    }

    let _: Result<Value, _> = serde_json::from_slice(data);
});
