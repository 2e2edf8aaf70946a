// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! MCP server implementation for changelog-mcp
//!
//! This module provides the MCP server that exposes changelog generation,
//! commit analysis and template registration to LLMs via MCP tool calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::McpServer;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams, RpcError,
    TextContent, Tool, ToolInputSchema, schema_utils::CallToolError,
};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::handlers::{self, HandlerError, ToolDefaults};
use crate::templates::TemplateStore;

/// Tool name: render a changelog
pub const GENERATE_CHANGELOG: &str = "generate_changelog";
/// Tool name: JSON analysis with statistics
pub const ANALYZE_COMMITS: &str = "analyze_commits";
/// Tool name: register a named template
pub const CONFIGURE_TEMPLATE: &str = "configure_template";

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// Schema properties shared by the changelog tools
fn range_properties() -> Value {
    json!({
        "repository": {
            "type": "string",
            "description": "Path to the git repository (defaults to the server's repository)"
        },
        "from": {
            "type": "string",
            "description": "Older ref (tag, branch or SHA); its commits are excluded"
        },
        "to": {
            "type": "string",
            "default": "HEAD",
            "description": "Newer ref (tag, branch or SHA)"
        },
        "since": {
            "type": "string",
            "description": "Earliest commit date, RFC 3339 or YYYY-MM-DD"
        },
        "until": {
            "type": "string",
            "description": "Latest commit date, RFC 3339 or YYYY-MM-DD"
        },
        "limit": {
            "type": "integer",
            "description": "Maximum commits to include (optional)"
        },
        "version": {
            "type": "string",
            "description": "Release label, e.g. 1.4.0"
        },
        "pullRequests": {
            "type": "array",
            "description": "Linked pull requests used to classify commits without a conventional prefix",
            "items": {
                "type": "object",
                "required": ["number", "title"],
                "properties": {
                    "number": { "type": "integer" },
                    "title": { "type": "string" },
                    "labels": { "type": "array", "items": { "type": "string" } },
                    "body": { "type": "string" }
                }
            }
        }
    })
}

/// The main changelog MCP server handler
///
/// The template store is wrapped in a Mutex to satisfy the `Sync` requirement.
pub struct ChangelogServer {
    /// Named templates registered through `configure_template`
    templates: Arc<Mutex<TemplateStore>>,
    /// Fallbacks for arguments a call leaves out
    defaults: ToolDefaults,
}

impl ChangelogServer {
    /// Create a new changelog server
    ///
    /// # Arguments
    ///
    /// * `defaults` - Default repository and release label for tool calls
    #[must_use]
    pub fn new(defaults: ToolDefaults) -> Self {
        Self {
            templates: Arc::new(Mutex::new(TemplateStore::new())),
            defaults,
        }
    }

    /// Create a server from command-line configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ToolDefaults {
            repository: config.repository_path(),
            version: config.release_version.clone(),
        })
    }

    /// Get access to the template store (async, requires await)
    pub async fn templates(&self) -> tokio::sync::MutexGuard<'_, TemplateStore> {
        self.templates.lock().await
    }

    /// Get the tool defaults
    #[must_use]
    pub fn defaults(&self) -> &ToolDefaults {
        &self.defaults
    }

    /// Run a tool by name, returning its text payload
    ///
    /// Returns `None` if no tool has that name.
    pub async fn call_tool(
        &self,
        name: &str,
        args: Option<Map<String, Value>>,
    ) -> Option<Result<String, HandlerError>> {
        let result = match name {
            GENERATE_CHANGELOG => handlers::handle_generate(args, &self.defaults),
            ANALYZE_COMMITS => handlers::handle_analyze(args, &self.defaults),
            CONFIGURE_TEMPLATE => {
                let mut store = self.templates.lock().await;
                handlers::handle_configure_template(&mut store, args).and_then(|response| {
                    serde_json::to_string_pretty(&response).map_err(HandlerError::from)
                })
            }
            _ => return None,
        };
        Some(result)
    }

    /// Build the list of available tools
    pub fn build_tools() -> Vec<Tool> {
        vec![
            Self::generate_tool(),
            Self::analyze_tool(),
            Self::configure_template_tool(),
        ]
    }

    fn generate_tool() -> Tool {
        let mut properties = make_properties(range_properties());
        properties.extend(make_properties(json!({
            "groupBy": {
                "type": "string",
                "enum": ["category", "scope", "author"],
                "default": "category",
                "description": "How to group commits into sections"
            },
            "format": {
                "type": "string",
                "enum": ["markdown", "json", "text"],
                "default": "markdown",
                "description": "Output format"
            },
            "includeStats": {
                "type": "boolean",
                "default": false,
                "description": "Append commit statistics"
            }
        })));

        Tool {
            name: GENERATE_CHANGELOG.into(),
            description: Some(
                "Generate a changelog for a commit range. Commits are classified by their \
                 conventional-commit prefix, with breaking changes listed first."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(vec![], Some(properties), None),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Generate Changelog".into()),
        }
    }

    fn analyze_tool() -> Tool {
        Tool {
            name: ANALYZE_COMMITS.into(),
            description: Some(
                "Classify the commits in a range and return the changelog document as JSON, \
                 including per-category, per-scope and per-author statistics."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec![],
                Some(make_properties(range_properties())),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Analyze Commits".into()),
        }
    }

    fn configure_template_tool() -> Tool {
        Tool {
            name: CONFIGURE_TEMPLATE.into(),
            description: Some(
                "Register a named changelog template. Templates are kept in memory for the \
                 lifetime of the server."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec!["name".into(), "template".into()],
                Some(make_properties(json!({
                    "name": {
                        "type": "string",
                        "description": "Template name"
                    },
                    "template": {
                        "type": "string",
                        "description": "Template text, stored as-is"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Configure Template".into()),
        }
    }
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for ChangelogServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        debug!(tool = %params.name, "Calling tool");

        match self.call_tool(&params.name, params.arguments).await {
            Some(Ok(text)) => Ok(CallToolResult::text_content(vec![TextContent::new(
                text, None, None,
            )])),
            Some(Err(e)) => {
                warn!(tool = %params.name, error = %e, "Tool call failed");
                let mut result =
                    CallToolResult::text_content(vec![TextContent::new(e.to_string(), None, None)]);
                result.is_error = Some(true);
                Ok(result)
            }
            None => Err(CallToolError::unknown_tool(&params.name)),
        }
    }
}
