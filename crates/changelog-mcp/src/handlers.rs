// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool, bridging
//! MCP requests to the changelog pipeline and returning formatted responses.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use changelog_core::{
    ChangeRequest, Changelog, ChangelogCommit, ChangelogError, GroupBy, OutputFormat,
    RenderOptions, enrich, render,
};
use changelog_git::{CommitSource, GitError, GitRepo, RangeOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::templates::TemplateStore;

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid input - missing or malformed field
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// Repository access failed
    #[error("{0}. Check that the repository path and the 'from'/'to' refs exist.")]
    Git(#[from] GitError),

    /// Rendering or option parsing failed
    #[error("{0}")]
    Changelog(#[from] ChangelogError),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Input Types
// ============================================================================

/// Commit selection and enrichment arguments shared by the changelog tools
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeInput {
    /// Repository path (falls back to the server default)
    pub repository: Option<String>,
    /// Older ref, excluded from the range
    pub from: Option<String>,
    /// Newer ref, defaults to HEAD
    pub to: Option<String>,
    /// Earliest commit date (RFC 3339 or YYYY-MM-DD)
    pub since: Option<String>,
    /// Latest commit date (RFC 3339 or YYYY-MM-DD)
    pub until: Option<String>,
    /// Maximum commits to include
    pub limit: Option<usize>,
    /// Linked pull requests used to enrich unclassified commits
    #[serde(default)]
    pub pull_requests: Vec<ChangeRequest>,
}

/// Input for the generate_changelog tool
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    /// Commit selection
    #[serde(flatten)]
    pub range: RangeInput,
    /// Section grouping: "category", "scope" or "author"
    #[serde(default = "default_group_by")]
    pub group_by: String,
    /// Output format: "markdown", "json" or "text"
    #[serde(default = "default_format")]
    pub format: String,
    /// Append statistics
    #[serde(default)]
    pub include_stats: bool,
    /// Release label for the heading
    pub version: Option<String>,
}

fn default_group_by() -> String {
    "category".to_string()
}

fn default_format() -> String {
    "markdown".to_string()
}

/// Input for the analyze_commits tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeInput {
    /// Commit selection
    #[serde(flatten)]
    pub range: RangeInput,
    /// Release label recorded in the document
    pub version: Option<String>,
}

/// Input for the configure_template tool
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureTemplateInput {
    /// Template name
    pub name: String,
    /// Template body, stored as-is
    pub template: String,
}

// ============================================================================
// Output Types
// ============================================================================

/// Response from the configure_template tool
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    /// Name the template was stored under
    pub name: String,
    /// Whether an existing template was replaced
    pub replaced: bool,
    /// Names of all registered templates
    pub templates: Vec<String>,
    /// Human-readable message
    pub message: String,
}

/// Server-level fallbacks for arguments a tool call leaves out
#[derive(Debug, Clone, Default)]
pub struct ToolDefaults {
    /// Repository used when the call has no `repository`
    pub repository: Option<PathBuf>,
    /// Release label used when the call has no `version`
    pub version: Option<String>,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args
        .map(Value::Object)
        .unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

/// Parse a date argument
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. A plain date
/// means the start of that day, or its last second when `end_of_day` is set.
fn parse_date(field: &str, value: &str, end_of_day: bool) -> Result<DateTime<Utc>, HandlerError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        HandlerError::InvalidInput(format!(
            "'{field}' must be an RFC 3339 timestamp or a YYYY-MM-DD date, got '{value}'"
        ))
    })?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default()
    } else {
        NaiveTime::default()
    };
    Ok(date.and_time(time).and_utc())
}

impl RangeInput {
    /// Convert to git range options, validating dates and limit
    ///
    /// # Errors
    ///
    /// Returns `HandlerError::InvalidInput` for unparsable dates, an inverted
    /// date window or a zero limit.
    pub fn to_options(&self) -> Result<RangeOptions, HandlerError> {
        let mut options = RangeOptions::default();
        if let Some(ref from) = self.from {
            options = options.from(from);
        }
        if let Some(ref to) = self.to {
            options = options.to(to);
        }
        if let Some(ref since) = self.since {
            options = options.since(parse_date("since", since, false)?);
        }
        if let Some(ref until) = self.until {
            options = options.until(parse_date("until", until, true)?);
        }
        if let (Some(since), Some(until)) = (options.since, options.until) {
            if since > until {
                return Err(HandlerError::InvalidInput(
                    "'since' must not be later than 'until'".to_string(),
                ));
            }
        }
        match self.limit {
            Some(0) => {
                return Err(HandlerError::InvalidInput(
                    "'limit' must be greater than zero".to_string(),
                ));
            }
            limit => options.limit = limit,
        }
        Ok(options)
    }

    /// Resolve the repository path from the input or the server default
    fn repository_path(&self, defaults: &ToolDefaults) -> Result<PathBuf, HandlerError> {
        self.repository
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(PathBuf::from)
            .or_else(|| defaults.repository.clone())
            .ok_or_else(|| {
                HandlerError::InvalidInput(
                    "No repository given. Pass 'repository' or start the server with --repository"
                        .to_string(),
                )
            })
    }
}

/// Retrieve, classify and enrich the commits selected by `range`
///
/// # Errors
///
/// Returns an error if the range is invalid or retrieval fails.
pub fn collect_commits<S>(source: &S, range: &RangeInput) -> Result<Vec<ChangelogCommit>, HandlerError>
where
    S: CommitSource + ?Sized,
{
    let options = range.to_options()?;
    let raw = source.commits(&options)?;
    let mut commits: Vec<ChangelogCommit> = raw.iter().map(ChangelogCommit::from_raw).collect();

    if !range.pull_requests.is_empty() {
        let enriched = enrich(&mut commits, &range.pull_requests);
        debug!(
            enriched,
            requests = range.pull_requests.len(),
            "Applied pull request metadata"
        );
    }

    Ok(commits)
}

fn pick_version(version: Option<&str>, defaults: &ToolDefaults) -> Option<String> {
    version
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| defaults.version.clone())
}

fn open_repository(path: &Path) -> Result<GitRepo, HandlerError> {
    debug!(repository = %path.display(), "Opening repository");
    Ok(GitRepo::discover(path)?)
}

/// Generate a changelog from any commit source
///
/// Options are validated before any commits are retrieved.
///
/// # Errors
///
/// Returns an error for an unknown format or grouping, an invalid range,
/// or a retrieval failure.
pub fn generate_changelog<S>(
    source: &S,
    input: &GenerateInput,
    defaults: &ToolDefaults,
    generated_at: DateTime<Utc>,
) -> Result<String, HandlerError>
where
    S: CommitSource + ?Sized,
{
    let options = RenderOptions {
        group_by: input.group_by.parse::<GroupBy>()?,
        format: input.format.parse::<OutputFormat>()?,
        include_stats: input.include_stats,
    };

    let commits = collect_commits(source, &input.range)?;
    let version = pick_version(input.version.as_deref(), defaults);
    let doc = Changelog::build(&commits, version, options.include_stats, generated_at);

    info!(
        commits = doc.len(),
        breaking = doc.breaking_changes.len(),
        format = %options.format,
        "Generated changelog"
    );
    Ok(render(&doc, &options)?)
}

/// Analyze commits from any commit source
///
/// Always produces the JSON document with statistics.
///
/// # Errors
///
/// Returns an error for an invalid range or a retrieval failure.
pub fn analyze_commits<S>(
    source: &S,
    input: &AnalyzeInput,
    defaults: &ToolDefaults,
    generated_at: DateTime<Utc>,
) -> Result<String, HandlerError>
where
    S: CommitSource + ?Sized,
{
    let commits = collect_commits(source, &input.range)?;
    let version = pick_version(input.version.as_deref(), defaults);
    let doc = Changelog::build(&commits, version, true, generated_at);

    info!(commits = doc.len(), "Analyzed commits");
    let options = RenderOptions::default().format(OutputFormat::Json).with_stats();
    Ok(render(&doc, &options)?)
}

/// Handle the generate_changelog tool
///
/// Opens the requested repository and renders its changelog.
pub fn handle_generate(
    args: Option<Map<String, Value>>,
    defaults: &ToolDefaults,
) -> Result<String, HandlerError> {
    let input: GenerateInput = parse_input(args)?;
    // Reject bad options before touching the repository
    input.group_by.parse::<GroupBy>()?;
    input.format.parse::<OutputFormat>()?;

    let repo = open_repository(&input.range.repository_path(defaults)?)?;
    generate_changelog(&repo, &input, defaults, Utc::now())
}

/// Handle the analyze_commits tool
///
/// Returns the changelog document as JSON with statistics.
pub fn handle_analyze(
    args: Option<Map<String, Value>>,
    defaults: &ToolDefaults,
) -> Result<String, HandlerError> {
    let input: AnalyzeInput = parse_input(args)?;
    let repo = open_repository(&input.range.repository_path(defaults)?)?;
    analyze_commits(&repo, &input, defaults, Utc::now())
}

/// Handle the configure_template tool
///
/// Stores the template under its name, replacing any previous one.
pub fn handle_configure_template(
    store: &mut TemplateStore,
    args: Option<Map<String, Value>>,
) -> Result<TemplateResponse, HandlerError> {
    let input: ConfigureTemplateInput = parse_input(args)?;

    let name = input.name.trim();
    if name.is_empty() {
        return Err(HandlerError::InvalidInput(
            "Template name cannot be empty. Provide a name like 'release' or 'weekly'."
                .to_string(),
        ));
    }

    let replaced = store.insert(name, input.template).is_some();
    let message = if replaced {
        format!("Template '{name}' updated")
    } else {
        format!("Template '{name}' saved")
    };
    info!(template = name, replaced, "Configured template");

    Ok(TemplateResponse {
        name: name.to_string(),
        replaced,
        templates: store.names().map(str::to_string).collect(),
        message,
    })
}

// ============================================================================
// Tests
// ============================================================================
