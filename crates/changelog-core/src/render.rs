// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Changelog rendering
//!
//! Three encodings are supported:
//! - `markdown`: headings per group with emoji, one bullet per commit
//! - `json`: the [`Changelog`] document, serialized as-is
//! - `text`: the Markdown output with heading and bullet markers stripped

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{Changelog, GroupBy, GroupKey, Statistics, group};
use crate::category::Category;
use crate::commit::ChangelogCommit;
use crate::error::ChangelogError;

/// Emoji in front of scope section headings
pub const SCOPE_EMOJI: &str = "📦";
/// Emoji in front of author section headings
pub const AUTHOR_EMOJI: &str = "👤";
/// Emoji in front of the statistics heading
pub const STATS_EMOJI: &str = "📊";

/// Output encoding of a rendered changelog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown document
    #[default]
    Markdown,
    /// Pretty-printed JSON document
    Json,
    /// Plain text
    Text,
}

impl OutputFormat {
    /// Lowercase identifier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(ChangelogError::InvalidFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Options controlling how a changelog is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Section grouping (ignored by JSON)
    pub group_by: GroupBy,
    /// Output encoding
    pub format: OutputFormat,
    /// Append statistics (ignored by JSON, which mirrors the document)
    pub include_stats: bool,
}

impl RenderOptions {
    /// Set the grouping mode
    #[must_use]
    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    /// Set the output encoding
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable the statistics section
    #[must_use]
    pub fn with_stats(mut self) -> Self {
        self.include_stats = true;
        self
    }
}

/// Render a changelog document
///
/// # Errors
///
/// Returns `ChangelogError::Json` if JSON serialization fails.
pub fn render(doc: &Changelog, options: &RenderOptions) -> Result<String, ChangelogError> {
    debug!(
        format = %options.format,
        group_by = %options.group_by,
        commits = doc.len(),
        "Rendering changelog"
    );
    match options.format {
        OutputFormat::Markdown => Ok(render_markdown(doc, options)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
        OutputFormat::Text => Ok(render_text(doc, options)),
    }
}

// ============================================================================
// Markdown
// ============================================================================

fn render_markdown(doc: &Changelog, options: &RenderOptions) -> String {
    let computed;
    let stats = match (&doc.statistics, options.include_stats) {
        (_, false) => None,
        (Some(stats), true) => Some(stats),
        (None, true) => {
            computed = Statistics::compute(doc.commits());
            Some(&computed)
        }
    };
    let show_scope = options.group_by != GroupBy::Scope;

    let mut lines = Vec::new();
    match doc.version {
        Some(ref version) => lines.push(format!("# Changelog ({version})")),
        None => lines.push("# Changelog".to_string()),
    }
    lines.push(String::new());

    let date = doc.generated_at.format("%Y-%m-%d");
    match stats {
        Some(stats) => lines.push(format!(
            "_Generated on {date} | {} commits, {} breaking_",
            stats.total, stats.breaking
        )),
        None => lines.push(format!("_Generated on {date}_")),
    }

    if doc.is_empty() {
        lines.push(String::new());
        lines.push("_No changes in this range._".to_string());
    }

    if !doc.breaking_changes.is_empty() {
        push_section(
            &mut lines,
            &format!("{} Breaking Changes", Category::Breaking.emoji()),
            doc.breaking_changes.iter(),
            show_scope,
        );
    }

    for g in group(doc, options.group_by) {
        let heading = match g.key {
            GroupKey::Category(Category::Breaking) => continue,
            GroupKey::Category(category) => format!("{} {}", category.emoji(), category.name()),
            GroupKey::Scope(scope) => format!("{SCOPE_EMOJI} {scope}"),
            GroupKey::Author(author) => format!("{AUTHOR_EMOJI} {author}"),
        };
        push_section(&mut lines, &heading, g.commits.into_iter(), show_scope);
    }

    if let Some(stats) = stats {
        push_statistics(&mut lines, stats);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_section<'a>(
    lines: &mut Vec<String>,
    heading: &str,
    commits: impl Iterator<Item = &'a ChangelogCommit>,
    show_scope: bool,
) {
    lines.push(String::new());
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    for commit in commits {
        lines.push(commit_line(commit, show_scope));
        if let Some(ref body) = commit.body {
            lines.extend(body.lines().map(|line| {
                if line.trim().is_empty() {
                    String::new()
                } else {
                    format!("  {line}")
                }
            }));
        }
    }
}

/// `- <emoji> [(scope) ]<title>[ [BREAKING]][ (#N)]`
fn commit_line(commit: &ChangelogCommit, show_scope: bool) -> String {
    let mut line = format!("- {} ", commit.category.emoji());
    if show_scope {
        if let Some(ref scope) = commit.scope {
            line.push_str(&format!("({scope}) "));
        }
    }
    line.push_str(&commit.title);
    if commit.breaking {
        line.push_str(" [BREAKING]");
    }
    if let Some(number) = commit.pr_number {
        line.push_str(&format!(" (#{number})"));
    }
    line
}

fn push_statistics(lines: &mut Vec<String>, stats: &Statistics) {
    lines.push(String::new());
    lines.push(format!("## {STATS_EMOJI} Statistics"));

    lines.push(String::new());
    lines.push("### By Category".to_string());
    lines.push(String::new());
    lines.extend(
        stats
            .by_category
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| {
                format!("- {} {}: {count}", category.emoji(), category.name())
            }),
    );

    let scopes = stats.scopes_by_count();
    if !scopes.is_empty() {
        lines.push(String::new());
        lines.push("### By Scope".to_string());
        lines.push(String::new());
        lines.extend(scopes.iter().map(|(scope, count)| format!("- {scope}: {count}")));
    }

    let authors = stats.authors_by_count();
    if !authors.is_empty() {
        lines.push(String::new());
        lines.push("### By Author".to_string());
        lines.push(String::new());
        lines.extend(
            authors
                .iter()
                .map(|(author, count)| format!("- {author}: {count}")),
        );
    }
}

// ============================================================================
// Plain text
// ============================================================================

fn render_text(doc: &Changelog, options: &RenderOptions) -> String {
    let markdown = render_markdown(doc, options);
    markdown
        .lines()
        .map(strip_markup)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Remove a leading heading marker (`#`, `##`, ...) and a leading list bullet
fn strip_markup(line: &str) -> &str {
    let line = if line.starts_with('#') {
        line.trim_start_matches('#').trim_start()
    } else {
        line
    };
    ["- ", "* "]
        .iter()
        .find_map(|bullet| line.strip_prefix(bullet))
        .map_or(line, str::trim_start)
}
