// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Classified changelog entries

use chrono::{DateTime, Utc};
use changelog_git::RawCommit;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::classify::classify;

/// A commit after classification, the unit the changelog is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogCommit {
    /// The commit SHA
    pub sha: String,
    /// Change category
    pub category: Category,
    /// Subsystem the change applies to
    pub scope: Option<String>,
    /// Single-line summary
    pub title: String,
    /// Longer description
    pub body: Option<String>,
    /// Whether this is an incompatible change
    pub breaking: bool,
    /// Author display name
    pub author: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Linked change-request number
    pub pr_number: Option<u64>,
    /// Permalink to the commit
    pub url: String,
}

impl ChangelogCommit {
    /// Classify a raw commit
    ///
    /// A trailing `(#N)` reference to the linked change request is dropped
    /// from the title, since renderers print the number separately.
    #[must_use]
    pub fn from_raw(raw: &RawCommit) -> Self {
        let classification = classify(&raw.message);
        let title = match raw.pr_number {
            Some(number) => strip_request_suffix(&classification.title, number),
            None => classification.title,
        };
        Self {
            sha: raw.sha.clone(),
            category: classification.category,
            scope: classification.scope,
            title,
            body: classification.body,
            breaking: classification.breaking,
            author: raw.author.clone(),
            timestamp: raw.timestamp,
            pr_number: raw.pr_number,
            url: raw.url.clone(),
        }
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }
}

fn strip_request_suffix(title: &str, number: u64) -> String {
    title
        .strip_suffix(&format!("(#{number})"))
        .map(str::trim_end)
        .filter(|t| !t.is_empty())
        .unwrap_or(title)
        .to_string()
}
