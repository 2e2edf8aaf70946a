// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Enrichment from linked change requests
//!
//! Commits whose message gave no usable category (`Category::Other`) can be
//! refined from the labels, title and description of the change request they
//! reference. Confidently classified commits are never touched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::Category;
use crate::commit::ChangelogCommit;

/// Label rules in priority order; the first rule matching any label wins
const LABEL_RULES: [(&[&str], Category); 8] = [
    (&["breaking"], Category::Breaking),
    (&["feature"], Category::Feature),
    (&["bug", "fix"], Category::Fix),
    (&["doc"], Category::Docs),
    (&["perf"], Category::Perf),
    (&["refactor"], Category::Refactor),
    (&["test"], Category::Test),
    (&["build"], Category::Build),
];

/// Metadata of a linked change request (pull/merge request)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Change request number
    pub number: u64,
    /// Change request title
    pub title: String,
    /// Free-text labels
    #[serde(default)]
    pub labels: Vec<String>,
    /// Change request description
    #[serde(default)]
    pub body: Option<String>,
}

/// Lookup of change requests by number
///
/// `None` means the request could not be found; enrichment then skips the
/// commit.
pub trait ChangeRequestSource {
    /// Find the change request with the given number
    fn change_request(&self, number: u64) -> Option<ChangeRequest>;
}

impl ChangeRequestSource for HashMap<u64, ChangeRequest> {
    fn change_request(&self, number: u64) -> Option<ChangeRequest> {
        self.get(&number).cloned()
    }
}

impl ChangeRequestSource for [ChangeRequest] {
    fn change_request(&self, number: u64) -> Option<ChangeRequest> {
        self.iter().find(|r| r.number == number).cloned()
    }
}

impl ChangeRequestSource for Vec<ChangeRequest> {
    fn change_request(&self, number: u64) -> Option<ChangeRequest> {
        self.as_slice().change_request(number)
    }
}

/// Merge change-request metadata into a commit.
///
/// Only applies to commits in `Category::Other`. Returns whether the merge
/// was applied. Applying the same request twice has no further effect.
pub fn merge(commit: &mut ChangelogCommit, request: &ChangeRequest) -> bool {
    if commit.category != Category::Other {
        return false;
    }

    let labels: Vec<String> = request.labels.iter().map(|l| l.to_lowercase()).collect();
    let matched = LABEL_RULES.iter().find(|(needles, _)| {
        needles
            .iter()
            .any(|needle| labels.iter().any(|label| label.contains(needle)))
    });
    if let Some((_, category)) = matched {
        commit.category = *category;
        if *category == Category::Breaking {
            commit.breaking = true;
        }
    }

    let title = request.title.trim();
    if title.chars().count() > commit.title.chars().count() {
        commit.title = title.to_string();
    }

    if commit.body.is_none() {
        commit.body = request
            .body
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);
    }

    true
}

/// Enrich every unclassified commit that links a change request.
///
/// Returns the number of commits that were merged.
pub fn enrich<S>(commits: &mut [ChangelogCommit], source: &S) -> usize
where
    S: ChangeRequestSource + ?Sized,
{
    let mut enriched = 0;
    for commit in commits.iter_mut() {
        if commit.category != Category::Other {
            continue;
        }
        let Some(number) = commit.pr_number else {
            continue;
        };
        match source.change_request(number) {
            Some(request) => {
                if merge(commit, &request) {
                    enriched += 1;
                }
            }
            None => debug!(
                number,
                sha = commit.short_sha(),
                "Change request not found, skipping enrichment"
            ),
        }
    }
    enriched
}
