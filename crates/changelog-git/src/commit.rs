// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Raw commit records and linked change-request extraction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as retrieved from the repository, before classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Permalink to the commit
    pub url: String,
    /// Linked change-request number, if the subject references one
    pub pr_number: Option<u64>,
}

impl RawCommit {
    /// Build a raw commit, extracting the linked change-request number from
    /// the message subject
    #[must_use]
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
        url: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let pr_number = extract_pr_number(&message);
        Self {
            sha: sha.into(),
            message,
            author: author.into(),
            timestamp,
            url: url.into(),
            pr_number,
        }
    }

    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Extract a linked change-request number from a commit message subject.
///
/// The parenthesized form `(#123)` wins over a trailing `#123`, so
/// `"fix: thing #4 (#12)"` links to 12.
#[must_use]
pub fn extract_pr_number(message: &str) -> Option<u64> {
    let subject = message.lines().next().unwrap_or("").trim_end();
    parenthesized_number(subject).or_else(|| trailing_number(subject))
}

fn parenthesized_number(text: &str) -> Option<u64> {
    let mut rest = text;
    while let Some(start) = rest.find("(#") {
        let after = &rest[start + 2..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && after[digits..].starts_with(')') {
            return after[..digits].parse().ok();
        }
        rest = after;
    }
    None
}

fn trailing_number(text: &str) -> Option<u64> {
    let digits = text.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let (head, number) = text.split_at(text.len() - digits);
    if head.ends_with('#') {
        number.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn sample_commit() -> RawCommit {
        RawCommit::new(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb",
            "feat(skills): add milestone-creator (#42)\n\nDetailed description here.",
            "Test Author",
            Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap(),
            "https://github.com/acme/widgets/commit/1945ab9c752534e733c38ba0109dc3b741f0a6eb",
        )
    }

    #[test]
    fn test_new_extracts_pr_number() {
        let commit = sample_commit();
        assert_eq!(commit.pr_number, Some(42));
    }

    #[test]
    fn test_commit_serialization_roundtrip() {
        let commit = sample_commit();
        let json = serde_json::to_string(&commit).expect("serialize");
        let deserialized: RawCommit = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(commit, deserialized);
    }

    #[test]
    fn test_timestamp_iso8601_serialization() {
        let commit = sample_commit();
        let json = serde_json::to_string(&commit).expect("serialize");
        assert!(json.contains("2026-01-17T02:33:06Z"));
    }

    #[test]
    fn test_is_valid_sha() {
        assert!(RawCommit::is_valid_sha(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb"
        ));
        assert!(!RawCommit::is_valid_sha("1945ab9"));
        assert!(!RawCommit::is_valid_sha(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eg"
        ));
        assert!(!RawCommit::is_valid_sha(""));
    }

    #[test]
    fn test_short_sha() {
        let mut commit = sample_commit();
        assert_eq!(commit.short_sha(), "1945ab9");
        commit.sha = "abc".to_string();
        assert_eq!(commit.short_sha(), "abc");
    }

    #[test]
    fn test_subject() {
        let mut commit = sample_commit();
        assert_eq!(commit.subject(), "feat(skills): add milestone-creator (#42)");
        commit.message = String::new();
        assert_eq!(commit.subject(), "");
    }

    #[test]
    fn test_extract_parenthesized() {
        assert_eq!(extract_pr_number("fix: handle nulls (#123)"), Some(123));
        assert_eq!(extract_pr_number("Merge (#7) into main"), Some(7));
    }

    #[test]
    fn test_extract_trailing() {
        assert_eq!(extract_pr_number("fix: handle nulls #88"), Some(88));
        assert_eq!(extract_pr_number("fix: handle nulls #88   "), Some(88));
    }

    #[test]
    fn test_extract_parenthesized_takes_precedence() {
        assert_eq!(extract_pr_number("fix: close #4 (#12) #99"), Some(12));
    }

    #[test]
    fn test_extract_ignores_body() {
        assert_eq!(extract_pr_number("fix: subject\n\nSee (#55)"), None);
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_pr_number("plain message"), None);
        assert_eq!(extract_pr_number("issue 12"), None);
        assert_eq!(extract_pr_number("(#) empty"), None);
        assert_eq!(extract_pr_number("(#12 unterminated"), None);
        assert_eq!(extract_pr_number(""), None);
    }
}
