// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Changelog aggregation
//!
//! Splits classified commits into breaking and non-breaking changes,
//! computes summary statistics and groups commits for rendering. Nothing in
//! this module reorders or mutates its input.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::commit::ChangelogCommit;
use crate::error::ChangelogError;

/// Bucket name for commits without a scope when grouping by scope
pub const UNSCOPED: &str = "other";

// ============================================================================
// Statistics
// ============================================================================

/// Per-category commit counts; every category is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Commits in the breaking category
    pub breaking: usize,
    /// Feature commits
    pub feature: usize,
    /// Fix commits
    pub fix: usize,
    /// Documentation commits
    pub docs: usize,
    /// Performance commits
    pub perf: usize,
    /// Refactoring commits
    pub refactor: usize,
    /// Test commits
    pub test: usize,
    /// Build commits
    pub build: usize,
    /// Everything else
    pub other: usize,
}

impl CategoryCounts {
    /// Count for one category
    #[must_use]
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Breaking => self.breaking,
            Category::Feature => self.feature,
            Category::Fix => self.fix,
            Category::Docs => self.docs,
            Category::Perf => self.perf,
            Category::Refactor => self.refactor,
            Category::Test => self.test,
            Category::Build => self.build,
            Category::Other => self.other,
        }
    }

    /// Add one commit to a category
    pub fn increment(&mut self, category: Category) {
        let slot = match category {
            Category::Breaking => &mut self.breaking,
            Category::Feature => &mut self.feature,
            Category::Fix => &mut self.fix,
            Category::Docs => &mut self.docs,
            Category::Perf => &mut self.perf,
            Category::Refactor => &mut self.refactor,
            Category::Test => &mut self.test,
            Category::Build => &mut self.build,
            Category::Other => &mut self.other,
        };
        *slot += 1;
    }

    /// All counts in category order, zeros included
    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum over all categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.iter().map(|(_, n)| n).sum()
    }
}

/// Summary statistics over a commit collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of commits
    pub total: usize,
    /// Commits per category
    pub by_category: CategoryCounts,
    /// Commits per author (only authors seen)
    pub by_author: BTreeMap<String, usize>,
    /// Commits per scope (unscoped commits excluded)
    pub by_scope: BTreeMap<String, usize>,
    /// Number of breaking commits
    pub breaking: usize,
}

impl Statistics {
    /// Compute statistics over every commit in `commits`
    #[must_use]
    pub fn compute<'a, I>(commits: I) -> Self
    where
        I: IntoIterator<Item = &'a ChangelogCommit>,
    {
        let mut stats = Self::default();
        for commit in commits {
            stats.total += 1;
            stats.by_category.increment(commit.category);
            *stats.by_author.entry(commit.author.clone()).or_insert(0) += 1;
            if let Some(ref scope) = commit.scope {
                *stats.by_scope.entry(scope.clone()).or_insert(0) += 1;
            }
            if commit.breaking {
                stats.breaking += 1;
            }
        }
        stats
    }

    /// Scopes by descending count; ties stay in name order
    #[must_use]
    pub fn scopes_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.by_scope)
    }

    /// Authors by descending count; ties stay in name order
    #[must_use]
    pub fn authors_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.by_author)
    }
}

fn sorted_by_count(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

// ============================================================================
// Document
// ============================================================================

/// A render-ready changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Release label, e.g. `1.4.0`
    pub version: Option<String>,
    /// When the document was generated
    pub generated_at: DateTime<Utc>,
    /// Breaking commits, in input order
    pub breaking_changes: Vec<ChangelogCommit>,
    /// Non-breaking commits, in input order
    pub changes: Vec<ChangelogCommit>,
    /// Statistics over all commits, when requested
    pub statistics: Option<Statistics>,
}

impl Changelog {
    /// Aggregate classified commits into a changelog document
    #[must_use]
    pub fn build(
        commits: &[ChangelogCommit],
        version: Option<String>,
        include_stats: bool,
        generated_at: DateTime<Utc>,
    ) -> Self {
        // A breaking category always marks the commit as breaking
        let commits: Vec<ChangelogCommit> = commits
            .iter()
            .cloned()
            .map(|mut c| {
                c.breaking |= c.category == Category::Breaking;
                c
            })
            .collect();
        let statistics = include_stats.then(|| Statistics::compute(&commits));
        let (breaking_changes, changes): (Vec<_>, Vec<_>) =
            commits.into_iter().partition(|c| c.breaking);

        Self {
            version,
            generated_at,
            breaking_changes,
            changes,
            statistics,
        }
    }

    /// All commits: breaking ones first, then the rest
    pub fn commits(&self) -> impl Iterator<Item = &ChangelogCommit> {
        self.breaking_changes.iter().chain(self.changes.iter())
    }

    /// Total number of commits
    #[must_use]
    pub fn len(&self) -> usize {
        self.breaking_changes.len() + self.changes.len()
    }

    /// Whether the changelog has no commits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// How commits are grouped into sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// By change category, breaking commits in their own bucket
    #[default]
    Category,
    /// By scope
    Scope,
    /// By author
    Author,
}

impl GroupBy {
    /// Lowercase identifier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GroupBy::Category => "category",
            GroupBy::Scope => "scope",
            GroupBy::Author => "author",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(GroupBy::Category),
            "scope" => Ok(GroupBy::Scope),
            "author" => Ok(GroupBy::Author),
            _ => Err(ChangelogError::InvalidGrouping {
                group_by: s.to_string(),
            }),
        }
    }
}

/// What a group is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey<'a> {
    /// A category bucket
    Category(Category),
    /// A scope bucket (`"other"` for unscoped commits)
    Scope(&'a str),
    /// An author bucket
    Author(&'a str),
}

/// A non-empty bucket of commits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// Bucket key
    pub key: GroupKey<'a>,
    /// Member commits, in document order
    pub commits: Vec<&'a ChangelogCommit>,
}

/// Group the commits of a changelog. Only non-empty groups are returned.
///
/// - `Category`: breaking commits go only to the `Breaking` bucket; buckets
///   follow [`Category::ALL`] order.
/// - `Scope` / `Author`: every commit, breaking ones included, in
///   first-seen order of the key.
#[must_use]
pub fn group(doc: &Changelog, by: GroupBy) -> Vec<Group<'_>> {
    match by {
        GroupBy::Category => group_by_category(doc),
        GroupBy::Scope => group_by_key(doc, |c| {
            GroupKey::Scope(c.scope.as_deref().unwrap_or(UNSCOPED))
        }),
        GroupBy::Author => group_by_key(doc, |c| GroupKey::Author(c.author.as_str())),
    }
}

fn group_by_category(doc: &Changelog) -> Vec<Group<'_>> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let commits: Vec<&ChangelogCommit> = if category == Category::Breaking {
                doc.breaking_changes.iter().collect()
            } else {
                doc.changes
                    .iter()
                    .filter(|c| c.category == category)
                    .collect()
            };
            (!commits.is_empty()).then_some(Group {
                key: GroupKey::Category(category),
                commits,
            })
        })
        .collect()
}

fn group_by_key<'a, F>(doc: &'a Changelog, key_of: F) -> Vec<Group<'a>>
where
    F: Fn(&'a ChangelogCommit) -> GroupKey<'a>,
{
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<GroupKey<'a>, usize> = HashMap::new();
    for commit in doc.commits() {
        let key = key_of(commit);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Group {
                key,
                commits: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].commits.push(commit);
    }
    groups
}
