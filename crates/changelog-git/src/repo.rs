// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit range retrieval
//!
//! This module walks a commit range in a repository using the `git2` crate
//! and produces [`RawCommit`] records, newest first.

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository, Sort};
use tracing::debug;

use crate::commit::RawCommit;
use crate::error::GitError;

/// The commit range to retrieve
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeOptions {
    /// Older boundary (exclusive); commits reachable from it are hidden
    pub from: Option<String>,
    /// Newer boundary (inclusive, defaults to HEAD)
    pub to: Option<String>,
    /// Only include commits at or after this date
    pub since: Option<DateTime<Utc>>,
    /// Only include commits at or before this date
    pub until: Option<DateTime<Utc>>,
    /// Maximum number of commits to retrieve, applied after date filtering
    pub limit: Option<usize>,
}

impl RangeOptions {
    /// Create options for the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    /// Set the older, exclusive boundary
    #[must_use]
    pub fn from(mut self, reference: &str) -> Self {
        self.from = Some(reference.to_string());
        self
    }

    /// Set the newer, inclusive boundary
    #[must_use]
    pub fn to(mut self, reference: &str) -> Self {
        self.to = Some(reference.to_string());
        self
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    /// Whether a timestamp falls inside the since/until window
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.since.is_none_or(|since| timestamp >= since)
            && self.until.is_none_or(|until| timestamp <= until)
    }
}

/// Anything that can produce the raw commits of a range, newest first
pub trait CommitSource {
    /// Retrieve the commits in `range`
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the range cannot be resolved or walked.
    fn commits(&self, range: &RangeOptions) -> Result<Vec<RawCommit>, GitError>;
}

/// A git repository wrapper for retrieving commit ranges
pub struct GitRepo {
    repo: Repository,
    web_url: Option<String>,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self::from_repository(repo))
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self::from_repository(repo))
    }

    fn from_repository(repo: Repository) -> Self {
        let web_url = repo
            .find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().and_then(web_url_from_remote));
        Self { repo, web_url }
    }

    /// Override the web URL used to build commit permalinks
    #[must_use]
    pub fn with_web_url(mut self, url: impl Into<String>) -> Self {
        self.web_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// The web URL commit permalinks are built from, if known
    #[must_use]
    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Build the permalink for a commit
    #[must_use]
    pub fn permalink(&self, sha: &str) -> String {
        match &self.web_url {
            Some(base) => format!("{base}/commit/{sha}"),
            None => {
                let root = self.repo.workdir().unwrap_or_else(|| self.repo.path());
                format!("file://{}#{sha}", root.display())
            }
        }
    }

    /// Resolve a reference (branch, tag, SHA, `HEAD~2`, ...) to a commit id
    fn resolve(&self, reference: &str) -> Result<Oid, GitError> {
        self.repo
            .revparse_single(reference)
            .and_then(|obj| obj.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::InvalidReference {
                reference: reference.to_string(),
            })
    }

    fn to_raw_commit(&self, git_commit: &git2::Commit<'_>) -> RawCommit {
        let time = git_commit.time();
        let timestamp = Utc
            .timestamp_opt(time.seconds(), 0)
            .single()
            .unwrap_or_else(Utc::now);
        let sha = git_commit.id().to_string();
        let url = self.permalink(&sha);

        RawCommit::new(
            sha,
            git_commit.message().unwrap_or(""),
            git_commit.author().name().unwrap_or("Unknown"),
            timestamp,
            url,
        )
    }
}

impl CommitSource for GitRepo {
    fn commits(&self, range: &RangeOptions) -> Result<Vec<RawCommit>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;

        if range.to.is_none() && self.repo.is_empty()? {
            let root = self.repo.workdir().unwrap_or_else(|| self.repo.path());
            return Err(GitError::EmptyRepository {
                path: root.display().to_string(),
            });
        }

        let to = range.to.as_deref().unwrap_or("HEAD");
        revwalk.push(self.resolve(to)?)?;
        if let Some(ref from) = range.from {
            revwalk.hide(self.resolve(from)?)?;
        }

        let limit = range.limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();

        for oid_result in revwalk {
            if commits.len() >= limit {
                break;
            }

            let git_commit = self.repo.find_commit(oid_result?)?;
            let commit = self.to_raw_commit(&git_commit);
            if !range.contains(commit.timestamp) {
                continue;
            }
            commits.push(commit);
        }

        debug!(
            from = range.from.as_deref().unwrap_or("<root>"),
            to,
            count = commits.len(),
            "Retrieved commit range"
        );

        Ok(commits)
    }
}

/// Convert a remote URL into the web URL of the hosted repository.
///
/// Handles `https://host/owner/repo(.git)`, `git@host:owner/repo(.git)` and
/// `ssh://git@host/owner/repo(.git)`. Returns `None` for anything else, such as
/// local paths.
#[must_use]
pub fn web_url_from_remote(remote: &str) -> Option<String> {
    let remote = remote.trim();
    let (host, path) = if let Some(rest) = remote
        .strip_prefix("https://")
        .or_else(|| remote.strip_prefix("http://"))
    {
        rest.split_once('/')?
    } else if let Some(rest) = remote.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
        let (host, path) = rest.split_once('/')?;
        // Drop an explicit port.
        (host.split(':').next().unwrap_or(host), path)
    } else if let Some((user_host, path)) = remote.split_once(':') {
        if user_host.contains('/') || path.starts_with('/') {
            return None;
        }
        let host = user_host.split_once('@').map_or(user_host, |(_, h)| h);
        (host, path)
    } else {
        return None;
    };

    // https URLs may carry credentials.
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return None;
    }
    Some(format!("https://{host}/{path}"))
}
