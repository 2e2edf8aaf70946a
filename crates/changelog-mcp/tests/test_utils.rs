// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for changelog-mcp integration tests
//!
//! This module provides utilities for:
//! - Temporary directory management
//! - Git repository scaffolding for tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use git2::{Oid, Repository, Signature, Time};

// ============================================================================
// Temporary Directory Management
// ============================================================================

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is automatically cleaned up when dropped
///
/// This provides a unique, isolated directory for each test to avoid
/// interference between concurrent tests.
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a new temporary test directory
    ///
    /// The directory is created under the system temp directory with a
    /// unique name based on the test name and a counter.
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "changelog-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);

        fs::create_dir_all(&path).expect("Failed to create temp test directory");

        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// A temporary git repository for testing
///
/// Commits are written with git2 against an empty tree, so no working-tree
/// files are needed.
pub struct TestGitRepo {
    temp_dir: TempTestDir,
    repo: Repository,
}

impl TestGitRepo {
    /// Create and initialize a new test git repository
    pub fn new(test_name: &str) -> Self {
        let temp_dir = TempTestDir::new(test_name);
        let repo = Repository::init(temp_dir.path()).expect("Failed to init repository");
        Self { temp_dir, repo }
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the repository path as a string for tool arguments
    pub fn path_str(&self) -> String {
        self.path().display().to_string()
    }

    /// Commit with the given author at `secs` since the epoch
    pub fn commit_as(&self, message: &str, author: &str, secs: i64) -> Oid {
        let email = format!("{}@example.com", author.to_lowercase().replace(' ', "."));
        let sig = Signature::new(author, &email, &Time::new(secs, 0)).expect("signature");
        let tree_id = self
            .repo
            .index()
            .expect("index")
            .write_tree()
            .expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit")
    }

    /// Create a lightweight tag
    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("create tag");
    }

    /// Add an `origin` remote
    #[allow(dead_code)]
    pub fn set_origin(&self, url: &str) {
        self.repo.remote("origin", url).expect("add remote");
    }
}
