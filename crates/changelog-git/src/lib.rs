// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelog-git: Commit retrieval for changelog-mcp
//!
//! This library crate walks a commit range in a git repository and hands the
//! raw commit records to the changelog pipeline.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use changelog_git::{CommitSource, GitRepo, RangeOptions};
//!
//! let repo = GitRepo::open(".").expect("open repo");
//! let commits = repo
//!     .commits(&RangeOptions::default().from("v0.1.0"))
//!     .expect("walk commits");
//!
//! for c in commits {
//!     println!("{} - {}", c.short_sha(), c.subject());
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::{RawCommit, extract_pr_number};
pub use error::GitError;
pub use repo::{CommitSource, GitRepo, RangeOptions, web_url_from_remote};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::RawCommit;
    pub use crate::error::GitError;
    pub use crate::repo::{CommitSource, GitRepo, RangeOptions};
}
