// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelog-core: Commit classification and changelog rendering
//!
//! This library crate turns raw commits into classified changelog entries,
//! folds in linked change-request metadata, aggregates statistics and renders
//! the result as Markdown, JSON or plain text.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use changelog_core::{Changelog, ChangelogCommit, RenderOptions, render};
//! use changelog_git::RawCommit;
//!
//! let raw = RawCommit::new(
//!     "1945ab9c752534e733c38ba0109dc3b741f0a6eb",
//!     "feat(api): add search endpoint",
//!     "Jane Doe",
//!     Utc::now(),
//!     "https://github.com/acme/widgets/commit/1945ab9",
//! );
//! let commits = vec![ChangelogCommit::from_raw(&raw)];
//! let changelog = Changelog::build(&commits, Some("1.2.0".into()), false, Utc::now());
//!
//! let markdown = render(&changelog, &RenderOptions::default()).unwrap();
//! assert!(markdown.starts_with("# Changelog (1.2.0)"));
//! ```

pub mod aggregate;
pub mod category;
pub mod classify;
pub mod commit;
pub mod error;
pub mod merge;
pub mod render;

pub use aggregate::{
    CategoryCounts, Changelog, Group, GroupBy, GroupKey, Statistics, UNSCOPED, group,
};
pub use category::Category;
pub use classify::{BREAKING_MARKER, Classification, classify};
pub use commit::ChangelogCommit;
pub use error::ChangelogError;
pub use merge::{ChangeRequest, ChangeRequestSource, enrich, merge};
pub use render::{OutputFormat, RenderOptions, render};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::{Changelog, GroupBy, Statistics};
    pub use crate::category::Category;
    pub use crate::commit::ChangelogCommit;
    pub use crate::error::ChangelogError;
    pub use crate::merge::{ChangeRequest, ChangeRequestSource};
    pub use crate::render::{OutputFormat, RenderOptions, render};
}
