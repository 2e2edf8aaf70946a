// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for changelog-git

use thiserror::Error;

/// Errors raised while resolving or walking a commit range
#[derive(Debug, Error)]
pub enum GitError {
    /// Failure inside libgit2
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// No repository at or above the given path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// Path that was opened or searched from
        path: String,
    },

    /// The repository exists but HEAD has no commits yet
    #[error("Repository has no commits: {path}")]
    EmptyRepository {
        /// Repository working directory (or git dir when bare)
        path: String,
    },

    /// A `from`/`to` boundary that names no commit
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The tag, branch, SHA or revspec as given
        reference: String,
    },
}
