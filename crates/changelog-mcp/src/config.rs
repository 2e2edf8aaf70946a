// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the changelog-mcp server
//!
//! This module provides the command-line configuration of the MCP server:
//! the default repository, the default release label and logging options.

use std::path::PathBuf;

use clap::Parser;

/// Changelog MCP Server - changelogs from git history
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "changelog-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Default repository for tool calls
    ///
    /// Used when a tool call doesn't specify a repository.
    /// Defaults to the current working directory.
    #[arg(short, long, env = "CHANGELOG_REPOSITORY")]
    pub repository: Option<PathBuf>,

    /// Default release label for generated changelogs
    ///
    /// Shown in the document heading, e.g. "# Changelog (1.4.0)".
    /// A `version` argument on the tool call takes precedence.
    #[arg(long, env = "CHANGELOG_RELEASE_VERSION")]
    pub release_version: Option<String>,

    /// Enable verbose logging (debug level)
    ///
    /// When enabled, logs detailed request/response information and
    /// debug messages. Logs are written to stderr to avoid interfering
    /// with MCP stdio transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the repository path, using current directory as default
    ///
    /// Returns `None` if no repository is specified and the current
    /// directory cannot be determined.
    #[must_use]
    pub fn repository_path(&self) -> Option<PathBuf> {
        self.repository
            .clone()
            .or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path is specified but doesn't exist
    /// - The repository path is not a directory
    /// - The release label is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref repository) = self.repository {
            if !repository.exists() {
                return Err(ConfigError::RepositoryNotFound(repository.clone()));
            }
            if !repository.is_dir() {
                return Err(ConfigError::RepositoryNotDirectory(repository.clone()));
            }
        }

        if self
            .release_version
            .as_deref()
            .is_some_and(|v| v.trim().is_empty())
        {
            return Err(ConfigError::EmptyReleaseVersion);
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepositoryNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepositoryNotDirectory(PathBuf),

    /// Release label given but blank
    #[error("Release version cannot be empty")]
    EmptyReleaseVersion,
}
