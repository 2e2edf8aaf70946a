// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Change categories

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of change categories a commit can fall into
///
/// `Breaking` is also a cross-cutting flag on each commit; as a category it
/// is the virtual bucket breaking commits are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Incompatible change
    Breaking,
    /// New functionality
    Feature,
    /// Bug fix
    Fix,
    /// Documentation only
    Docs,
    /// Performance improvement
    Perf,
    /// Code restructuring without behaviour change
    Refactor,
    /// Test changes
    Test,
    /// Build system or dependency changes
    Build,
    /// Anything else
    Other,
}

impl Category {
    /// All categories in rendering order
    pub const ALL: [Category; 9] = [
        Category::Breaking,
        Category::Feature,
        Category::Fix,
        Category::Docs,
        Category::Perf,
        Category::Refactor,
        Category::Test,
        Category::Build,
        Category::Other,
    ];

    /// Map a conventional-commit type token (case-insensitive) to a category
    ///
    /// Returns `None` for tokens outside the recognized set; `chore` is
    /// recognized and maps to `Other`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "feat" => Some(Category::Feature),
            "fix" => Some(Category::Fix),
            "docs" => Some(Category::Docs),
            "perf" => Some(Category::Perf),
            "refactor" => Some(Category::Refactor),
            "test" => Some(Category::Test),
            "build" => Some(Category::Build),
            "chore" => Some(Category::Other),
            _ => None,
        }
    }

    /// Lowercase identifier, as used in serialized output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breaking => "breaking",
            Category::Feature => "feature",
            Category::Fix => "fix",
            Category::Docs => "docs",
            Category::Perf => "perf",
            Category::Refactor => "refactor",
            Category::Test => "test",
            Category::Build => "build",
            Category::Other => "other",
        }
    }

    /// Capitalized display name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Breaking => "Breaking",
            Category::Feature => "Feature",
            Category::Fix => "Fix",
            Category::Docs => "Docs",
            Category::Perf => "Perf",
            Category::Refactor => "Refactor",
            Category::Test => "Test",
            Category::Build => "Build",
            Category::Other => "Other",
        }
    }

    /// Emoji shown in front of section headings and commit lines
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Category::Breaking => "⚠️",
            Category::Feature => "🚀",
            Category::Fix => "🐛",
            Category::Docs => "📚",
            Category::Perf => "⚡",
            Category::Refactor => "♻️",
            Category::Test => "🧪",
            Category::Build => "🏗️",
            Category::Other => "🔧",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
