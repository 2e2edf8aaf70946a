// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit message classification
//!
//! Messages following the conventional-commit header grammar
//!
//! ```text
//! <type>[(<scope>)][!]: <title>
//!
//! [body]
//! ```
//!
//! with a recognized type token are classified from that token. Anything
//! else, including headers with an unknown token such as `style:`, is
//! classified by keyword search over the whole message. Classification never fails: the
//! worst case is `Category::Other` with `breaking == false`.

use crate::category::Category;

/// Literal marker that flags a breaking change anywhere in a message
pub const BREAKING_MARKER: &str = "BREAKING CHANGE:";

/// Title used when a message has no text at all
const EMPTY_TITLE: &str = "(no commit message)";

/// Keyword rules for messages without a conventional header, in priority order
const KEYWORD_RULES: [(&[&str], Category); 7] = [
    (&["fix", "bug"], Category::Fix),
    (&["feat"], Category::Feature),
    (&["doc"], Category::Docs),
    (&["perf"], Category::Perf),
    (&["test"], Category::Test),
    (&["build", "deps"], Category::Build),
    (&["refactor"], Category::Refactor),
];

/// The result of classifying one commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Inferred category
    pub category: Category,
    /// Scope from the header, if any
    pub scope: Option<String>,
    /// Whether the message marks a breaking change
    pub breaking: bool,
    /// Single-line summary, never empty
    pub title: String,
    /// Remaining message text, if any
    pub body: Option<String>,
}

/// A matched conventional-commit header line
#[derive(Debug, PartialEq, Eq)]
struct Header<'a> {
    category: Category,
    scope: Option<&'a str>,
    bang: bool,
    title: &'a str,
}

/// Classify a raw commit message
#[must_use]
pub fn classify(message: &str) -> Classification {
    let message = message.trim();
    let (first_line, rest) = message.split_once('\n').unwrap_or((message, ""));
    let body = Some(rest.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string);
    let has_marker = message.contains(BREAKING_MARKER);

    if let Some(header) = parse_header(first_line.trim_end()) {
        return Classification {
            category: header.category,
            scope: header.scope.map(str::to_string),
            breaking: header.bang || has_marker,
            title: header.title.to_string(),
            body,
        };
    }

    let title = first_line.trim();
    Classification {
        category: infer_category(message, has_marker),
        scope: None,
        breaking: has_marker,
        title: if title.is_empty() {
            EMPTY_TITLE.to_string()
        } else {
            title.to_string()
        },
        body,
    }
}

/// Match `<token>[(<scope>)][!]: <title>` at the start of a header line
fn parse_header(line: &str) -> Option<Header<'_>> {
    let token_len = line.bytes().take_while(u8::is_ascii_alphanumeric).count();
    let (token, mut rest) = line.split_at(token_len);
    let category = Category::from_token(token)?;

    let mut scope = None;
    if let Some(after_open) = rest.strip_prefix('(') {
        let close = after_open.find(')')?;
        if close == 0 {
            return None;
        }
        scope = Some(after_open[..close].trim()).filter(|s| !s.is_empty());
        rest = &after_open[close + 1..];
    }

    let bang = match rest.strip_prefix('!') {
        Some(after_bang) => {
            rest = after_bang;
            true
        }
        None => false,
    };

    let title = rest.strip_prefix(": ")?.trim();
    if title.is_empty() {
        return None;
    }

    Some(Header {
        category,
        scope,
        bang,
        title,
    })
}

/// Keyword inference for messages without a conventional header
///
/// Rules are tried in a fixed order, so a message mentioning both "fix" and
/// "feat" is a fix no matter where the words appear.
fn infer_category(message: &str, has_marker: bool) -> Category {
    if has_marker {
        return Category::Breaking;
    }
    let lower = message.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map_or(Category::Other, |(_, category)| *category)
}
