//! User-facing validation issues.

use std::fmt;

use serde::Serialize;

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A value must be supplied.
    Required,
    /// The value is present but malformed.
    Format,
    /// The value is present but has the wrong magnitude.
    Range,
    /// The value cannot be interpreted as the required type.
    Coercion,
    /// A collection holds too few valid entries.
    Cardinality,
}

/// A single problem with a field value, shown next to the offending control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    kind: IssueKind,
    message: String,
}

impl FieldIssue {
    /// Creates an issue of the given kind.
    #[must_use]
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a [`IssueKind::Required`] issue.
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Required, message)
    }

    /// Shorthand for a [`IssueKind::Format`] issue.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Format, message)
    }

    /// Shorthand for a [`IssueKind::Range`] issue.
    #[must_use]
    pub fn range(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Range, message)
    }

    /// Shorthand for a [`IssueKind::Coercion`] issue.
    #[must_use]
    pub fn coercion(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Coercion, message)
    }

    /// Shorthand for a [`IssueKind::Cardinality`] issue.
    #[must_use]
    pub fn cardinality(message: impl Into<String>) -> Self {
        Self::new(IssueKind::Cardinality, message)
    }

    /// Category of the issue.
    #[must_use]
    pub const fn kind(&self) -> IssueKind {
        self.kind
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
