//! Fault types for the profile-form crate.
//!
//! Faults signal programming mistakes, such as addressing a field path the
//! schema does not define, and abort the operation in progress. Problems with
//! the values a user typed are never faults: they are reported as
//! [`FieldIssue`](crate::FieldIssue) entries inside an
//! [`ErrorSet`](crate::ErrorSet).

use thiserror::Error;

/// Programming errors raised while addressing or validating form fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The path does not name any field of the profile form.
    #[error("field path '{path}' is not defined by the profile schema")]
    UnknownPath {
        /// The path as supplied by the caller.
        path: String,
    },

    /// The path addresses a skill entry beyond the end of the list.
    #[error("field path '{path}' addresses entry {index} but only {len} entries exist")]
    MissingEntry {
        /// Canonical form of the offending path.
        path: String,
        /// Index encoded in the path.
        index: usize,
        /// Number of entries currently in the list.
        len: usize,
    },

    /// The value supplied for a path has the wrong kind.
    #[error("field '{path}' expects {expected} but received {received}")]
    TypeMismatch {
        /// Canonical form of the offending path.
        path: String,
        /// Kind of value the field accepts.
        expected: &'static str,
        /// Kind of value that was supplied.
        received: &'static str,
    },

    /// The path names the skill list itself, which is edited through list
    /// operations only.
    #[error("field '{path}' is managed through list operations")]
    ListManaged {
        /// Canonical form of the offending path.
        path: String,
    },

    /// The schema has no definition for a field the draft carries.
    #[error("profile schema does not define field '{path}'")]
    UndefinedField {
        /// Canonical form of the undefined field path.
        path: String,
    },

    /// A serialized draft could not be parsed.
    #[error("invalid draft JSON: {message}")]
    MalformedDraft {
        /// Description of the parse error.
        message: String,
    },
}

/// Errors raised while handing an accepted record to the output collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The record could not be rendered as JSON.
    #[error("failed to serialize validated user: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// The output collaborator refused the record.
    #[error("submission output rejected the record: {message}")]
    Rejected {
        /// Reason given by the collaborator.
        message: String,
    },
}

/// Faults that abort a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The schema or a field path was misused.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The accepted record could not be delivered.
    #[error(transparent)]
    Output(#[from] OutputError),
}
