//! Per-field error mapping produced by a validation pass.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::issue::FieldIssue;
use crate::path::FieldPath;

/// Complete mapping from field path to the first issue found for that field.
///
/// A validation pass always produces a whole new set; a field whose value
/// became valid clears its old message by being absent from the new set.
/// Serializes as a JSON object from canonical path to message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    issues: BTreeMap<FieldPath, FieldIssue>,
}

impl ErrorSet {
    /// Returns `true` when no field has an issue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of fields with an issue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Issue recorded for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&FieldIssue> {
        self.issues.get(path)
    }

    /// Message recorded for `path`, if any.
    #[must_use]
    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).map(FieldIssue::message)
    }

    /// Iterates over issues in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldIssue)> {
        self.issues.iter()
    }

    /// Records an issue, keeping the first one reported for a path.
    pub fn insert(&mut self, path: FieldPath, issue: FieldIssue) {
        self.issues.entry(path).or_insert(issue);
    }

    /// Drops the issues of the skill entry at `index` and moves the issues of
    /// later entries one position up, following a removal from the list.
    pub(crate) fn forget_entry(&mut self, index: usize) {
        let previous = std::mem::take(self);
        *self = previous.remap_entries(|at| match at.cmp(&index) {
            Ordering::Less => Some(at),
            Ordering::Equal => None,
            Ordering::Greater => at.checked_sub(1),
        });
    }

    /// Moves every skill entry issue to the position returned by `locate`,
    /// dropping the issues of entries it cannot place. `locate` must not map
    /// two positions to the same one.
    pub(crate) fn remap_entries(self, mut locate: impl FnMut(usize) -> Option<usize>) -> Self {
        let issues = self
            .issues
            .into_iter()
            .filter_map(|(path, issue)| match path {
                FieldPath::Tech { index, field } => {
                    locate(index).map(|at| (FieldPath::tech(at, field), issue))
                }
                _ => Some((path, issue)),
            })
            .collect();
        Self { issues }
    }

    /// Unwraps a field outcome, recording its issue under `path` on failure.
    pub fn capture<T>(&mut self, path: FieldPath, outcome: Result<T, FieldIssue>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(issue) => {
                self.insert(path, issue);
                None
            }
        }
    }
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.issues.len()))?;
        for (path, issue) in &self.issues {
            map.serialize_entry(path, issue.message())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::path::TechField;

    #[test]
    fn first_issue_for_a_path_wins() {
        let mut errors = ErrorSet::default();
        assert!(errors.is_empty());
        errors.insert(FieldPath::Email, FieldIssue::required("email is required"));
        errors.insert(FieldPath::Email, FieldIssue::format("invalid email format"));

        assert!(!errors.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message(&FieldPath::Email), Some("email is required"));
    }

    #[test]
    fn capture_records_failures_only() {
        let mut errors = ErrorSet::default();
        let kept = errors.capture(FieldPath::Name, Ok::<_, FieldIssue>("Ada"));
        let dropped: Option<&str> =
            errors.capture(FieldPath::Password, Err(FieldIssue::range("minimum 6 characters")));

        assert_eq!(kept, Some("Ada"));
        assert!(dropped.is_none());
        assert_eq!(errors.len(), 1);
        assert!(errors.get(&FieldPath::Name).is_none());
    }

    #[test]
    fn forget_entry_shifts_later_entries() {
        let mut errors = ErrorSet::default();
        errors.insert(FieldPath::Name, FieldIssue::required("name is required"));
        errors.insert(
            FieldPath::tech(0, TechField::Title),
            FieldIssue::required("title is required"),
        );
        errors.insert(
            FieldPath::tech(1, TechField::Title),
            FieldIssue::required("title is required"),
        );
        errors.insert(
            FieldPath::tech(2, TechField::Knowledge),
            FieldIssue::coercion("value must be a number"),
        );

        errors.forget_entry(1);

        let paths: Vec<String> = errors.iter().map(|(path, _)| path.to_string()).collect();
        assert_eq!(paths, vec!["name", "techs.0.title", "techs.1.knowledge"]);
    }

    #[test]
    fn remap_entries_moves_and_drops_entry_issues() {
        let mut errors = ErrorSet::default();
        errors.insert(
            FieldPath::Techs,
            FieldIssue::cardinality("insert at least 2 technologies"),
        );
        errors.insert(
            FieldPath::tech(0, TechField::Title),
            FieldIssue::required("title is required"),
        );
        errors.insert(
            FieldPath::tech(2, TechField::Knowledge),
            FieldIssue::coercion("value must be a number"),
        );

        let remapped = errors.remap_entries(|index| match index {
            2 => Some(0),
            _ => None,
        });

        let paths: Vec<String> = remapped.iter().map(|(path, _)| path.to_string()).collect();
        assert_eq!(paths, vec!["techs", "techs.0.knowledge"]);
    }

    #[test]
    fn serializes_paths_to_messages() {
        let mut errors = ErrorSet::default();
        errors.insert(
            FieldPath::Techs,
            FieldIssue::cardinality("insert at least 2 technologies"),
        );
        errors.insert(
            FieldPath::tech(0, TechField::Knowledge),
            FieldIssue::range("value must be between 1 and 100"),
        );

        let value = serde_json::to_value(&errors).expect("error set serializes");
        assert_eq!(
            value,
            json!({
                "techs": "insert at least 2 technologies",
                "techs.0.knowledge": "value must be between 1 and 100",
            })
        );
    }
}
