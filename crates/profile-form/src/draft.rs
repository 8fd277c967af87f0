//! The in-progress record as typed by the user.
//!
//! A [`FormDraft`] holds raw, unvalidated values. Skill entries carry a
//! [`TechEntryId`] minted once at creation; views key their rows by that
//! identity rather than by position, so removing one entry never shifts state
//! onto a neighbour.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SchemaError;

/// Stable identity of a skill entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechEntryId(Uuid);

impl TechEntryId {
    /// Mints a fresh identity.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TechEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A file picked for the avatar field, as handed over by the file input.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    size: u64,
    mime_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    /// Describes a file whose size is taken from its contents.
    #[must_use]
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Describes a file by metadata only, as reported by the file picker
    /// before its contents are read.
    #[must_use]
    pub fn from_metadata(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            bytes: Vec::new(),
        }
    }

    /// File name reported by the picker.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Declared MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_str()
    }

    /// Binary contents, empty when only metadata is known.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

/// Raw knowledge level as typed into a numeric input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawKnowledge {
    /// A number already parsed by the input control.
    Number(f64),
    /// Text awaiting coercion.
    Text(String),
}

impl Default for RawKnowledge {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl RawKnowledge {
    /// Converts the raw value into a finite number.
    ///
    /// Surrounding whitespace is ignored and blank text reads as zero, the
    /// way numeric form inputs report an untouched control. Infinite and NaN
    /// results, including spellings such as `Infinity`, never coerce.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_form::RawKnowledge;
    ///
    /// assert_eq!(RawKnowledge::Text(" 50 ".to_owned()).coerce(), Some(50.0));
    /// assert_eq!(RawKnowledge::Text(String::new()).coerce(), Some(0.0));
    /// assert_eq!(RawKnowledge::Text("abc".to_owned()).coerce(), None);
    /// ```
    #[must_use]
    pub fn coerce(&self) -> Option<f64> {
        let number = match self {
            Self::Number(value) => *value,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
        };
        number.is_finite().then_some(number)
    }
}

/// One row of the skill list before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TechEntryDraft {
    id: TechEntryId,
    /// Technology name as typed.
    pub title: String,
    /// Knowledge level as typed.
    pub knowledge: RawKnowledge,
}

impl TechEntryDraft {
    /// Creates an empty row with a freshly minted identity.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), RawKnowledge::default())
    }

    /// Creates a row with the given raw values and a fresh identity.
    #[must_use]
    pub fn new(title: impl Into<String>, knowledge: RawKnowledge) -> Self {
        Self {
            id: TechEntryId::random(),
            title: title.into(),
            knowledge,
        }
    }

    /// Identity assigned at creation.
    #[must_use]
    pub const fn id(&self) -> TechEntryId {
        self.id
    }
}

/// Mutable record holding every raw value of the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    /// Files picked for the avatar; only the first one is considered.
    pub avatar: Vec<SelectedFile>,
    /// Name as typed.
    pub name: String,
    /// E-mail as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
    pub(crate) techs: Vec<TechEntryDraft>,
}

impl FormDraft {
    /// Parses a draft from JSON.
    ///
    /// The avatar cannot be expressed in JSON and starts empty; each skill
    /// entry receives a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedDraft`] if the JSON does not describe a
    /// draft.
    ///
    /// # Examples
    ///
    /// ```
    /// use profile_form::FormDraft;
    ///
    /// let draft = FormDraft::from_json(r#"{
    ///     "name": "ada lovelace",
    ///     "email": "ada@example.com",
    ///     "password": "secret",
    ///     "techs": [{"title": "Rust", "knowledge": "80"}]
    /// }"#).expect("valid draft");
    ///
    /// assert_eq!(draft.techs().len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawFormDraft =
            serde_json::from_str(json).map_err(|e| SchemaError::MalformedDraft {
                message: e.to_string(),
            })?;

        Ok(Self {
            avatar: Vec::new(),
            name: raw.name,
            email: raw.email,
            password: raw.password,
            techs: raw
                .techs
                .into_iter()
                .map(|entry| TechEntryDraft::new(entry.title, entry.knowledge))
                .collect(),
        })
    }

    /// Skill entries in display order.
    #[must_use]
    pub fn techs(&self) -> &[TechEntryDraft] {
        self.techs.as_slice()
    }

    /// Appends a row and returns its identity.
    pub fn push_tech(&mut self, entry: TechEntryDraft) -> TechEntryId {
        let id = entry.id();
        self.techs.push(entry);
        id
    }

    /// Removes the row with the given identity, returning it if present.
    pub fn remove_tech(&mut self, id: TechEntryId) -> Option<TechEntryDraft> {
        let position = self.techs.iter().position(|entry| entry.id() == id)?;
        Some(self.techs.remove(position))
    }

    pub(crate) fn tech_mut(&mut self, index: usize) -> Option<&mut TechEntryDraft> {
        self.techs.get_mut(index)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct RawFormDraft {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    techs: Vec<RawTechEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTechEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    knowledge: RawKnowledge,
}

#[cfg(test)]
mod tests {
    //! Covers identity handling, knowledge coercion and JSON import.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(RawKnowledge::Text("50".to_owned()), Some(50.0))]
    #[case(RawKnowledge::Text("  7 ".to_owned()), Some(7.0))]
    #[case(RawKnowledge::Text("1e2".to_owned()), Some(100.0))]
    #[case(RawKnowledge::Text("12.5".to_owned()), Some(12.5))]
    #[case(RawKnowledge::Text(String::new()), Some(0.0))]
    #[case(RawKnowledge::Text("   ".to_owned()), Some(0.0))]
    #[case(RawKnowledge::Text("150".to_owned()), Some(150.0))]
    #[case(RawKnowledge::Text("abc".to_owned()), None)]
    #[case(RawKnowledge::Text("5O".to_owned()), None)]
    #[case(RawKnowledge::Text("inf".to_owned()), None)]
    #[case(RawKnowledge::Text("NaN".to_owned()), None)]
    #[case(RawKnowledge::Text("Infinity".to_owned()), None)]
    #[case(RawKnowledge::Text("-infinity".to_owned()), None)]
    #[case(RawKnowledge::Number(42.0), Some(42.0))]
    #[case(RawKnowledge::Number(f64::NAN), None)]
    fn coerces_knowledge(#[case] raw: RawKnowledge, #[case] expected: Option<f64>) {
        assert_eq!(raw.coerce(), expected);
    }

    #[test]
    fn blank_entries_receive_distinct_identities() {
        let first = TechEntryDraft::blank();
        let second = TechEntryDraft::blank();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.title, "");
        assert_eq!(first.knowledge, RawKnowledge::Number(0.0));
    }

    #[test]
    fn remove_tech_keeps_identities_of_survivors() {
        let mut draft = FormDraft::default();
        let first = draft.push_tech(TechEntryDraft::new("Rust", RawKnowledge::Number(90.0)));
        let second = draft.push_tech(TechEntryDraft::new("Go", RawKnowledge::Number(40.0)));
        let third = draft.push_tech(TechEntryDraft::new("Zig", RawKnowledge::Number(10.0)));

        let removed = draft.remove_tech(second);

        assert_eq!(removed.map(|entry| entry.title), Some("Go".to_owned()));
        let ids: Vec<_> = draft.techs().iter().map(TechEntryDraft::id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn remove_tech_ignores_unknown_identity() {
        let mut draft = FormDraft::default();
        draft.push_tech(TechEntryDraft::blank());
        let before = draft.clone();

        assert!(draft.remove_tech(TechEntryId::random()).is_none());
        assert_eq!(draft, before);
    }

    #[test]
    fn from_json_accepts_numeric_and_textual_knowledge() {
        let parsed = FormDraft::from_json(
            r#"{"name": "ada", "techs": [
                {"title": "Rust", "knowledge": 80},
                {"title": "Go", "knowledge": "35"}
            ]}"#,
        )
        .expect("draft should parse");

        assert_eq!(parsed.name, "ada");
        assert!(parsed.email.is_empty());
        assert!(parsed.avatar.is_empty());
        let knowledge: Vec<_> = parsed.techs().iter().map(|e| e.knowledge.clone()).collect();
        assert_eq!(
            knowledge,
            vec![
                RawKnowledge::Number(80.0),
                RawKnowledge::Text("35".to_owned())
            ]
        );
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let result = FormDraft::from_json(r#"{"nickname": "ada"}"#);
        assert!(matches!(result, Err(SchemaError::MalformedDraft { .. })));
    }

    #[test]
    fn debug_output_omits_file_contents() {
        let file = SelectedFile::new("me.png", "image/png", vec![1, 2, 3]);
        let rendered = format!("{file:?}");
        assert!(rendered.contains("me.png"));
        assert!(!rendered.contains("bytes"));
        assert_eq!(file.size(), 3);
    }
}
