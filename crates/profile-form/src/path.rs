//! Field path addressing.
//!
//! Views address values and error messages with strings such as `name`,
//! `techs.1.knowledge` or `techs[1].knowledge`. This module parses those
//! strings into [`FieldPath`] and renders them back in dot notation, which is
//! the canonical form used as [`ErrorSet`](crate::ErrorSet) keys.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SchemaError;

/// Field of a single skill entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TechField {
    /// The technology name.
    Title,
    /// The self-assessed knowledge level.
    Knowledge,
}

impl TechField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Knowledge => "knowledge",
        }
    }
}

/// Typed address of one value in the profile form.
///
/// # Examples
///
/// ```
/// use profile_form::{FieldPath, TechField};
///
/// let path: FieldPath = "techs[2].title".parse().expect("valid path");
/// assert_eq!(path, FieldPath::tech(2, TechField::Title));
/// assert_eq!(path.to_string(), "techs.2.title");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    /// The avatar file selection.
    Avatar,
    /// The display name.
    Name,
    /// The e-mail address.
    Email,
    /// The password.
    Password,
    /// The skill list as a whole.
    Techs,
    /// One field of the skill entry at `index`.
    Tech {
        /// Position of the entry in the list.
        index: usize,
        /// Field inside the entry.
        field: TechField,
    },
}

impl FieldPath {
    /// Builds the path of a field inside the skill entry at `index`.
    #[must_use]
    pub const fn tech(index: usize, field: TechField) -> Self {
        Self::Tech { index, field }
    }

    /// Parses a dot or bracket addressed path.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownPath`] when the path does not name a
    /// field of the profile form.
    pub fn parse(raw: &str) -> Result<Self, SchemaError> {
        let unknown = || SchemaError::UnknownPath {
            path: raw.to_owned(),
        };
        let segments = split_segments(raw).ok_or_else(unknown)?;

        match segments.as_slice() {
            ["avatar"] => Ok(Self::Avatar),
            ["name"] => Ok(Self::Name),
            ["email"] => Ok(Self::Email),
            ["password"] => Ok(Self::Password),
            ["techs"] => Ok(Self::Techs),
            ["techs", index, field] => {
                let position = parse_index(index).ok_or_else(unknown)?;
                let tech_field = match *field {
                    "title" => TechField::Title,
                    "knowledge" => TechField::Knowledge,
                    _ => return Err(unknown()),
                };
                Ok(Self::tech(position, tech_field))
            }
            _ => Err(unknown()),
        }
    }
}

/// Splits a path on dots, reading a trailing `[index]` as its own segment.
fn split_segments(raw: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    for part in raw.split('.') {
        match part.split_once('[') {
            None if part.contains(']') => return None,
            None => segments.push(part),
            Some((head, rest)) => {
                let index = rest.strip_suffix(']')?;
                if head.is_empty() || index.contains(['[', ']']) {
                    return None;
                }
                segments.push(head);
                segments.push(index);
            }
        }
    }
    Some(segments)
}

fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

impl FromStr for FieldPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Avatar => f.write_str("avatar"),
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
            Self::Password => f.write_str("password"),
            Self::Techs => f.write_str("techs"),
            Self::Tech { index, field } => write!(f, "techs.{index}.{}", field.as_str()),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    //! Covers path parsing in both notations and canonical rendering.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("avatar", FieldPath::Avatar)]
    #[case("name", FieldPath::Name)]
    #[case("email", FieldPath::Email)]
    #[case("password", FieldPath::Password)]
    #[case("techs", FieldPath::Techs)]
    #[case("techs.0.title", FieldPath::tech(0, TechField::Title))]
    #[case("techs.1.knowledge", FieldPath::tech(1, TechField::Knowledge))]
    #[case("techs[2].title", FieldPath::tech(2, TechField::Title))]
    #[case("techs[10].knowledge", FieldPath::tech(10, TechField::Knowledge))]
    fn parses_known_paths(#[case] raw: &str, #[case] expected: FieldPath) {
        assert_eq!(FieldPath::parse(raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("nickname")]
    #[case("Name")]
    #[case("techs.title")]
    #[case("techs.x.title")]
    #[case("techs.+1.title")]
    #[case("techs..0.title")]
    #[case("techs.0.level")]
    #[case("techs.0.title.extra")]
    #[case("name.first")]
    #[case("techs[0.title")]
    #[case("techs.0].title")]
    #[case("techs[].title")]
    #[case("techs[[1]].title")]
    #[case("techs[1]x.title")]
    #[case("[0].title")]
    fn rejects_unknown_paths(#[case] raw: &str) {
        assert_eq!(
            FieldPath::parse(raw),
            Err(SchemaError::UnknownPath {
                path: raw.to_owned()
            })
        );
    }

    #[rstest]
    #[case(FieldPath::Techs, "techs")]
    #[case(FieldPath::tech(0, TechField::Knowledge), "techs.0.knowledge")]
    #[case(FieldPath::tech(3, TechField::Title), "techs.3.title")]
    fn renders_dot_notation(#[case] path: FieldPath, #[case] expected: &str) {
        assert_eq!(path.to_string(), expected);
    }

    #[test]
    fn array_path_differs_from_entry_paths() {
        assert_ne!(FieldPath::Techs, FieldPath::tech(0, TechField::Title));
    }

    #[test]
    fn serializes_as_canonical_string() {
        let value = serde_json::to_value(FieldPath::tech(1, TechField::Title));
        assert_eq!(value.ok(), Some(serde_json::json!("techs.1.title")));
    }
}
