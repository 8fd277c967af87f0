//! The normalized record produced by a successful validation pass.

use serde::{Serialize, Serializer};

use crate::draft::SelectedFile;
use crate::error::OutputError;
use crate::error_set::ErrorSet;
use crate::settings::{KNOWLEDGE_MAX, KNOWLEDGE_MIN};

/// A validated skill entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedTech {
    title: String,
    #[serde(serialize_with = "serialize_level")]
    knowledge: f64,
}

/// Writes whole levels as integers so `90` renders as `90`, not `90.0`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "only whole values inside the knowledge range are cast"
)]
#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde passes serialized fields by reference"
)]
fn serialize_level<S: Serializer>(level: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if level.fract() == 0.0 && (KNOWLEDGE_MIN..=KNOWLEDGE_MAX).contains(level) {
        serializer.serialize_i64(*level as i64)
    } else {
        serializer.serialize_f64(*level)
    }
}

impl ValidatedTech {
    pub(crate) const fn new(title: String, knowledge: f64) -> Self {
        Self { title, knowledge }
    }

    /// Technology name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Knowledge level within the accepted range.
    #[must_use]
    pub const fn knowledge(&self) -> f64 {
        self.knowledge
    }
}

/// Fully validated and normalized profile.
///
/// ## Invariants
/// - `name` is trimmed and every word starts with an upper-cased character.
/// - `email` is lower-cased and syntactically valid.
/// - `techs` holds at least the configured minimum of entries.
///
/// Serialization skips the avatar: binary payloads are not displayable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedUser {
    #[serde(skip)]
    avatar: SelectedFile,
    name: String,
    email: String,
    password: String,
    techs: Vec<ValidatedTech>,
}

impl ValidatedUser {
    pub(crate) const fn new(
        avatar: SelectedFile,
        name: String,
        email: String,
        password: String,
        techs: Vec<ValidatedTech>,
    ) -> Self {
        Self {
            avatar,
            name,
            email,
            password,
            techs,
        }
    }

    /// The accepted avatar file.
    #[must_use]
    pub const fn avatar(&self) -> &SelectedFile {
        &self.avatar
    }

    /// Normalized name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Lower-cased e-mail address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as typed.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Validated skill entries in display order.
    #[must_use]
    pub fn techs(&self) -> &[ValidatedTech] {
        self.techs.as_slice()
    }

    /// Renders the record as indented JSON, without the avatar.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Serialization`] if rendering fails.
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        serde_json::to_string_pretty(self).map_err(|e| OutputError::Serialization {
            message: e.to_string(),
        })
    }
}

/// Outcome of validating a draft.
///
/// Success and a non-empty error set are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every rule passed.
    Valid(ValidatedUser),
    /// At least one rule failed.
    Invalid(ErrorSet),
}

impl Validation {
    /// Returns `true` for [`Validation::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Error set of a failed pass.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorSet> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`ErrorSet`] of a failed pass.
    pub fn into_result(self) -> Result<ValidatedUser, ErrorSet> {
        match self {
            Self::Valid(user) => Ok(user),
            Self::Invalid(errors) => Err(errors),
        }
    }
}
