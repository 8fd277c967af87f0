//! Form state controller.
//!
//! [`ProfileForm`] owns the draft, the current error set and the skill list,
//! and drives the submit cycle `Idle → Validating → Idle`. Field edits never
//! validate; validation runs in full on submit and its error set replaces the
//! previous one wholesale.

use tracing::{debug, info, warn};

use crate::draft::{FormDraft, RawKnowledge, SelectedFile, TechEntryDraft, TechEntryId};
use crate::error::{FormError, SchemaError};
use crate::error_set::ErrorSet;
use crate::issue::FieldIssue;
use crate::output::SubmissionSink;
use crate::path::{FieldPath, TechField};
use crate::schema::UserSchema;
use crate::settings::FormSettings;
use crate::strength::PasswordStrength;
use crate::user::{ValidatedUser, Validation};

/// Raw value written to or read from a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Typed text.
    Text(String),
    /// A number reported by a numeric input.
    Number(f64),
    /// Files reported by a file input.
    Files(Vec<SelectedFile>),
}

impl FieldValue {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Files(_) => "files",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<SelectedFile>> for FieldValue {
    fn from(value: Vec<SelectedFile>) -> Self {
        Self::Files(value)
    }
}

impl From<RawKnowledge> for FieldValue {
    fn from(value: RawKnowledge) -> Self {
        match value {
            RawKnowledge::Number(number) => Self::Number(number),
            RawKnowledge::Text(text) => Self::Text(text),
        }
    }
}

const fn expected_kind(path: FieldPath) -> &'static str {
    match path {
        FieldPath::Avatar => "files",
        FieldPath::Tech {
            field: TechField::Knowledge,
            ..
        } => "text or number",
        _ => "text",
    }
}

fn mismatch(path: FieldPath, received: &FieldValue) -> SchemaError {
    SchemaError::TypeMismatch {
        path: path.to_string(),
        expected: expected_kind(path),
        received: received.kind(),
    }
}

/// Phase of the submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    /// No submit in flight.
    #[default]
    Idle,
    /// A submit started and has not resolved yet.
    Validating,
}

/// Proof that a submit attempt started, carrying the draft as it was then.
#[derive(Debug)]
#[must_use = "a started submit must be completed"]
pub struct SubmitTicket {
    snapshot: FormDraft,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The record passed validation and was delivered to the output.
    Accepted(ValidatedUser),
    /// Validation failed; the error set now holds `issues` entries.
    Rejected {
        /// Number of fields with an issue.
        issues: usize,
    },
    /// A submit was already in flight; nothing happened.
    Ignored,
}

/// Controller owning the profile form state.
#[derive(Debug)]
pub struct ProfileForm<S> {
    schema: UserSchema,
    draft: FormDraft,
    errors: ErrorSet,
    phase: SubmitPhase,
    submit_count: u64,
    sink: S,
}

impl<S: SubmissionSink> ProfileForm<S> {
    /// Creates an empty form validated by the standard schema.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_schema(UserSchema::default(), sink)
    }

    /// Creates an empty form validated by the standard schema built from
    /// `settings`.
    #[must_use]
    pub fn from_settings(settings: &FormSettings, sink: S) -> Self {
        Self::with_schema(UserSchema::standard(&settings.limits()), sink)
    }

    /// Creates an empty form validated by `schema`.
    #[must_use]
    pub fn with_schema(schema: UserSchema, sink: S) -> Self {
        Self {
            schema,
            draft: FormDraft::default(),
            errors: ErrorSet::default(),
            phase: SubmitPhase::Idle,
            submit_count: 0,
            sink,
        }
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Error set installed by the last rejected submit.
    #[must_use]
    pub const fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Output collaborator.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Skill entries in display order.
    #[must_use]
    pub fn tech_entries(&self) -> &[TechEntryDraft] {
        self.draft.techs()
    }

    /// Phase of the submit cycle.
    #[must_use]
    pub const fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Returns `true` strictly between the start and the resolution of a
    /// submit; the submit control stays disabled meanwhile.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Validating
    }

    /// Number of submit attempts that actually started.
    #[must_use]
    pub const fn submit_count(&self) -> u64 {
        self.submit_count
    }

    /// Live strength of the typed password; `None` while it is empty.
    #[must_use]
    pub fn password_strength(&self) -> Option<PasswordStrength> {
        if self.draft.password.is_empty() {
            None
        } else {
            Some(PasswordStrength::of(&self.draft.password))
        }
    }

    /// Overwrites the raw value at `path` without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the path is unknown, addresses a missing
    /// skill entry or the skill list itself, or the value has the wrong kind.
    pub fn set_field(
        &mut self,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), SchemaError> {
        let field_path = FieldPath::parse(path)?;
        let raw_value: FieldValue = value.into();
        match (field_path, raw_value) {
            (FieldPath::Avatar, FieldValue::Files(files)) => self.draft.avatar = files,
            (FieldPath::Name, FieldValue::Text(text)) => self.draft.name = text,
            (FieldPath::Email, FieldValue::Text(text)) => self.draft.email = text,
            (FieldPath::Password, FieldValue::Text(text)) => self.draft.password = text,
            (FieldPath::Techs, _) => {
                return Err(SchemaError::ListManaged {
                    path: field_path.to_string(),
                });
            }
            (FieldPath::Tech { index, field }, raw) => {
                let len = self.draft.techs().len();
                let entry = self
                    .draft
                    .tech_mut(index)
                    .ok_or_else(|| SchemaError::MissingEntry {
                        path: field_path.to_string(),
                        index,
                        len,
                    })?;
                match (field, raw) {
                    (TechField::Title, FieldValue::Text(text)) => entry.title = text,
                    (TechField::Knowledge, FieldValue::Text(text)) => {
                        entry.knowledge = RawKnowledge::Text(text);
                    }
                    (TechField::Knowledge, FieldValue::Number(number)) => {
                        entry.knowledge = RawKnowledge::Number(number);
                    }
                    (_, other) => return Err(mismatch(field_path, &other)),
                }
            }
            (_, other) => return Err(mismatch(field_path, &other)),
        }
        Ok(())
    }

    /// Reads the raw value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if the path is unknown, addresses a missing
    /// skill entry or the skill list itself.
    pub fn field(&self, path: &str) -> Result<FieldValue, SchemaError> {
        let field_path = FieldPath::parse(path)?;
        let value = match field_path {
            FieldPath::Avatar => FieldValue::Files(self.draft.avatar.clone()),
            FieldPath::Name => FieldValue::Text(self.draft.name.clone()),
            FieldPath::Email => FieldValue::Text(self.draft.email.clone()),
            FieldPath::Password => FieldValue::Text(self.draft.password.clone()),
            FieldPath::Techs => {
                return Err(SchemaError::ListManaged {
                    path: field_path.to_string(),
                });
            }
            FieldPath::Tech { index, field } => {
                let techs = self.draft.techs();
                let entry = techs.get(index).ok_or_else(|| SchemaError::MissingEntry {
                    path: field_path.to_string(),
                    index,
                    len: techs.len(),
                })?;
                match field {
                    TechField::Title => FieldValue::Text(entry.title.clone()),
                    TechField::Knowledge => FieldValue::from(entry.knowledge.clone()),
                }
            }
        };
        Ok(value)
    }

    /// Issue currently shown for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownPath`] if the path is unknown.
    pub fn error(&self, path: &str) -> Result<Option<&FieldIssue>, SchemaError> {
        let field_path = FieldPath::parse(path)?;
        Ok(self.errors.get(&field_path))
    }

    /// Appends an empty skill entry with a fresh identity.
    pub fn append_tech_entry(&mut self) -> TechEntryId {
        let id = self.draft.push_tech(TechEntryDraft::blank());
        debug!(entry = %id, count = self.draft.techs().len(), "technology entry appended");
        id
    }

    /// Removes the skill entry with identity `id`; does nothing if no entry
    /// has it. Issues shown for later entries move along with them.
    pub fn remove_tech_entry(&mut self, id: TechEntryId) {
        let Some(index) = self.draft.techs().iter().position(|entry| entry.id() == id) else {
            debug!(entry = %id, "technology entry not found, nothing removed");
            return;
        };
        self.draft.remove_tech(id);
        self.errors.forget_entry(index);
        debug!(entry = %id, count = self.draft.techs().len(), "technology entry removed");
    }

    /// Starts a submit attempt, snapshotting the draft.
    ///
    /// Returns `None` while another attempt is in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.is_submitting() {
            debug!("submit ignored while validating");
            return None;
        }
        self.phase = SubmitPhase::Validating;
        self.submit_count = self.submit_count.saturating_add(1);
        self.sink.submit_started();
        Some(SubmitTicket {
            snapshot: self.draft.clone(),
        })
    }

    /// Resolves a started submit attempt.
    ///
    /// On success the record goes to the output collaborator, the draft is
    /// replaced by an empty one and the error set is cleared. On failure the
    /// returned error set replaces the current one and the draft is kept;
    /// skill entry issues are matched to entries by identity, so list edits
    /// made after `begin_submit` keep each message on its entry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when the schema is incomplete or the output
    /// rejects the record. The attempt is aborted without touching the draft
    /// or the error set.
    pub fn complete_submit(&mut self, ticket: SubmitTicket) -> Result<SubmitOutcome, FormError> {
        if !self.is_submitting() {
            return Ok(SubmitOutcome::Ignored);
        }
        let outcome = self.resolve(&ticket.snapshot);
        self.phase = SubmitPhase::Idle;
        self.sink.submit_finished();
        if let Err(error) = &outcome {
            warn!(%error, "submit aborted");
        }
        outcome
    }

    /// Runs a whole submit attempt.
    ///
    /// # Errors
    ///
    /// See [`ProfileForm::complete_submit`].
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        match self.begin_submit() {
            Some(ticket) => self.complete_submit(ticket),
            None => Ok(SubmitOutcome::Ignored),
        }
    }

    fn resolve(&mut self, snapshot: &FormDraft) -> Result<SubmitOutcome, FormError> {
        match self.schema.validate(snapshot)? {
            Validation::Valid(user) => {
                self.sink.deliver(&user)?;
                info!(
                    avatar = user.avatar().name(),
                    avatar_size = user.avatar().size(),
                    avatar_type = user.avatar().mime_type(),
                    techs = user.techs().len(),
                    "profile accepted"
                );
                self.errors = ErrorSet::default();
                self.draft = FormDraft::default();
                Ok(SubmitOutcome::Accepted(user))
            }
            Validation::Invalid(errors) => {
                let current = self.draft.techs();
                let placed = errors.remap_entries(|index| {
                    let id = snapshot.techs().get(index)?.id();
                    current.iter().position(|entry| entry.id() == id)
                });
                let issues = placed.len();
                debug!(issues, "profile rejected");
                self.errors = placed;
                Ok(SubmitOutcome::Rejected { issues })
            }
        }
    }
}
