//! Declarative profile schema and the validation pass over it.
//!
//! A [`UserSchema`] maps every field of the form to a [`FieldSchema`]: an
//! ordered list of [`Rule`]s plus a transform applied once every rule passed.
//! The first failing rule of a field wins. Fields are evaluated
//! independently, so one pass reports every failing field at once.

mod rules;

use std::fmt;

use crate::draft::{FormDraft, RawKnowledge, SelectedFile};
use crate::error::SchemaError;
use crate::error_set::ErrorSet;
use crate::issue::FieldIssue;
use crate::path::{FieldPath, TechField};
use crate::settings::SchemaLimits;
use crate::user::{ValidatedTech, ValidatedUser, Validation};

pub use rules::{capitalize_words, is_valid_email};

type Check<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate paired with the issue reported when it fails.
pub struct Rule<T> {
    check: Check<T>,
    issue: FieldIssue,
}

impl<T> Rule<T> {
    /// Creates a rule that reports `issue` whenever `check` returns `false`.
    #[must_use]
    pub fn new(issue: FieldIssue, check: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            check: Box::new(check),
            issue,
        }
    }

    /// Issue reported when the rule fails.
    #[must_use]
    pub const fn issue(&self) -> &FieldIssue {
        &self.issue
    }

    fn passes(&self, value: &T) -> bool {
        (self.check)(value)
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("issue", &self.issue)
            .finish_non_exhaustive()
    }
}

/// Ordered rules for one field plus the transform producing its output.
pub struct FieldSchema<I, O> {
    rules: Vec<Rule<I>>,
    transform: fn(I) -> Result<O, FieldIssue>,
}

impl<I, O> FieldSchema<I, O> {
    /// Creates a field with no rules and the given transform.
    #[must_use]
    pub const fn new(transform: fn(I) -> Result<O, FieldIssue>) -> Self {
        Self {
            rules: Vec::new(),
            transform,
        }
    }

    /// Appends a rule, evaluated after those already present.
    #[must_use]
    pub fn rule(mut self, rule: Rule<I>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule<I>] {
        self.rules.as_slice()
    }

    /// Checks `input` against the rules and transforms it.
    ///
    /// # Errors
    ///
    /// Returns the issue of the first failing rule, or the transform's issue.
    pub fn apply(&self, input: I) -> Result<O, FieldIssue> {
        if let Some(failed) = self.rules.iter().find(|rule| !rule.passes(&input)) {
            return Err(failed.issue.clone());
        }
        (self.transform)(input)
    }
}

impl<I, O> fmt::Debug for FieldSchema<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

/// Collection-level rule for the skill list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRule {
    min: usize,
    issue: FieldIssue,
}

impl ListRule {
    /// Requires at least `min` entries to survive per-entry validation.
    #[must_use]
    pub const fn new(min: usize, issue: FieldIssue) -> Self {
        Self { min, issue }
    }

    /// Minimum number of valid entries.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }
}

/// Declarative schema of the profile form.
///
/// # Examples
///
/// ```
/// use profile_form::{FormDraft, UserSchema, FieldPath};
///
/// let schema = UserSchema::default();
/// let validation = schema.validate(&FormDraft::default()).expect("schema is complete");
/// let errors = validation.errors().expect("empty draft is invalid");
///
/// assert_eq!(errors.message(&FieldPath::Name), Some("name is required"));
/// assert_eq!(errors.message(&FieldPath::Techs), Some("insert at least 2 technologies"));
/// ```
#[derive(Debug)]
pub struct UserSchema {
    avatar: Option<FieldSchema<Vec<SelectedFile>, SelectedFile>>,
    name: Option<FieldSchema<String, String>>,
    email: Option<FieldSchema<String, String>>,
    password: Option<FieldSchema<String, String>>,
    tech_title: Option<FieldSchema<String, String>>,
    tech_knowledge: Option<FieldSchema<RawKnowledge, f64>>,
    techs: Option<ListRule>,
}

impl UserSchema {
    /// A schema defining no fields; populate it with the `with_*` methods.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            avatar: None,
            name: None,
            email: None,
            password: None,
            tech_title: None,
            tech_knowledge: None,
            techs: None,
        }
    }

    /// The standard profile schema for the given limits.
    #[must_use]
    pub fn standard(limits: &SchemaLimits) -> Self {
        Self::empty()
            .with_avatar(rules::avatar(limits))
            .with_name(rules::name())
            .with_email(rules::email())
            .with_password(rules::password(limits))
            .with_tech_title(rules::tech_title())
            .with_tech_knowledge(rules::tech_knowledge())
            .with_techs(rules::techs(limits))
    }

    /// Defines the avatar field.
    #[must_use]
    pub fn with_avatar(mut self, field: FieldSchema<Vec<SelectedFile>, SelectedFile>) -> Self {
        self.avatar = Some(field);
        self
    }

    /// Defines the name field.
    #[must_use]
    pub fn with_name(mut self, field: FieldSchema<String, String>) -> Self {
        self.name = Some(field);
        self
    }

    /// Defines the e-mail field.
    #[must_use]
    pub fn with_email(mut self, field: FieldSchema<String, String>) -> Self {
        self.email = Some(field);
        self
    }

    /// Defines the password field.
    #[must_use]
    pub fn with_password(mut self, field: FieldSchema<String, String>) -> Self {
        self.password = Some(field);
        self
    }

    /// Defines the title field of every skill entry.
    #[must_use]
    pub fn with_tech_title(mut self, field: FieldSchema<String, String>) -> Self {
        self.tech_title = Some(field);
        self
    }

    /// Defines the knowledge field of every skill entry.
    #[must_use]
    pub fn with_tech_knowledge(mut self, field: FieldSchema<RawKnowledge, f64>) -> Self {
        self.tech_knowledge = Some(field);
        self
    }

    /// Defines the collection rule of the skill list.
    #[must_use]
    pub fn with_techs(mut self, rule: ListRule) -> Self {
        self.techs = Some(rule);
        self
    }

    /// Validates and normalizes a draft.
    ///
    /// Every field is checked; every failing field and entry contributes to
    /// the returned [`ErrorSet`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UndefinedField`] when the schema lacks a
    /// definition for one of the draft's fields. No partial error set is
    /// produced in that case.
    pub fn validate(&self, draft: &FormDraft) -> Result<Validation, SchemaError> {
        let avatar_field = defined(self.avatar.as_ref(), "avatar")?;
        let name_field = defined(self.name.as_ref(), "name")?;
        let email_field = defined(self.email.as_ref(), "email")?;
        let password_field = defined(self.password.as_ref(), "password")?;
        let title_field = defined(self.tech_title.as_ref(), "techs.*.title")?;
        let knowledge_field = defined(self.tech_knowledge.as_ref(), "techs.*.knowledge")?;
        let list_rule = defined(self.techs.as_ref(), "techs")?;

        let mut errors = ErrorSet::default();

        let avatar = errors.capture(FieldPath::Avatar, avatar_field.apply(draft.avatar.clone()));
        let name = errors.capture(FieldPath::Name, name_field.apply(draft.name.clone()));
        let email = errors.capture(FieldPath::Email, email_field.apply(draft.email.clone()));
        let password = errors.capture(
            FieldPath::Password,
            password_field.apply(draft.password.clone()),
        );

        let mut techs = Vec::with_capacity(draft.techs().len());
        for (index, entry) in draft.techs().iter().enumerate() {
            let title = errors.capture(
                FieldPath::tech(index, TechField::Title),
                title_field.apply(entry.title.clone()),
            );
            let knowledge = errors.capture(
                FieldPath::tech(index, TechField::Knowledge),
                knowledge_field.apply(entry.knowledge.clone()),
            );
            if let (Some(valid_title), Some(valid_knowledge)) = (title, knowledge) {
                techs.push(ValidatedTech::new(valid_title, valid_knowledge));
            }
        }
        if techs.len() < list_rule.min {
            errors.insert(FieldPath::Techs, list_rule.issue.clone());
        }

        Ok(match (avatar, name, email, password) {
            (Some(file), Some(full_name), Some(address), Some(secret)) if errors.is_empty() => {
                Validation::Valid(ValidatedUser::new(file, full_name, address, secret, techs))
            }
            _ => Validation::Invalid(errors),
        })
    }
}

impl Default for UserSchema {
    fn default() -> Self {
        Self::standard(&SchemaLimits::default())
    }
}

fn defined<'a, T>(slot: Option<&'a T>, path: &str) -> Result<&'a T, SchemaError> {
    slot.ok_or_else(|| SchemaError::UndefinedField {
        path: path.to_owned(),
    })
}
