//! Validation and normalization engine for the user profile form.
//!
//! The form collects an avatar image, a name, an e-mail address, a password
//! and a variable-length list of skill entries. This crate holds the logic
//! behind it; rendering controls is left to a view that addresses fields by
//! path string.
//!
//! # Overview
//!
//! - [`UserSchema`] declares the rules and transforms of every field and
//!   turns a [`FormDraft`] into either a [`ValidatedUser`] or an [`ErrorSet`]
//! - [`ProfileForm`] owns the draft, manages the skill list by stable
//!   identity and drives the submit cycle
//! - [`PasswordStrength`] rates the typed password for live feedback only
//! - [`FormSettings`] loads the configurable limits via OrthoConfig
//!
//! # Example
//!
//! ```
//! use profile_form::{JsonOutput, ProfileForm, SelectedFile, SubmitOutcome};
//!
//! let mut form = ProfileForm::new(JsonOutput::default());
//! form.set_field("avatar", vec![SelectedFile::from_metadata("me.png", "image/png", 2048)])
//!     .expect("avatar path exists");
//! form.set_field("name", "ada lovelace").expect("name path exists");
//! form.set_field("email", "Ada@Example.com").expect("email path exists");
//! form.set_field("password", "analytical").expect("password path exists");
//! for (title, level) in [("Rust", "90"), ("Go", "40")] {
//!     form.append_tech_entry();
//!     let index = form.tech_entries().len() - 1;
//!     form.set_field(&format!("techs.{index}.title"), title).expect("entry exists");
//!     form.set_field(&format!("techs.{index}.knowledge"), level).expect("entry exists");
//! }
//!
//! let outcome = form.submit().expect("schema is complete");
//! assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
//! assert!(form.sink().rendered().is_some_and(|json| json.contains("Ada Lovelace")));
//! ```

mod draft;
mod error;
mod error_set;
mod form;
mod issue;
mod output;
mod path;
mod schema;
mod settings;
mod strength;
mod user;

pub use draft::{FormDraft, RawKnowledge, SelectedFile, TechEntryDraft, TechEntryId};
pub use error::{FormError, OutputError, SchemaError};
pub use error_set::ErrorSet;
pub use form::{FieldValue, ProfileForm, SubmitOutcome, SubmitPhase, SubmitTicket};
pub use issue::{FieldIssue, IssueKind};
pub use output::{JsonOutput, SubmissionSink};
pub use path::{FieldPath, TechField};
pub use schema::{FieldSchema, ListRule, Rule, UserSchema, capitalize_words, is_valid_email};
pub use settings::{
    ACCEPTED_IMAGE_TYPES, FormSettings, KNOWLEDGE_MAX, KNOWLEDGE_MIN, SchemaLimits,
};
pub use strength::{PasswordStrength, STRONG_PASSWORD_MIN, is_strong_password};
pub use user::{ValidatedTech, ValidatedUser, Validation};
