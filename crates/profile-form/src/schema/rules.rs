//! Field definitions of the standard profile schema.

use std::sync::OnceLock;

use regex::Regex;

use super::{FieldSchema, ListRule, Rule};
use crate::draft::{RawKnowledge, SelectedFile};
use crate::issue::FieldIssue;
use crate::settings::{ACCEPTED_IMAGE_TYPES, KNOWLEDGE_MAX, KNOWLEDGE_MIN, SchemaLimits};

const AVATAR_REQUIRED: &str = "profile image is required";
const KNOWLEDGE_NOT_A_NUMBER: &str = "value must be a number";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Leading dots and consecutive dots are rejected separately.
        let pattern = r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Returns `true` if `email` is a syntactically valid address.
///
/// # Examples
///
/// ```
/// use profile_form::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_regex().is_match(email)
}

/// Trims `raw`, splits it on single spaces and upper-cases the first
/// character of every word, leaving the rest of each word untouched.
///
/// Known limitation: upper-casing is per character, so names with internal
/// capitals such as "mcDonald" keep them as typed.
///
/// # Examples
///
/// ```
/// use profile_form::capitalize_words;
///
/// assert_eq!(capitalize_words(" joão silva "), "João Silva");
/// assert_eq!(capitalize_words("João Silva"), "João Silva");
/// ```
#[must_use]
pub fn capitalize_words(raw: &str) -> String {
    raw.trim()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn first_file(files: Vec<SelectedFile>) -> Result<SelectedFile, FieldIssue> {
    files
        .into_iter()
        .next()
        .ok_or_else(|| FieldIssue::required(AVATAR_REQUIRED))
}

fn coerce_knowledge(raw: RawKnowledge) -> Result<f64, FieldIssue> {
    raw.coerce().ok_or_else(|| FieldIssue::coercion(KNOWLEDGE_NOT_A_NUMBER))
}

pub(super) fn avatar(limits: &SchemaLimits) -> FieldSchema<Vec<SelectedFile>, SelectedFile> {
    let max_bytes = limits.max_avatar_bytes();
    FieldSchema::new(first_file)
        .rule(Rule::new(
            FieldIssue::required(AVATAR_REQUIRED),
            |files: &Vec<SelectedFile>| !files.is_empty(),
        ))
        .rule(Rule::new(
            FieldIssue::range(format!("max size {}MB", limits.max_avatar_megabytes)),
            move |files: &Vec<SelectedFile>| {
                files.first().is_some_and(|file| file.size() <= max_bytes)
            },
        ))
        .rule(Rule::new(
            FieldIssue::format("invalid image format"),
            |files: &Vec<SelectedFile>| {
                files.first().is_some_and(|file| {
                    ACCEPTED_IMAGE_TYPES
                        .iter()
                        .any(|accepted| *accepted == file.mime_type())
                })
            },
        ))
}

pub(super) fn name() -> FieldSchema<String, String> {
    FieldSchema::new(|name: String| Ok(capitalize_words(&name))).rule(Rule::new(
        FieldIssue::required("name is required"),
        |name: &String| !name.trim().is_empty(),
    ))
}

pub(super) fn email() -> FieldSchema<String, String> {
    FieldSchema::new(|email: String| Ok(email.to_lowercase()))
        .rule(Rule::new(
            FieldIssue::required("email is required"),
            |email: &String| !email.is_empty(),
        ))
        .rule(Rule::new(
            FieldIssue::format("invalid email format"),
            |email: &String| is_valid_email(email),
        ))
}

pub(super) fn password(limits: &SchemaLimits) -> FieldSchema<String, String> {
    let min = limits.min_password_length;
    FieldSchema::new(Ok).rule(Rule::new(
        FieldIssue::range(format!("minimum {min} characters")),
        move |password: &String| password.chars().count() >= min,
    ))
}

pub(super) fn tech_title() -> FieldSchema<String, String> {
    FieldSchema::new(Ok).rule(Rule::new(
        FieldIssue::required("title is required"),
        |title: &String| !title.is_empty(),
    ))
}

pub(super) fn tech_knowledge() -> FieldSchema<RawKnowledge, f64> {
    FieldSchema::new(coerce_knowledge)
        .rule(Rule::new(
            FieldIssue::coercion(KNOWLEDGE_NOT_A_NUMBER),
            |raw: &RawKnowledge| raw.coerce().is_some(),
        ))
        .rule(Rule::new(
            FieldIssue::range(format!(
                "value must be between {KNOWLEDGE_MIN} and {KNOWLEDGE_MAX}"
            )),
            |raw: &RawKnowledge| {
                raw.coerce()
                    .is_some_and(|level| (KNOWLEDGE_MIN..=KNOWLEDGE_MAX).contains(&level))
            },
        ))
}

pub(super) fn techs(limits: &SchemaLimits) -> ListRule {
    let min = limits.min_techs;
    ListRule::new(
        min,
        FieldIssue::cardinality(format!("insert at least {min} technologies")),
    )
}
