//! Submission output collaborators.

use crate::error::OutputError;
use crate::user::ValidatedUser;

/// Receives submit lifecycle notifications and accepted records.
///
/// `submit_started` and `submit_finished` bracket every submit attempt that
/// was not ignored, so a view can disable its submit control in between.
pub trait SubmissionSink {
    /// A submit attempt began.
    fn submit_started(&mut self) {}

    /// The current submit attempt resolved, successfully or not.
    fn submit_finished(&mut self) {}

    /// Hands over a record that passed validation.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the record cannot be accepted; the submit
    /// attempt is then aborted and the draft kept.
    fn deliver(&mut self, user: &ValidatedUser) -> Result<(), OutputError>;
}

/// Keeps the last accepted record rendered as indented JSON.
///
/// The avatar is left out of the rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOutput {
    rendered: Option<String>,
    busy: bool,
}

impl JsonOutput {
    /// JSON text of the last accepted record.
    #[must_use]
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Returns `true` while a submit attempt is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }
}

impl SubmissionSink for JsonOutput {
    fn submit_started(&mut self) {
        self.busy = true;
    }

    fn submit_finished(&mut self) {
        self.busy = false;
    }

    fn deliver(&mut self, user: &ValidatedUser) -> Result<(), OutputError> {
        self.rendered = Some(user.to_json_pretty()?);
        Ok(())
    }
}
