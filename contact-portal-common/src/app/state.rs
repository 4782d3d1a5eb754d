use common::error::{CpError, CpResult};

use crate::{
    data::{ContactFormData, Credentials, Session, SubmissionRecord},
    validation::validate_contact_form,
};

/// Which of the two forms is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    Contact,
}

/// Progress of the contact form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    /// Thank-you message is showing until the form resets
    Submitted,
}

/// Message banner shared by both views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) | Self::Info(message) => message,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Everything the page renders from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub session: Option<Session>,
    pub credentials: Credentials,
    /// An auth request is in flight. Both auth buttons are disabled.
    pub auth_loading: bool,
    pub form: ContactFormData,
    pub phase: FormPhase,
    pub notice: Option<Notice>,
}

impl AppState {
    pub const fn view(&self) -> View {
        if self.session.is_some() {
            View::Contact
        } else {
            View::Auth
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Validate the form and tag it with the signed in user.
    /// # Errors
    /// This function will return an error if the form is invalid or there is no session
    pub fn prepare_submission(&self) -> CpResult<SubmissionRecord> {
        validate_contact_form(&self.form)?;
        let Some(session) = &self.session else {
            return Err(CpError::NotAuthenticated);
        };
        Ok(self.form.to_record(*session.user_id()))
    }

    /// Empty every contact field and leave the thank-you view
    pub fn reset_contact_form(&mut self) {
        self.form = ContactFormData::default();
        self.phase = FormPhase::Editing;
    }
}
