//! Contact and newsletter form submissions relayed to a third-party endpoint.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormEncoding {
    #[default]
    Form,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub fields: Vec<(String, String)>,
    pub encoding: FormEncoding,
    /// Shown after a successful submit; `{email}` is replaced by the address.
    pub success_template: String,
}

/// Text shown in the feedback line under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFeedback {
    InvalidEmail,
    Sending,
    Sent(String),
    Failed,
}

impl FormFeedback {
    pub fn text(&self) -> &str {
        match self {
            FormFeedback::InvalidEmail => "Please enter a valid email address.",
            FormFeedback::Sending => "Sending...",
            FormFeedback::Sent(message) => message,
            FormFeedback::Failed => "Something went wrong. Please try again.",
        }
    }
}

impl FormSubmission {
    pub fn new(success_template: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            encoding: FormEncoding::Form,
            success_template: success_template.into(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn email(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == "email")
            .map(|(_, value)| value.trim())
    }

    /// A form with an `email` field may not be sent with that field blank.
    pub fn validate(&self) -> Result<(), FormFeedback> {
        match self.email() {
            Some("") => Err(FormFeedback::InvalidEmail),
            _ => Ok(()),
        }
    }

    pub fn success(&self) -> FormFeedback {
        FormFeedback::Sent(
            self.success_template
                .replace("{email}", self.email().unwrap_or_default()),
        )
    }
}
