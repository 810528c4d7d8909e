use std::time::Duration;

use press_core::{FormEncoding, FormFeedback, FormSubmission};
use press_logging::{press_info, press_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use thiserror::Error;
use url::{form_urlencoded, Url};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("invalid form endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("form rejected before sending: {}", .0.text())]
    Invalid(FormFeedback),
    #[error("network error: {0}")]
    Network(String),
    #[error("form endpoint answered HTTP {0}")]
    Status(u16),
}

impl RelayError {
    /// Feedback line to show under the form.
    pub fn feedback(&self) -> FormFeedback {
        match self {
            RelayError::Invalid(feedback) => feedback.clone(),
            RelayError::InvalidEndpoint(_) | RelayError::Network(_) | RelayError::Status(_) => {
                FormFeedback::Failed
            }
        }
    }
}

/// Posts contact and newsletter forms to a hosted form relay.
#[derive(Debug, Clone)]
pub struct FormRelayClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl FormRelayClient {
    pub fn new(endpoint: &str) -> Result<Self, RelayError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| RelayError::InvalidEndpoint(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| RelayError::Network(err.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub async fn submit(&self, form: &FormSubmission) -> Result<FormFeedback, RelayError> {
        form.validate().map_err(RelayError::Invalid)?;

        let (content_type, body) = encode(form);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .map_err(|err| RelayError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            press_warn!("Form relay answered {}", status);
            return Err(RelayError::Status(status.as_u16()));
        }
        press_info!("Form sent to {}", self.endpoint);
        Ok(form.success())
    }
}

fn encode(form: &FormSubmission) -> (&'static str, String) {
    match form.encoding {
        FormEncoding::Form => {
            let body = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(form.fields.iter())
                .finish();
            ("application/x-www-form-urlencoded", body)
        }
        FormEncoding::Json => {
            let object: serde_json::Map<String, serde_json::Value> = form
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
                .collect();
            ("application/json", serde_json::Value::Object(object).to_string())
        }
    }
}
