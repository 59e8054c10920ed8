//! Contact form submissions: validation and delivery.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

/// A contact form submission as posted by the site.
///
/// Every field is optional at the wire level so that missing required
/// fields are reported by `validate` rather than by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub check_in: Option<String>,
    pub guests: Option<String>,
    pub message: Option<String>,
}

/// Marker for a submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted;

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("Missing required fields")]
    MissingRequiredField,

    #[error("Invalid email format")]
    InvalidEmailFormat,
}

impl RejectionReason {
    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            RejectionReason::InvalidEmailFormat => "INVALID_EMAIL_FORMAT",
        }
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Validate a contact submission.
///
/// `name`, `email` and `phone` must be present and not blank. Only then is
/// the email checked against `local@domain.tld`. Optional fields are passed
/// through as-is.
pub fn validate(submission: &ContactSubmission) -> Result<Accepted, RejectionReason> {
    if !(is_present(&submission.name)
        && is_present(&submission.email)
        && is_present(&submission.phone))
    {
        return Err(RejectionReason::MissingRequiredField);
    }

    let email = submission.email.as_deref().unwrap_or_default();
    if !email_regex().is_match(email) {
        return Err(RejectionReason::InvalidEmailFormat);
    }

    Ok(Accepted)
}

/// Destination for accepted inquiries.
///
/// Email or chat delivery lives behind this trait; the site only ships
/// `LogSink`.
#[async_trait]
pub trait InquirySink: Send + Sync {
    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()>;
}

/// Writes inquiries to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink {
    /// Log at info level instead of debug (development setups)
    pub verbose: bool,
}

#[async_trait]
impl InquirySink for LogSink {
    async fn deliver(&self, submission: &ContactSubmission) -> anyhow::Result<()> {
        let name = submission.name.as_deref().unwrap_or_default();
        let check_in = submission.check_in.as_deref().unwrap_or("Not specified");
        let guests = submission.guests.as_deref().unwrap_or("Not specified");

        if self.verbose {
            info!(
                guest_name = name,
                check_in,
                guests,
                has_message = submission.message.is_some(),
                "Contact form submission"
            );
        } else {
            debug!(guest_name = name, check_in, guests, "Contact form submission");
        }
        Ok(())
    }
}
