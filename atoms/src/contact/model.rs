use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{validate, RuleViolation};
use super::sanitize::sanitize;

/// Stamped on a submission when the request carries no `User-Agent`
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Raw contact form as posted by the site. Missing fields decode as "".
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,

    /// Honeypot, hidden from humans by CSS
    pub website: String,
}

impl ContactForm {
    /// Any value in the hidden field means a bot filled the form.
    pub fn is_spam(&self) -> bool {
        !self.website.is_empty()
    }
}

/// A submission that passed validation and had every text field sanitized.
///
/// The only way to get one is [`ContactSubmission::accept`], so anything
/// holding a `ContactSubmission` can skip re-validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
    submitted_at: DateTime<Utc>,
    user_agent: String,
}

impl ContactSubmission {
    /// Validate `form` against the shared rule set, then sanitize it.
    /// Every violated rule is reported, not only the first.
    pub fn accept(
        form: ContactForm,
        submitted_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<Self, Vec<RuleViolation>> {
        validate(&form)?;

        Ok(Self {
            name: sanitize(&form.name),
            email: sanitize(&form.email),
            phone: sanitize(&form.phone),
            subject: sanitize(&form.subject),
            message: sanitize(&form.message),
            submitted_at,
            user_agent: user_agent
                .map(sanitize)
                .unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// ISO-8601 UTC with millisecond precision, e.g. `2025-03-01T09:30:00.000Z`
    pub fn timestamp(&self) -> String {
        self.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            name: self.name.clone(),
            email: self.email.clone(),
            timestamp: self.timestamp(),
        }
    }
}

/// Echoed back to the browser on success. Never carries the message body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub name: String,
    pub email: String,
    pub timestamp: String,
}
