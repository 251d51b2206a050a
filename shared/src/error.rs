use contact_atoms::contact::RuleViolation;
use thiserror::Error;

use crate::email::DispatchError;

/// Why a contact submission did not go through.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Honeypot was filled in
    #[error("submission rejected as spam")]
    SpamRejected,

    #[error("submission failed validation: {}", join_violations(.0))]
    ValidationFailed(Vec<RuleViolation>),

    #[error(transparent)]
    DispatchFailed(#[from] DispatchError),

    /// Anything else. The detail is logged, never returned to the caller.
    #[error("unhandled error: {0}")]
    Unhandled(String),
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bad or missing environment at cold start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("unknown EMAIL_PROVIDER {0:?}, expected resend, ses, forward or log")]
    UnknownProvider(String),

    #[error("CONTACT_DISPLAY_OFFSET {0:?} is not a UTC offset like +05:30")]
    InvalidOffset(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
