//! Contact form rule set.
//!
//! The browser runs [`precheck`] before posting, the edge function runs
//! [`validate`] on receipt. Both walk the same rules through [`check_fields`],
//! so the advisory and authoritative checks cannot drift apart.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

use super::model::ContactForm;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

/// How long the client keeps its error banner up before dismissing it
pub const BANNER_DISMISS_AFTER: Duration = Duration::from_secs(5);

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

/// Every rule the three required fields break, in form order.
pub fn check_fields(name: &str, email: &str, message: &str) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    if name.trim().chars().count() < MIN_NAME_CHARS {
        violations.push(RuleViolation::NameTooShort);
    }
    if !EMAIL_RE.is_match(email) {
        violations.push(RuleViolation::InvalidEmail);
    }
    if message.trim().chars().count() < MIN_MESSAGE_CHARS {
        violations.push(RuleViolation::MessageTooShort);
    }

    violations
}

/// Authoritative server-side check.
pub fn validate(form: &ContactForm) -> Result<(), Vec<RuleViolation>> {
    let violations = check_fields(&form.name, &form.email, &form.message);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Outcome of the advisory client-side check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precheck {
    pub passed: bool,
    pub errors: Vec<String>,
    /// Set when the client should show its error banner
    pub dismiss_after: Option<Duration>,
}

/// Advisory check the site runs before posting. A failed precheck means
/// the form is never sent; a passed one proves nothing to the server.
pub fn precheck(name: &str, email: &str, message: &str) -> Precheck {
    let errors: Vec<String> = check_fields(name, email, message)
        .iter()
        .map(ToString::to_string)
        .collect();

    let passed = errors.is_empty();
    Precheck {
        passed,
        errors,
        dismiss_after: (!passed).then_some(BANNER_DISMISS_AFTER),
    }
}
