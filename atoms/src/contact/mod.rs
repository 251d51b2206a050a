// Re-export model types and rule/sanitizer functions
pub mod model;
pub mod rules;
pub mod sanitize;

pub use model::{ContactForm, ContactSubmission, SubmissionReceipt, UNKNOWN_USER_AGENT};
pub use rules::{check_fields, precheck, validate, Precheck, RuleViolation};
pub use sanitize::{sanitize, MAX_FIELD_CHARS};
