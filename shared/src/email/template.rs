use contact_atoms::contact::ContactSubmission;

use super::EmailIdentity;

pub const SUBJECT_PREFIX: &str = "New Contact Form: ";
pub const DEFAULT_SUBJECT: &str = "General Inquiry";
const NOT_PROVIDED: &str = "Not provided";

/// Provider-neutral notification email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub from: String,
    pub to: Vec<String>,
    /// Submitter's address, so staff can answer straight from their inbox
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

impl ContactEmail {
    pub fn compose(submission: &ContactSubmission, identity: &EmailIdentity) -> Self {
        Self {
            from: identity.from.clone(),
            to: identity.to.clone(),
            reply_to: submission.email().to_string(),
            subject: subject_line(submission.subject()),
            html: render_html(submission, identity),
        }
    }
}

pub fn subject_line(subject: &str) -> String {
    let subject = subject.trim();
    if subject.is_empty() {
        format!("{SUBJECT_PREFIX}{DEFAULT_SUBJECT}")
    } else {
        format!("{SUBJECT_PREFIX}{subject}")
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

// Fields arrive sanitized, not escaped; see the sanitizer docs.
fn render_html(submission: &ContactSubmission, identity: &EmailIdentity) -> String {
    let zone = &identity.display_zone;
    let submitted = submission
        .submitted_at()
        .with_timezone(&zone.offset)
        .format("%B %-d, %Y at %-I:%M %p");
    let message = submission.message().replace("\r\n", "\n").replace('\n', "<br>");

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333; border-bottom: 2px solid #4f46e5; padding-bottom: 10px;">New Contact Form Submission</h2>
  <table style="width: 100%; border-collapse: collapse;">
    <tr><td style="padding: 8px 0; font-weight: bold; width: 120px;">Name:</td><td style="padding: 8px 0;">{name}</td></tr>
    <tr><td style="padding: 8px 0; font-weight: bold;">Email:</td><td style="padding: 8px 0;"><a href="mailto:{email}">{email}</a></td></tr>
    <tr><td style="padding: 8px 0; font-weight: bold;">Phone:</td><td style="padding: 8px 0;">{phone}</td></tr>
    <tr><td style="padding: 8px 0; font-weight: bold;">Subject:</td><td style="padding: 8px 0;">{subject}</td></tr>
  </table>
  <h3 style="color: #333; margin-top: 20px;">Message:</h3>
  <div style="background: #f9fafb; padding: 15px; border-radius: 5px; line-height: 1.6;">{message}</div>
  <hr style="margin-top: 30px; border: none; border-top: 1px solid #e5e7eb;">
  <p style="color: #6b7280; font-size: 12px;">Submitted {submitted} {zone_label}<br>User agent: {user_agent}</p>
</div>"#,
        name = submission.name(),
        email = submission.email(),
        phone = or_not_provided(submission.phone()),
        subject = or_not_provided(submission.subject()),
        zone_label = zone.label,
        user_agent = submission.user_agent(),
    )
}
