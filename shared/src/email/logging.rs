use async_trait::async_trait;
use contact_atoms::contact::ContactSubmission;

use super::{ContactEmail, DispatchError, EmailDispatcher, EmailIdentity};

/// Logs the envelope of the composed email instead of sending it. Local dev
/// only. The HTML carries the message body, so only its size is logged.
pub struct LogDispatcher {
    identity: EmailIdentity,
}

impl LogDispatcher {
    pub fn new(identity: EmailIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl EmailDispatcher for LogDispatcher {
    fn provider(&self) -> &'static str {
        "log"
    }

    async fn dispatch(&self, submission: &ContactSubmission) -> Result<String, DispatchError> {
        let email = ContactEmail::compose(submission, &self.identity);
        let id = format!("log-{}", submission.submitted_at().timestamp_millis());

        tracing::info!(
            message_id = %id,
            to = ?email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "Would send contact email"
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, TimeZone, Utc};
    use contact_atoms::contact::ContactForm;

    use super::*;
    use crate::config::DisplayZone;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn dispatcher() -> LogDispatcher {
        LogDispatcher::new(EmailIdentity {
            from: "noreply@example.com".into(),
            to: vec!["hello@example.com".into()],
            display_zone: DisplayZone::default(),
        })
    }

    fn submission(at: DateTime<Utc>, message: &str) -> ContactSubmission {
        ContactSubmission::accept(
            ContactForm {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                subject: "Opening hours".into(),
                message: message.into(),
                ..Default::default()
            },
            at,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_timestamped_id() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

        let id = dispatcher()
            .dispatch(&submission(at, "Hello there friend"))
            .await
            .unwrap();

        assert_eq!(id, format!("log-{}", at.timestamp_millis()));
    }

    #[tokio::test]
    async fn message_body_stays_out_of_the_log() {
        // Arrange
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // Act
        dispatcher()
            .dispatch(&submission(Utc::now(), "Please call me about the secret plan"))
            .await
            .unwrap();

        // Assert
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Would send contact email"));
        assert!(output.contains("New Contact Form: Opening hours"));
        assert!(!output.contains("secret plan"));
    }
}
