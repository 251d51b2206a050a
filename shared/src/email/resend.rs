use async_trait::async_trait;
use contact_atoms::contact::ContactSubmission;
use serde::{Deserialize, Serialize};

use super::{send_checked, ContactEmail, DispatchError, EmailDispatcher, EmailIdentity};

/// Resend's `POST /emails`, bearer authenticated.
pub struct ResendDispatcher {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    identity: EmailIdentity,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl ResendDispatcher {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        identity: EmailIdentity,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            identity,
        }
    }
}

#[async_trait]
impl EmailDispatcher for ResendDispatcher {
    fn provider(&self) -> &'static str {
        "resend"
    }

    async fn dispatch(&self, submission: &ContactSubmission) -> Result<String, DispatchError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DispatchError::MissingCredential)?;

        let email = ContactEmail::compose(submission, &self.identity);
        let payload = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            reply_to: &email.reply_to,
        };

        let response = send_checked(
            self.client
                .post(&self.api_url)
                .bearer_auth(api_key)
                .json(&payload),
        )
        .await?;

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::Transport(format!("unreadable Resend response: {}", e)))?;

        tracing::info!(message_id = %sent.id, "Email sent via Resend");
        Ok(sent.id)
    }
}
