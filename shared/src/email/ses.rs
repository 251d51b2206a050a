use async_trait::async_trait;
use aws_sdk_sesv2::config::http::HttpResponse;
use aws_sdk_sesv2::error::{DisplayErrorContext, SdkError};
use aws_sdk_sesv2::operation::send_email::SendEmailError;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;
use contact_atoms::contact::ContactSubmission;

use super::{ContactEmail, DispatchError, EmailDispatcher, EmailIdentity};

/// Amazon SES v2 `SendEmail`. Credentials come from the Lambda role.
pub struct SesDispatcher {
    client: SesClient,
    identity: EmailIdentity,
}

impl SesDispatcher {
    pub fn new(client: SesClient, identity: EmailIdentity) -> Self {
        Self { client, identity }
    }
}

fn utf8_content(data: &str) -> Result<Content, DispatchError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| DispatchError::InvalidMessage(e.to_string()))
}

fn build_content(email: &ContactEmail) -> Result<EmailContent, DispatchError> {
    let message = Message::builder()
        .subject(utf8_content(&email.subject)?)
        .body(Body::builder().html(utf8_content(&email.html)?).build())
        .build();

    Ok(EmailContent::builder().simple(message).build())
}

/// Errors with an HTTP reply keep its status and body; the rest are transport.
fn map_send_error(err: SdkError<SendEmailError, HttpResponse>) -> DispatchError {
    let detail = DisplayErrorContext(&err).to_string();
    match err.raw_response() {
        Some(raw) => DispatchError::Provider {
            status: raw.status().as_u16(),
            body: raw
                .body()
                .bytes()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or(detail),
        },
        None => DispatchError::Transport(detail),
    }
}

#[async_trait]
impl EmailDispatcher for SesDispatcher {
    fn provider(&self) -> &'static str {
        "ses"
    }

    async fn dispatch(&self, submission: &ContactSubmission) -> Result<String, DispatchError> {
        let email = ContactEmail::compose(submission, &self.identity);

        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(
                Destination::builder()
                    .set_to_addresses(Some(email.to.clone()))
                    .build(),
            )
            .reply_to_addresses(&email.reply_to)
            .content(build_content(&email)?)
            .send()
            .await
            .map_err(map_send_error)?;

        let message_id = output.message_id().unwrap_or_default().to_string();
        tracing::info!(message_id = %message_id, "Email sent via SES");
        Ok(message_id)
    }
}
