use async_trait::async_trait;
use contact_atoms::contact::ContactSubmission;

use super::{send_checked, DispatchError, EmailDispatcher};

/// Hands the submission to another backend as JSON instead of mailing it.
pub struct ForwardDispatcher {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl ForwardDispatcher {
    pub fn new(client: reqwest::Client, url: String, token: Option<String>) -> Self {
        Self { client, url, token }
    }
}

#[async_trait]
impl EmailDispatcher for ForwardDispatcher {
    fn provider(&self) -> &'static str {
        "forward"
    }

    async fn dispatch(&self, submission: &ContactSubmission) -> Result<String, DispatchError> {
        let mut request = self.client.post(&self.url).json(submission);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = send_checked(request).await?;

        // Backends are not required to answer with an id
        let id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("id").and_then(|v| v.as_str()).map(str::to_string))
            .unwrap_or_else(|| "forwarded".to_string());

        tracing::info!(message_id = %id, "Submission forwarded");
        Ok(id)
    }
}
