//! Email dispatch.
//!
//! One [`EmailDispatcher`] is active per deployment, picked by
//! `EMAIL_PROVIDER`. Every provider takes an already validated and sanitized
//! [`ContactSubmission`] and makes exactly one outbound call; no retries.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use contact_atoms::contact::ContactSubmission;
use thiserror::Error;

use crate::config::{ContactConfig, DisplayZone, ProviderKind};
use crate::error::ConfigError;

mod forward;
mod logging;
mod resend;
mod ses;
pub mod template;

pub use forward::ForwardDispatcher;
pub use logging::LogDispatcher;
pub use resend::ResendDispatcher;
pub use ses::SesDispatcher;
pub use template::ContactEmail;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("email provider credential is not configured")]
    MissingCredential,

    /// Non-success reply, status and body kept verbatim
    #[error("email provider responded with status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("email provider request failed: {0}")]
    Transport(String),

    #[error("email could not be built: {0}")]
    InvalidMessage(String),
}

/// Hands a submission to an email provider and returns the provider's
/// message id.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Short provider name for logs
    fn provider(&self) -> &'static str;

    async fn dispatch(&self, submission: &ContactSubmission) -> Result<String, DispatchError>;
}

/// Fixed sender, recipients and display zone for notification emails
#[derive(Debug, Clone)]
pub struct EmailIdentity {
    pub from: String,
    pub to: Vec<String>,
    pub display_zone: DisplayZone,
}

impl EmailIdentity {
    pub fn from_config(config: &ContactConfig) -> Self {
        Self {
            from: config.from_address.clone(),
            to: config.recipients.clone(),
            display_zone: config.display_zone.clone(),
        }
    }
}

/// Build the dispatcher selected in `config`.
pub async fn build_dispatcher(
    config: &ContactConfig,
) -> Result<Arc<dyn EmailDispatcher>, ConfigError> {
    let identity = EmailIdentity::from_config(config);

    let dispatcher: Arc<dyn EmailDispatcher> = match config.provider {
        ProviderKind::Resend => Arc::new(ResendDispatcher::new(
            http_client()?,
            config.resend_api_url.clone(),
            config.resend_api_key.clone(),
            identity,
        )),
        ProviderKind::Ses => {
            let aws_config = aws_config::load_from_env().await;
            Arc::new(SesDispatcher::new(SesClient::new(&aws_config), identity))
        }
        ProviderKind::Forward => {
            let url = config
                .forward_url
                .clone()
                .ok_or(ConfigError::Missing("FORWARD_URL"))?;
            Arc::new(ForwardDispatcher::new(
                http_client()?,
                url,
                config.forward_token.clone(),
            ))
        }
        ProviderKind::Log => Arc::new(LogDispatcher::new(identity)),
    };

    Ok(dispatcher)
}

fn http_client() -> Result<reqwest::Client, ConfigError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("contact-edge/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Send `request` and turn any non-2xx reply into [`DispatchError::Provider`].
async fn send_checked(request: reqwest::RequestBuilder) -> Result<reqwest::Response, DispatchError> {
    let response = request
        .send()
        .await
        .map_err(|e| DispatchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DispatchError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
