use std::sync::Arc;

use crate::config::ContactConfig;
use crate::email::{build_dispatcher, EmailDispatcher};
use crate::error::ConfigError;

/// Built once per cold start and shared read-only by every invocation.
pub struct AppState {
    pub config: ContactConfig,
    pub dispatcher: Arc<dyn EmailDispatcher>,
}

impl AppState {
    pub fn new(config: ContactConfig, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        Self { config, dispatcher }
    }

    pub async fn from_config(config: ContactConfig) -> Result<Self, ConfigError> {
        let dispatcher = build_dispatcher(&config).await?;
        Ok(Self::new(config, dispatcher))
    }
}
