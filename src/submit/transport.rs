//! Transports for result lines

use async_trait::async_trait;
use reqwest::Client;

use crate::core::config::SubmitConfig;
use crate::core::error::{BookError, Result};

/// Delivers one result line somewhere
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, line: String) -> Result<()>;
}

/// Form-encoded POST to the lab's collector.
///
/// The response body is never read; only the status is checked so failures
/// show up in the log.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    field: String,
}

impl HttpTransport {
    pub fn new(endpoint: String, field: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            field,
        }
    }

    pub fn from_config(config: &SubmitConfig) -> Self {
        Self::new(config.endpoint.clone(), config.field.clone())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, line: String) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[(self.field.as_str(), line.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BookError::Transport(format!(
                "collector answered {}",
                response.status()
            )));
        }
        Ok(())
    }
}
