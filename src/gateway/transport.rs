//! Request transport: how a [`Command`] reaches the device

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::command::Command;
use crate::error::GatewayError;

const USER_AGENT: &str = concat!("renderer-remote/", env!("CARGO_PKG_VERSION"));

/// Delivers one command and returns the raw reply body.
///
/// Implementations never retry. Any failure to obtain a body is reported as
/// [`GatewayError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, command: &Command) -> Result<Value, GatewayError>;
}

/// Form-encoded HTTP POST to `<base_url>/control` and `<base_url>/browse`.
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, command: &Command) -> String {
        format!("{}/{}", self.base_url, command.endpoint.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, command: &Command) -> Result<Value, GatewayError> {
        let url = self.url_for(command);

        let response = self
            .http_client
            .post(&url)
            .form(&command.form())
            .send()
            .await?;

        // The envelope decides success; the status only matters when there
        // is no JSON body to read.
        let status = response.status();
        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::transport(format!("HTTP {} from {}: {}", status, url, e)))
    }
}
