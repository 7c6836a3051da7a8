use crate::prelude::*;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;
use summaryai_core::gemini::{GenerateContentRequest, HttpReply};

/// Sends the request body and returns whatever the server answered.
///
/// Implementations must return `Ok` for every HTTP status; only failures to
/// obtain a response at all are errors. `timeout` of `None` waits forever.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: &GenerateContentRequest,
        timeout: Option<Duration>,
    ) -> Result<HttpReply, GenerateError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

fn client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ))
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = client_builder()
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &GenerateContentRequest,
        timeout: Option<Duration>,
    ) -> Result<HttpReply, GenerateError> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(body);

        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        // Errors carry the URL, which carries the key
        let response = request
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.without_url().to_string()))?;

        let status = response.status();
        log::debug!("Gemini responded with HTTP {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Network(e.without_url().to_string()))?;

        Ok(HttpReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
