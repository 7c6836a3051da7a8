use crate::client::Transport;
use crate::config::{ConfigProvider, Endpoint, MISSING_KEY_MESSAGE};
use crate::host::{Host, Level};
use crate::prelude::*;
use summaryai_core::doc_type::DocType;
use summaryai_core::gemini::{
    build_request, endpoint_url, interpret_reply, redacted_endpoint_url,
};
use summaryai_core::prompt::{validate_selection, PICKER_PLACEHOLDER, PROGRESS_TITLE};

/// How an invocation ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The generated text was delivered.
    Copied(String),
    /// A precondition was not met (no input, picker cancelled). Nothing shown.
    Aborted,
}

/// Runs one generation: config, selection, choice, request, clipboard.
///
/// Every step is fail-fast and nothing is retried. Nothing is kept between
/// invocations, so two overlapping runs simply race on the clipboard.
pub struct Orchestrator<'a, C, H, T> {
    config: &'a C,
    host: &'a H,
    transport: &'a T,
}

impl<'a, C, H, T> Orchestrator<'a, C, H, T>
where
    C: ConfigProvider,
    H: Host,
    T: Transport,
{
    pub fn new(config: &'a C, host: &'a H, transport: &'a T) -> Self {
        Self {
            config,
            host,
            transport,
        }
    }

    /// Run once and turn the result into a single notification.
    pub async fn run(&self) -> Result<Outcome, GenerateError> {
        let result = self.invoke().await;

        match &result {
            Ok(Outcome::Copied(_)) => {
                self.host.notify(Level::Info, self.host.success_message())
            }
            Ok(Outcome::Aborted) => log::debug!("Generation aborted before any request"),
            Err(err @ GenerateError::Input(_)) => {
                self.host.notify(Level::Warning, &err.user_message())
            }
            Err(err) => {
                if !err.is_precondition() {
                    log::error!("Error calling Gemini API: {err:?}");
                }
                self.host.notify(Level::Error, &err.user_message());
            }
        }

        result
    }

    /// The bare sequence, without notifications.
    pub async fn invoke(&self) -> Result<Outcome, GenerateError> {
        let api_key = self
            .config
            .api_key()?
            .ok_or_else(|| GenerateError::Configuration(MISSING_KEY_MESSAGE.to_string()))?;
        let endpoint = self.config.endpoint()?;

        let Some(selection) = self.host.read_selection().await? else {
            return Ok(Outcome::Aborted);
        };
        validate_selection(&selection)?;

        let labels = DocType::labels();
        let Some(doc_type) = self
            .host
            .pick(PICKER_PLACEHOLDER, &labels)
            .await
            .and_then(DocType::from_index)
        else {
            return Ok(Outcome::Aborted);
        };

        self.host.begin_progress(PROGRESS_TITLE);
        let result = self
            .generate(&endpoint, &api_key, doc_type, &selection)
            .await;
        self.host.end_progress();

        result.map(Outcome::Copied)
    }

    async fn generate(
        &self,
        endpoint: &Endpoint,
        api_key: &str,
        doc_type: DocType,
        selection: &str,
    ) -> Result<String, GenerateError> {
        let request = build_request(doc_type, selection);
        let url = endpoint_url(&endpoint.host, &endpoint.model, api_key);

        log::debug!(
            "POST {} ({} chars of selection, {:?})",
            redacted_endpoint_url(&endpoint.host, &endpoint.model),
            selection.len(),
            doc_type
        );

        let reply = self
            .transport
            .post_json(&url, &request, endpoint.timeout)
            .await?;
        let text = interpret_reply(&reply)?;

        self.host.write_clipboard(&text).await?;

        Ok(text)
    }
}
