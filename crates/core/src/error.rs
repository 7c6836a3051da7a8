/// Everything that can stop a generation before the text reaches the clipboard.
///
/// Each variant maps to exactly one user-facing notification. None of them is
/// retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The API key is missing or empty.
    #[error("{0}")]
    Configuration(String),

    /// The selection is empty or whitespace only.
    #[error("{0}")]
    Input(String),

    /// The endpoint answered with a non-success status.
    #[error("API Error: {status} {status_text}. Response: {body}")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The model refused the prompt.
    #[error("Request was blocked: {0}")]
    Blocked(String),

    /// The body did not contain `candidates[0].content.parts[0].text`.
    #[error("Invalid response structure from API. {0}")]
    MalformedResponse(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl GenerateError {
    /// Message used when the response chain has a missing link.
    pub const EMPTY_CONTENT: &'static str = "The model might have returned empty content.";

    pub fn empty_content() -> Self {
        Self::MalformedResponse(Self::EMPTY_CONTENT.to_string())
    }

    /// Errors raised before the request is built are shown verbatim; the rest
    /// get the generic failure prefix.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Input(_))
    }

    /// The single line shown to the user for this error.
    pub fn user_message(&self) -> String {
        if self.is_precondition() {
            self.to_string()
        } else {
            format!("Failed to generate documentation: {self}")
        }
    }
}
