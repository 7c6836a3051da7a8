//! Wire types and pure helpers for the Gemini `generateContent` endpoint.
//!
//! The shell performs the POST and hands back an [`HttpReply`]; everything
//! after that (status check, block detection, text extraction) happens here.

use crate::doc_type::DocType;
use crate::error::GenerateError;
use crate::prompt::{build_user_query, SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Response body. Every link is optional so that a missing field surfaces as
/// a malformed response instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Raw result of the POST, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the endpoint URL. The key travels as a query parameter.
pub fn endpoint_url(host: &str, model: &str, api_key: &str) -> String {
    let host = host
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{host}/v1beta/models/{model}:generateContent?key={api_key}")
}

/// Same URL with the key replaced, for logs.
pub fn redacted_endpoint_url(host: &str, model: &str) -> String {
    endpoint_url(host, model, "***")
}

pub fn build_request(doc_type: DocType, selection: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(build_user_query(doc_type, selection))],
        system_instruction: Content::text(SYSTEM_PROMPT),
    }
}

/// Returns the block reason when the prompt was refused.
pub fn block_reason(response: &GenerateContentResponse) -> Option<&str> {
    response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
        .filter(|reason| !reason.is_empty())
}

/// Extract `candidates[0].content.parts[0].text`, honouring block reasons first.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, GenerateError> {
    if let Some(reason) = block_reason(response) {
        return Err(GenerateError::Blocked(reason.to_string()));
    }

    response
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .and_then(|parts| parts.first())
        .and_then(|part| part.text.as_ref())
        .filter(|text| !text.is_empty())
        .cloned()
        .ok_or_else(GenerateError::empty_content)
}

pub fn parse_response(body: &str) -> Result<GenerateContentResponse, GenerateError> {
    serde_json::from_str(body).map_err(|e| GenerateError::MalformedResponse(e.to_string()))
}

/// Turn a raw reply into the generated text or the matching error.
pub fn interpret_reply(reply: &HttpReply) -> Result<String, GenerateError> {
    if !reply.is_success() {
        return Err(GenerateError::Api {
            status: reply.status,
            status_text: reply.status_text.clone(),
            body: reply.body.clone(),
        });
    }

    let response = parse_response(&reply.body)?;
    extract_text(&response)
}
