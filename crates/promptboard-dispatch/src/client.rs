use async_trait::async_trait;
use promptboard_core::{BoardError, BoardResult};
use promptboard_domain::Card;

use crate::wire::{ApiErrorBody, ChatRequest, ChatResponse};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Fixed directive sent as the system message on every run. Not editable
/// by the user; the card's prompt is the only conversational content.
const SYSTEM_PROMPT: &str = "You are an expert assistant that creates well-formatted markdown \
responses based on user prompts. Regardless of the length of user input provide a very detailed \
response to the query. Format with proper markdown:\n\
- **Bold** for emphasis\n\
- *Italic* for terminology\n\
- > Blockquotes for important quotes\n\
- `code` for technical terms\n\
- Lists (- or 1.) for multiple points\n\
- Add valid markdown formatted tables\n\
- Add new line breaks, line breaks, code, codeblocks etc.\n\
- This is a one way conversation with no follow ups expected from the user so write the \
responses accordingly.\n\
Include relevant statistics, PhD level responses with detailed answers, and cite sources using \
[text](url) format with URLs that will not expire.";

/// Seam between the lifecycle and the network, so runs can be tested
/// without a live endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Issue exactly one completion request for the card and return the
    /// generated text. Any failure is terminal for this attempt.
    async fn complete(&self, card: &Card) -> BoardResult<String>;
}

pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    credential: String,
}

impl ChatClient {
    pub fn new(credential: impl Into<String>) -> Self {
        Self::with_base_url(credential, DEFAULT_API_BASE)
    }

    /// Point the client at a compatible gateway instead of the hosted
    /// endpoint.
    pub fn with_base_url(credential: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: credential.into(),
        }
    }
}

#[async_trait]
impl CompletionService for ChatClient {
    async fn complete(&self, card: &Card) -> BoardResult<String> {
        if self.credential.trim().is_empty() {
            return Err(BoardError::MissingCredential);
        }

        let request = ChatRequest::for_card(card, SYSTEM_PROMPT);
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Dispatching card {} to {}", card.id, url);

        // No retry and no timeout of our own; the transport's defaults
        // bound the attempt.
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.credential)
            .json(&request)
            .send()
            .await
            .map_err(|e| BoardError::Completion(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BoardError::Completion(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(BoardError::Completion(format!(
                "{}: {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| BoardError::Completion(format!("malformed response: {}", e)))?;
        parsed
            .into_text()
            .ok_or_else(|| BoardError::Completion("response contained no completion text".into()))
    }
}
