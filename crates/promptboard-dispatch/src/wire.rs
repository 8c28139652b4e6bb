//! Request and response bodies for the hosted chat-completions API.
//! The schema is the vendor's, spoken verbatim.

use promptboard_domain::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatRequest {
    /// One system directive plus the card's prompt as the sole user turn;
    /// sampling parameters pass through from the card's config unchanged.
    pub fn for_card(card: &Card, system_prompt: &str) -> Self {
        Self {
            model: card.model.as_str().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: card.prompt.clone(),
                },
            ],
            temperature: card.config.temperature,
            max_tokens: card.config.max_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// The first completion's text, if the service returned one.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
    }
}

/// Shape of the JSON error payload returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptboard_domain::{Model, SamplingConfig};

    fn card() -> Card {
        Card::new(
            "Say hello".to_string(),
            Model::Gpt4oMini,
            SamplingConfig {
                temperature: 0.7,
                max_tokens: 6000,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest::for_card(&card(), "Be thorough.");
        // Via text, so the f32 temperature keeps its short form.
        let body = serde_json::to_string(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["max_tokens"], 6000);
        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Be thorough.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "Say hello");
    }

    #[test]
    fn test_response_first_choice_wins() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [
                {"message": {"role": "assistant", "content": "Hello!"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("Hello!"));
    }

    #[test]
    fn test_empty_or_absent_completion_is_none() {
        let empty_choices: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty_choices.into_text().is_none());

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(null_content.into_text().is_none());

        let empty_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": ""}}]}"#).unwrap();
        assert!(empty_content.into_text().is_none());
    }

    #[test]
    fn test_error_body_message() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#,
        )
        .unwrap();
        assert_eq!(
            body.error.map(|e| e.message).as_deref(),
            Some("Incorrect API key provided")
        );
    }
}
