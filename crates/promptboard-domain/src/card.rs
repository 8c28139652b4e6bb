use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use promptboard_core::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};

/// Opaque card identity: a millisecond clock reading rendered as a string.
/// Stable for the card's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Ids must stay unique and increasing even when two cards are created
    /// within the same millisecond, so a high-water mark nudges the reading
    /// forward past the last one handed out.
    pub fn generate() -> Self {
        static LAST: AtomicI64 = AtomicI64::new(0);
        let now = chrono::Utc::now().timestamp_millis();
        let prev = LAST
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        Self(now.max(prev + 1).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CardId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The completion models offered by the create dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::Gpt4oMini, Model::Gpt4o];

    pub fn as_str(self) -> &'static str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4o => "gpt-4o",
        }
    }

    /// Cycle to the next model in the set; used by the selection widget.
    pub fn next(self) -> Self {
        match self {
            Model::Gpt4oMini => Model::Gpt4o,
            Model::Gpt4o => Model::Gpt4oMini,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Gpt4oMini
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4o-mini" => Ok(Model::Gpt4oMini),
            "gpt-4o" => Ok(Model::Gpt4o),
            other => Err(format!(
                "unknown model '{}' (expected one of: gpt-4o-mini, gpt-4o)",
                other
            )),
        }
    }
}

/// Sampling parameters passed through to the completion API verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

pub const TEMPERATURE_MAX: f32 = 2.0;
pub const MAX_TOKENS_LIMIT: u32 = 32_000;

impl SamplingConfig {
    pub fn new(temperature: f32, max_tokens: u32) -> BoardResult<Self> {
        let config = Self {
            temperature,
            max_tokens,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if !(0.0..=TEMPERATURE_MAX).contains(&self.temperature) {
            return Err(BoardError::Validation(format!(
                "temperature {} is out of range (0.0-{})",
                self.temperature, TEMPERATURE_MAX
            )));
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(BoardError::Validation(format!(
                "max tokens {} is out of range (1-{})",
                self.max_tokens, MAX_TOKENS_LIMIT
            )));
        }
        Ok(())
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 6000,
        }
    }
}

/// A prompt card. Immutable once created, except for relocation between
/// columns and result attachment on a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub prompt: String,
    pub model: Model,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub config: SamplingConfig,
}

impl Card {
    pub fn new(prompt: String, model: Model, config: SamplingConfig) -> BoardResult<Self> {
        if prompt.trim().is_empty() {
            return Err(BoardError::Validation("prompt must not be empty".into()));
        }
        config.validate()?;
        Ok(Self {
            id: CardId::generate(),
            prompt,
            model,
            result: None,
            config,
        })
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Truncated prompt for the card face.
    pub fn prompt_preview(&self, max_chars: usize) -> String {
        if self.prompt.chars().count() <= max_chars {
            self.prompt.clone()
        } else {
            let truncated: String = self.prompt.chars().take(max_chars).collect();
            format!("{}...", truncated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(prompt: &str) -> BoardResult<Card> {
        Card::new(prompt.to_string(), Model::Gpt4oMini, SamplingConfig::default())
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = CardId::generate();
        let b = CardId::generate();
        let c = CardId::generate();
        assert_ne!(a, b);
        assert_ne!(b, c);
        let parse = |id: &CardId| id.as_str().parse::<i64>().unwrap();
        assert!(parse(&a) < parse(&b));
        assert!(parse(&b) < parse(&c));
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(card("").is_err());
        assert!(card("   ").is_err());
        assert!(card("Say hello").is_ok());
    }

    #[test]
    fn test_config_bounds() {
        assert!(SamplingConfig::new(0.0, 1).is_ok());
        assert!(SamplingConfig::new(2.0, 32_000).is_ok());
        assert!(SamplingConfig::new(-0.1, 100).is_err());
        assert!(SamplingConfig::new(2.1, 100).is_err());
        assert!(SamplingConfig::new(0.7, 0).is_err());
        assert!(SamplingConfig::new(0.7, 32_001).is_err());
    }

    #[test]
    fn test_model_round_trip() {
        for model in Model::ALL {
            assert_eq!(model.as_str().parse::<Model>().unwrap(), model);
        }
        assert!("gpt-5".parse::<Model>().is_err());
    }

    #[test]
    fn test_model_cycle_covers_set() {
        let mut model = Model::default();
        for _ in 0..Model::ALL.len() {
            model = model.next();
        }
        assert_eq!(model, Model::default());
    }

    #[test]
    fn test_card_serial_shape() {
        let card = card("Say hello").unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["config"]["maxTokens"], 6000);
        // Absent result is omitted entirely, not serialized as null.
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_prompt_preview_truncates() {
        let card = card("abcdefghij").unwrap();
        assert_eq!(card.prompt_preview(20), "abcdefghij");
        assert_eq!(card.prompt_preview(4), "abcd...");
    }
}
