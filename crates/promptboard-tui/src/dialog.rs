use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use promptboard_core::{BoardResult, InputState};
use promptboard_domain::{Card, Model, SamplingConfig};

pub enum DialogAction {
    None,
    Cancel,
    Confirm,
}

/// Key handling for single-field input dialogs (settings, and the create
/// form's text fields).
pub fn handle_dialog_input(
    input: &mut InputState,
    key_code: KeyCode,
    allow_empty: bool,
) -> DialogAction {
    match key_code {
        KeyCode::Esc => DialogAction::Cancel,
        KeyCode::Enter => {
            if allow_empty || !input.is_empty() {
                DialogAction::Confirm
            } else {
                DialogAction::None
            }
        }
        KeyCode::Char(c) => {
            input.insert_char(c);
            DialogAction::None
        }
        KeyCode::Backspace => {
            input.backspace();
            DialogAction::None
        }
        KeyCode::Delete => {
            input.delete();
            DialogAction::None
        }
        KeyCode::Left => {
            input.move_left();
            DialogAction::None
        }
        KeyCode::Right => {
            input.move_right();
            DialogAction::None
        }
        KeyCode::Home => {
            input.move_home();
            DialogAction::None
        }
        KeyCode::End => {
            input.move_end();
            DialogAction::None
        }
        _ => DialogAction::None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Prompt,
    Model,
    Temperature,
    MaxTokens,
}

/// State of the create-card form: prompt text, model selection, and the
/// two sampling parameters with their dialog defaults.
pub struct CreateDialogState {
    pub focus: CreateField,
    pub prompt: InputState,
    pub model: Model,
    pub temperature: InputState,
    pub max_tokens: InputState,
}

impl CreateDialogState {
    pub fn new() -> Self {
        Self {
            focus: CreateField::Prompt,
            prompt: InputState::new(),
            model: Model::default(),
            temperature: InputState::with_text("0.7"),
            max_tokens: InputState::with_text("6000"),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CreateField::Prompt => CreateField::Model,
            CreateField::Model => CreateField::Temperature,
            CreateField::Temperature => CreateField::MaxTokens,
            CreateField::MaxTokens => CreateField::Prompt,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            CreateField::Prompt => CreateField::MaxTokens,
            CreateField::Model => CreateField::Prompt,
            CreateField::Temperature => CreateField::Model,
            CreateField::MaxTokens => CreateField::Temperature,
        };
    }

    fn focused_input_mut(&mut self) -> Option<&mut InputState> {
        match self.focus {
            CreateField::Prompt => Some(&mut self.prompt),
            CreateField::Model => None,
            CreateField::Temperature => Some(&mut self.temperature),
            CreateField::MaxTokens => Some(&mut self.max_tokens),
        }
    }

    /// Parse and validate the form into a fresh card. Range checks live in
    /// the domain; this only turns field text into numbers.
    pub fn build_card(&self) -> BoardResult<Card> {
        let temperature: f32 = self
            .temperature
            .as_str()
            .trim()
            .parse()
            .map_err(|_| validation("temperature must be a number"))?;
        let max_tokens: u32 = self
            .max_tokens
            .as_str()
            .trim()
            .parse()
            .map_err(|_| validation("max tokens must be a positive integer"))?;
        let config = SamplingConfig::new(temperature, max_tokens)?;
        Card::new(self.prompt.as_str().trim().to_string(), self.model, config)
    }
}

impl Default for CreateDialogState {
    fn default() -> Self {
        Self::new()
    }
}

fn validation(message: &str) -> promptboard_core::BoardError {
    promptboard_core::BoardError::Validation(message.to_string())
}

pub enum CreateDialogAction {
    None,
    Cancel,
    Submit,
    /// Open `$EDITOR` for multiline prompt entry.
    EditPrompt,
}

pub fn handle_create_input(state: &mut CreateDialogState, key: KeyEvent) -> CreateDialogAction {
    match key.code {
        KeyCode::Esc => CreateDialogAction::Cancel,
        KeyCode::Enter => CreateDialogAction::Submit,
        KeyCode::Tab => {
            state.focus_next();
            CreateDialogAction::None
        }
        KeyCode::BackTab => {
            state.focus_prev();
            CreateDialogAction::None
        }
        KeyCode::Char('e')
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && state.focus == CreateField::Prompt =>
        {
            CreateDialogAction::EditPrompt
        }
        KeyCode::Left | KeyCode::Right if state.focus == CreateField::Model => {
            state.model = state.model.next();
            CreateDialogAction::None
        }
        code => {
            if let Some(input) = state.focused_input_mut() {
                match code {
                    KeyCode::Char(c) => input.insert_char(c),
                    KeyCode::Backspace => input.backspace(),
                    KeyCode::Delete => input.delete(),
                    KeyCode::Left => input.move_left(),
                    KeyCode::Right => input.move_right(),
                    KeyCode::Home => input.move_home(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
            CreateDialogAction::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_defaults_build_a_card() {
        let mut state = CreateDialogState::new();
        state.prompt.set("Say hello".to_string());
        let card = state.build_card().unwrap();
        assert_eq!(card.prompt, "Say hello");
        assert_eq!(card.model, Model::Gpt4oMini);
        assert_eq!(card.config.temperature, 0.7);
        assert_eq!(card.config.max_tokens, 6000);
    }

    #[test]
    fn test_unparseable_fields_rejected() {
        let mut state = CreateDialogState::new();
        state.prompt.set("Say hello".to_string());
        state.temperature.set("warm".to_string());
        assert!(state.build_card().is_err());

        state.temperature.set("0.7".to_string());
        state.max_tokens.set("-5".to_string());
        assert!(state.build_card().is_err());
    }

    #[test]
    fn test_out_of_range_config_rejected() {
        let mut state = CreateDialogState::new();
        state.prompt.set("Say hello".to_string());
        state.temperature.set("3.5".to_string());
        assert!(state.build_card().is_err());
    }

    #[test]
    fn test_tab_cycles_all_fields() {
        let mut state = CreateDialogState::new();
        let start = state.focus;
        for _ in 0..4 {
            handle_create_input(&mut state, key(KeyCode::Tab));
        }
        assert_eq!(state.focus, start);
    }

    #[test]
    fn test_arrows_toggle_model_only_when_focused() {
        let mut state = CreateDialogState::new();
        state.focus = CreateField::Model;
        handle_create_input(&mut state, key(KeyCode::Right));
        assert_eq!(state.model, Model::Gpt4o);

        state.focus = CreateField::Prompt;
        handle_create_input(&mut state, key(KeyCode::Right));
        assert_eq!(state.model, Model::Gpt4o);
    }

    #[test]
    fn test_typed_chars_reach_focused_field() {
        let mut state = CreateDialogState::new();
        handle_create_input(&mut state, key(KeyCode::Char('h')));
        handle_create_input(&mut state, key(KeyCode::Char('i')));
        assert_eq!(state.prompt.as_str(), "hi");

        state.focus = CreateField::MaxTokens;
        state.max_tokens.clear();
        handle_create_input(&mut state, key(KeyCode::Char('1')));
        assert_eq!(state.max_tokens.as_str(), "1");
    }
}
