//! Field rules for personality drafts.
//!
//! Every rule is a pure function returning `Ok(())` or the message shown next to the
//! field. The same rules back the browser form and the server-side request check.

use crate::forms::draft::CharacterDraft;
use crate::models::{CreatePersonalityRequest, ModelProvider, split_voice_prompt};
use crate::voices::{self, PITCH_MAX, PITCH_MIN};
use thiserror::Error;

pub type FieldResult = Result<(), String>;

pub const TITLE_LEN: (usize, usize) = (2, 50);
pub const DESCRIPTION_LEN: (usize, usize) = (50, 200);
pub const PROMPT_LEN: (usize, usize) = (100, 1000);
pub const FIRST_MESSAGE_LEN: (usize, usize) = (50, 150);
pub const FEATURES_LEN: (usize, usize) = (10, 150);

/// Every user-editable field of the character wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Prompt,
    FirstMessagePrompt,
    Voice,
    Features,
    Emotion,
    PitchFactor,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Title,
        Field::Description,
        Field::Prompt,
        Field::FirstMessagePrompt,
        Field::Voice,
        Field::Features,
        Field::Emotion,
        Field::PitchFactor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Prompt => "prompt",
            Field::FirstMessagePrompt => "firstMessagePrompt",
            Field::Voice => "voice",
            Field::Features => "features",
            Field::Emotion => "emotion",
            Field::PitchFactor => "pitchFactor",
        }
    }

    /// Fields nested under the voice characteristics group.
    pub fn is_voice_characteristic(&self) -> bool {
        matches!(self, Field::Features | Field::Emotion | Field::PitchFactor)
    }

    /// Upper length bound, for the `n/max` counters under text inputs.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Field::Title => Some(TITLE_LEN.1),
            Field::Description => Some(DESCRIPTION_LEN.1),
            Field::Prompt => Some(PROMPT_LEN.1),
            Field::FirstMessagePrompt => Some(FIRST_MESSAGE_LEN.1),
            Field::Features => Some(FEATURES_LEN.1),
            _ => None,
        }
    }
}

/// One slot per known field; `None` means the field currently has no error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prompt: Option<String>,
    pub first_message_prompt: Option<String>,
    pub voice: Option<String>,
    pub features: Option<String>,
    pub emotion: Option<String>,
    pub pitch_factor: Option<String>,
}

impl FieldErrors {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Prompt => &mut self.prompt,
            Field::FirstMessagePrompt => &mut self.first_message_prompt,
            Field::Voice => &mut self.voice,
            Field::Features => &mut self.features,
            Field::Emotion => &mut self.emotion,
            Field::PitchFactor => &mut self.pitch_factor,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Prompt => &self.prompt,
            Field::FirstMessagePrompt => &self.first_message_prompt,
            Field::Voice => &self.voice,
            Field::Features => &self.features,
            Field::Emotion => &self.emotion,
            Field::PitchFactor => &self.pitch_factor,
        };
        slot.as_deref()
    }

    /// Stores the outcome of a single rule: clears on `Ok`, records the message on `Err`.
    pub fn record(&mut self, field: Field, result: FieldResult) {
        *self.slot(field) = result.err();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|msg| (f, msg)))
    }
}

/// Fields the user has interacted with at least once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub title: bool,
    pub description: bool,
    pub prompt: bool,
    pub first_message_prompt: bool,
    pub voice: bool,
    pub features: bool,
    pub emotion: bool,
    pub pitch_factor: bool,
}

impl TouchedFields {
    fn slot(&mut self, field: Field) -> &mut bool {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Prompt => &mut self.prompt,
            Field::FirstMessagePrompt => &mut self.first_message_prompt,
            Field::Voice => &mut self.voice,
            Field::Features => &mut self.features,
            Field::Emotion => &mut self.emotion,
            Field::PitchFactor => &mut self.pitch_factor,
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title,
            Field::Description => self.description,
            Field::Prompt => self.prompt,
            Field::FirstMessagePrompt => self.first_message_prompt,
            Field::Voice => self.voice,
            Field::Features => self.features,
            Field::Emotion => self.emotion,
            Field::PitchFactor => self.pitch_factor,
        }
    }

    pub fn touch(&mut self, field: Field) {
        *self.slot(field) = true;
    }

    pub fn touch_all(&mut self) {
        for field in Field::ALL {
            self.touch(field);
        }
    }
}

fn length_between(value: &str, (min, max): (usize, usize)) -> FieldResult {
    let len = value.chars().count();
    if len < min {
        Err(format!("Minimum {min} characters"))
    } else if len > max {
        Err(format!("Maximum {max} characters"))
    } else {
        Ok(())
    }
}

pub fn validate_title(value: &str) -> FieldResult {
    length_between(value, TITLE_LEN)
}

pub fn validate_description(value: &str) -> FieldResult {
    length_between(value, DESCRIPTION_LEN)
}

pub fn validate_prompt(value: &str) -> FieldResult {
    length_between(value, PROMPT_LEN)
}

pub fn validate_first_message_prompt(value: &str) -> FieldResult {
    length_between(value, FIRST_MESSAGE_LEN)
}

pub fn validate_voice(value: &str) -> FieldResult {
    if value.is_empty() {
        Err("Voice selection is required".to_string())
    } else {
        Ok(())
    }
}

pub fn validate_features(value: &str) -> FieldResult {
    length_between(value, FEATURES_LEN)
}

pub fn validate_emotion(value: &str) -> FieldResult {
    if voices::is_known_emotion(value) {
        Ok(())
    } else {
        Err("Invalid emotion".to_string())
    }
}

/// Inclusive on both ends.
pub fn validate_pitch_factor(value: f64) -> FieldResult {
    if value.is_nan() {
        Err("Expected number".to_string())
    } else if value < PITCH_MIN {
        Err(format!("Number must be greater than or equal to {PITCH_MIN}"))
    } else if value > PITCH_MAX {
        Err(format!("Number must be less than or equal to {PITCH_MAX}"))
    } else {
        Ok(())
    }
}

/// Runs the rule for `field` against the current draft value.
pub fn validate_field(field: Field, draft: &CharacterDraft) -> FieldResult {
    let vc = &draft.voice_characteristics;
    match field {
        Field::Title => validate_title(&draft.title),
        Field::Description => validate_description(&draft.description),
        Field::Prompt => validate_prompt(&draft.prompt),
        Field::FirstMessagePrompt => validate_first_message_prompt(&draft.first_message_prompt),
        Field::Voice => validate_voice(&draft.voice),
        Field::Features => validate_features(&vc.features),
        Field::Emotion => validate_emotion(&vc.emotion),
        Field::PitchFactor => validate_pitch_factor(vc.pitch_factor),
    }
}

/// Full-schema check. An empty result means the draft is submittable.
pub fn validate_draft(draft: &CharacterDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.record(field, validate_field(field, draft));
    }
    errors
}

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
    #[error("{0} is required")]
    Missing(&'static str),
}

fn check(field: &'static str, result: FieldResult) -> Result<(), RequestError> {
    result.map_err(|message| RequestError::Invalid { field, message })
}

fn require(field: &'static str, value: &str) -> Result<(), RequestError> {
    if value.is_empty() {
        Err(RequestError::Missing(field))
    } else {
        Ok(())
    }
}

/// The composed voice prompt must carry valid features and a catalog emotion.
fn check_voice_prompt(prompt: &str) -> Result<(), RequestError> {
    let Some((features, emotion)) = split_voice_prompt(prompt) else {
        return Err(RequestError::Invalid {
            field: "voice_prompt",
            message: "Expected features and emotion".to_string(),
        });
    };
    check("voice_prompt", validate_features(features))?;
    check("voice_prompt", validate_emotion(emotion))
}

/// Server-side gate for create requests.
///
/// Wizard-built personalities get the full length rules. ElevenLabs agents only carry
/// a name and an agent id, so just those two are required.
pub fn validate_request(req: &CreatePersonalityRequest) -> Result<(), RequestError> {
    require("key", &req.key)?;
    match req.provider {
        ModelProvider::ElevenLabs => {
            require("title", &req.title)?;
            require("oai_voice", &req.oai_voice)?;
        }
        ModelProvider::OpenAi | ModelProvider::Gemini => {
            check("title", validate_title(&req.title))?;
            check("short_description", validate_description(&req.short_description))?;
            check("character_prompt", validate_prompt(&req.character_prompt))?;
            check(
                "first_message_prompt",
                validate_first_message_prompt(&req.first_message_prompt),
            )?;
            check("oai_voice", validate_voice(&req.oai_voice))?;
            check("pitch_factor", validate_pitch_factor(req.pitch_factor))?;
            check_voice_prompt(&req.voice_prompt)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn length_rules_reject_outside_bounds() {
        let cases: [(fn(&str) -> FieldResult, (usize, usize)); 5] = [
            (validate_title, TITLE_LEN),
            (validate_description, DESCRIPTION_LEN),
            (validate_prompt, PROMPT_LEN),
            (validate_first_message_prompt, FIRST_MESSAGE_LEN),
            (validate_features, FEATURES_LEN),
        ];
        for (rule, (min, max)) in cases {
            assert_eq!(rule(&text(min - 1)), Err(format!("Minimum {min} characters")));
            assert!(rule(&text(min)).is_ok());
            assert!(rule(&text(max)).is_ok());
            assert_eq!(rule(&text(max + 1)), Err(format!("Maximum {max} characters")));
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 2 chars, 8 bytes
        assert!(validate_title("🦁🐯").is_ok());
        assert!(validate_title(&"é".repeat(50)).is_ok());
    }

    #[test]
    fn pitch_bounds_are_inclusive() {
        assert!(validate_pitch_factor(0.75).is_ok());
        assert!(validate_pitch_factor(1.5).is_ok());
        assert!(validate_pitch_factor(1.1).is_ok());
        assert!(validate_pitch_factor(0.7499).is_err());
        assert!(validate_pitch_factor(1.5001).is_err());
        assert_eq!(
            validate_pitch_factor(f64::NAN),
            Err("Expected number".to_string())
        );
    }

    #[test]
    fn emotion_must_come_from_catalog() {
        assert!(validate_emotion("neutral").is_ok());
        assert!(validate_emotion("").is_err());
    }

    #[test]
    fn empty_draft_reports_every_text_field() {
        let errors = validate_draft(&CharacterDraft::default());
        assert_eq!(errors.title.as_deref(), Some("Minimum 2 characters"));
        assert_eq!(errors.voice.as_deref(), Some("Voice selection is required"));
        assert!(errors.features.is_some());
        // defaults are valid
        assert!(errors.emotion.is_none());
        assert!(errors.pitch_factor.is_none());
        assert_eq!(errors.iter().count(), 6);
    }

    #[test]
    fn record_clears_previous_message() {
        let mut errors = FieldErrors::default();
        errors.record(Field::Title, Err("bad".to_string()));
        assert_eq!(errors.get(Field::Title), Some("bad"));
        errors.record(Field::Title, Ok(()));
        assert!(errors.is_empty());
    }

    fn agent_request() -> CreatePersonalityRequest {
        CreatePersonalityRequest {
            provider: ModelProvider::ElevenLabs,
            title: "Support Bot".to_string(),
            subtitle: String::new(),
            character_prompt: String::new(),
            oai_voice: "agent_123".to_string(),
            voice_prompt: String::new(),
            is_doctor: false,
            is_child_voice: false,
            is_story: false,
            key: "support_bot_x".to_string(),
            creator_id: uuid::Uuid::new_v4(),
            short_description: String::new(),
            pitch_factor: 1.0,
            first_message_prompt: String::new(),
        }
    }

    #[test]
    fn agent_requests_only_need_name_and_agent_id() {
        assert!(validate_request(&agent_request()).is_ok());

        let mut req = agent_request();
        req.oai_voice.clear();
        assert_eq!(
            validate_request(&req),
            Err(RequestError::Missing("oai_voice"))
        );
    }

    #[test]
    fn wizard_requests_get_full_rules() {
        let mut req = agent_request();
        req.provider = ModelProvider::OpenAi;
        let err = validate_request(&req).unwrap_err();
        assert!(matches!(
            err,
            RequestError::Invalid {
                field: "short_description",
                ..
            }
        ));
    }

    fn wizard_request() -> CreatePersonalityRequest {
        CreatePersonalityRequest {
            provider: ModelProvider::OpenAi,
            title: "AI Hulk".to_string(),
            character_prompt: text(120),
            oai_voice: "nova".to_string(),
            voice_prompt: crate::models::voice_prompt("Deep, slow and gravelly", "angry"),
            short_description: text(60),
            first_message_prompt: text(60),
            ..agent_request()
        }
    }

    fn voice_prompt_error(prompt: &str) -> Result<(), RequestError> {
        let mut req = wizard_request();
        req.voice_prompt = prompt.to_string();
        validate_request(&req)
    }

    #[test]
    fn wizard_request_with_full_voice_prompt_passes() {
        assert_eq!(validate_request(&wizard_request()), Ok(()));
    }

    #[test]
    fn voice_prompt_is_checked_for_wizard_providers() {
        let bad = [
            "",
            "x. The voice should be calm",
            "Deep, slow and gravelly. The voice should be furious",
        ];
        for prompt in bad {
            assert!(matches!(
                voice_prompt_error(prompt),
                Err(RequestError::Invalid {
                    field: "voice_prompt",
                    ..
                })
            ));
        }
    }

    #[test]
    fn agent_requests_skip_voice_prompt() {
        let mut req = agent_request();
        req.voice_prompt.clear();
        assert!(validate_request(&req).is_ok());
    }
}
