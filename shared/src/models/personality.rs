use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Voice/AI backend a personality is bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    OpenAi,
    Gemini,
    ElevenLabs,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::Gemini => "gemini",
            ModelProvider::ElevenLabs => "elevenlabs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "OpenAI",
            ModelProvider::Gemini => "Gemini",
            ModelProvider::ElevenLabs => "ElevenLabs",
        }
    }

    /// Only OpenAI voices ship sample clips that can be played in the browser.
    pub fn supports_inline_preview(&self) -> bool {
        matches!(self, ModelProvider::OpenAi)
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub personality_id: Uuid,
    pub provider: ModelProvider,
    pub title: String,
    pub subtitle: String,
    pub character_prompt: String,
    pub oai_voice: String,
    pub voice_prompt: String,
    pub is_doctor: bool,
    pub is_child_voice: bool,
    pub is_story: bool,
    pub key: String,
    pub creator_id: Uuid,
    pub short_description: String,
    pub pitch_factor: f64,
    pub first_message_prompt: String,
}

impl Personality {
    pub fn from_request(personality_id: Uuid, req: CreatePersonalityRequest) -> Self {
        Self {
            personality_id,
            provider: req.provider,
            title: req.title,
            subtitle: req.subtitle,
            character_prompt: req.character_prompt,
            oai_voice: req.oai_voice,
            voice_prompt: req.voice_prompt,
            is_doctor: req.is_doctor,
            is_child_voice: req.is_child_voice,
            is_story: req.is_story,
            key: req.key,
            creator_id: req.creator_id,
            short_description: req.short_description,
            pitch_factor: req.pitch_factor,
            first_message_prompt: req.first_message_prompt,
        }
    }
}

// Request payloads
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatePersonalityRequest {
    pub provider: ModelProvider,
    pub title: String,
    /// Always empty at creation
    pub subtitle: String,
    pub character_prompt: String,
    /// Voice id, or the external agent id for ElevenLabs
    pub oai_voice: String,
    pub voice_prompt: String,
    pub is_doctor: bool,
    pub is_child_voice: bool,
    pub is_story: bool,
    pub key: String,
    pub creator_id: Uuid,
    pub short_description: String,
    pub pitch_factor: f64,
    pub first_message_prompt: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ListPersonalitiesQuery {
    pub creator_id: Option<Uuid>,
}

/// Lowercases the title and joins words with underscores.
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "_")
}

/// Storage key for a new personality: the slugged title plus a random v4 suffix.
pub fn personality_key(title: &str) -> String {
    format!("{}_{}", slugify(title), Uuid::new_v4())
}

const VOICE_PROMPT_JOIN: &str = ". The voice should be ";

/// Text the voice model receives alongside the chosen features.
pub fn voice_prompt(features: &str, emotion: &str) -> String {
    format!("{features}{VOICE_PROMPT_JOIN}{emotion}")
}

/// Inverse of [`voice_prompt`]: the features and emotion, split at the last join.
pub fn split_voice_prompt(prompt: &str) -> Option<(&str, &str)> {
    prompt.rsplit_once(VOICE_PROMPT_JOIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelProvider::ElevenLabs).unwrap(),
            "\"elevenlabs\""
        );
        let p: ModelProvider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(p, ModelProvider::OpenAi);
    }

    #[test]
    fn key_is_slug_plus_unique_suffix() {
        let a = personality_key("AI Hulk");
        let b = personality_key("AI Hulk");
        assert!(a.starts_with("ai_hulk_"));
        assert_ne!(a, b);
        let suffix = a.trim_start_matches("ai_hulk_");
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn voice_prompt_appends_emotion() {
        assert_eq!(
            voice_prompt("Deep and slow", "calm"),
            "Deep and slow. The voice should be calm"
        );
    }

    #[test]
    fn split_voice_prompt_uses_last_join() {
        let prompt = voice_prompt("Says. The voice should be loud, often", "calm");
        assert_eq!(
            split_voice_prompt(&prompt),
            Some(("Says. The voice should be loud, often", "calm"))
        );
        assert_eq!(split_voice_prompt(""), None);
    }
}
