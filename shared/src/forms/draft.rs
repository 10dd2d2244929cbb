use crate::models::ModelProvider;
use crate::voices::{DEFAULT_EMOTION, DEFAULT_PITCH};

#[derive(Clone, Debug, PartialEq)]
pub struct VoiceCharacteristics {
    pub features: String,
    pub emotion: String,
    pub pitch_factor: f64,
}

impl Default for VoiceCharacteristics {
    fn default() -> Self {
        Self {
            features: String::new(),
            emotion: DEFAULT_EMOTION.to_string(),
            pitch_factor: DEFAULT_PITCH,
        }
    }
}

/// In-progress personality held by the character wizard. Never persisted locally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharacterDraft {
    pub provider: ModelProvider,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub first_message_prompt: String,
    pub voice: String,
    pub voice_characteristics: VoiceCharacteristics,
}

/// In-progress ElevenLabs agent registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentDraft {
    pub name: String,
    pub agent_id: String,
}
