//! Static catalogs backing the voice step of the character wizard.

use crate::models::ModelProvider;

/// Where preview clips live. Each OpenAI voice has `{PREVIEW_AUDIO_BASE}/{id}.wav`.
pub const PREVIEW_AUDIO_BASE: &str = "/audio/voices";

pub const PITCH_MIN: f64 = 0.75;
pub const PITCH_MAX: f64 = 1.5;
/// Slider granularity; validation itself accepts any value in range.
pub const PITCH_STEP: f64 = 0.25;
pub const DEFAULT_PITCH: f64 = 1.0;

pub const DEFAULT_EMOTION: &str = "neutral";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoiceOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub provider: ModelProvider,
    pub emoji: &'static str,
    pub color: &'static str,
}

pub fn preview_url(voice_id: &str) -> String {
    format!("{PREVIEW_AUDIO_BASE}/{voice_id}.wav")
}

const fn openai(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
    color: &'static str,
) -> VoiceOption {
    VoiceOption {
        id,
        name,
        description,
        provider: ModelProvider::OpenAi,
        emoji,
        color,
    }
}

const fn gemini(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
    color: &'static str,
) -> VoiceOption {
    VoiceOption {
        id,
        name,
        description,
        provider: ModelProvider::Gemini,
        emoji,
        color,
    }
}

pub const OPENAI_VOICES: &[VoiceOption] = &[
    openai("alloy", "Alloy", "Balanced and versatile", "🎙️", "bg-slate-100"),
    openai("ash", "Ash", "Soft, low and thoughtful", "🌫️", "bg-stone-100"),
    openai("ballad", "Ballad", "Warm storyteller", "🎻", "bg-amber-100"),
    openai("coral", "Coral", "Bright and friendly", "🪸", "bg-rose-100"),
    openai("echo", "Echo", "Calm and resonant", "🔊", "bg-sky-100"),
    openai("nova", "Nova", "Warm and upbeat", "🌟", "bg-fuchsia-100"),
    openai("sage", "Sage", "Wise and measured", "🌿", "bg-green-100"),
    openai("shimmer", "Shimmer", "Light and energetic", "✨", "bg-yellow-100"),
    openai("verse", "Verse", "Expressive and dramatic", "📜", "bg-purple-100"),
];

pub const GEMINI_VOICES: &[VoiceOption] = &[
    gemini("Puck", "Puck", "Upbeat and playful", "🧚", "bg-lime-100"),
    gemini("Charon", "Charon", "Informative and deep", "⛵", "bg-indigo-100"),
    gemini("Kore", "Kore", "Firm and clear", "🌾", "bg-orange-100"),
    gemini("Fenrir", "Fenrir", "Excitable and bold", "🐺", "bg-red-100"),
    gemini("Aoede", "Aoede", "Breezy and melodic", "🎶", "bg-teal-100"),
    gemini("Leda", "Leda", "Youthful and gentle", "🦢", "bg-pink-100"),
    gemini("Orus", "Orus", "Steady and grounded", "🗿", "bg-zinc-100"),
    gemini("Zephyr", "Zephyr", "Bright and airy", "🌬️", "bg-cyan-100"),
];

/// Every voice the picker offers, OpenAI first.
pub fn all_voices() -> impl Iterator<Item = &'static VoiceOption> {
    OPENAI_VOICES.iter().chain(GEMINI_VOICES.iter())
}

pub fn find_voice(id: &str) -> Option<&'static VoiceOption> {
    all_voices().find(|v| v.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmotionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const EMOTIONS: &[EmotionOption] = &[
    EmotionOption { value: "neutral", label: "Neutral", icon: "😐", color: "bg-gray-100" },
    EmotionOption { value: "happy", label: "Happy", icon: "😊", color: "bg-yellow-100" },
    EmotionOption { value: "sad", label: "Sad", icon: "😢", color: "bg-blue-100" },
    EmotionOption { value: "excited", label: "Excited", icon: "🤩", color: "bg-orange-100" },
    EmotionOption { value: "calm", label: "Calm", icon: "😌", color: "bg-green-100" },
    EmotionOption { value: "serious", label: "Serious", icon: "🧐", color: "bg-slate-100" },
    EmotionOption { value: "playful", label: "Playful", icon: "😜", color: "bg-pink-100" },
    EmotionOption { value: "mysterious", label: "Mysterious", icon: "🕵️", color: "bg-purple-100" },
    EmotionOption { value: "angry", label: "Angry", icon: "😠", color: "bg-red-100" },
];

pub fn is_known_emotion(value: &str) -> bool {
    EMOTIONS.iter().any(|e| e.value == value)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchPreset {
    pub value: f64,
    pub label: &'static str,
    pub emoji: &'static str,
    pub desc: &'static str,
}

pub const PITCH_PRESETS: &[PitchPreset] = &[
    PitchPreset { value: 0.75, label: "Deep", emoji: "🐻", desc: "Lower and richer" },
    PitchPreset { value: 1.0, label: "Normal", emoji: "🙂", desc: "As recorded" },
    PitchPreset { value: 1.25, label: "High", emoji: "🐥", desc: "Brighter tone" },
    PitchPreset { value: 1.5, label: "Squeaky", emoji: "🐭", desc: "Cartoon-like" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_ids_are_unique() {
        let ids: Vec<_> = all_voices().map(|v| v.id).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn preview_url_is_addressed_by_id() {
        assert_eq!(preview_url("alloy"), "/audio/voices/alloy.wav");
        assert_eq!(find_voice("Kore").unwrap().provider, ModelProvider::Gemini);
    }

    #[test]
    fn nova_is_an_openai_voice() {
        let nova = find_voice("nova").unwrap();
        assert_eq!(nova.provider, ModelProvider::OpenAi);
        assert!(nova.provider.supports_inline_preview());
    }

    #[test]
    fn default_emotion_is_in_catalog() {
        assert!(is_known_emotion(DEFAULT_EMOTION));
        assert!(!is_known_emotion("furious"));
    }

    #[test]
    fn pitch_presets_sit_on_slider_steps() {
        for preset in PITCH_PRESETS {
            let steps = (preset.value - PITCH_MIN) / PITCH_STEP;
            assert_eq!(steps, steps.round());
            assert!((PITCH_MIN..=PITCH_MAX).contains(&preset.value));
        }
    }
}
