use super::draft::CharacterDraft;
use super::{CreateError, Destination, PersonalityCreator, Rejection, SubmitOutcome};
use crate::models::{
    CreatePersonalityRequest, Notification, Personality, SessionUser, personality_key,
    voice_prompt,
};
use crate::preview::{PreviewBackend, PreviewSignal, PreviewTicket, VoicePreview};
use crate::validation::{self, Field, FieldErrors, TouchedFields};
use crate::voices::VoiceOption;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Personality,
    Voice,
}

/// Two-step wizard collecting a new personality (personality, then voice).
///
/// Errors for a field only surface once it has been blurred (or after a submit);
/// from then on every edit re-validates that field.
pub struct CharacterForm<B: PreviewBackend> {
    step: Step,
    draft: CharacterDraft,
    touched: TouchedFields,
    errors: FieldErrors,
    submitting: bool,
    preview: VoicePreview<B>,
}

impl<B: PreviewBackend> CharacterForm<B> {
    pub fn new(preview_backend: B) -> Self {
        Self {
            step: Step::default(),
            draft: CharacterDraft::default(),
            touched: TouchedFields::default(),
            errors: FieldErrors::default(),
            submitting: false,
            preview: VoicePreview::new(preview_backend),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &CharacterDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn touched(&self) -> &TouchedFields {
        &self.touched
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn previewing(&self) -> Option<&str> {
        self.preview.previewing()
    }

    fn write(&mut self, field: Field, value: String) {
        let vc = &mut self.draft.voice_characteristics;
        match field {
            Field::Title => self.draft.title = value,
            Field::Description => self.draft.description = value,
            Field::Prompt => self.draft.prompt = value,
            Field::FirstMessagePrompt => self.draft.first_message_prompt = value,
            Field::Voice => self.draft.voice = value,
            Field::Features => vc.features = value,
            Field::Emotion => vc.emotion = value,
            // Slider and number inputs hand over text; anything unparsable fails the rule.
            Field::PitchFactor => vc.pitch_factor = value.trim().parse().unwrap_or(f64::NAN),
        }
    }

    fn revalidate(&mut self, field: Field) {
        self.errors
            .record(field, validation::validate_field(field, &self.draft));
    }

    fn revalidate_if_touched(&mut self, field: Field) {
        if self.touched.contains(field) {
            self.revalidate(field);
        }
    }

    /// Overwrites one field of the draft.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.write(field, value.into());
        self.revalidate_if_touched(field);
    }

    /// Same contract as [`set_field`](Self::set_field), for the voice characteristics group.
    /// Fields outside that group are left untouched.
    pub fn set_voice_characteristic(&mut self, field: Field, value: impl Into<String>) {
        if !field.is_voice_characteristic() {
            tracing::warn!("{} is not a voice characteristic", field.name());
            return;
        }
        self.set_field(field, value);
    }

    pub fn set_pitch_factor(&mut self, value: f64) {
        self.draft.voice_characteristics.pitch_factor = value;
        self.revalidate_if_touched(Field::PitchFactor);
    }

    /// Marks the field as touched and validates it.
    pub fn blur(&mut self, field: Field) {
        self.touched.touch(field);
        self.revalidate(field);
    }

    /// Binds the draft to `voice` and plays its sample when one exists.
    pub fn select_voice(&mut self, voice: &VoiceOption) -> Option<PreviewTicket> {
        self.draft.provider = voice.provider;
        self.draft.voice = voice.id.to_string();
        self.revalidate_if_touched(Field::Voice);
        self.preview.start(voice.id, voice.provider)
    }

    pub fn preview_signal(&mut self, signal: PreviewSignal) -> bool {
        self.preview.handle(signal)
    }

    /// Applies queued signals in arrival order. Returns whether any cleared the marker.
    pub fn preview_signals(&mut self, signals: impl IntoIterator<Item = PreviewSignal>) -> bool {
        signals
            .into_iter()
            .fold(false, |cleared, signal| self.preview.handle(signal) || cleared)
    }

    pub fn stop_preview(&mut self) {
        self.preview.stop();
    }

    pub fn advance(&mut self) {
        self.step = Step::Voice;
    }

    pub fn retreat(&mut self) {
        self.step = Step::Personality;
    }

    /// Cheap gate for the submit button. The schema check in `begin_submit` is authoritative.
    pub fn can_submit(&self) -> bool {
        let d = &self.draft;
        !self.submitting
            && !d.title.is_empty()
            && !d.description.is_empty()
            && !d.prompt.is_empty()
            && !d.voice.is_empty()
            && !d.voice_characteristics.features.is_empty()
    }

    fn build_request(&self, user: &SessionUser) -> CreatePersonalityRequest {
        let d = &self.draft;
        let vc = &d.voice_characteristics;
        CreatePersonalityRequest {
            provider: d.provider,
            title: d.title.clone(),
            subtitle: String::new(),
            character_prompt: d.prompt.clone(),
            oai_voice: d.voice.clone(),
            voice_prompt: voice_prompt(&vc.features, &vc.emotion),
            is_doctor: false,
            is_child_voice: false,
            is_story: false,
            key: personality_key(&d.title),
            creator_id: user.user_id,
            short_description: d.description.clone(),
            pitch_factor: vc.pitch_factor,
            first_message_prompt: d.first_message_prompt.clone(),
        }
    }

    /// Validates the whole draft and, when it passes, enters the submitting window and
    /// returns the request to send. Pair with [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(
        &mut self,
        user: &SessionUser,
    ) -> Result<CreatePersonalityRequest, Rejection> {
        if self.submitting {
            return Err(Rejection::AlreadySubmitting);
        }
        self.submitting = true;

        let errors = validation::validate_draft(&self.draft);
        if !errors.is_empty() {
            tracing::debug!(
                "Character draft rejected: {:?}",
                errors.iter().map(|(f, _)| f.name()).collect::<Vec<_>>()
            );
            self.errors = errors;
            self.touched.touch_all();
            self.submitting = false;
            return Err(Rejection::Invalid);
        }

        self.errors = FieldErrors::default();
        Ok(self.build_request(user))
    }

    /// Applies the result of the create call started by `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<Personality, CreateError>) -> SubmitOutcome {
        match result {
            Ok(personality) => {
                tracing::info!("Created personality {}", personality.key);
                self.reset();
                SubmitOutcome::Created {
                    personality,
                    notification: Notification::success(
                        Some("New AI Character created"),
                        "Your character has been created!",
                    ),
                    navigate_to: Some(Destination::Home),
                }
            }
            Err(e) => {
                tracing::error!("Error creating personality: {}", e);
                self.submitting = false;
                SubmitOutcome::Failed {
                    notification: Notification::error(
                        Some("Error"),
                        "Failed to create your character. Please try again.",
                    ),
                }
            }
        }
    }

    pub async fn submit<C>(&mut self, creator: &C, user: &SessionUser) -> SubmitOutcome
    where
        C: PersonalityCreator + ?Sized,
    {
        let request = match self.begin_submit(user) {
            Ok(request) => request,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let result = creator.create_personality(request).await;
        self.finish_submit(result)
    }

    fn reset(&mut self) {
        self.preview.stop();
        self.step = Step::default();
        self.draft = CharacterDraft::default();
        self.touched = TouchedFields::default();
        self.errors = FieldErrors::default();
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::testing::RecordingCreator;
    use crate::models::{ModelProvider, NotificationVariant};
    use crate::preview::testing::FakeAudio;
    use crate::voices;
    use futures::executor::block_on;

    fn form() -> CharacterForm<FakeAudio> {
        CharacterForm::new(FakeAudio::default())
    }

    fn text(len: usize) -> String {
        "x".repeat(len)
    }

    /// Every field exactly at its minimum length.
    fn filled_form() -> CharacterForm<FakeAudio> {
        let mut form = form();
        form.set_field(Field::Title, "AI Hulk");
        form.set_field(Field::Description, text(50));
        form.set_field(Field::Prompt, text(100));
        form.set_field(Field::FirstMessagePrompt, text(50));
        form.set_field(Field::Voice, "nova");
        form.set_voice_characteristic(Field::Features, text(10));
        form.set_voice_characteristic(Field::Emotion, "neutral");
        form.set_voice_characteristic(Field::PitchFactor, "1.0");
        form
    }

    #[test]
    fn edits_before_first_blur_stay_silent() {
        let mut form = form();
        form.set_field(Field::Title, "A");
        form.set_field(Field::Description, "short");
        form.set_voice_characteristic(Field::PitchFactor, "9");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn blur_evaluates_regardless_of_prior_edits() {
        let mut form = form();
        form.set_field(Field::Title, "A");
        form.blur(Field::Title);
        assert_eq!(form.errors().get(Field::Title), Some("Minimum 2 characters"));

        let mut form = self::form();
        form.blur(Field::Voice);
        assert_eq!(
            form.errors().get(Field::Voice),
            Some("Voice selection is required")
        );
    }

    #[test]
    fn touched_field_revalidates_on_every_edit() {
        let mut form = form();
        form.blur(Field::Title);
        assert!(form.errors().title.is_some());

        form.set_field(Field::Title, "Ok");
        assert!(form.errors().title.is_none());

        form.set_field(Field::Title, text(51));
        assert_eq!(form.errors().get(Field::Title), Some("Maximum 50 characters"));
    }

    #[test]
    fn setting_same_value_twice_is_idempotent() {
        let mut once = form();
        once.blur(Field::Prompt);
        once.set_field(Field::Prompt, text(20));

        let mut twice = form();
        twice.blur(Field::Prompt);
        twice.set_field(Field::Prompt, text(20));
        twice.set_field(Field::Prompt, text(20));

        assert_eq!(once.errors(), twice.errors());
        assert_eq!(once.draft(), twice.draft());
    }

    #[test]
    fn pitch_text_is_coerced_before_validation() {
        let mut form = form();
        form.blur(Field::PitchFactor);
        assert!(form.errors().pitch_factor.is_none());

        form.set_voice_characteristic(Field::PitchFactor, "1.75");
        assert_eq!(
            form.errors().get(Field::PitchFactor),
            Some("Number must be less than or equal to 1.5")
        );

        form.set_voice_characteristic(Field::PitchFactor, "0.75");
        assert!(form.errors().pitch_factor.is_none());
        assert_eq!(form.draft().voice_characteristics.pitch_factor, 0.75);

        form.set_voice_characteristic(Field::PitchFactor, "loud");
        assert_eq!(form.errors().get(Field::PitchFactor), Some("Expected number"));

        form.set_pitch_factor(1.5);
        assert!(form.errors().pitch_factor.is_none());
    }

    #[test]
    fn select_voice_binds_provider_and_previews() {
        let mut form = form();
        let gemini = voices::find_voice("Kore").unwrap();
        assert_eq!(form.select_voice(gemini), None);
        assert_eq!(form.draft().provider, ModelProvider::Gemini);
        assert_eq!(form.draft().voice, "Kore");
        assert_eq!(form.previewing(), None);

        let openai = voices::find_voice("coral").unwrap();
        let ticket = form.select_voice(openai).unwrap();
        assert_eq!(form.draft().provider, ModelProvider::OpenAi);
        assert_eq!(form.previewing(), Some("coral"));

        // selecting does not count as touching
        assert!(!form.touched().voice);

        assert!(form.preview_signal(PreviewSignal::Ended(ticket)));
        assert_eq!(form.previewing(), None);
    }

    #[test]
    fn stale_failure_after_current_one_keeps_marker_cleared() {
        let mut form = form();
        let old = form.select_voice(voices::find_voice("alloy").unwrap()).unwrap();
        let current = form.select_voice(voices::find_voice("echo").unwrap()).unwrap();

        let cleared = form.preview_signals([
            PreviewSignal::Failed(current),
            PreviewSignal::Failed(old),
        ]);

        assert!(cleared);
        assert_eq!(form.previewing(), None);
    }

    #[test]
    fn queued_stale_signals_leave_current_preview() {
        let mut form = form();
        let old = form.select_voice(voices::find_voice("alloy").unwrap()).unwrap();
        form.select_voice(voices::find_voice("echo").unwrap());

        assert!(!form.preview_signals([PreviewSignal::Ended(old), PreviewSignal::TimedOut(old)]));
        assert_eq!(form.previewing(), Some("echo"));
    }

    #[test]
    fn voice_setter_ignores_other_fields() {
        let mut form = form();
        form.set_voice_characteristic(Field::Title, "AI Hulk");
        form.set_voice_characteristic(Field::Voice, "alloy");
        assert_eq!(form.draft().title, "");
        assert_eq!(form.draft().voice, "");

        form.set_voice_characteristic(Field::Features, "Deep and slow");
        assert_eq!(form.draft().voice_characteristics.features, "Deep and slow");
    }

    #[test]
    fn steps_move_without_validation() {
        let mut form = form();
        form.set_field(Field::Title, "A");
        form.advance();
        assert_eq!(form.step(), Step::Voice);
        form.retreat();
        assert_eq!(form.step(), Step::Personality);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submit_button_precheck_only_looks_for_blanks() {
        let mut form = filled_form();
        assert!(form.can_submit());

        // too long, but not blank
        form.set_field(Field::Title, text(80));
        assert!(form.can_submit());

        form.set_field(Field::Prompt, "");
        assert!(!form.can_submit());
    }

    #[test]
    fn minimal_valid_draft_is_created_and_reset() {
        let mut form = filled_form();
        form.advance();
        let creator = RecordingCreator::default();
        let user = SessionUser::new();

        let outcome = block_on(form.submit(&creator, &user));

        assert_eq!(creator.calls(), 1);
        let req = creator.last();
        assert_eq!(req.title, "AI Hulk");
        assert_eq!(req.pitch_factor, 1.0);
        assert_eq!(req.oai_voice, "nova");
        assert_eq!(req.provider, ModelProvider::OpenAi);
        assert!(req.voice_prompt.ends_with("should be neutral"));
        assert!(req.key.starts_with("ai_hulk_"));
        assert_eq!(req.creator_id, user.user_id);
        assert_eq!(req.subtitle, "");
        assert!(!req.is_doctor && !req.is_child_voice && !req.is_story);

        match outcome {
            SubmitOutcome::Created {
                notification,
                navigate_to,
                ..
            } => {
                assert_eq!(notification.title.as_deref(), Some("New AI Character created"));
                assert_eq!(navigate_to, Some(Destination::Home));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(form.draft(), &CharacterDraft::default());
        assert_eq!(form.step(), Step::Personality);
        assert!(!form.is_submitting());
    }

    #[test]
    fn one_char_title_blocks_submission() {
        let mut form = filled_form();
        form.set_field(Field::Title, "A");
        let creator = RecordingCreator::default();

        let outcome = block_on(form.submit(&creator, &SessionUser::new()));

        assert_eq!(outcome, SubmitOutcome::Rejected(Rejection::Invalid));
        assert_eq!(creator.calls(), 0);
        assert!(form.errors().get(Field::Title).unwrap().contains('2'));
        assert!(!form.is_submitting());
    }

    #[test]
    fn invalid_submit_reports_every_field_and_keeps_step() {
        let mut form = form();
        form.advance();
        let creator = RecordingCreator::default();

        block_on(form.submit(&creator, &SessionUser::new()));

        assert_eq!(creator.calls(), 0);
        assert_eq!(form.step(), Step::Voice);
        assert_eq!(form.errors().iter().count(), 6);
    }

    #[test]
    fn errors_clear_reactively_after_failed_submit() {
        let mut form = filled_form();
        form.set_field(Field::Description, "too short");
        block_on(form.submit(&RecordingCreator::default(), &SessionUser::new()));
        assert!(form.errors().description.is_some());

        form.set_field(Field::Description, text(60));
        assert!(form.errors().description.is_none());
    }

    #[test]
    fn remote_failure_keeps_draft_for_retry() {
        let mut form = filled_form();
        let before = form.draft().clone();
        let creator = RecordingCreator::failing();

        let outcome = block_on(form.submit(&creator, &SessionUser::new()));

        assert_eq!(creator.calls(), 1);
        let notification = outcome.notification().unwrap();
        assert_eq!(notification.variant, NotificationVariant::Destructive);
        assert_eq!(form.draft(), &before);
        assert!(!form.is_submitting());
        assert!(form.can_submit());
    }

    #[test]
    fn second_submit_during_flight_is_rejected() {
        let mut form = filled_form();
        let user = SessionUser::new();
        let request = form.begin_submit(&user).unwrap();
        assert!(form.is_submitting());
        assert!(!form.can_submit());

        assert_eq!(form.begin_submit(&user), Err(Rejection::AlreadySubmitting));

        let outcome = form.finish_submit(Ok(Personality::from_request(
            uuid::Uuid::new_v4(),
            request,
        )));
        assert!(matches!(outcome, SubmitOutcome::Created { .. }));
    }

    #[test]
    fn successful_submit_stops_preview() {
        let mut form = filled_form();
        form.select_voice(voices::find_voice("alloy").unwrap());
        block_on(form.submit(&RecordingCreator::default(), &SessionUser::new()));
        assert_eq!(form.previewing(), None);
    }
}
