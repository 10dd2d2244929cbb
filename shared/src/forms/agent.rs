use super::draft::AgentDraft;
use super::{CreateError, PersonalityCreator, Rejection, SubmitOutcome};
use crate::models::{
    CreatePersonalityRequest, ModelProvider, Notification, Personality, SessionUser,
    personality_key,
};
use crate::voices::DEFAULT_PITCH;

/// Modal form registering an existing ElevenLabs voice agent as a personality.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentRegistrationForm {
    open: bool,
    draft: AgentDraft,
    submitting: bool,
}

impl AgentRegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &AgentDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the modal and discards whatever was typed.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.draft = AgentDraft::default();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_agent_id(&mut self, agent_id: impl Into<String>) {
        self.draft.agent_id = agent_id.into();
    }

    fn build_request(&self, user: &SessionUser) -> CreatePersonalityRequest {
        CreatePersonalityRequest {
            provider: ModelProvider::ElevenLabs,
            title: self.draft.name.clone(),
            subtitle: String::new(),
            character_prompt: String::new(),
            oai_voice: self.draft.agent_id.clone(),
            voice_prompt: String::new(),
            is_doctor: false,
            is_child_voice: false,
            is_story: false,
            key: personality_key(&self.draft.name),
            creator_id: user.user_id,
            short_description: String::new(),
            pitch_factor: DEFAULT_PITCH,
            first_message_prompt: String::new(),
        }
    }

    pub fn begin_submit(
        &mut self,
        user: &SessionUser,
    ) -> Result<CreatePersonalityRequest, Rejection> {
        if self.submitting {
            return Err(Rejection::AlreadySubmitting);
        }
        if self.draft.name.is_empty() {
            return Err(Rejection::MissingRequired("name"));
        }
        if self.draft.agent_id.is_empty() {
            return Err(Rejection::MissingRequired("agentId"));
        }
        self.submitting = true;
        Ok(self.build_request(user))
    }

    pub fn finish_submit(&mut self, result: Result<Personality, CreateError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(personality) => {
                tracing::info!("Registered ElevenLabs agent {}", personality.oai_voice);
                self.dismiss();
                SubmitOutcome::Created {
                    personality,
                    notification: Notification::success(
                        None,
                        "ElevenLabs character added successfully!",
                    ),
                    navigate_to: None,
                }
            }
            Err(e) => {
                tracing::error!("Error creating ElevenLabs character: {}", e);
                SubmitOutcome::Failed {
                    notification: Notification::error(
                        None,
                        "Failed to create character. Please try again.",
                    ),
                }
            }
        }
    }

    /// Submits the form; `on_success` runs only after the record was created.
    pub async fn submit<C, F>(
        &mut self,
        creator: &C,
        user: &SessionUser,
        on_success: Option<F>,
    ) -> SubmitOutcome
    where
        C: PersonalityCreator + ?Sized,
        F: FnOnce(),
    {
        let request = match self.begin_submit(user) {
            Ok(request) => request,
            Err(rejection) => return SubmitOutcome::Rejected(rejection),
        };
        let outcome = self.finish_submit(creator.create_personality(request).await);
        if matches!(outcome, SubmitOutcome::Created { .. })
            && let Some(callback) = on_success
        {
            callback();
        }
        outcome
    }
}
