//! Headless form controllers.
//!
//! UI hosts feed input events into these and render from their state. The remote
//! create call sits behind [`PersonalityCreator`] so hosts and tests can plug in
//! their own transport.

use crate::models::{CreatePersonalityRequest, Notification, Personality};
use async_trait::async_trait;
use thiserror::Error;

pub mod agent;
pub mod character;
pub mod draft;

pub use agent::AgentRegistrationForm;
pub use character::{CharacterForm, Step};
pub use draft::{AgentDraft, CharacterDraft, VoiceCharacteristics};

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Persists a new personality. Returns the stored record on success.
#[async_trait(?Send)]
pub trait PersonalityCreator {
    async fn create_personality(
        &self,
        request: CreatePersonalityRequest,
    ) -> Result<Personality, CreateError>;
}

/// Where the host should navigate after a successful create.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Home,
}

/// Why a submit never reached the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// One or more fields failed validation; errors are on the form.
    Invalid,
    /// A required field was blank.
    MissingRequired(&'static str),
    /// A create call from this form is already in flight.
    AlreadySubmitting,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Rejected(Rejection),
    Created {
        personality: Personality,
        notification: Notification,
        navigate_to: Option<Destination>,
    },
    Failed {
        notification: Notification,
    },
}

impl SubmitOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SubmitOutcome::Rejected(_) => None,
            SubmitOutcome::Created { notification, .. } | SubmitOutcome::Failed { notification } => {
                Some(notification)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use uuid::Uuid;

    /// Records every request and answers with a canned result.
    #[derive(Default)]
    pub struct RecordingCreator {
        pub requests: RefCell<Vec<CreatePersonalityRequest>>,
        pub fail: Cell<bool>,
    }

    impl RecordingCreator {
        pub fn failing() -> Self {
            let creator = Self::default();
            creator.fail.set(true);
            creator
        }

        pub fn calls(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last(&self) -> CreatePersonalityRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no create request was issued")
        }
    }

    #[async_trait(?Send)]
    impl PersonalityCreator for RecordingCreator {
        async fn create_personality(
            &self,
            request: CreatePersonalityRequest,
        ) -> Result<Personality, CreateError> {
            self.requests.borrow_mut().push(request.clone());
            if self.fail.get() {
                return Err(CreateError::Status(500));
            }
            Ok(Personality::from_request(Uuid::new_v4(), request))
        }
    }
}
