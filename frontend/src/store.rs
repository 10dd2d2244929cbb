use gloo_storage::{LocalStorage, Storage};
use shared::forms::{Destination, SubmitOutcome};
use shared::models::*;
use std::rc::Rc;
use yew::prelude::*;

const SESSION_KEY: &str = "murti.session";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Create,
    Home,
}

impl From<Destination> for View {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Home => View::Home,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub user: SessionUser,
    pub view: View,
    pub personalities: Vec<Personality>,
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

/// Creator identity kept in local storage so records stay attributed across reloads.
fn load_session() -> SessionUser {
    LocalStorage::get(SESSION_KEY).unwrap_or_else(|_| {
        let user = SessionUser::new();
        if let Err(e) = LocalStorage::set(SESSION_KEY, &user) {
            tracing::warn!("Could not persist session: {:?}", e);
        }
        user
    })
}

impl Default for State {
    fn default() -> Self {
        Self {
            user: load_session(),
            view: View::Create,
            personalities: Vec::new(),
            toasts: Vec::new(),
            next_toast_id: 0,
        }
    }
}

pub enum Action {
    Navigate(View),
    SetPersonalities(Vec<Personality>),
    AddPersonality(Personality),
    Notify(Notification),
    DismissToast(u64),
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::Navigate(view) => {
                next.view = view;
            }
            Action::SetPersonalities(personalities) => {
                next.personalities = personalities;
            }
            Action::AddPersonality(personality) => {
                if !next.personalities.iter().any(|p| p.key == personality.key) {
                    next.personalities.push(personality);
                }
            }
            Action::Notify(notification) => {
                next.toasts.push(Toast {
                    id: next.next_toast_id,
                    notification,
                });
                next.next_toast_id += 1;
            }
            Action::DismissToast(id) => {
                next.toasts.retain(|t| t.id != id);
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;

/// Surfaces a submit result: toast, new record, and navigation when requested.
pub fn apply_outcome(store: &StoreContext, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Created {
            personality,
            notification,
            navigate_to,
        } => {
            store.dispatch(Action::AddPersonality(personality));
            store.dispatch(Action::Notify(notification));
            if let Some(destination) = navigate_to {
                store.dispatch(Action::Navigate(destination.into()));
            }
        }
        SubmitOutcome::Failed { notification } => {
            store.dispatch(Action::Notify(notification));
        }
        SubmitOutcome::Rejected(_) => {}
    }
}
