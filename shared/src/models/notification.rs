use serde::{Deserialize, Serialize};

pub const DEFAULT_TOAST_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient, dismissable message shown after a form action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: Option<String>,
    pub description: String,
    pub variant: NotificationVariant,
    pub duration_ms: u32,
}

impl Notification {
    pub fn success(title: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            title: title.map(str::to_string),
            description: description.into(),
            variant: NotificationVariant::Default,
            duration_ms: DEFAULT_TOAST_MS,
        }
    }

    pub fn error(title: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Destructive,
            ..Self::success(title, description)
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
