use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in creator. Records created from the form are attributed to this id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Uuid,
}

impl SessionUser {
    pub fn new() -> Self {
        Self {
            user_id: Uuid::new_v4(),
        }
    }
}

impl Default for SessionUser {
    fn default() -> Self {
        Self::new()
    }
}
