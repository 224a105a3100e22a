use serde::{Deserialize, Serialize};

use bloglist_core::{User, UserId};

/// A resolved, authenticated identity.
///
/// Built once per request from a verified token plus a user lookup; never
/// from client-supplied ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
}

impl Principal {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone())
    }
}
