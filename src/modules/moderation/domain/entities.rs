use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ModeratorRole"]
#[serde(rename_all = "lowercase")]
pub enum ModeratorRole {
    Admin,
    Moderator,
}

impl ModeratorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeratorRole::Admin => "admin",
            ModeratorRole::Moderator => "moderator",
        }
    }

    pub fn can_manage_moderators(&self) -> bool {
        matches!(self, ModeratorRole::Admin)
    }
}

impl fmt::Display for ModeratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A moderator grant.
///
/// `user_id` is text: it holds the auth user id, or the email itself when
/// the grant was made before that user had a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moderator {
    pub id: Uuid,
    pub user_id: String,
    pub email: String,
    pub role: ModeratorRole,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Moderator {
    pub fn new(
        user_id: String,
        email: String,
        role: ModeratorRole,
        created_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            role,
            created_by,
            created_at: now,
        }
    }

    /// Grant stored under an email because no profile existed yet
    pub fn is_placeholder(&self) -> bool {
        self.user_id == self.email
    }
}
