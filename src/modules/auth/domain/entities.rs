use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for registration limiter keys derived from emails
const REGISTRATION_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b3e_8d4a_5f60_9e71_a2b3_c4d5_e6f7);

/// Stable limiter key for an email, so registration attempts can be
/// counted before any account exists
pub fn registration_key(email: &str) -> Uuid {
    Uuid::new_v5(&REGISTRATION_NAMESPACE, email.trim().to_lowercase().as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub username: Option<String>,
    pub email_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_key_ignores_case_and_whitespace() {
        assert_eq!(
            registration_key(" User@Example.com "),
            registration_key("user@example.com")
        );
        assert_ne!(
            registration_key("a@example.com"),
            registration_key("b@example.com")
        );
    }
}
