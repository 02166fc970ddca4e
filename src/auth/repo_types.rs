use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Account record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never exposed in JSON
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub verification_token: Option<String>,
    #[serde(skip_serializing, default, with = "time::serde::rfc3339::option")]
    pub verification_expires: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Per-account profile side-record, created alongside the account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub bio: String,
    pub avatar: String,
    pub social: serde_json::Value,      // {twitter, github, website}
    pub preferences: serde_json::Value, // theme/notification settings
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Per-account app-state side-record ("HYB"). `settings` and `temporary`
/// are free-form documents; the login-tracking fields are typed columns
/// because every successful login rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hyb {
    pub user_id: Uuid,
    pub settings: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub session_start: OffsetDateTime,
    pub login_count: i64,
    pub verified: bool,
    pub temporary: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_never_contains_credential_fields() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            email_verified: false,
            verification_token: Some("deadbeef".into()),
            verification_expires: Some(OffsetDateTime::now_utc()),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            email_verified: true,
            verification_token: None,
            verification_expires: None,
            created_at: OffsetDateTime::now_utc(),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }
}
