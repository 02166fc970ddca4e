use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{Hyb, Profile, User};

/// Request body for registration. Fields default to empty so a missing field
/// surfaces as our own "required fields" validation error, not a 422 from
/// the JSON extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: Option<String>,
}

/// Partial profile update; absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub social: Option<serde_json::Value>,
    pub preferences: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub settings: Option<serde_json::Value>,
}

/// Public part of an account returned to clients; never carries the
/// password hash or the verification token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_email_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for AccountSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            is_email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub data: AccountSummary,
    pub token: String,
    pub email_sent: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub data: AccountSummary,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: AccountSummary,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Profile view: account identity enriched with the profile side-record.
/// `display_name` falls back to "first last" when the profile never set one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub display_name: String,
    pub is_email_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub profile: Option<Profile>,
}

impl ProfileData {
    pub fn new(user: &User, profile: Option<Profile>) -> Self {
        let display_name = profile
            .as_ref()
            .and_then(|p| p.display_name.clone())
            .unwrap_or_else(|| user.full_name());
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            display_name,
            is_email_verified: user.email_verified,
            created_at: user.created_at,
            profile,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub data: ProfileData,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub data: Profile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HybAppState {
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub session_start: OffsetDateTime,
    pub login_count: i64,
    pub is_verified: bool,
}

/// HYB document as clients expect it: settings + live app-state + scratch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HybData {
    pub user_id: Uuid,
    pub settings: serde_json::Value,
    pub app_state: HybAppState,
    pub temporary: serde_json::Value,
}

impl From<Hyb> for HybData {
    fn from(hyb: Hyb) -> Self {
        Self {
            user_id: hyb.user_id,
            settings: hyb.settings,
            app_state: HybAppState {
                last_login: hyb.last_login,
                session_start: hyb.session_start,
                login_count: hyb.login_count,
                is_verified: hyb.verified,
            },
            temporary: hyb.temporary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HybResponse {
    pub success: bool,
    pub data: HybData,
}

#[derive(Debug, Serialize)]
pub struct SettingsUpdatedResponse {
    pub success: bool,
    pub message: String,
    pub data: HybData,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<AccountSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub status: String,
    pub user_count: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub database: DatabaseStatus,
}
