use axum::extract::FromRef;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{
            AccountSummary, DatabaseStatus, HybData, HybResponse, LoginRequest, LoginResponse,
            MessageResponse, ProfileData, ProfileResponse, ProfileUpdatedResponse,
            RegisterRequest, RegisterResponse, ResendVerificationRequest,
            SettingsUpdatedResponse, StatusResponse, UpdateProfileRequest, UpdateSettingsRequest,
            UsersResponse, VerifyEmailResponse,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{NewUser, ProfileChanges},
        repo_types::{Hyb, Profile, User},
        verify_token::VerificationToken,
    },
    error::ApiError,
    mailer::send_verification_email,
    state::AppState,
};

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Input checks for registration, in the order clients expect them to fire:
/// required fields, password match, password length.
fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    if req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(ApiError::validation("All required fields must be filled"));
    }
    if req.password != req.confirm_password {
        return Err(ApiError::validation(
            "Password and confirmation do not match",
        ));
    }
    if req.password.len() < 6 {
        return Err(ApiError::validation(
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

pub async fn register(
    state: &AppState,
    req: RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    validate_registration(&req)?;

    let email = normalize_email(&req.email);

    // Friendly-path pre-check; the unique index still decides races.
    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::conflict("This email is already registered"));
    }

    let password_hash = hash_password(&req.password)?;
    let verification = VerificationToken::generate();

    let user = User::create_with_side_records(
        &state.db,
        NewUser {
            first_name: req.first_name.trim(),
            last_name: req.last_name.trim(),
            email: &email,
            password_hash: &password_hash,
            verification_token: &verification.token,
            verification_expires: verification.expires_at,
        },
    )
    .await?;

    let token = JwtKeys::from_ref(state).sign(user.id)?;

    let email_sent = send_verification_email(state, &user.email, &verification.token).await;

    info!(user_id = %user.id, email = %user.email, email_sent, "user registered");
    Ok(RegisterResponse {
        success: true,
        message: if email_sent {
            "Registration successful! Please check your email for verification.".into()
        } else {
            "Registration successful! But verification email failed to send.".into()
        },
        data: AccountSummary::from(&user),
        token,
        email_sent,
    })
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let email = normalize_email(&req.email);

    // Unknown email and wrong password must be indistinguishable.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(%email, "login unknown email");
            ApiError::auth("Invalid email or password")
        })?;

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::auth("Invalid email or password"));
    }

    if !user.email_verified {
        warn!(user_id = %user.id, "login before email verification");
        return Err(ApiError::forbidden(
            "Please verify your email first. A verification email has been sent to you.",
        ));
    }

    Hyb::record_login(&state.db, user.id, user.email_verified).await?;

    let token = JwtKeys::from_ref(state).sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        success: true,
        message: "Login successful!".into(),
        data: AccountSummary::from(&user),
        token,
    })
}

pub async fn verify_email(
    state: &AppState,
    token: Option<String>,
) -> Result<VerifyEmailResponse, ApiError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Verification link is invalid or expired"))?;

    let user = User::find_by_verification_token(&state.db, &token)
        .await?
        .ok_or_else(|| {
            warn!("verification token invalid or expired");
            ApiError::validation("Verification link is invalid or expired")
        })?;

    let user = User::mark_verified(&state.db, user.id).await?;

    let session_token = JwtKeys::from_ref(state).sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "email verified");
    Ok(VerifyEmailResponse {
        success: true,
        message: "Your email has been successfully verified!".into(),
        token: session_token,
        user: AccountSummary::from(&user),
    })
}

pub async fn resend_verification(
    state: &AppState,
    req: ResendVerificationRequest,
) -> Result<MessageResponse, ApiError> {
    if req.email.trim().is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    let email = normalize_email(&req.email);

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::not_found("User with this email not found"))?;

    if user.email_verified {
        return Err(ApiError::validation("Your email is already verified"));
    }

    let verification = VerificationToken::generate();
    User::reset_verification_token(
        &state.db,
        user.id,
        &verification.token,
        verification.expires_at,
    )
    .await?;

    let email_sent = send_verification_email(state, &user.email, &verification.token).await;

    info!(user_id = %user.id, email_sent, "verification email resent");
    Ok(MessageResponse {
        success: true,
        message: if email_sent {
            "Verification email resent successfully".into()
        } else {
            "Failed to send verification email".into()
        },
    })
}

pub async fn get_profile(state: &AppState, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let profile = Profile::find_by_user(&state.db, user.id).await?;

    Ok(ProfileResponse {
        success: true,
        data: ProfileData::new(&user, profile),
    })
}

pub async fn update_profile(
    state: &AppState,
    user_id: Uuid,
    req: UpdateProfileRequest,
) -> Result<ProfileUpdatedResponse, ApiError> {
    let profile = Profile::update(
        &state.db,
        user_id,
        ProfileChanges {
            display_name: req.display_name,
            bio: req.bio,
            avatar: req.avatar,
            social: req.social,
            preferences: req.preferences,
        },
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    info!(user_id = %user_id, "profile updated");
    Ok(ProfileUpdatedResponse {
        success: true,
        message: "Profile updated successfully".into(),
        data: profile,
    })
}

pub async fn get_hyb(state: &AppState, user_id: Uuid) -> Result<HybResponse, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    // Registration always creates the row; 404 here only after a partial
    // failure that the login upsert has not repaired yet.
    let hyb = Hyb::find_by_user(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("HYB data not found"))?;

    Ok(HybResponse {
        success: true,
        data: HybData::from(hyb),
    })
}

pub async fn update_hyb_settings(
    state: &AppState,
    user_id: Uuid,
    req: UpdateSettingsRequest,
) -> Result<SettingsUpdatedResponse, ApiError> {
    let settings = req
        .settings
        .ok_or_else(|| ApiError::validation("Settings object is required"))?;

    let hyb = Hyb::update_settings(&state.db, user_id, settings)
        .await?
        .ok_or_else(|| ApiError::not_found("HYB data not found"))?;

    info!(user_id = %user_id, "hyb settings updated");
    Ok(SettingsUpdatedResponse {
        success: true,
        message: "Settings updated successfully".into(),
        data: HybData::from(hyb),
    })
}

pub async fn list_users(state: &AppState) -> Result<UsersResponse, ApiError> {
    let users = User::list_newest_first(&state.db).await?;
    let data: Vec<AccountSummary> = users.iter().map(AccountSummary::from).collect();
    Ok(UsersResponse {
        success: true,
        count: data.len(),
        data,
    })
}

/// Health of the store as seen from this process. An unreachable database
/// reports "Disconnected" rather than a 500, since this endpoint exists to
/// be polled when things are broken.
pub async fn status(state: &AppState) -> Result<StatusResponse, ApiError> {
    let database = match User::count(&state.db).await {
        Ok(user_count) => DatabaseStatus {
            status: "Connected".into(),
            user_count,
        },
        Err(e) => {
            warn!(error = %e, "database status check failed");
            DatabaseStatus {
                status: "Disconnected".into(),
                user_count: 0,
            }
        }
    };
    Ok(StatusResponse {
        success: true,
        database,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req(
        first: &str,
        last: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> RegisterRequest {
        RegisterRequest {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email("  A@B.Com "), "a@b.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn registration_requires_all_fields() {
        let err =
            validate_registration(&register_req("", "Lovelace", "a@b.com", "secret1", "secret1"))
                .unwrap_err();
        assert_eq!(err.to_string(), "All required fields must be filled");

        let err = validate_registration(&register_req("Ada", "Lovelace", "a@b.com", "secret1", ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "All required fields must be filled");
    }

    #[test]
    fn registration_rejects_password_mismatch_before_length() {
        // A mismatched short pair reports the mismatch, not the length.
        let err = validate_registration(&register_req("Ada", "Lovelace", "a@b.com", "abc", "abd"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Password and confirmation do not match");
    }

    #[test]
    fn registration_rejects_short_password() {
        let err =
            validate_registration(&register_req("Ada", "Lovelace", "a@b.com", "abc12", "abc12"))
                .unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert!(validate_registration(&register_req(
            "Ada", "Lovelace", "a@b.com", "abc123", "abc123"
        ))
        .is_ok());
    }

    #[tokio::test]
    async fn login_rejects_missing_fields() {
        let state = AppState::fake();
        let err = login(
            &state,
            LoginRequest {
                email: "".into(),
                password: "".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Email and password are required");
    }

    #[tokio::test]
    async fn verify_email_rejects_missing_token() {
        let state = AppState::fake();
        let err = verify_email(&state, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Verification link is invalid or expired");
        let err = verify_email(&state, Some(String::new())).await.unwrap_err();
        assert_eq!(err.to_string(), "Verification link is invalid or expired");
    }

    #[tokio::test]
    async fn settings_update_requires_a_settings_object() {
        let state = AppState::fake();
        let err = update_hyb_settings(
            &state,
            Uuid::new_v4(),
            UpdateSettingsRequest { settings: None },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Settings object is required");
    }

    #[tokio::test]
    async fn status_reports_disconnected_instead_of_failing() {
        let state = AppState::fake();
        let resp = status(&state).await.expect("status never errors");
        assert!(resp.success);
        assert!(matches!(
            resp.database.status.as_str(),
            "Connected" | "Disconnected"
        ));
    }

    #[tokio::test]
    async fn resend_rejects_missing_email() {
        let state = AppState::fake();
        let err = resend_verification(
            &state,
            ResendVerificationRequest {
                email: "   ".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }
}
