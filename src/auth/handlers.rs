use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            HybResponse, LoginRequest, LoginResponse, MessageResponse, ProfileResponse,
            ProfileUpdatedResponse, RegisterRequest, RegisterResponse,
            ResendVerificationRequest, SettingsUpdatedResponse, StatusResponse,
            UpdateProfileRequest, UpdateSettingsRequest, UsersResponse, VerifyEmailQuery,
            VerifyEmailResponse,
        },
        extractors::ApiJson,
        jwt::AuthUser,
        services,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/verify-email", get(verify_email))
        .route("/auth/resend-verification", post(resend_verification))
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/auth/hyb", get(get_hyb))
        .route("/auth/hyb/settings", put(update_settings))
        .route("/auth/users", get(list_users))
        .route("/auth/status", get(status))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let resp = services::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(services::login(&state, payload).await?))
}

#[instrument(skip(state, query))]
async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<Json<VerifyEmailResponse>, ApiError> {
    Ok(Json(services::verify_email(&state, query.token).await?))
}

#[instrument(skip(state, payload))]
async fn resend_verification(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    Ok(Json(services::resend_verification(&state, payload).await?))
}

#[instrument(skip(state))]
async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(services::get_profile(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    Ok(Json(
        services::update_profile(&state, user_id, payload).await?,
    ))
}

#[instrument(skip(state))]
async fn get_hyb(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<HybResponse>, ApiError> {
    Ok(Json(services::get_hyb(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
async fn update_settings(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<SettingsUpdatedResponse>, ApiError> {
    Ok(Json(
        services::update_hyb_settings(&state, user_id, payload).await?,
    ))
}

#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    Ok(Json(services::list_users(&state).await?))
}

#[instrument(skip(state))]
async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(services::status(&state).await?))
}
