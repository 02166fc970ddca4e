use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
mod verify_token;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
