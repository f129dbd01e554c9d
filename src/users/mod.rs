use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

/// Routes mounted under `/user`.
pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
