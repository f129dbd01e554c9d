use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
    services,
};
use crate::{auth::JwtKeys, error::ApiResult, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload?;
    let input = services::validate_registration(payload)?;
    services::register(state.repo.as_ref(), input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok("User registered successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    let creds = services::validate_login(payload)?;
    let keys = JwtKeys::from_ref(&state);
    let (user, token) = services::login(state.repo.as_ref(), &keys, creds).await?;
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user,
        token,
    }))
}
