use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, CredentialsRequest, PublicUser, UserEnvelope},
        extractors::{AuthSubject, RefreshSubject},
        jwt::{JwtKeys, Subject},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/session", get(session))
        .route("/auth/refresh", post(refresh))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    let digest = hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &digest).await?;

    let subject = Subject {
        id: user.id,
        username: user.username.clone(),
    };
    let tokens = JwtKeys::from_ref(&state).sign_pair(&subject)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(AuthResponse {
        status: "ok",
        user: PublicUser::from(&user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    // Unknown username and wrong password collapse into the same outcome
    // so the response does not enumerate accounts.
    let user = User::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %payload.username, "login unknown username");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let subject = Subject {
        id: user.id,
        username: user.username.clone(),
    };
    let tokens = JwtKeys::from_ref(&state).sign_pair(&subject)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse {
        status: "ok",
        user: PublicUser::from(&user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

#[instrument(skip(state, subject))]
pub async fn session(
    State(state): State<AppState>,
    AuthSubject(subject): AuthSubject,
) -> Result<Json<UserEnvelope>, ApiError> {
    // The token may outlive the account; re-fetch before trusting it.
    let user = User::find_by_id(&state.db, subject.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(UserEnvelope {
        status: "ok",
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state, subject))]
pub async fn refresh(
    State(state): State<AppState>,
    RefreshSubject(subject): RefreshSubject,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = User::find_by_id(&state.db, subject.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    // Rotation: every refresh yields a brand-new pair. The old refresh
    // token is not revoked and stays valid until its own expiry.
    let subject = Subject {
        id: user.id,
        username: user.username.clone(),
    };
    let tokens = JwtKeys::from_ref(&state).sign_pair(&subject)?;

    info!(user_id = %user.id, "tokens refreshed");
    Ok(Json(AuthResponse {
        status: "ok",
        user: PublicUser::from(&user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}
